//! External image tool invocation.
//!
//! All pixel work (decoding, cropping, rotation, compositing) is done by
//! ImageMagick. This module only builds its argument list and runs it.

use std::fs;
use std::io::{self, Write};
use std::process::Command;

use super::plan::SpritePlan;
use crate::error::{ExtractError, Result};

/// Default ImageMagick program. ImageMagick 7 users can pass `magick`.
pub const DEFAULT_TOOL: &str = "convert";

/// Something that turns a [`SpritePlan`] into an output image.
pub trait ImageTool {
    /// Program name, used in messages.
    fn program(&self) -> &str;

    /// Produce `plan.target`.
    fn write(&self, plan: &SpritePlan) -> Result<()>;
}

/// ImageMagick arguments for one sprite.
///
/// Builds a transparent canvas of the untrimmed size, crops the stored
/// region, turns it upright, optionally keys out black, then composites it
/// at the trim offset.
pub fn magick_args(plan: &SpritePlan) -> Vec<String> {
    let crop = plan.crop;
    let mut args = vec![
        "-size".to_string(),
        plan.canvas.to_string(),
        "xc:none".to_string(),
        "(".to_string(),
        plan.sheet.display().to_string(),
        "-crop".to_string(),
        format!("{}x{}+{}+{}", crop.w, crop.h, crop.x, crop.y),
        "+repage".to_string(),
    ];

    if let Some(angle) = plan.rotation {
        args.push("-rotate".to_string());
        args.push(angle.to_string());
    }

    if plan.key_out_black {
        args.extend(["-alpha", "on", "-transparent", "black"].map(String::from));
    }

    args.extend([
        ")".to_string(),
        "-geometry".to_string(),
        format!("{:+}{:+}", plan.offset.0, plan.offset.1),
        "-compose".to_string(),
        "over".to_string(),
        "-composite".to_string(),
        plan.target.display().to_string(),
    ]);

    args
}

/// Render a command line for display, quoting arguments the shell would mangle.
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program.to_string())
        .chain(args.iter().map(|a| shell_quote(a)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./+:=,@%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Runs ImageMagick as a child process, one blocking invocation per sprite.
#[derive(Debug, Clone)]
pub struct MagickTool {
    program: String,
}

impl MagickTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[cfg(test)]
impl MagickTool {
    /// Check that the program can be spawned at all.
    pub(crate) fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl Default for MagickTool {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL)
    }
}

impl ImageTool for MagickTool {
    fn program(&self) -> &str {
        &self.program
    }

    fn write(&self, plan: &SpritePlan) -> Result<()> {
        if let Some(parent) = plan.target.parent() {
            fs::create_dir_all(parent).map_err(|e| ExtractError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }

        let output = Command::new(&self.program)
            .args(magick_args(plan))
            .output()
            .map_err(|e| ExtractError::Tool {
                program: self.program.clone(),
                target: plan.target.clone(),
                message: format!("failed to run: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Tool {
                program: self.program.clone(),
                target: plan.target.clone(),
                message: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        Ok(())
    }
}

/// Prints each command line to stdout instead of running it.
#[derive(Debug, Clone)]
pub struct DryRun {
    program: String,
}

impl DryRun {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ImageTool for DryRun {
    fn program(&self) -> &str {
        &self.program
    }

    fn write(&self, plan: &SpritePlan) -> Result<()> {
        let line = command_line(&self.program, &magick_args(plan));
        writeln!(io::stdout().lock(), "{}", line)?;
        Ok(())
    }
}
