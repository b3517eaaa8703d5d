//! Export command implementation.
//!
//! One-off export of named sprites from a single atlas.

use std::path::PathBuf;

use clap::Args;

use super::ToolArgs;
use crate::error::{ExtractError, Result};
use crate::export::{export_sprites, ExportRequest, DEFAULT_TOOL};
use crate::output::{display_path, plural, Printer};

/// Export sprites from one atlas
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Atlas property list (.plist)
    pub plist: PathBuf,

    /// Sprite names to export
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Sheet image, tried after the one named in the atlas metadata
    #[arg(long)]
    pub sheet: Option<PathBuf>,

    /// Export NAME from the frame SOURCE (NAME=SOURCE)
    #[arg(long = "alias", value_name = "NAME=SOURCE", value_parser = parse_alias)]
    pub aliases: Vec<(String, String)>,

    /// Output directory
    #[arg(long, short, default_value = "web/assets")]
    pub output: PathBuf,

    #[command(flatten)]
    pub tool: ToolArgs,
}

/// Parse a `NAME=SOURCE` alias.
fn parse_alias(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((name, source)) if !name.is_empty() && !source.is_empty() => {
            Ok((name.to_string(), source.to_string()))
        }
        _ => Err(ExtractError::Parse {
            message: format!("Invalid alias '{}': expected NAME=SOURCE", s),
            help: Some("For example: --alias glow.png=bg_glow.png".to_string()),
        }),
    }
}

pub fn run(args: ExportArgs, printer: &Printer) -> Result<()> {
    let mut request = ExportRequest::new(&args.plist, &args.output).with_names(args.names);
    if let Some(sheet) = args.sheet {
        request = request.with_sheet(sheet);
    }
    for (name, source) in args.aliases {
        request = request.with_alias(name, source);
    }

    let tool = args.tool.build(DEFAULT_TOOL);
    let written = export_sprites(&request, tool.as_ref(), printer)?;

    printer.info(
        "Finished",
        &format!(
            "{} to {}",
            plural(written.len(), "sprite", "sprites"),
            display_path(&args.output)
        ),
    );

    Ok(())
}
