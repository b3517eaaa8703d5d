//! Sprite export: turn requested names into output images.
//!
//! Every requested sprite is planned before the image tool runs, so a
//! missing name fails the whole export with nothing written.

mod plan;
mod tool;

pub use plan::{SpritePlan, UPRIGHT_ROTATION};
pub use tool::{command_line, magick_args, DryRun, ImageTool, MagickTool, DEFAULT_TOOL};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::atlas::{resolve_sheet, Atlas, Size};
use crate::error::{ExtractError, Result};
use crate::output::{display_path, plural, Printer};

/// One atlas worth of sprites to export.
#[derive(Debug, Clone, Default)]
pub struct ExportRequest {
    pub atlas: PathBuf,
    /// Explicit sheet image, tried after the metadata-declared one.
    pub sheet: Option<PathBuf>,
    pub names: Vec<String>,
    /// Output name → descriptor frame name.
    pub aliases: BTreeMap<String, String>,
    pub output: PathBuf,
}

impl ExportRequest {
    pub fn new(atlas: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            atlas: atlas.into(),
            output: output.into(),
            ..Default::default()
        }
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sheet(mut self, sheet: impl Into<PathBuf>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    pub fn with_alias(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.aliases.insert(name.into(), source.into());
        self
    }

    /// Descriptor name for a requested sprite.
    pub fn source_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }
}

/// Build a plan for every requested name against an already loaded atlas.
pub fn plan_sprites(
    request: &ExportRequest,
    atlas: &Atlas,
    sheet: &Path,
) -> Result<Vec<SpritePlan>> {
    request
        .names
        .iter()
        .map(|name| -> Result<SpritePlan> {
            let source = request.source_name(name);
            let frame = atlas
                .frame(source)?
                .ok_or_else(|| missing_sprite(request, atlas, name))?;
            Ok(SpritePlan::new(name, &frame, sheet, &request.output))
        })
        .collect()
}

fn missing_sprite(request: &ExportRequest, atlas: &Atlas, name: &str) -> ExtractError {
    let source = request.source_name(name);
    let help = if source != name {
        format!("'{}' is aliased to '{}', which the atlas does not define", name, source)
    } else {
        let mut close: Vec<&str> = atlas
            .names()
            .filter(|n| n.eq_ignore_ascii_case(name) || strip_ext(n) == strip_ext(name))
            .collect();
        close.truncate(3);
        if close.is_empty() {
            format!("The atlas defines {}", plural(atlas.len(), "frame", "frames"))
        } else {
            format!("Did you mean: {}?", close.join(", "))
        }
    };

    ExtractError::MissingSprite {
        name: name.to_string(),
        atlas: atlas.path.clone(),
        help: Some(help),
    }
}

fn strip_ext(name: &str) -> &str {
    name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name)
}

/// Export the requested sprites of one atlas through `tool`.
///
/// Returns the written target paths in request order.
pub fn export_sprites(
    request: &ExportRequest,
    tool: &dyn ImageTool,
    printer: &Printer,
) -> Result<Vec<PathBuf>> {
    printer.status("Loading", &display_path(&request.atlas));
    let atlas = Atlas::load(&request.atlas)?;

    let sheet = resolve_sheet(&request.atlas, &atlas.metadata, request.sheet.as_deref())?;
    printer.info("Resolved", &format!("sheet {}", display_path(&sheet)));

    let plans = plan_sprites(request, &atlas, &sheet)?;
    warn_out_of_bounds(&plans, &sheet, printer);

    for plan in &plans {
        let label = if plan.source_name != plan.name {
            format!("{} {} {}", plan.name, printer.dim("<-"), plan.source_name)
        } else {
            plan.name.clone()
        };
        printer.status("Exporting", &format!("{} ({})", label, plan.canvas));
        printer.verbose(
            "Running",
            &command_line(tool.program(), &magick_args(plan)),
        );
        tool.write(plan)?;
    }

    Ok(plans.into_iter().map(|p| p.target).collect())
}

/// Warn about crops that reach past the sheet edges. Unreadable sheets are skipped.
fn warn_out_of_bounds(plans: &[SpritePlan], sheet: &Path, printer: &Printer) {
    let Ok((w, h)) = image::image_dimensions(sheet) else {
        printer.verbose("Skipping", &format!("bounds check, cannot read {}", display_path(sheet)));
        return;
    };
    let sheet_size = Size::new(w as i32, h as i32);

    for plan in plans.iter().filter(|p| !p.fits_within(sheet_size)) {
        printer.warning(
            "Warning",
            &format!(
                "{} crop {}x{}+{}+{} exceeds sheet size {}",
                plan.name, plan.crop.w, plan.crop.h, plan.crop.x, plan.crop.y, sheet_size
            ),
        );
    }
}
