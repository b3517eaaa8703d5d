//! List command implementation.
//!
//! Prints the frames of an atlas and the sheet it resolves to.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::atlas::{resolve_sheet, Atlas, Rect, Size};
use crate::error::{ExtractError, Result};
use crate::output::{display_path, plural, Printer};

/// List the frames of an atlas
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Atlas property list (.plist)
    pub plist: PathBuf,

    /// Sheet image, tried after the one named in the atlas metadata
    #[arg(long)]
    pub sheet: Option<PathBuf>,

    /// Write a JSON document to stdout instead of status lines
    #[arg(long)]
    pub json: bool,
}

/// Machine-readable atlas inventory.
#[derive(Debug, Serialize)]
pub struct AtlasListing {
    pub atlas: PathBuf,
    pub sheet: Option<PathBuf>,
    pub frames: Vec<FrameListing>,
}

#[derive(Debug, Serialize)]
pub struct FrameListing {
    pub name: String,
    pub frame: Rect,
    pub rotated: bool,
    pub source_size: Size,
    pub source_color_rect: Rect,
}

/// Build the listing, failing on the first frame whose geometry does not parse.
pub fn listing(atlas: &Atlas, sheet: Option<PathBuf>) -> Result<AtlasListing> {
    let frames = atlas
        .frames()
        .map(|f| {
            f.map(|f| FrameListing {
                name: f.name,
                frame: f.rect,
                rotated: f.rotated,
                source_size: f.source_size,
                source_color_rect: f.color_rect,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AtlasListing {
        atlas: atlas.path.clone(),
        sheet,
        frames,
    })
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let atlas = Atlas::load(&args.plist)?;
    let sheet = resolve_sheet(&args.plist, &atlas.metadata, args.sheet.as_deref()).ok();
    let listing = listing(&atlas, sheet)?;

    if args.json {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &listing).map_err(|e| ExtractError::Build {
            message: format!("Failed to write JSON: {}", e),
            help: None,
        })?;
        writeln!(stdout)?;
        return Ok(());
    }

    match &listing.sheet {
        Some(sheet) => printer.info("Sheet", &display_path(sheet)),
        None => printer.warning("Sheet", "not found"),
    }
    for frame in &listing.frames {
        let rotated = if frame.rotated { " rotated" } else { "" };
        printer.info(
            "Frame",
            &format!(
                "{} {}{} {}",
                frame.name,
                frame.frame,
                rotated,
                printer.dim(&format!("source {}", frame.source_size))
            ),
        );
    }
    printer.info("Finished", &plural(listing.frames.len(), "frame", "frames"));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::fixtures::xml_plist;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::Path;

    #[test]
    fn test_listing_json_shape() {
        let xml = xml_plist(
            Some("ui.png"),
            &[
                ("b.png", "{{4,0},{2,3}}", true, "{4,4}", "{{1,0},{2,3}}"),
                ("a.png", "{{0,0},{4,4}}", false, "{4,4}", "{{0,0},{4,4}}"),
            ],
        );
        let atlas = Atlas::from_bytes(Path::new("ui.plist"), xml.as_bytes()).unwrap();

        let value = serde_json::to_value(listing(&atlas, None).unwrap()).unwrap();

        assert_eq!(
            value["frames"][1],
            json!({
                "name": "b.png",
                "frame": { "x": 4, "y": 0, "w": 2, "h": 3 },
                "rotated": true,
                "source_size": { "w": 4, "h": 4 },
                "source_color_rect": { "x": 1, "y": 0, "w": 2, "h": 3 },
            })
        );
        assert_eq!(value["frames"][0]["name"], "a.png");
        assert!(value["sheet"].is_null());
    }
}
