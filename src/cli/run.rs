//! Run command implementation.
//!
//! Executes the batch described by atlas-extract.yaml, or the builtin batch.

use std::path::PathBuf;

use clap::Args;

use super::ToolArgs;
use crate::batch::run_batch;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::output::{display_path, Printer};

/// Run the extraction batch
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Manifest to use instead of <root>/atlas-extract.yaml
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,

    /// Project root that manifest paths are relative to
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    #[command(flatten)]
    pub tool: ToolArgs,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            manifest: None,
            root: PathBuf::from("."),
            tool: ToolArgs::default(),
        }
    }
}

pub fn run(args: RunArgs, printer: &Printer) -> Result<()> {
    let (manifest, source) = Manifest::discover(&args.root, args.manifest.as_deref())?;

    match &source {
        Some(path) => printer.info("Manifest", &display_path(path)),
        None => printer.info("Manifest", "builtin jackpot batch"),
    }

    let tool = args.tool.build(&manifest.tool);
    run_batch(&manifest, &args.root, tool.as_ref(), args.tool.dry_run, printer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::MANIFEST_FILENAME;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_run_dry_run_from_manifest() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("ui.plist"),
            crate::atlas::fixtures::xml_plist(
                Some("ui.png"),
                &[("ok.png", "{{0,0},{2,2}}", false, "{2,2}", "{{0,0},{2,2}}")],
            ),
        )
        .unwrap();
        image::RgbaImage::new(2, 2).save(dir.path().join("ui.png")).unwrap();
        fs::write(dir.path().join("glow.png"), b"glow").unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILENAME),
            "output: out\natlases:\n  - plist: ui.plist\n    names: [ok.png]\ncopies:\n  - from: glow.png\n    to: out/glow.png\n",
        )
        .unwrap();

        let args = RunArgs {
            root: dir.path().to_path_buf(),
            tool: ToolArgs {
                tool: None,
                dry_run: true,
            },
            ..Default::default()
        };

        run(args, &Printer::plain()).unwrap();

        assert!(!dir.path().join("out").exists());
        assert_eq!(fs::read(dir.path().join("glow.png")).unwrap(), b"glow");
    }

    #[test]
    fn test_run_explicit_manifest_missing() {
        let dir = tempdir().unwrap();
        let args = RunArgs {
            manifest: Some(dir.path().join("nope.yaml")),
            root: dir.path().to_path_buf(),
            ..Default::default()
        };

        assert!(run(args, &Printer::plain()).is_err());
    }
}
