//! Init command implementation.
//!
//! Writes the builtin batch as an editable `atlas-extract.yaml`.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{ExtractError, Result};
use crate::manifest::{Manifest, MANIFEST_FILENAME};
use crate::output::{display_path, plural, Printer};

/// Write the builtin batch as atlas-extract.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing atlas-extract.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(ExtractError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let manifest = Manifest::builtin();
    fs::write(&manifest_path, manifest.to_yaml()?).map_err(|e| ExtractError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    printer.status(
        "Created",
        &format!(
            "{} ({}, {})",
            display_path(&manifest_path),
            plural(manifest.atlases.len(), "atlas", "atlases"),
            plural(manifest.sprite_count(), "sprite", "sprites")
        ),
    );

    Ok(())
}
