//! Batch driver: every atlas export of a manifest, then its verbatim copies.
//!
//! Runs strictly in order and stops at the first error.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExtractError, Result};
use crate::export::{export_sprites, ImageTool};
use crate::manifest::Manifest;
use crate::output::{display_path, plural, Printer};

/// What a batch run produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub sprites: Vec<PathBuf>,
    pub copies: Vec<PathBuf>,
}

/// Copy `from` to `to`, creating the destination directory.
///
/// In dry-run mode nothing is touched beyond checking that the source exists.
pub fn copy_file(from: &Path, to: &Path, dry_run: bool) -> Result<()> {
    if !from.is_file() {
        return Err(ExtractError::Io {
            path: from.to_path_buf(),
            message: "Copy source not found".to_string(),
        });
    }
    if dry_run {
        return Ok(());
    }

    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|e| ExtractError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    fs::copy(from, to).map_err(|e| ExtractError::Io {
        path: to.to_path_buf(),
        message: format!("Failed to copy {}: {}", display_path(from), e),
    })?;

    Ok(())
}

/// Run every export and copy in `manifest`, resolving paths against `root`.
pub fn run_batch(
    manifest: &Manifest,
    root: &Path,
    tool: &dyn ImageTool,
    dry_run: bool,
    printer: &Printer,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for request in manifest.requests(root) {
        if request.names.is_empty() {
            printer.warning(
                "Warning",
                &format!("{} lists no sprites", display_path(&request.atlas)),
            );
        }
        summary.sprites.extend(export_sprites(&request, tool, printer)?);
    }

    for (from, to) in manifest.copy_pairs(root) {
        printer.status(
            "Copying",
            &format!("{} {} {}", display_path(&from), printer.dim("->"), display_path(&to)),
        );
        copy_file(&from, &to, dry_run)?;
        summary.copies.push(to);
    }

    printer.info(
        "Finished",
        &format!(
            "{}, {}{}",
            plural(summary.sprites.len(), "sprite", "sprites"),
            plural(summary.copies.len(), "copy", "copies"),
            if dry_run { " (dry run)" } else { "" }
        ),
    );

    Ok(summary)
}
