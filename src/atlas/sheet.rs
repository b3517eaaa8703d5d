//! Sheet image resolution.

use std::path::{Path, PathBuf};

use super::descriptor::Metadata;
use crate::error::{ExtractError, Result};

/// Extensions tried next to the atlas when nothing else names a sheet.
const GUESS_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// True for `.jpg`/`.jpeg` paths, case-insensitive.
pub fn is_jpeg(path: &Path) -> bool {
    has_extension(path, &["jpg", "jpeg"])
}

/// True for `.png` paths, case-insensitive.
pub fn is_png(path: &Path) -> bool {
    has_extension(path, &["png"])
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)))
        .unwrap_or(false)
}

/// Candidate sheet paths, in preference order.
///
/// The metadata-declared texture comes first, preceded by its `.png` sibling
/// when it names a JPEG (atlases are often converted after export). An
/// explicit override follows. Stem guesses are only added when none of those
/// produced a candidate.
pub fn sheet_candidates(
    atlas_path: &Path,
    metadata: &Metadata,
    explicit: Option<&Path>,
) -> Vec<PathBuf> {
    let dir = atlas_path.parent().unwrap_or_else(|| Path::new(""));
    let mut candidates = Vec::new();

    if let Some(name) = metadata.texture_name() {
        let sheet = dir.join(name);
        if is_jpeg(&sheet) {
            candidates.push(sheet.with_extension("png"));
        }
        candidates.push(sheet);
    }

    if let Some(explicit) = explicit {
        candidates.push(explicit.to_path_buf());
    }

    if candidates.is_empty() {
        if let Some(stem) = atlas_path.file_stem().and_then(|s| s.to_str()) {
            for ext in GUESS_EXTENSIONS {
                candidates.push(dir.join(format!("{}.{}", stem, ext)));
            }
        }
    }

    candidates
}

/// Pick the first sheet candidate that exists on disk.
pub fn resolve_sheet(
    atlas_path: &Path,
    metadata: &Metadata,
    explicit: Option<&Path>,
) -> Result<PathBuf> {
    let candidates = sheet_candidates(atlas_path, metadata, explicit);

    if let Some(found) = candidates.iter().find(|c| c.exists()) {
        return Ok(found.clone());
    }

    let tried: Vec<String> = candidates.iter().map(|c| c.display().to_string()).collect();
    Err(ExtractError::SheetNotFound {
        atlas: atlas_path.to_path_buf(),
        help: Some(if tried.is_empty() {
            "No candidate sheet paths; pass --sheet".to_string()
        } else {
            format!("Tried: {}", tried.join(", "))
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn metadata(texture: &str) -> Metadata {
        Metadata {
            texture_file_name: Some(texture.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_prefers_png_over_declared_jpg() {
        let dir = tempdir().unwrap();
        let atlas = dir.path().join("sheet.plist");
        fs::write(dir.path().join("sheet.jpg"), b"jpg").unwrap();
        fs::write(dir.path().join("sheet.png"), b"png").unwrap();

        let found = resolve_sheet(&atlas, &metadata("sheet.jpg"), None).unwrap();
        assert_eq!(found, dir.path().join("sheet.png"));
    }

    #[test]
    fn test_declared_jpg_used_when_no_png() {
        let dir = tempdir().unwrap();
        let atlas = dir.path().join("sheet.plist");
        fs::write(dir.path().join("sheet.JPEG"), b"jpg").unwrap();

        let found = resolve_sheet(&atlas, &metadata("sheet.JPEG"), None).unwrap();
        assert_eq!(found, dir.path().join("sheet.JPEG"));
    }

    #[test]
    fn test_declared_png_used_directly() {
        let dir = tempdir().unwrap();
        let atlas = dir.path().join("atlas.plist");
        fs::write(dir.path().join("pack.png"), b"png").unwrap();

        let found = resolve_sheet(&atlas, &metadata("pack.png"), None).unwrap();
        assert_eq!(found, dir.path().join("pack.png"));
    }

    #[test]
    fn test_explicit_used_when_declared_missing() {
        let dir = tempdir().unwrap();
        let atlas = dir.path().join("atlas.plist");
        let explicit = dir.path().join("elsewhere.png");
        fs::write(&explicit, b"png").unwrap();

        let found = resolve_sheet(&atlas, &metadata("gone.png"), Some(&explicit)).unwrap();
        assert_eq!(found, explicit);
    }

    #[test]
    fn test_stem_guess_without_metadata() {
        let dir = tempdir().unwrap();
        let atlas = dir.path().join("game.plist");
        fs::write(dir.path().join("game.jpeg"), b"jpg").unwrap();

        let found = resolve_sheet(&atlas, &Metadata::default(), None).unwrap();
        assert_eq!(found, dir.path().join("game.jpeg"));
    }

    #[test]
    fn test_stem_guesses_skipped_when_explicit_given() {
        let atlas = Path::new("assets/game.plist");
        let explicit = Path::new("other/sheet.png");

        let candidates = sheet_candidates(atlas, &Metadata::default(), Some(explicit));
        assert_eq!(candidates, vec![PathBuf::from("other/sheet.png")]);
    }

    #[test]
    fn test_candidate_order() {
        let atlas = Path::new("assets/game.plist");
        let candidates =
            sheet_candidates(atlas, &metadata("game.jpg"), Some(Path::new("x.png")));
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("assets/game.png"),
                PathBuf::from("assets/game.jpg"),
                PathBuf::from("x.png"),
            ]
        );
    }

    #[test]
    fn test_not_found() {
        let dir = tempdir().unwrap();
        let atlas = dir.path().join("lonely.plist");

        let err = resolve_sheet(&atlas, &Metadata::default(), None).unwrap_err();
        assert!(matches!(err, ExtractError::SheetNotFound { .. }));
        assert!(err.to_string().contains("lonely.plist"));
    }

    #[test]
    fn test_extension_checks() {
        assert!(is_jpeg(Path::new("a.JPG")));
        assert!(is_jpeg(Path::new("a.jpeg")));
        assert!(!is_jpeg(Path::new("a.png")));
        assert!(is_png(Path::new("dir/a.PNG")));
        assert!(!is_png(Path::new("noext")));
    }
}
