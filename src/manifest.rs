//! Batch manifest (atlas-extract.yaml) parsing.
//!
//! The manifest lists the atlases to cut up and the files to copy verbatim.
//! Without one, the builtin jackpot batch is used.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};
use crate::export::{ExportRequest, DEFAULT_TOOL};

/// Manifest filename looked up in the project root.
pub const MANIFEST_FILENAME: &str = "atlas-extract.yaml";

/// Batch manifest loaded from atlas-extract.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Output directory for atlases that don't set their own.
    pub output: PathBuf,

    /// Image tool program.
    pub tool: String,

    pub atlases: Vec<AtlasEntry>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub copies: Vec<CopyEntry>,
}

/// One atlas to export sprites from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AtlasEntry {
    pub plist: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    pub names: Vec<String>,

    /// Output name → frame name in the plist.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, String>,
}

/// A file copied verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyEntry {
    pub from: PathBuf,
    pub to: PathBuf,
}

fn default_output() -> PathBuf {
    PathBuf::from("web/assets")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            output: default_output(),
            tool: DEFAULT_TOOL.to_string(),
            atlases: vec![],
            copies: vec![],
        }
    }
}

const JACKPOT1_SPRITES: &[&str] = &[
    "display_bg_univerzal.png",
    "display_bg_gold.png",
    "display_bg_silver.png",
    "display_bg_bronze.png",
    "title_J.png",
    "title_J_glow.png",
    "title_A.png",
    "title_A_glow.png",
    "title_C.png",
    "title_C_glow.png",
    "title_K.png",
    "title_K_glow.png",
    "title_P.png",
    "title_P_glow.png",
    "title_O.png",
    "title_O_glow.png",
    "title_T.png",
    "title_T_glow.png",
];

const JACKPOT2_SPRITES: &[&str] = &[
    "bg_glow.png",
    "bg_shine.png",
    "bg_sparkles_B.png",
    "bg_sparkles_L.png",
    "bg_sparkles_RB.png",
    "bg_sparkles_RT.png",
];

const COCOS_BITMAPS: &str = "res/cocos/cocosstudio/_bitmaps";
const EXPORT_BITMAPS: &str = "res/exportJosn/_bitmaps";

impl Manifest {
    /// The jackpot animation batch: two atlases and the standalone glow texture.
    pub fn builtin() -> Self {
        let cocos = Path::new(COCOS_BITMAPS);
        let export = Path::new(EXPORT_BITMAPS);

        Self {
            atlases: vec![
                AtlasEntry {
                    plist: cocos.join("game_jackpot1.plist"),
                    sheet: None,
                    output: None,
                    names: JACKPOT1_SPRITES.iter().map(|s| s.to_string()).collect(),
                    aliases: BTreeMap::new(),
                },
                AtlasEntry {
                    plist: export.join("game_jackpot2.plist"),
                    sheet: Some(export.join("game_jackpot2.png")),
                    output: None,
                    names: JACKPOT2_SPRITES.iter().map(|s| s.to_string()).collect(),
                    aliases: BTreeMap::new(),
                },
            ],
            copies: vec![CopyEntry {
                from: cocos.join("glow.png"),
                to: default_output().join("glow.png"),
            }],
            ..Default::default()
        }
    }

    /// Load manifest from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ExtractError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| ExtractError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })
    }

    /// Serialize back to YAML, as written by `init`.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ExtractError::Build {
            message: format!("Failed to serialize manifest: {}", e),
            help: None,
        })
    }

    /// Pick the manifest for a run.
    ///
    /// An explicit path must exist. Otherwise `root/atlas-extract.yaml` is used
    /// when present, else the builtin batch. Returns the manifest and where it
    /// came from (`None` for builtin).
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidate = root.join(MANIFEST_FILENAME);
        if candidate.is_file() {
            return Ok((Self::load(&candidate)?, Some(candidate)));
        }

        Ok((Self::builtin(), None))
    }

    /// Export requests with paths resolved against `root`.
    pub fn requests(&self, root: &Path) -> Vec<ExportRequest> {
        self.atlases
            .iter()
            .map(|entry| ExportRequest {
                atlas: root.join(&entry.plist),
                sheet: entry.sheet.as_ref().map(|s| root.join(s)),
                names: entry.names.clone(),
                aliases: entry.aliases.clone(),
                output: root.join(entry.output.as_ref().unwrap_or(&self.output)),
            })
            .collect()
    }

    /// Copy pairs with paths resolved against `root`.
    pub fn copy_pairs(&self, root: &Path) -> Vec<(PathBuf, PathBuf)> {
        self.copies
            .iter()
            .map(|c| (root.join(&c.from), root.join(&c.to)))
            .collect()
    }

    /// Total sprites across all atlases.
    pub fn sprite_count(&self) -> usize {
        self.atlases.iter().map(|a| a.names.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = Manifest::parse("output: build").unwrap();

        assert_eq!(manifest.output, PathBuf::from("build"));
        assert_eq!(manifest.tool, "convert");
        assert!(manifest.atlases.is_empty());
        assert!(manifest.copies.is_empty());
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r#"
output: dist/sprites
tool: magick
atlases:
  - plist: atlas/ui.plist
    sheet: atlas/ui.png
    output: dist/ui
    names: [ok.png, cancel.png]
    aliases:
      cancel.png: btn_cancel.png
  - plist: atlas/fx.plist
    names:
      - spark.png
copies:
  - from: atlas/glow.png
    to: dist/glow.png
"#;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.tool, "magick");
        assert_eq!(manifest.atlases.len(), 2);
        assert_eq!(
            manifest.atlases[0],
            AtlasEntry {
                plist: PathBuf::from("atlas/ui.plist"),
                sheet: Some(PathBuf::from("atlas/ui.png")),
                output: Some(PathBuf::from("dist/ui")),
                names: vec!["ok.png".to_string(), "cancel.png".to_string()],
                aliases: BTreeMap::from([(
                    "cancel.png".to_string(),
                    "btn_cancel.png".to_string()
                )]),
            }
        );
        assert_eq!(manifest.atlases[1].sheet, None);
        assert_eq!(
            manifest.copies,
            vec![CopyEntry {
                from: PathBuf::from("atlas/glow.png"),
                to: PathBuf::from("dist/glow.png"),
            }]
        );
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = Manifest::parse("outptu: build").unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
    }

    #[test]
    fn test_atlas_without_names_is_rejected() {
        assert!(Manifest::parse("atlases:\n  - plist: a.plist\n").is_err());
    }

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = Manifest::parse("").unwrap();
        assert_eq!(manifest.output, PathBuf::from("web/assets"));
    }

    #[test]
    fn test_builtin_batch() {
        let manifest = Manifest::builtin();

        assert_eq!(manifest.atlases.len(), 2);
        assert_eq!(manifest.atlases[0].names.len(), 18);
        assert_eq!(manifest.atlases[1].names.len(), 6);
        assert_eq!(manifest.sprite_count(), 24);
        assert_eq!(
            manifest.atlases[1].sheet,
            Some(PathBuf::from("res/exportJosn/_bitmaps/game_jackpot2.png"))
        );
        assert_eq!(
            manifest.copies[0].from,
            PathBuf::from("res/cocos/cocosstudio/_bitmaps/glow.png")
        );
        assert_eq!(manifest.copies[0].to, PathBuf::from("web/assets/glow.png"));
    }

    #[test]
    fn test_builtin_yaml_round_trip() {
        let manifest = Manifest::builtin();
        let yaml = manifest.to_yaml().unwrap();
        assert_eq!(Manifest::parse(&yaml).unwrap(), manifest);
    }

    #[test]
    fn test_requests_resolve_against_root() {
        let manifest = Manifest::parse(
            "output: out\natlases:\n  - plist: a.plist\n    names: [x.png]\n  - plist: b.plist\n    output: other\n    sheet: b.png\n    names: [y.png]\n",
        )
        .unwrap();
        let root = Path::new("/project");

        let requests = manifest.requests(root);
        assert_eq!(requests[0].atlas, PathBuf::from("/project/a.plist"));
        assert_eq!(requests[0].output, PathBuf::from("/project/out"));
        assert_eq!(requests[0].sheet, None);
        assert_eq!(requests[1].output, PathBuf::from("/project/other"));
        assert_eq!(requests[1].sheet, Some(PathBuf::from("/project/b.png")));
    }

    #[test]
    fn test_discover_prefers_file_in_root() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILENAME), "output: here\n").unwrap();

        let (manifest, source) = Manifest::discover(dir.path(), None).unwrap();
        assert_eq!(manifest.output, PathBuf::from("here"));
        assert_eq!(source, Some(dir.path().join(MANIFEST_FILENAME)));
    }

    #[test]
    fn test_discover_falls_back_to_builtin() {
        let dir = tempdir().unwrap();
        let (manifest, source) = Manifest::discover(dir.path(), None).unwrap();
        assert_eq!(manifest, Manifest::builtin());
        assert_eq!(source, None);
    }

    #[test]
    fn test_discover_explicit_missing_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(Manifest::discover(dir.path(), Some(&missing)).is_err());
    }
}
