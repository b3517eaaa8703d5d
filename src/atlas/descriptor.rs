//! Atlas descriptor loading.
//!
//! Reads TexturePacker property lists (XML or binary) into typed frame records.
//! Only the keys needed to cut sprites out are kept; anything else in the
//! plist is ignored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::geometry::{parse_frame, parse_rect, parse_size, Rect, Size};
use crate::error::{ExtractError, Result};

/// One named frame of an atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub name: String,
    /// Rectangle in sheet coordinates, with the upright (unrotated) size.
    pub rect: Rect,
    /// Packed sideways; the sheet region is `rect.h x rect.w`.
    pub rotated: bool,
    /// Untrimmed sprite size.
    pub source_size: Size,
    /// Where the trimmed pixels sit inside the untrimmed canvas.
    pub color_rect: Rect,
}

/// Atlas-wide metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub texture_file_name: Option<String>,
    pub real_texture_file_name: Option<String>,
}

impl Metadata {
    /// The sheet file name the atlas declares, if any.
    pub fn texture_name(&self) -> Option<&str> {
        self.texture_file_name
            .as_deref()
            .or(self.real_texture_file_name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

/// A loaded atlas descriptor.
///
/// Frame records keep their raw geometry strings and are parsed on lookup, so
/// a malformed frame only fails the exports that ask for it.
#[derive(Debug, Clone)]
pub struct Atlas {
    pub path: PathBuf,
    frames: BTreeMap<String, RawFrame>,
    pub metadata: Metadata,
}

#[derive(Deserialize)]
struct RawAtlas {
    frames: BTreeMap<String, RawFrame>,
    #[serde(default)]
    metadata: RawMetadata,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFrame {
    frame: String,
    #[serde(default)]
    rotated: bool,
    source_size: Option<String>,
    source_color_rect: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawMetadata {
    texture_file_name: Option<String>,
    real_texture_file_name: Option<String>,
}

impl RawFrame {
    fn to_frame(&self, name: &str) -> Result<Frame> {
        let rect = parse_frame(&self.frame)?;
        let source_size = match &self.source_size {
            Some(s) => parse_size(s)?,
            None => rect.size(),
        };
        let color_rect = match &self.source_color_rect {
            Some(s) => parse_rect(s)?,
            None => Rect::new(0, 0, rect.w, rect.h),
        };

        Ok(Frame {
            name: name.to_string(),
            rect,
            rotated: self.rotated,
            source_size,
            color_rect,
        })
    }
}

fn named_frame(name: &str, raw: &RawFrame) -> Result<Frame> {
    raw.to_frame(name).map_err(|e| match e {
        ExtractError::Parse { message, help } => ExtractError::Parse {
            message: format!("{} (frame '{}')", message, name),
            help,
        },
        other => other,
    })
}

impl Atlas {
    /// Read and parse an atlas descriptor from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| ExtractError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read atlas: {}", e),
        })?;

        Self::from_bytes(path, &bytes)
    }

    /// Parse descriptor bytes. `path` is kept for sheet resolution and errors.
    pub fn from_bytes(path: &Path, bytes: &[u8]) -> Result<Self> {
        let raw: RawAtlas = plist::from_bytes(bytes).map_err(|e| ExtractError::Plist {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            frames: raw.frames,
            metadata: Metadata {
                texture_file_name: raw.metadata.texture_file_name,
                real_texture_file_name: raw.metadata.real_texture_file_name,
            },
        })
    }

    /// Look up and parse a frame by descriptor name.
    ///
    /// `Ok(None)` when the atlas has no such frame; a parse error names the frame.
    pub fn frame(&self, name: &str) -> Result<Option<Frame>> {
        self.frames
            .get(name)
            .map(|raw| named_frame(name, raw))
            .transpose()
    }

    /// Every frame in name order, each parsed on the way out.
    pub fn frames(&self) -> impl Iterator<Item = Result<Frame>> + '_ {
        self.frames.iter().map(|(name, raw)| named_frame(name, raw))
    }

    /// Frame names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.frames.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
