//! Per-sprite crop, rotation and placement.

use std::path::{Path, PathBuf};

use crate::atlas::{is_jpeg, is_png, Frame, Rect, Size};

/// Rotation in degrees that brings a sideways-packed frame upright.
///
/// TexturePacker packs rotated frames 90° clockwise, so they are turned back
/// counterclockwise.
pub const UPRIGHT_ROTATION: i32 = -90;

/// Everything the image tool needs to cut one sprite out of a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpritePlan {
    /// Requested sprite name, also the output file name.
    pub name: String,
    /// Frame name in the descriptor (differs from `name` when aliased).
    pub source_name: String,
    pub sheet: PathBuf,
    pub target: PathBuf,
    /// Region to cut from the sheet, in stored (possibly sideways) orientation.
    pub crop: Rect,
    pub rotation: Option<i32>,
    /// Transparent canvas the crop is composited onto.
    pub canvas: Size,
    /// Offset of the crop inside the canvas.
    pub offset: (i32, i32),
    /// Turn black into transparency (opaque JPEG sheet into PNG output).
    pub key_out_black: bool,
}

impl SpritePlan {
    pub fn new(name: &str, frame: &Frame, sheet: &Path, out_dir: &Path) -> Self {
        let rect = frame.rect;

        // Rotated frames are stored with width and height exchanged. Atlases
        // that flag rotation while keeping matching sizes still get rotated.
        let (crop_size, rotation) = if frame.rotated {
            (rect.size().swapped(), Some(UPRIGHT_ROTATION))
        } else {
            (rect.size(), None)
        };

        let target = out_dir.join(name);
        let key_out_black = is_png(&target) && is_jpeg(sheet);

        Self {
            name: name.to_string(),
            source_name: frame.name.clone(),
            sheet: sheet.to_path_buf(),
            target,
            crop: Rect::new(rect.x, rect.y, crop_size.w, crop_size.h),
            rotation,
            canvas: frame.source_size,
            offset: (frame.color_rect.x, frame.color_rect.y),
            key_out_black,
        }
    }

    /// True when the crop region lies entirely inside a sheet of `sheet_size`.
    pub fn fits_within(&self, sheet_size: Size) -> bool {
        self.crop.x >= 0
            && self.crop.y >= 0
            && i64::from(self.crop.x) + i64::from(self.crop.w) <= i64::from(sheet_size.w)
            && i64::from(self.crop.y) + i64::from(self.crop.h) <= i64::from(sheet_size.h)
    }
}
