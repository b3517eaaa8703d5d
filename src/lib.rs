//! atlas-extract - Sprite extraction from TexturePacker atlases
//!
//! Reads TexturePacker property lists, works out where each named sprite
//! lives on the sheet, and has ImageMagick cut it out onto its original,
//! untrimmed canvas.

pub mod atlas;
pub mod batch;
pub mod cli;
pub mod error;
pub mod export;
pub mod manifest;
pub mod output;

pub use atlas::{parse_frame, parse_rect, parse_size, resolve_sheet, Atlas, Frame, Metadata, Rect, Size};
pub use batch::{copy_file, run_batch, BatchSummary};
pub use error::{ExtractError, Result};
pub use export::{
    export_sprites, magick_args, plan_sprites, DryRun, ExportRequest, ImageTool, MagickTool,
    SpritePlan,
};
pub use manifest::{AtlasEntry, CopyEntry, Manifest, MANIFEST_FILENAME};
pub use output::Printer;
