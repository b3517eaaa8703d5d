//! TexturePacker atlas descriptors: geometry strings, plist loading and
//! sheet image resolution.

mod descriptor;
mod geometry;
mod sheet;

pub use descriptor::{Atlas, Frame, Metadata};
pub use geometry::{parse_frame, parse_rect, parse_size, Rect, Size};
pub use sheet::{is_jpeg, is_png, resolve_sheet, sheet_candidates};

#[cfg(test)]
pub(crate) use descriptor::fixtures;
