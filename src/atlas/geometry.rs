//! Parsers for the `{{x,y},{w,h}}` and `{w,h}` strings used by TexturePacker.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{ExtractError, Result};

/// A rectangle in sheet or canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{{},{}}},{{{},{}}}}}", self.x, self.y, self.w, self.h)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// Width and height exchanged, as stored for sideways-packed frames.
    pub fn swapped(&self) -> Size {
        Size::new(self.h, self.w)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

fn integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"-?\d+").unwrap())
}

/// Pull every integer (negatives included) out of `s`, requiring exactly `expected`.
fn extract_integers(s: &str, expected: usize, kind: &str) -> Result<Vec<i32>> {
    let numbers = integer_pattern()
        .find_iter(s)
        .map(|m| m.as_str().parse::<i32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ExtractError::Parse {
            message: format!("Unexpected {} format: {} ({})", kind, s, e),
            help: None,
        })?;

    if numbers.len() != expected {
        return Err(ExtractError::Parse {
            message: format!("Unexpected {} format: {}", kind, s),
            help: Some(format!(
                "Expected {} integers, found {}",
                expected,
                numbers.len()
            )),
        });
    }

    Ok(numbers)
}

/// Parse a `{{x,y},{w,h}}` rect string.
pub fn parse_rect(s: &str) -> Result<Rect> {
    let n = extract_integers(s, 4, "rect")?;
    Ok(Rect::new(n[0], n[1], n[2], n[3]))
}

/// Parse the `frame` entry of a frame record. Same shape as a rect.
pub fn parse_frame(s: &str) -> Result<Rect> {
    parse_rect(s)
}

/// Parse a `{w,h}` size string.
pub fn parse_size(s: &str) -> Result<Size> {
    let n = extract_integers(s, 2, "size")?;
    Ok(Size::new(n[0], n[1]))
}
