use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for atlas-extract operations
#[derive(Error, Diagnostic, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    #[diagnostic(code(atlas_extract::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(atlas_extract::io))]
    Io { path: PathBuf, message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(atlas_extract::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid atlas {path}: {message}")]
    #[diagnostic(
        code(atlas_extract::plist),
        help("Atlases must be TexturePacker property lists (XML or binary) with a `frames` dictionary")
    )]
    Plist { path: PathBuf, message: String },

    #[error("No sheet image found for {atlas}")]
    #[diagnostic(code(atlas_extract::sheet))]
    SheetNotFound {
        atlas: PathBuf,
        #[help]
        help: Option<String>,
    },

    #[error("Sprite '{name}' not found in {atlas}")]
    #[diagnostic(code(atlas_extract::sprite))]
    MissingSprite {
        name: String,
        atlas: PathBuf,
        #[help]
        help: Option<String>,
    },

    #[error("{program} failed for {target}: {message}")]
    #[diagnostic(
        code(atlas_extract::tool),
        help("Check that ImageMagick is installed or pass --tool")
    )]
    Tool {
        program: String,
        target: PathBuf,
        message: String,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(atlas_extract::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
