use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the fallible edges of the crate (settings, colors, scripts).
///
/// Tracking, matching and annotation never fail; only input coming from
/// files or user-entered strings goes through this type.
#[derive(Error, Debug)]
pub enum IndicatorError {
    /// A color string was not `#rrggbb` or `#aarrggbb` hex.
    #[error("Invalid color: {0:?}")]
    ColorParse(String),

    /// A configuration key was given a value of the wrong shape.
    #[error("Invalid value {value:?} for config key {key}")]
    InvalidValue { key: String, value: String },

    /// A settings document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A settings or script file could not be read.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line in a recorded event script was not a valid host event.
    #[error("Invalid event on script line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IndicatorError>;
