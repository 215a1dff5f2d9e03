//! Error types for minitut.

use std::io;

/// Errors produced by the minitut viewer.
///
/// Most viewer operations degrade silently (a missing DOM node is "nothing
/// to show", an out-of-range index is clamped). Errors are reserved for the
/// paths with an explicit failure policy: configuration parsing and the
/// startup content download.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("document error: {0}")]
    Dom(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("history error: {0}")]
    History(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ViewerError>;
