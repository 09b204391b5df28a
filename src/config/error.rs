//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or validating `folio.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("[site.website] `{url}` is not a valid URL")]
    Website {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("[site.website] must start with http:// or https://, found `{0}:`")]
    Scheme(String),

    #[error("[{0}] must not be empty")]
    Empty(&'static str),

    #[error("[{key}] not found: {}", .path.display())]
    MissingPath { key: &'static str, path: PathBuf },
}
