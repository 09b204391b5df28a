//! Derived artifacts built from the content store.
//!
//! Each builder is a pure `&[Post] -> String` transform so the dev server can
//! answer requests without touching the output directory. Builders drop
//! drafts themselves; callers pass every post.

pub mod rss;
pub mod search;
pub mod sitemap;

use crate::log;
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Write one artifact, creating parent directories as needed.
pub fn write_artifact(module: &str, path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;

    log!(module; "{}", path.file_name().unwrap_or_default().to_string_lossy());
    Ok(())
}
