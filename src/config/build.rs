//! `[build]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in folio.toml - input/output locations.
///
/// Artifact paths are relative to `output`.
///
/// # Example
/// ```toml
/// [build]
/// content = "content/posts"
/// output = "dist"
/// sitemap = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    #[serde(default = "defaults::build::rss")]
    #[educe(Default = defaults::build::rss())]
    pub rss: PathBuf,

    #[serde(default = "defaults::build::search")]
    #[educe(Default = defaults::build::search())]
    pub search: PathBuf,

    /// Directory for `<slug>.png` preview images.
    #[serde(default = "defaults::build::og")]
    #[educe(Default = defaults::build::og())]
    pub og: PathBuf,

    #[serde(default = "defaults::build::sitemap")]
    #[educe(Default = defaults::build::sitemap())]
    pub sitemap_path: PathBuf,

    /// Generate sitemap.xml.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub sitemap: bool,

    /// Write theme assets (tailwind json, prose css, toggle script).
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub theme: bool,
}
