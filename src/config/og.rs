//! `[og]` section configuration.
//!
//! Controls how the preview-card font is obtained.

use super::defaults;
use crate::og::font::FetchPolicy;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// `[og]` section in folio.toml - preview image font settings.
///
/// # Example
/// ```toml
/// [og]
/// font_css_url = "https://fonts.googleapis.com/css2?family=Inter:wght@700&display=swap"
/// timeout = 5
/// retries = 2
/// fallback_on_error = true
/// ```
///
/// Setting `font_file` skips the network entirely.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct OgSection {
    /// Stylesheet URL that declares the font via `src: url(...)`.
    #[serde(default = "defaults::og::font_css_url")]
    #[educe(Default = defaults::og::font_css_url())]
    pub font_css_url: String,

    #[serde(default = "defaults::og::font_family")]
    #[educe(Default = defaults::og::font_family())]
    pub font_family: String,

    #[serde(default = "defaults::og::font_weight")]
    #[educe(Default = defaults::og::font_weight())]
    pub font_weight: u16,

    /// Local TTF/OTF file used instead of the font service.
    #[serde(default)]
    pub font_file: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[serde(default = "defaults::og::timeout")]
    #[educe(Default = defaults::og::timeout())]
    pub timeout: u64,

    /// Extra attempts after the first failed fetch.
    #[serde(default = "defaults::og::retries")]
    #[educe(Default = defaults::og::retries())]
    pub retries: u32,

    /// Render without a font instead of failing when fetching gives up.
    #[serde(default)]
    pub fallback_on_error: bool,
}

impl OgSection {
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            timeout: Duration::from_secs(self.timeout),
            retries: self.retries,
            fallback_on_error: self.fallback_on_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::time::Duration;

    #[test]
    fn test_og_section_defaults() {
        let config: SiteConfig = toml::from_str(
            r#"
            [site]
            title = "Test"
            description = "Test blog"
        "#,
        )
        .unwrap();

        assert!(config.og.font_css_url.starts_with("https://fonts.googleapis.com/css2"));
        assert_eq!(config.og.font_family, "Inter");
        assert_eq!(config.og.font_weight, 700);
        assert!(config.og.font_file.is_none());

        let policy = config.og.fetch_policy();
        assert_eq!(policy.timeout, Duration::from_secs(10));
        assert_eq!(policy.retries, 1);
        assert!(!policy.fallback_on_error);
    }

    #[test]
    fn test_og_section_policy_override() {
        let config: SiteConfig = toml::from_str(
            r#"
            [site]
            title = "Test"
            description = "Test blog"

            [og]
            timeout = 3
            retries = 0
            fallback_on_error = true
            font_file = "fonts/Inter-Bold.ttf"
        "#,
        )
        .unwrap();

        let policy = config.og.fetch_policy();
        assert_eq!(policy.timeout, Duration::from_secs(3));
        assert_eq!(policy.retries, 0);
        assert!(policy.fallback_on_error);
        assert!(config.og.font_file.is_some());
    }
}
