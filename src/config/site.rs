//! `[site]` section configuration.
//!
//! Site metadata consumed by the feeds, the sitemap and the preview cards.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in folio.toml.
///
/// # Example
/// ```toml
/// [site]
/// website = "https://xirain.github.io/techlearn/"
/// author = "xirain"
/// title = "Tech Learning Notes"
/// description = "个人技术文档库"
/// locales = ["zh-CN"]
///
/// [[site.nav]]
/// title = "文章"
/// href = "/posts"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteSection {
    /// Absolute site URL, including any deploy base path.
    #[serde(default = "defaults::site::website")]
    #[educe(Default = defaults::site::website())]
    pub website: String,

    #[serde(default = "defaults::site::author")]
    #[educe(Default = defaults::site::author())]
    pub author: String,

    pub title: String,

    pub description: String,

    /// BCP 47 locales; the first one is the feed language.
    #[serde(default = "defaults::site::locales")]
    #[educe(Default = defaults::site::locales())]
    pub locales: Vec<String>,

    /// Whether the light/dark toggle is shipped.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub light_and_dark_mode: bool,

    #[serde(default = "defaults::site::posts_per_page")]
    #[educe(Default = defaults::site::posts_per_page())]
    pub posts_per_page: usize,

    #[serde(default)]
    pub nav: Vec<NavItem>,
}

impl SiteSection {
    /// Primary locale, used as the RSS channel language.
    pub fn language(&self) -> Option<&str> {
        self.locales.first().map(String::as_str)
    }
}

/// A navigation entry, `title` + `href`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavItem {
    pub title: String,
    pub href: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_site_section_full() {
        let config = r#"
            [site]
            website = "https://xirain.github.io/techlearn/"
            author = "xirain"
            title = "Tech Learning Notes"
            description = "个人技术文档库 - 记录部署、配置和开发经验"
            locales = ["zh-CN", "en-US"]
            light_and_dark_mode = false
            posts_per_page = 5

            [[site.nav]]
            title = "首页"
            href = "/"

            [[site.nav]]
            title = "标签"
            href = "/tags"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.site.website, "https://xirain.github.io/techlearn/");
        assert_eq!(config.site.author, "xirain");
        assert_eq!(config.site.language(), Some("zh-CN"));
        assert!(!config.site.light_and_dark_mode);
        assert_eq!(config.site.posts_per_page, 5);
        assert_eq!(config.site.nav.len(), 2);
        assert_eq!(config.site.nav[1].href, "/tags");
    }

    #[test]
    fn test_site_section_defaults() {
        let config = r#"
            [site]
            title = "Test"
            description = "Test blog"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.site.author, "<YOUR_NAME>");
        assert_eq!(config.site.locales, vec!["zh-CN".to_string()]);
        assert!(config.site.light_and_dark_mode);
        assert_eq!(config.site.posts_per_page, 10);
        assert!(config.site.nav.is_empty());
    }

    #[test]
    fn test_nav_unknown_field_rejection() {
        let config = r#"
            [site]
            title = "Test"
            description = "Test blog"

            [[site.nav]]
            title = "Posts"
            href = "/posts"
            icon = "book"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.unwrap_err().to_string().contains("unknown field"));
    }

    #[test]
    fn test_language_empty_locales() {
        let config = r#"
            [site]
            title = "Test"
            description = "Test blog"
            locales = []
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert_eq!(config.site.language(), None);
    }
}
