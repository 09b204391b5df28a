//! Sitemap generation.
//!
//! Lists the site root, navigation targets, published posts and tag pages.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/posts/hello/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::SiteConfig,
    content::{ContentStore, Post},
    utils::{slug::slugify_segment, xml::escape_xml},
};
use anyhow::{Context, Result};
use std::collections::{BTreeSet, HashSet};
use url::Url;

use super::{rss::post_link, write_artifact};

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub const CONTENT_TYPE: &str = "application/xml; charset=utf-8";

// ============================================================================
// Public API
// ============================================================================

/// Write the sitemap if `[build.sitemap]` is enabled.
pub fn build_sitemap(config: &SiteConfig, store: &ContentStore) -> Result<()> {
    if config.build.sitemap {
        let xml = build_sitemap_xml(config, store.all())?;
        write_artifact("sitemap", &config.output_path(&config.build.sitemap_path), xml)?;
    }
    Ok(())
}

/// Render the sitemap for `posts`. Drafts are dropped.
pub fn build_sitemap_xml(config: &SiteConfig, posts: &[Post]) -> Result<String> {
    Ok(Sitemap::new(config, posts)?.into_xml())
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    /// `YYYY-MM-DD`
    lastmod: Option<String>,
}

impl Sitemap {
    fn new(config: &SiteConfig, posts: &[Post]) -> Result<Self> {
        let website = config.website()?;
        let mut sitemap = Self { urls: Vec::new() };
        let mut seen = HashSet::new();
        let mut push = |loc: Url, lastmod: Option<String>| {
            if seen.insert(loc.to_string()) {
                sitemap.urls.push(UrlEntry {
                    loc: loc.into(),
                    lastmod,
                });
            }
        };

        push(website.clone(), None);

        for nav in &config.site.nav {
            // site-relative hrefs live under the deploy base path
            let href = nav.href.trim_start_matches('/');
            let loc = website
                .join(href)
                .with_context(|| format!("Invalid nav href `{}`", nav.href))?;
            // a sitemap may only list URLs on the site's own host
            if loc.origin() == website.origin() {
                push(loc, None);
            }
        }

        let published: Vec<_> = posts.iter().filter(|post| !post.draft).collect();
        for post in &published {
            push(post_link(&website, post)?, Some(post.pub_datetime.ymd()));
        }

        let tags: BTreeSet<_> = published
            .iter()
            .flat_map(|post| post.tags.iter())
            .map(|tag| slugify_segment(tag))
            .filter(|tag| !tag.is_empty())
            .collect();
        for tag in tags {
            let loc = website
                .join(&format!("tags/{tag}/"))
                .with_context(|| format!("Invalid tag `{tag}`"))?;
            push(loc, None);
        }

        Ok(sitemap)
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NavItem;
    use crate::content::post::fixtures::post;

    fn make_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.site.website = "https://xirain.github.io/techlearn/".to_string();
        config.site.nav = vec![
            NavItem { title: "首页".into(), href: "/".into() },
            NavItem { title: "文章".into(), href: "/posts".into() },
        ];
        config
    }

    fn locs(xml: &str) -> Vec<&str> {
        xml.lines()
            .filter_map(|line| line.trim().strip_prefix("<loc>")?.strip_suffix("</loc>"))
            .collect()
    }

    #[test]
    fn test_sitemap_structure() {
        let xml = build_sitemap_xml(&make_config(), &[]).unwrap();
        let lines: Vec<&str> = xml.lines().collect();

        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert_eq!(lines[1], format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        assert_eq!(lines.last().unwrap().trim(), "</urlset>");
    }

    #[test]
    fn test_root_nav_posts_and_tags() {
        let mut a = post("a", "2024-01-01", false);
        a.tags = vec!["Docker Compose".into(), "nginx".into()];
        let mut b = post("b", "2024-06-01", false);
        b.tags = vec!["nginx".into()];

        let xml = build_sitemap_xml(&make_config(), &[a, b]).unwrap();
        assert_eq!(
            locs(&xml),
            vec![
                "https://xirain.github.io/techlearn/",
                "https://xirain.github.io/techlearn/posts",
                "https://xirain.github.io/techlearn/posts/a/",
                "https://xirain.github.io/techlearn/posts/b/",
                "https://xirain.github.io/techlearn/tags/docker-compose/",
                "https://xirain.github.io/techlearn/tags/nginx/",
            ]
        );
        assert!(xml.contains("<lastmod>2024-06-01</lastmod>"));
        assert_eq!(xml.matches("<lastmod>").count(), 2);
    }

    #[test]
    fn test_drafts_and_their_tags_excluded() {
        let mut draft = post("secret", "2024-01-01", true);
        draft.tags = vec!["hidden".into()];

        let xml = build_sitemap_xml(&make_config(), &[draft]).unwrap();
        assert!(!xml.contains("secret"));
        assert!(!xml.contains("hidden"));
    }

    #[test]
    fn test_off_site_nav_href_excluded() {
        let mut config = make_config();
        config.site.nav = vec![
            NavItem {
                title: "GitHub".into(),
                href: "https://github.com/xirain?tab=repositories".into(),
            },
            NavItem {
                title: "HTTP".into(),
                href: "http://xirain.github.io/techlearn/about/".into(),
            },
            NavItem {
                title: "Search".into(),
                href: "/search?q=a&sort=date".into(),
            },
        ];

        let xml = build_sitemap_xml(&config, &[]).unwrap();
        assert!(!xml.contains("github.com/xirain"));
        // different scheme, different origin
        assert!(!xml.contains("http://xirain.github.io"));
        assert_eq!(
            locs(&xml),
            vec![
                "https://xirain.github.io/techlearn/",
                "https://xirain.github.io/techlearn/search?q=a&amp;sort=date",
            ]
        );
    }

    #[test]
    fn test_build_sitemap_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = make_config();
        config.build.output = dir.path().to_path_buf();
        config.build.sitemap = false;

        build_sitemap(&config, &ContentStore::default()).unwrap();
        assert!(!dir.path().join("sitemap.xml").exists());
    }
}
