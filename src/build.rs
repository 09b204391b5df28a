//! Build orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── load_content() ──► ContentStore (all posts validated)
//!     │
//!     └── rayon::join
//!             ├── feeds: rss.xml, search.json, sitemap.xml, theme assets
//!             └── previews: load_font() once ──► og/<slug>.png (parallel)
//! ```
//!
//! Nothing is written unless every post passes validation.

use crate::{
    config::SiteConfig,
    content::{ContentStore, Post},
    generator::{
        rss::{build_rss, build_rss_xml},
        search::{build_search, build_search_index},
        sitemap::{build_sitemap, build_sitemap_xml},
    },
    log,
    og::{
        PreviewRenderer, build_og,
        font::{HttpFetcher, load_font},
    },
    theme::build_theme,
};
use anyhow::{Context, Result};
use std::fs;

/// Load and validate every post under `[build.content]`.
pub fn load_content(config: &SiteConfig) -> Result<ContentStore> {
    let store = ContentStore::load(&config.build.content).with_context(|| {
        format!("Failed to load content from {}", config.build.content.display())
    })?;

    let drafts = store.all().iter().filter(|post| post.draft).count();
    log!("content"; "{} posts ({} drafts)", store.all().len(), drafts);
    Ok(store)
}

/// Build every artifact into `[build.output]`.
pub fn build_site(config: &SiteConfig) -> Result<ContentStore> {
    let store = load_content(config)?;

    let output = &config.build.output;
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let (feeds, previews) = rayon::join(
        || build_feeds(config, &store),
        || build_previews(config, &store),
    );
    feeds?;
    previews?;

    log!("build"; "done, output in {}", output.display());
    Ok(store)
}

/// Posts newest first. Drafts are included only when `drafts` is set.
pub fn list_posts(store: &ContentStore, drafts: bool) -> Vec<&Post> {
    let mut posts: Vec<_> = store.filter(move |post| drafts || !post.draft).collect();
    posts.sort_by(|a, b| b.pub_datetime.cmp(&a.pub_datetime));
    posts
}

/// Load the content and render every feed in memory without writing.
/// Returns the number of distinct published tags.
pub fn check_site(config: &SiteConfig) -> Result<usize> {
    let store = load_content(config)?;
    build_rss_xml(config, store.all())?;
    build_search_index(store.all())?;
    build_sitemap_xml(config, store.all())?;
    Ok(store.tags().len())
}

fn build_feeds(config: &SiteConfig, store: &ContentStore) -> Result<()> {
    build_rss(config, store)?;
    build_search(config, store)?;
    build_sitemap(config, store)?;
    build_theme(config)
}

fn build_previews(config: &SiteConfig, store: &ContentStore) -> Result<()> {
    if store.published().next().is_none() {
        return Ok(());
    }

    let fetcher = HttpFetcher::new(config.og.fetch_policy().timeout)?;
    let font = load_font(config, &fetcher).context("Failed to load preview font")?;
    let renderer = PreviewRenderer::from_config(&font, config);
    build_og(config, store, &renderer)
}
