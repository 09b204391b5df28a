//! RSS feed generation.
//!
//! One item per published post, newest first. Ties keep input order.

use crate::{
    config::SiteConfig,
    content::{ContentStore, Post},
};
use anyhow::{Context, Result, anyhow};
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use url::Url;

use super::write_artifact;

pub const CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

// ============================================================================
// Public API
// ============================================================================

/// Write the feed to `[build.rss]` inside the output directory.
pub fn build_rss(config: &SiteConfig, store: &ContentStore) -> Result<()> {
    let xml = build_rss_xml(config, store.all())?;
    write_artifact("rss", &config.output_path(&config.build.rss), xml)
}

/// Render the feed for `posts`. Drafts are dropped.
pub fn build_rss_xml(config: &SiteConfig, posts: &[Post]) -> Result<String> {
    let website = config.website()?;

    let mut posts: Vec<_> = posts.iter().filter(|post| !post.draft).collect();
    // stable: equal timestamps keep input order
    posts.sort_by(|a, b| b.pub_datetime.cmp(&a.pub_datetime));

    let items = posts
        .into_iter()
        .map(|post| post_to_rss_item(post, &website))
        .collect::<Result<Vec<_>>>()?;

    let channel = ChannelBuilder::default()
        .title(&config.site.title)
        .link(website.as_str())
        .description(&config.site.description)
        .language(config.site.language().map(str::to_string))
        .generator(Some(env!("CARGO_PKG_NAME").to_string()))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("rss validation failed: {e}"))?;
    Ok(channel.to_string())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Absolute URL of a post page: `<website>posts/<slug>/`.
pub fn post_link(website: &Url, post: &Post) -> Result<Url> {
    website
        .join(&format!("posts/{}/", post.slug))
        .with_context(|| format!("Invalid post URL for slug `{}`", post.slug))
}

fn post_to_rss_item(post: &Post, website: &Url) -> Result<rss::Item> {
    let link = post_link(website, post)?.to_string();

    Ok(ItemBuilder::default()
        .title(Some(post.title.clone()))
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(Some(post.description.clone()))
        .pub_date(Some(post.pub_datetime.to_rfc2822()))
        .build())
}
