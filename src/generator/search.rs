//! Client-side search index.
//!
//! A flat JSON array, one object per published post, in store order.

use crate::{
    config::SiteConfig,
    content::{ContentStore, Post},
};
use anyhow::{Context, Result};
use serde::Serialize;

use super::write_artifact;

pub const CONTENT_TYPE: &str = "application/json";

/// One search index record. Field set is fixed: the client reads exactly these.
#[derive(Debug, Serialize)]
pub struct SearchIndexEntry<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub tags: &'a [String],
    pub slug: &'a str,
}

impl<'a> From<&'a Post> for SearchIndexEntry<'a> {
    fn from(post: &'a Post) -> Self {
        Self {
            title: &post.title,
            description: &post.description,
            tags: &post.tags,
            slug: &post.slug,
        }
    }
}

/// Write the index to `[build.search]` inside the output directory.
pub fn build_search(config: &SiteConfig, store: &ContentStore) -> Result<()> {
    let json = build_search_index(store.all())?;
    write_artifact("search", &config.output_path(&config.build.search), json)
}

/// Serialize the index for `posts`. Drafts are dropped.
pub fn build_search_index(posts: &[Post]) -> Result<String> {
    let entries: Vec<SearchIndexEntry<'_>> = posts
        .iter()
        .filter(|post| !post.draft)
        .map(SearchIndexEntry::from)
        .collect();

    serde_json::to_string(&entries).context("Failed to serialize search index")
}
