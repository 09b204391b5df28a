//! Open Graph preview images.
//!
//! # Pipeline
//!
//! ```text
//! PreviewCard ──► layout::layout() ──► svg::to_svg() ──► Rasterizer::render()
//!  (title,          positioned           SVG text          1200×630 PNG
//!   description)    text lines
//! ```
//!
//! The font comes from [`font::load_font`] once per build. Renders share it
//! read-only, so distinct posts are rendered in parallel.

pub mod font;
pub mod layout;
pub mod raster;
pub mod svg;

use crate::{
    config::SiteConfig,
    content::{ContentStore, Post},
    log,
    logger::Progress,
};
use anyhow::{Context, Result};
use font::FontData;
use raster::{Rasterizer, RenderError};
use rayon::prelude::*;
use std::{fs, path::PathBuf};

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;

pub const CONTENT_TYPE: &str = "image/png";
/// Previews are addressed by slug and never change for a given post build.
pub const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Text shown on a card.
#[derive(Debug, Clone, Copy)]
pub struct PreviewCard<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub site_title: &'a str,
}

impl<'a> PreviewCard<'a> {
    pub fn for_post(post: &'a Post, config: &'a SiteConfig) -> Self {
        Self {
            title: &post.title,
            description: &post.description,
            site_title: &config.site.title,
        }
    }
}

/// Card renderer bound to one font.
#[derive(Clone)]
pub struct PreviewRenderer {
    rasterizer: Rasterizer,
    font_family: String,
    title_weight: u16,
}

impl PreviewRenderer {
    pub fn new(font: &FontData, font_family: &str) -> Self {
        Self {
            rasterizer: Rasterizer::new(font),
            font_family: font_family.to_string(),
            title_weight: layout::DEFAULT_TITLE_WEIGHT,
        }
    }

    /// Renderer using the `[og]` family and title weight.
    pub fn from_config(font: &FontData, config: &SiteConfig) -> Self {
        Self {
            title_weight: config.og.font_weight,
            ..Self::new(font, &config.og.font_family)
        }
    }

    /// Render a card to PNG bytes. Same card and font, same bytes.
    pub fn render(&self, card: &PreviewCard<'_>) -> Result<Vec<u8>, RenderError> {
        let svg = self.svg(card);
        self.rasterizer.render(&svg, WIDTH, HEIGHT)
    }

    fn svg(&self, card: &PreviewCard<'_>) -> String {
        svg::to_svg(&layout::layout(card, self.title_weight), &self.font_family)
    }
}

/// Output path of a post's preview, `<output>/<og>/<slug>.png`.
pub fn preview_path(config: &SiteConfig, slug: &str) -> PathBuf {
    config.output_path(&config.build.og).join(format!("{slug}.png"))
}

/// Render and write a preview for every published post.
pub fn build_og(config: &SiteConfig, store: &ContentStore, renderer: &PreviewRenderer) -> Result<()> {
    let posts: Vec<_> = store.published().collect();
    if posts.is_empty() {
        return Ok(());
    }

    let progress = Progress::new("og", posts.len());
    posts.par_iter().try_for_each(|post| -> Result<()> {
        let png = renderer
            .render(&PreviewCard::for_post(post, config))
            .with_context(|| format!("Failed to render preview for `{}`", post.slug))?;

        let path = preview_path(config, &post.slug);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, png).with_context(|| format!("Failed to write {}", path.display()))?;

        progress.tick();
        Ok(())
    })?;
    progress.finish();

    log!("og"; "{} preview images", progress.done());
    Ok(())
}
