//! Folio - feeds, search index and preview images for a markdown blog.
//!
//! Reads `---`-fenced markdown posts and writes the site's derived
//! artifacts: `rss.xml`, `search.json`, `sitemap.xml`, `og/<slug>.png` and
//! the Tailwind theme files. Page rendering stays with the site framework.

pub mod build;
pub mod cli;
pub mod config;
pub mod content;
pub mod generator;
pub mod logger;
pub mod og;
pub mod serve;
pub mod theme;
pub mod utils;
