//! SVG to PNG rasterization.
//!
//! The font database holds only the preview font, so output never depends
//! on what is installed on the build machine.

use super::font::FontData;
use std::sync::Arc;
use thiserror::Error;
use usvg::fontdb;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to parse preview SVG")]
    Svg(#[from] usvg::Error),

    #[error("Invalid pixmap size {0}x{1}")]
    Pixmap(u32, u32),

    #[error("Failed to encode PNG: {0}")]
    Png(String),
}

/// Shared, read-only rasterizer. Cheap to clone.
#[derive(Clone)]
pub struct Rasterizer {
    fontdb: Arc<fontdb::Database>,
}

impl Rasterizer {
    pub fn new(font: &FontData) -> Self {
        let mut db = fontdb::Database::new();
        if !font.is_empty() {
            db.load_font_data(font.as_bytes().to_vec());

            // generic families resolve to the only face we have
            let family = db
                .faces()
                .next()
                .and_then(|face| face.families.first())
                .map(|(name, _)| name.clone());
            if let Some(family) = family {
                db.set_sans_serif_family(family.clone());
                db.set_serif_family(family);
            }
        }

        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Whether any font face was loaded.
    pub fn has_font(&self) -> bool {
        self.fontdb.len() > 0
    }

    pub fn render(&self, svg: &str, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let options = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(svg, &options)?;

        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(RenderError::Pixmap(width, height))?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|err| RenderError::Png(err.to_string()))
    }
}
