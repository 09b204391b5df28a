//! Font acquisition for preview cards.
//!
//! ```text
//! [og.font_file] set? ──► read file
//!         │ no
//!         ▼
//! GET font_css_url ──► first `src: url(...)` ──► GET font file
//!         │                    │ no match
//!         │                    ▼
//!         │               empty font (text not drawn)
//!         ▼ error after retries
//! fallback_on_error ? empty font : error
//! ```
//!
//! Fetches happen once per build; the result is shared read-only by every
//! render.

use crate::{config::SiteConfig, log};
use regex::Regex;
use std::{
    fs,
    path::PathBuf,
    sync::{Arc, LazyLock},
    time::Duration,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("Failed to read font file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Request to `{url}` failed: {message}")]
    Request { url: String, message: String },

    #[error("Request to `{url}` returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Giving up on `{url}` after {attempts} attempt(s)")]
    Exhausted {
        url: String,
        attempts: u32,
        #[source]
        last: Box<FontError>,
    },
}

/// How hard to try before giving up on the font service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Extra attempts after the first failure.
    pub retries: u32,
    /// Render with an empty font instead of failing.
    pub fallback_on_error: bool,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            retries: 1,
            fallback_on_error: false,
        }
    }
}

/// Raw font bytes. Empty means "no font": text is laid out but not drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontData(Arc<Vec<u8>>);

impl FontData {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Arc::new(bytes))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

// ============================================================================
// Fetchers
// ============================================================================

/// Blocking GET returning the response body.
pub trait FontFetcher {
    fn get(&self, url: &str) -> Result<Vec<u8>, FontError>;
}

/// reqwest-backed fetcher.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FontError> {
        // No user agent: the font service then answers with TrueType
        // sources instead of woff2, which usvg cannot load.
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| FontError::Request {
                url: String::new(),
                message: err.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl FontFetcher for HttpFetcher {
    fn get(&self, url: &str) -> Result<Vec<u8>, FontError> {
        let request_error = |err: reqwest::Error| FontError::Request {
            url: url.to_string(),
            message: err.to_string(),
        };

        let response = self.client.get(url).send().map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FontError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().map_err(request_error)?.to_vec())
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Resolve the preview font according to `[og]`.
pub fn load_font(config: &SiteConfig, fetcher: &dyn FontFetcher) -> Result<FontData, FontError> {
    if let Some(path) = &config.og.font_file {
        let bytes = fs::read(path).map_err(|err| FontError::Io(path.clone(), err))?;
        log!("og"; "font {}", path.display());
        return Ok(FontData::new(bytes));
    }

    let policy = config.og.fetch_policy();
    match fetch_remote_font(&config.og.font_css_url, fetcher, policy.retries) {
        Ok(font) => Ok(font),
        Err(err) if policy.fallback_on_error => {
            log!("warn"; "{err}, rendering previews without a font");
            Ok(FontData::empty())
        }
        Err(err) => Err(err),
    }
}

/// Stylesheet, then the first font it references.
fn fetch_remote_font(
    css_url: &str,
    fetcher: &dyn FontFetcher,
    retries: u32,
) -> Result<FontData, FontError> {
    let css = fetch_with_retry(fetcher, css_url, retries)?;
    let css = String::from_utf8_lossy(&css);

    let Some(font_url) = extract_font_url(&css) else {
        log!("warn"; "no font url in {css_url}, rendering previews without a font");
        return Ok(FontData::empty());
    };

    let bytes = fetch_with_retry(fetcher, font_url, retries)?;
    log!("og"; "font {} ({} KB)", font_url, bytes.len() / 1024);
    Ok(FontData::new(bytes))
}

/// First `src: url(...)` target in a stylesheet, quotes stripped.
pub fn extract_font_url(css: &str) -> Option<&str> {
    static RE_FONT_SRC: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"src: url\((.+?)\)").expect("valid regex"));

    let url = RE_FONT_SRC.captures(css)?.get(1)?.as_str();
    let url = url.trim_matches(|c| c == '\'' || c == '"');
    (!url.is_empty()).then_some(url)
}

fn fetch_with_retry(fetcher: &dyn FontFetcher, url: &str, retries: u32) -> Result<Vec<u8>, FontError> {
    let attempts = retries.saturating_add(1);
    let mut last = None;

    for attempt in 1..=attempts {
        match fetcher.get(url) {
            Ok(body) => return Ok(body),
            Err(err) => {
                if attempt < attempts {
                    log!("warn"; "{err}, retrying ({attempt}/{retries})");
                }
                last = Some(err);
            }
        }
    }

    Err(FontError::Exhausted {
        url: url.to_string(),
        attempts,
        last: Box::new(last.unwrap_or_else(|| FontError::Request {
            url: url.to_string(),
            message: "no attempt made".into(),
        })),
    })
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::{cell::RefCell, collections::HashMap};

    /// In-memory fetcher: canned bodies per URL, everything else fails.
    #[derive(Default)]
    pub struct StubFetcher {
        pub bodies: HashMap<String, Vec<u8>>,
        pub requests: RefCell<Vec<String>>,
    }

    impl StubFetcher {
        pub fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
            self.bodies.insert(url.to_string(), body.into());
            self
        }
    }

    impl FontFetcher for StubFetcher {
        fn get(&self, url: &str) -> Result<Vec<u8>, FontError> {
            self.requests.borrow_mut().push(url.to_string());
            self.bodies.get(url).cloned().ok_or_else(|| FontError::Status {
                url: url.to_string(),
                status: 503,
            })
        }
    }
}
