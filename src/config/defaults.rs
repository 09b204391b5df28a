//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn website() -> String {
        "http://localhost:5277/".into()
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn locales() -> Vec<String> {
        vec!["zh-CN".into()]
    }

    pub fn posts_per_page() -> usize {
        10
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn content() -> PathBuf {
        "content/posts".into()
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }

    pub fn rss() -> PathBuf {
        "rss.xml".into()
    }

    pub fn search() -> PathBuf {
        "search.json".into()
    }

    pub fn sitemap() -> PathBuf {
        "sitemap.xml".into()
    }

    pub fn og() -> PathBuf {
        "og".into()
    }
}

// ============================================================================
// [og] Section Defaults
// ============================================================================

pub mod og {
    pub fn font_css_url() -> String {
        "https://fonts.googleapis.com/css2?family=Inter:wght@700&display=swap".into()
    }

    pub fn font_family() -> String {
        "Inter".into()
    }

    pub fn font_weight() -> u16 {
        700
    }

    pub fn timeout() -> u64 {
        10
    }

    pub fn retries() -> u32 {
        1
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }

    pub fn port_retries() -> u16 {
        10
    }
}
