//! Slug derivation from content paths.
//!
//! Mirrors the GitHub heading-slug convention: lower-case, whitespace becomes
//! `-`, punctuation is dropped, letters from any script are kept (so CJK
//! file names survive intact).

use anyhow::{Result, anyhow};
use std::path::Path;

/// Recognized post extensions.
pub const CONTENT_EXTENSIONS: &[&str] = &["md", "markdown", "mdx"];

/// Slugify a single path segment.
pub fn slugify_segment(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            c if c.is_whitespace() => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

/// Derive a slug from a content file path relative to the content directory.
///
/// | relative path             | slug            |
/// |---------------------------|-----------------|
/// | `hello-world.md`          | `hello-world`   |
/// | `Docker Setup.md`         | `docker-setup`  |
/// | `guides/nginx/index.md`   | `guides/nginx`  |
/// | `部署/服务器配置.mdx`        | `部署/服务器配置`  |
pub fn slug_from_path(relative: &Path) -> Result<String> {
    let stem = relative.with_extension("");
    let mut segments = stem
        .components()
        .map(|c| {
            c.as_os_str()
                .to_str()
                .map(slugify_segment)
                .ok_or_else(|| anyhow!("Invalid path encoding: {}", relative.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    if segments.len() > 1 && segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }
    segments.retain(|s| !s.is_empty());

    if segments.is_empty() {
        return Err(anyhow!("Cannot derive slug from `{}`", relative.display()));
    }
    Ok(segments.join("/"))
}

/// Normalize a user-supplied slug (front-matter override).
pub fn normalize_slug(slug: &str) -> String {
    slug.split('/')
        .map(slugify_segment)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether `path` has one of [`CONTENT_EXTENSIONS`].
pub fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_segment_basic() {
        assert_eq!(slugify_segment("Hello World"), "hello-world");
        assert_eq!(slugify_segment("  Docker  "), "docker");
        assert_eq!(slugify_segment("snake_case-and-kebab"), "snake_case-and-kebab");
    }

    #[test]
    fn test_slugify_segment_drops_punctuation() {
        assert_eq!(slugify_segment("What's new? (2024)"), "whats-new-2024");
        assert_eq!(slugify_segment("C++ & Rust!"), "c--rust");
    }

    #[test]
    fn test_slugify_segment_keeps_cjk() {
        assert_eq!(slugify_segment("服务器 配置"), "服务器-配置");
        assert_eq!(slugify_segment("部署，上线"), "部署上线");
    }

    #[test]
    fn test_slug_from_path_flat() {
        assert_eq!(slug_from_path(Path::new("hello-world.md")).unwrap(), "hello-world");
        assert_eq!(slug_from_path(Path::new("Docker Setup.mdx")).unwrap(), "docker-setup");
    }

    #[test]
    fn test_slug_from_path_nested_and_index() {
        assert_eq!(
            slug_from_path(Path::new("guides/nginx/index.md")).unwrap(),
            "guides/nginx"
        );
        assert_eq!(
            slug_from_path(Path::new("guides/Nginx Proxy.md")).unwrap(),
            "guides/nginx-proxy"
        );
        // a lone index.md keeps its name
        assert_eq!(slug_from_path(Path::new("index.md")).unwrap(), "index");
    }

    #[test]
    fn test_slug_from_path_all_punctuation() {
        assert!(slug_from_path(Path::new("???.md")).is_err());
    }

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("My Post/Part 1"), "my-post/part-1");
        assert_eq!(normalize_slug("/leading//slashes/"), "leading/slashes");
    }

    #[test]
    fn test_is_content_file() {
        assert!(is_content_file(Path::new("a.md")));
        assert!(is_content_file(Path::new("a/b.mdx")));
        assert!(is_content_file(Path::new("a.markdown")));
        assert!(!is_content_file(Path::new("a.png")));
        assert!(!is_content_file(Path::new("README")));
    }
}
