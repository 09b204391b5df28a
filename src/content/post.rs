//! The [`Post`] type.

use super::{reading_time, schema::FrontMatter};
use crate::utils::date::PubDatetime;
use std::path::PathBuf;

/// A validated post. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Unique, URL-safe identifier derived from the source path.
    pub slug: String,
    /// Source path relative to the content directory.
    pub source: PathBuf,
    pub title: String,
    pub description: String,
    pub pub_datetime: PubDatetime,
    pub tags: Vec<String>,
    pub draft: bool,
    pub series: Option<String>,
    pub series_order: Option<i64>,
    /// Raw markdown body (front matter stripped).
    pub body: String,
}

impl Post {
    pub fn new(slug: String, source: PathBuf, front_matter: FrontMatter, body: String) -> Self {
        Self {
            slug,
            source,
            title: front_matter.title,
            description: front_matter.description,
            pub_datetime: front_matter.pub_datetime,
            tags: front_matter.tags,
            draft: front_matter.draft.unwrap_or(false),
            series: front_matter.series,
            series_order: front_matter.series_order,
            body,
        }
    }

    /// Site-relative URL path of the post page, `/posts/<slug>/`.
    pub fn url_path(&self) -> String {
        format!("/posts/{}/", self.slug)
    }

    /// Estimated reading time of the body, e.g. `"3 分钟"`.
    pub fn reading_time(&self) -> String {
        reading_time::reading_time(&self.body)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_draft_to_false() {
        let fm = FrontMatter::parse("title: A\ndescription: B\npubDatetime: 2024-01-01\n").unwrap();
        let post = Post::new("a".into(), PathBuf::from("a.md"), fm, "body text".into());

        assert!(!post.draft);
        assert_eq!(post.tags, vec!["others"]);
        assert_eq!(post.url_path(), "/posts/a/");
        assert_eq!(post.reading_time(), "1 分钟");
    }
}
