//! Content store: loads and validates posts from the content directory.
//!
//! # Architecture
//!
//! ```text
//! ContentStore::load(dir)
//!     │
//!     ├── walk dir (sorted) ──► *.md / *.markdown / *.mdx
//!     │
//!     ├── split_front_matter() ──► FrontMatter::parse()
//!     │       └── violations of every file collected
//!     │
//!     └── slug from path (or `slug:` override), uniqueness check
//! ```
//!
//! Loading is all-or-nothing: if any file fails validation, no store is
//! produced and every failing file is reported.

pub mod post;
pub mod reading_time;
pub mod schema;

pub use post::Post;
pub use schema::{FieldViolation, FrontMatter, SchemaError};

use crate::utils::slug::{is_content_file, normalize_slug, slug_from_path};
use schema::split_front_matter;
use std::{
    collections::{BTreeSet, HashMap},
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors raised while loading the content directory.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to walk content directory")]
    Walk(#[from] walkdir::Error),

    #[error("{} post(s) failed validation:\n  {}", .0.len(), join_lines(.0))]
    Schema(Vec<SchemaError>),

    #[error("Duplicate slug `{slug}` from `{}` and `{}`", .first.display(), .second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

fn join_lines(errors: &[SchemaError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n  ")
}

/// All posts of one build, in source-path order.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    posts: Vec<Post>,
}

impl ContentStore {
    /// Load every post under `dir`.
    pub fn load(dir: &Path) -> Result<Self, ContentError> {
        let mut posts = Vec::new();
        let mut failures = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_content_file(path) {
                continue;
            }

            // strip_prefix cannot fail for entries yielded under `dir`
            let relative = path.strip_prefix(dir).unwrap_or(path).to_path_buf();
            let input =
                fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;

            match parse_post(&relative, &input) {
                Ok(post) => posts.push(post),
                Err(violations) => failures.push(SchemaError {
                    path: relative,
                    violations,
                }),
            }
        }

        if !failures.is_empty() {
            return Err(ContentError::Schema(failures));
        }
        Self::from_posts(posts)
    }

    /// Build a store from already-constructed posts, checking slug uniqueness.
    pub fn from_posts(posts: Vec<Post>) -> Result<Self, ContentError> {
        let mut seen: HashMap<&str, &Path> = HashMap::with_capacity(posts.len());
        for post in &posts {
            if let Some(first) = seen.insert(&post.slug, &post.source) {
                return Err(ContentError::DuplicateSlug {
                    slug: post.slug.clone(),
                    first: first.to_path_buf(),
                    second: post.source.clone(),
                });
            }
        }
        Ok(Self { posts })
    }

    /// Every post, drafts included.
    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    /// Posts matching `predicate`, in store order.
    pub fn filter<'a>(&'a self, predicate: impl Fn(&Post) -> bool + 'a) -> impl Iterator<Item = &'a Post> {
        self.posts.iter().filter(move |post| predicate(post))
    }

    /// Non-draft posts: the only ones allowed into public artifacts.
    pub fn published(&self) -> impl Iterator<Item = &Post> {
        self.filter(|post| !post.draft)
    }

    /// A published post by slug.
    pub fn get_published(&self, slug: &str) -> Option<&Post> {
        self.published().find(|post| post.slug == slug)
    }

    /// Published posts of a series, ordered by `seriesOrder` then publish
    /// time. Posts without an order sort last.
    pub fn series(&self, name: &str) -> Vec<&Post> {
        let mut posts: Vec<_> = self
            .published()
            .filter(|post| post.series.as_deref() == Some(name))
            .collect();
        posts.sort_by_key(|post| (post.series_order.is_none(), post.series_order, post.pub_datetime));
        posts
    }

    /// Distinct tags of published posts, sorted.
    pub fn tags(&self) -> BTreeSet<&str> {
        self.published()
            .flat_map(|post| post.tags.iter().map(String::as_str))
            .collect()
    }
}

/// Parse a single source file into a [`Post`].
fn parse_post(relative: &Path, input: &str) -> Result<Post, Vec<FieldViolation>> {
    let (yaml, body) = split_front_matter(input).map_err(|v| vec![v])?;
    let front_matter = FrontMatter::parse(yaml)?;

    let slug = match front_matter.slug.as_deref().map(normalize_slug) {
        Some(slug) if !slug.is_empty() => slug,
        Some(_) => {
            return Err(vec![FieldViolation {
                field: "slug".into(),
                problem: "slug is empty after normalization".into(),
            }]);
        }
        None => slug_from_path(relative).map_err(|err| {
            vec![FieldViolation {
                field: "slug".into(),
                problem: err.to_string(),
            }]
        })?,
    };

    Ok(Post::new(slug, relative.to_path_buf(), front_matter, body.to_string()))
}
