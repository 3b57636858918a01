//! Posts API - the post list with an optional category filter

use anyhow::Result;

use crate::content::{Post, PostRepository};

/// Query accepted by `GET /api/posts`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    /// `None` when the `category` key is absent, `Some("")` when it is
    /// present without a value
    pub category: Option<String>,
}

impl PostQuery {
    /// Filter on a single category
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
        }
    }

    /// Build from decoded query pairs; the first `category` wins
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let category = pairs
            .into_iter()
            .find(|(key, _)| key.as_ref() == "category")
            .map(|(_, value)| value.into());
        Self { category }
    }
}

/// List published posts, newest first
///
/// An explicitly empty category matches nothing and returns before the
/// posts directory is read.
pub fn list_posts(repo: &PostRepository, query: &PostQuery) -> Result<Vec<Post>> {
    match query.category.as_deref() {
        Some("") => Ok(Vec::new()),
        Some(category) => {
            let mut posts = repo.build()?;
            posts.retain(|post| post.has_category(category));
            Ok(posts)
        }
        None => repo.build(),
    }
}
