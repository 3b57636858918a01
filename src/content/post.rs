//! Post model

use serde::{Deserialize, Serialize};

use super::FrontMatter;

/// A blog post as exposed by the API
///
/// Field order is the wire order of the JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Short summary
    pub description: String,

    /// Raw date string from front-matter; only validated when displayed
    pub date: String,

    /// Category tags, in authored order
    pub categories: Vec<String>,

    /// Whether the post is published
    pub published: bool,

    /// Thumbnail image path or URL
    pub thumbnail: String,

    /// Slug (source file name without `.md`)
    pub slug: String,
}

impl Post {
    /// Merge front-matter with the slug computed from the file name
    ///
    /// The slug is always the injected one; front-matter cannot override it.
    pub fn from_front_matter(fm: FrontMatter, slug: impl Into<String>) -> Self {
        let published = fm.is_published();
        Self {
            title: fm.title,
            description: fm.description,
            date: fm.date,
            categories: fm.categories,
            published,
            thumbnail: fm.thumbnail,
            slug: slug.into(),
        }
    }

    /// Whether the post is tagged with `category` (exact, case-sensitive)
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// A post together with its markdown body
#[derive(Debug, Clone)]
pub struct Document {
    pub post: Post,
    /// Markdown after the front-matter block
    pub body: String,
}
