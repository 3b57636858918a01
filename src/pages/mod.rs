//! Page loaders - shape API results into data for the page templates

use anyhow::Result;
use serde::Serialize;

use crate::api::{self, PostQuery};
use crate::content::{MarkdownRenderer, Post, PostRepository};

/// Data for the post listing page
#[derive(Debug, Clone, Serialize)]
pub struct ListPage {
    pub posts: Vec<Post>,
}

/// Data for the home page, which shows the most recent post
#[derive(Debug, Clone, Serialize)]
pub struct LatestPage {
    pub post: Option<Post>,
}

/// Data for a single post page
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub post: Post,
    /// Rendered HTML body
    pub content: String,
}

/// Listing loader: the page's query pairs go to the API unchanged
pub fn list_page<K, V>(
    repo: &PostRepository,
    query: impl IntoIterator<Item = (K, V)>,
) -> Result<ListPage>
where
    K: AsRef<str>,
    V: Into<String>,
{
    let posts = api::list_posts(repo, &PostQuery::from_pairs(query))?;
    Ok(ListPage { posts })
}

/// Latest-post loader: first post of the unfiltered list, if any
pub fn latest_page(repo: &PostRepository) -> Result<LatestPage> {
    let post = api::list_posts(repo, &PostQuery::default())?
        .into_iter()
        .next();
    Ok(LatestPage { post })
}

/// Single post loader; `None` when no published post has this slug
pub fn post_page(
    repo: &PostRepository,
    renderer: &MarkdownRenderer,
    slug: &str,
) -> Result<Option<PostPage>> {
    let Some(doc) = repo.find(slug)? else {
        return Ok(None);
    };
    let content = renderer.render(&doc.body)?;
    Ok(Some(PostPage {
        post: doc.post,
        content,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, PostRepository) {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("first.md"),
            "---\ntitle: First\ndate: 2024-01-01\ncategories: [news]\npublished: true\n---\n# Hello\n",
        )
        .unwrap();
        fs::write(
            tmp.path().join("second.md"),
            "---\ntitle: Second\ndate: 2024-02-01\ncategories: [misc]\npublished: true\n---\nText\n",
        )
        .unwrap();
        let repo = PostRepository::new(tmp.path());
        (tmp, repo)
    }

    #[test]
    fn test_list_page_forwards_query() {
        let (_tmp, repo) = fixture();
        let page = list_page(&repo, [("category", "news")]).unwrap();
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.posts[0].slug, "first");

        let page = list_page(&repo, Vec::<(String, String)>::new()).unwrap();
        assert_eq!(page.posts.len(), 2);

        let page = list_page(&repo, [("category", "")]).unwrap();
        assert!(page.posts.is_empty());
    }

    #[test]
    fn test_latest_page() {
        let (_tmp, repo) = fixture();
        let page = latest_page(&repo).unwrap();
        assert_eq!(page.post.unwrap().slug, "second");
    }

    #[test]
    fn test_latest_page_without_posts() {
        let tmp = TempDir::new().unwrap();
        let page = latest_page(&PostRepository::new(tmp.path())).unwrap();
        assert!(page.post.is_none());
        assert_eq!(serde_json::to_string(&page).unwrap(), r#"{"post":null}"#);
    }

    #[test]
    fn test_post_page_renders_body() {
        let (_tmp, repo) = fixture();
        let renderer = MarkdownRenderer::new();
        let page = post_page(&repo, &renderer, "first").unwrap().unwrap();
        assert_eq!(page.post.title, "First");
        assert!(page.content.contains("<h1>Hello</h1>"));
        assert!(post_page(&repo, &renderer, "missing").unwrap().is_none());
    }
}
