//! Post repository - builds the published post list from the posts directory

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Document, FrontMatter, Post};
use crate::helpers::parse_date;

/// Builds posts from the markdown files of a single directory
///
/// Nothing is cached: every call rescans the directory.
#[derive(Debug, Clone)]
pub struct PostRepository {
    posts_dir: PathBuf,
}

impl PostRepository {
    /// Create a repository over `posts_dir`
    pub fn new<P: AsRef<Path>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
        }
    }

    /// Directory scanned for `*.md` files
    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// All published posts, newest first
    pub fn build(&self) -> Result<Vec<Post>> {
        Ok(self.documents()?.into_iter().map(|doc| doc.post).collect())
    }

    /// All published documents (post and markdown body), newest first
    ///
    /// Documents without a usable front-matter block are skipped. Posts whose
    /// date cannot be parsed sort after all dated posts, in file name order.
    pub fn documents(&self) -> Result<Vec<Document>> {
        let mut documents = Vec::new();

        for path in self.discover()? {
            let Some(doc) = load_document(&path)? else {
                continue;
            };
            if doc.post.published {
                documents.push(doc);
            } else {
                tracing::debug!("Skipping unpublished post {:?}", path);
            }
        }

        // Stable sort: equal dates keep discovery order
        documents.sort_by_cached_key(|doc| DateKey(parse_date(&doc.post.date)));

        tracing::debug!(
            "Built {} published posts from {:?}",
            documents.len(),
            self.posts_dir
        );
        Ok(documents)
    }

    /// Find a published document by slug
    pub fn find(&self, slug: &str) -> Result<Option<Document>> {
        Ok(self
            .documents()?
            .into_iter()
            .find(|doc| doc.post.slug == slug))
    }

    /// List `*.md` files directly inside the posts directory, by file name
    fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.posts_dir.is_dir() {
            tracing::debug!("Posts directory {:?} does not exist", self.posts_dir);
            return Ok(Vec::new());
        }

        let pattern = format!(
            "{}/*.md",
            glob::Pattern::escape(&self.posts_dir.to_string_lossy())
        );

        let mut paths = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = entry?;
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

/// Sort key for descending dates with undated posts last
#[derive(PartialEq, Eq)]
struct DateKey(Option<NaiveDateTime>);

impl Ord for DateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => b.cmp(a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for DateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Load a single document, or `None` if it is not a well-formed post
fn load_document(path: &Path) -> Result<Option<Document>> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    let Ok(content) = String::from_utf8(bytes) else {
        tracing::warn!("Skipping {:?}: not valid UTF-8", path);
        return Ok(None);
    };

    let Some(slug) = slug_from_path(path) else {
        return Ok(None);
    };

    match FrontMatter::parse(&content) {
        Ok(Some((fm, body))) => Ok(Some(Document {
            body: body.to_string(),
            post: Post::from_front_matter(fm, slug),
        })),
        Ok(None) => {
            tracing::debug!("Skipping {:?}: no front-matter", path);
            Ok(None)
        }
        Err(e) => {
            tracing::warn!("Skipping {:?}: invalid front-matter: {}", path, e);
            Ok(None)
        }
    }
}

/// File name with the `.md` extension removed
fn slug_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let slug = name.strip_suffix(".md")?;
    (!slug.is_empty()).then(|| slug.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_post(dir: &Path, name: &str, title: &str, date: &str, published: &str) {
        let content = format!(
            "---\ntitle: {}\ndescription: About {}\ndate: {}\ncategories:\n  - rust\npublished: {}\nthumbnail: /img/{}.png\n---\n\nBody of {}.\n",
            title, title, date, published, title, title
        );
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_build_filters_and_sorts() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        write_post(dir, "old.md", "Old", "2023-01-01", "true");
        write_post(dir, "new.md", "New", "2024-06-01", "true");
        write_post(dir, "middle.md", "Middle", "2023-09-15 12:00", "true");
        write_post(dir, "draft.md", "Draft", "2025-01-01", "false");

        let posts = PostRepository::new(dir).build().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "middle", "old"]);
        assert!(posts.iter().all(|p| p.published));
        assert_eq!(posts[0].title, "New");
        assert_eq!(posts[0].description, "About New");
        assert_eq!(posts[0].thumbnail, "/img/New.png");
        assert_eq!(posts[0].categories, vec!["rust"]);
    }

    #[test]
    fn test_skips_malformed_documents() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        write_post(dir, "good.md", "Good", "2024-01-01", "true");
        fs::write(dir.join("plain.md"), "# No front-matter\n").unwrap();
        fs::write(dir.join("broken.md"), "---\ntitle: [unclosed\n---\n").unwrap();
        fs::write(dir.join("binary.md"), [0xff, 0xfe, 0x00, 0x2d]).unwrap();

        let posts = PostRepository::new(dir).build().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "good");
    }

    #[test]
    fn test_only_markdown_in_top_level_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        write_post(dir, "top.md", "Top", "2024-01-01", "true");
        write_post(dir, "notes.txt", "Text", "2024-01-02", "true");
        write_post(dir, "page.markdown", "Long", "2024-01-03", "true");
        fs::create_dir(dir.join("nested")).unwrap();
        write_post(&dir.join("nested"), "deep.md", "Deep", "2024-01-04", "true");

        let posts = PostRepository::new(dir).build().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["top"]);
    }

    #[test]
    fn test_slug_comes_from_file_name() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        fs::write(
            dir.join("my-first-post.md"),
            "---\ntitle: Hi\nslug: something-else\npublished: true\n---\n",
        )
        .unwrap();

        let posts = PostRepository::new(dir).build().unwrap();
        assert_eq!(posts[0].slug, "my-first-post");
    }

    #[test]
    fn test_truthy_published_values() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        write_post(dir, "a.md", "A", "2024-01-01", "1");
        write_post(dir, "b.md", "B", "2024-01-02", "yes");
        write_post(dir, "c.md", "C", "2024-01-03", "0");
        write_post(dir, "d.md", "D", "2024-01-04", "\"\"");
        fs::write(dir.join("e.md"), "---\ntitle: E\n---\n").unwrap();

        let posts = PostRepository::new(dir).build().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "a"]);
        assert!(posts.iter().all(|p| p.published));
    }

    #[test]
    fn test_undated_posts_sort_last() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        write_post(dir, "a-undated.md", "A", "someday", "true");
        write_post(dir, "b-dated.md", "B", "2020-05-05", "true");
        write_post(dir, "c-undated.md", "C", "\"\"", "true");
        write_post(dir, "d-dated.md", "D", "2021-05-05", "true");

        let posts = PostRepository::new(dir).build().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["d-dated", "b-dated", "a-undated", "c-undated"]);
    }

    #[test]
    fn test_equal_dates_keep_file_order() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        write_post(dir, "b.md", "B", "2024-01-01", "true");
        write_post(dir, "a.md", "A", "2024-01-01", "true");

        let posts = PostRepository::new(dir).build().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let repo = PostRepository::new(tmp.path().join("missing"));
        assert!(repo.build().unwrap().is_empty());
    }

    #[test]
    fn test_find_published_document() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        write_post(dir, "hello.md", "Hello", "2024-01-01", "true");
        write_post(dir, "hidden.md", "Hidden", "2024-01-01", "false");

        let repo = PostRepository::new(dir);
        let doc = repo.find("hello").unwrap().unwrap();
        assert_eq!(doc.post.title, "Hello");
        assert_eq!(doc.body, "Body of Hello.\n");
        assert!(repo.find("hidden").unwrap().is_none());
        assert!(repo.find("nope").unwrap().is_none());
    }

    #[test]
    fn test_directory_with_glob_characters() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("posts [2024]");
        fs::create_dir(&dir).unwrap();
        write_post(&dir, "x.md", "X", "2024-01-01", "true");

        let posts = PostRepository::new(&dir).build().unwrap();
        assert_eq!(posts.len(), 1);
    }
}
