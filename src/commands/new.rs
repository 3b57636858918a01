//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Create a new post file and return its path
///
/// The file name (and therefore the slug) is the slugified title unless
/// `path` is given. New posts are drafts unless `publish` is set.
pub fn create_post(
    blog: &Blog,
    title: &str,
    path: Option<&str>,
    publish: bool,
) -> Result<PathBuf> {
    let now = chrono::Local::now();

    fs::create_dir_all(&blog.posts_dir)?;

    let name = match path {
        Some(p) => p.trim_end_matches(".md").to_string(),
        None => slug::slugify(title),
    };
    if name.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let file_path = blog.posts_dir.join(format!("{}.md", name));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        r#"---
title: {}
description: ''
date: {}
categories: []
published: {}
thumbnail: ''
---
"#,
        serde_json::to_string(title)?,
        now.format("%Y-%m-%d"),
        publish
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_post_uses_slugified_title() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();

        let path = create_post(&blog, "Hello: A \"Quoted\" Title", None, true).unwrap();
        assert_eq!(path, blog.posts_dir.join("hello-a-quoted-title.md"));

        let posts = blog.repository().build().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Hello: A \"Quoted\" Title");
        assert_eq!(posts[0].slug, "hello-a-quoted-title");
    }

    #[test]
    fn test_create_post_draft_is_hidden() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();

        create_post(&blog, "Draft", Some("my-draft"), false).unwrap();
        assert!(blog.posts_dir.join("my-draft.md").exists());
        assert!(blog.repository().build().unwrap().is_empty());
    }

    #[test]
    fn test_create_post_refuses_overwrite() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();

        create_post(&blog, "Same", None, false).unwrap();
        assert!(create_post(&blog, "Same", None, false).is_err());
    }
}
