//! List published posts

use anyhow::Result;

use crate::api::{self, PostQuery};
use crate::Blog;

/// Print published posts, newest first, optionally filtered by category
pub fn run(blog: &Blog, category: Option<&str>) -> Result<()> {
    let query = PostQuery {
        category: category.map(str::to_string),
    };
    let posts = api::list_posts(&blog.repository(), &query)?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!("  {} - {} [{}]", post.date, post.title, post.slug);
    }

    Ok(())
}
