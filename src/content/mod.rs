//! Content module - handles posts, front-matter and markdown rendering

mod frontmatter;
mod markdown;
mod post;
pub mod repository;

pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{Document, Post};
pub use repository::PostRepository;
