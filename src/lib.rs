//! blog-rs: a small markdown blog
//!
//! Markdown posts with YAML front-matter are read from a single directory,
//! exposed as a JSON list at `/api/posts`, and rendered by a few page routes.

pub mod api;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod pages;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding the markdown posts
    pub posts_dir: std::path::PathBuf,
    /// Directory of static files (thumbnails, styles)
    pub static_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            static_dir,
        })
    }

    /// Repository over this blog's posts directory
    pub fn repository(&self) -> content::PostRepository {
        content::PostRepository::new(&self.posts_dir)
    }
}
