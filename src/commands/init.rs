//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config = SiteConfig::default();

    // Create directory structure
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join(&config.posts_dir))?;
    fs::create_dir_all(target_dir.join(&config.static_dir))?;

    // Create default _config.yml
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        tracing::info!("Keeping existing {:?}", config_path);
    } else {
        let config_content = r#"# Blog configuration

# Site
title: My Blog
description: ''
author: John Doe
language: en

# URL
url: http://localhost:4000

# Directory
posts_dir: src/posts
static_dir: static

# Code highlighting
highlight:
  theme: base16-ocean.dark
  languages:
    - javascript
    - typescript
    - php
    - html
    - css
    - json
    - yaml
    - svelte
    - markdown
"#;
        fs::write(&config_path, config_content)?;
    }

    // Create a sample post
    let sample_path = target_dir.join(&config.posts_dir).join("hello-world.md");
    if !sample_path.exists() {
        let now = chrono::Local::now();
        let sample_post = format!(
            r#"---
title: Hello World
description: The first post on this blog.
date: {}
categories:
  - general
published: true
thumbnail: ''
---

Welcome! This post lives in `{}/hello-world.md`, so its slug is `hello-world`.

```javascript
console.log('hello world');
```
"#,
            now.format("%Y-%m-%d"),
            config.posts_dir
        );
        fs::write(&sample_path, sample_post)?;
    }

    Ok(())
}
