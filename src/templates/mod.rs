//! Built-in page templates using the Tera template engine
//!
//! Templates are embedded directly in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::helpers;

/// Template renderer with the embedded blog templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("layout.html")),
            ("home.html", include_str!("home.html")),
            ("posts.html", include_str!("posts.html")),
            ("post.html", include_str!("post.html")),
        ])?;

        tera.register_filter("format_date", format_date_filter);

        Ok(Self { tera })
    }

    /// Render a page template with the site data and the page's own data
    pub fn render<T: Serialize>(
        &self,
        template_name: &str,
        config: &SiteConfig,
        page: &T,
    ) -> Result<String> {
        let mut context = Context::from_serialize(page)?;
        context.insert("site", &SiteData::from(config));
        Ok(self.tera.render(template_name, &context)?)
    }
}

/// Tera filter: format a raw post date as "January 5, 2024"
///
/// An unparseable date fails the render instead of printing a wrong date.
fn format_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("format_date", "value", String, value);
    helpers::format_date(&s)
        .map(tera::Value::String)
        .map_err(|e| tera::Error::msg(e.to_string()))
}

/// Site fields exposed to every template
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub url: String,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
        }
    }
}
