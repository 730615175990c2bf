//! Page templates using the Tera template engine
//!
//! Templates are embedded in the binary.

use anyhow::Result;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::loader::{LoadError, LoadResult};

/// Renders category and error pages
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with the embedded templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Category names come straight from the URL
        tera.autoescape_on(vec![".html"]);

        tera.add_raw_templates(vec![
            ("category.html", include_str!("category.html")),
            ("error.html", include_str!("error.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a category page
    pub fn render_category(&self, config: &SiteConfig, result: &LoadResult) -> Result<String> {
        let mut context = base_context(config);
        context.insert("category", &result.category);
        context.insert("posts", &result.filtered_posts);
        context.insert(
            "category_base",
            &format!(
                "{}/{}",
                config.root.trim_end_matches('/'),
                config.category_dir.trim_matches('/')
            ),
        );
        Ok(self.tera.render("category.html", &context)?)
    }

    /// Render the page shown when loading fails
    pub fn render_error(&self, config: &SiteConfig, error: &LoadError) -> Result<String> {
        let mut context = base_context(config);
        context.insert("status", &error.status().as_u16());
        context.insert("message", &error.to_string());
        Ok(self.tera.render("error.html", &context)?)
    }
}

fn base_context(config: &SiteConfig) -> Context {
    let mut context = Context::new();
    context.insert("title", &config.title);
    context.insert("root", &config.root);
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Post;

    #[test]
    fn test_render_category() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut post = Post::new("Hello Rust", &["tech", "rust lang"]);
        post.excerpt = Some(serde_json::Value::from("Short intro"));
        let result = LoadResult {
            filtered_posts: vec![post, Post::new("Second", &["tech"])],
            category: "tech".to_string(),
        };

        let html = renderer
            .render_category(&SiteConfig::default(), &result)
            .unwrap();
        assert!(html.contains("Posts in tech"));
        assert!(html.contains("Hello Rust"));
        assert!(html.contains("Second"));
        assert!(html.contains("Short intro"));
        assert!(html.contains("rust%20lang"));
        assert!(!html.contains("No posts in this category"));
    }

    #[test]
    fn test_render_untyped_fields() {
        let renderer = TemplateRenderer::new().unwrap();
        let post: Post =
            serde_json::from_str(r#"{"title":42,"date":1700000000,"categories":["tech",7]}"#)
                .unwrap();
        let result = LoadResult {
            filtered_posts: vec![post],
            category: "tech".to_string(),
        };

        let html = renderer
            .render_category(&SiteConfig::default(), &result)
            .unwrap();
        assert!(html.contains("<h2>42</h2>"));
        assert!(html.contains("1700000000"));
        assert!(html.contains(">tech</a>"));
        assert!(!html.contains(">7</a>"));
    }

    #[test]
    fn test_render_empty_category() {
        let renderer = TemplateRenderer::new().unwrap();
        let result = LoadResult {
            filtered_posts: Vec::new(),
            category: "sports".to_string(),
        };
        let html = renderer
            .render_category(&SiteConfig::default(), &result)
            .unwrap();
        assert!(html.contains("No posts in this category yet."));
    }

    #[test]
    fn test_render_escapes_category() {
        let renderer = TemplateRenderer::new().unwrap();
        let result = LoadResult {
            filtered_posts: Vec::new(),
            category: "<script>".to_string(),
        };
        let html = renderer
            .render_category(&SiteConfig::default(), &result)
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_error() {
        let renderer = TemplateRenderer::new().unwrap();
        let error = LoadError::NotFound {
            category: "sports".to_string(),
        };
        let html = renderer
            .render_error(&SiteConfig::default(), &error)
            .unwrap();
        assert!(html.contains("404"));
        assert!(html.contains("Could not find posts related to sports"));
    }
}
