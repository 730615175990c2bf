//! category-pages: category pages for a blog front-end
//!
//! A category page fetches the site's posts from its posts API, keeps the
//! ones tagged with the requested category and renders them. Any failure
//! while loading becomes a 404 page.

pub mod commands;
pub mod config;
pub mod content;
pub mod loader;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

use content::PostStore;
use loader::{CategoryPageLoader, HttpFetcher, LoadError, LoadResult};

/// A site directory and its configuration
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Posts served by the posts API
    pub store: PostStore,
}

impl Site {
    /// Create a new site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let store = PostStore::from_config(&base_dir, &config);

        Ok(Self {
            config,
            base_dir,
            store,
        })
    }

    /// Load a category page as if it were requested at `page_url`
    pub async fn load_category(
        &self,
        category: &str,
        page_url: &str,
    ) -> Result<LoadResult, LoadError> {
        let fetcher = HttpFetcher::new(reqwest::Client::new(), page_url);
        CategoryPageLoader::from_config(&self.config)
            .load(category, &fetcher)
            .await
    }
}
