//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::loader::DEFAULT_POSTS_API;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,

    // URL
    pub url: String,
    pub root: String,
    pub category_dir: String,

    // Posts API
    pub posts_api: String,
    pub source_dir: String,
    pub posts_file: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),
            category_dir: "categories".to_string(),

            posts_api: DEFAULT_POSTS_API.to_string(),
            source_dir: "source".to_string(),
            posts_file: "posts.json".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Route path of a category page, e.g. `/categories/tech`
    pub fn category_path(&self, category: &str) -> String {
        format!(
            "{}/{}/{}",
            self.root.trim_end_matches('/'),
            self.category_dir.trim_matches('/'),
            category
        )
    }

    /// Full URL of a category page on the configured origin
    pub fn category_url(&self, category: &str) -> String {
        format!(
            "{}{}",
            self.url.trim_end_matches('/'),
            self.category_path(category)
        )
    }
}
