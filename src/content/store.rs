//! Local posts store backing the `/api/posts` endpoint

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::Post;
use crate::config::SiteConfig;

/// JSON file holding the site's posts
#[derive(Debug, Clone)]
pub struct PostStore {
    path: PathBuf,
}

impl PostStore {
    /// Create a store reading from an explicit file
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create the store configured for a site directory
    pub fn from_config(base_dir: &Path, config: &SiteConfig) -> Self {
        Self::new(base_dir.join(&config.source_dir).join(&config.posts_file))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw JSON body, as served to API clients
    pub async fn read_raw(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read posts from {:?}", self.path))
    }

    /// Read and parse all posts
    pub async fn load(&self) -> Result<Vec<Post>> {
        let raw = self.read_raw().await?;
        let posts = serde_json::from_str(&raw)
            .with_context(|| format!("invalid posts JSON in {:?}", self.path))?;
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_posts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(&path, r#"[{"title":"a","categories":["tech"]}]"#).unwrap();

        let posts = PostStore::new(&path).load().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert!(posts[0].in_category("tech"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = PostStore::new(dir.path().join("nope.json"));
        assert!(store.read_raw().await.is_err());
    }

    #[test]
    fn test_from_config() {
        let config = SiteConfig::default();
        let store = PostStore::from_config(Path::new("/site"), &config);
        assert_eq!(store.path(), Path::new("/site/source/posts.json"));
    }
}
