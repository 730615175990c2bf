//! Category page loader
//!
//! Fetches every post from the posts API, keeps the ones tagged with the
//! requested category and hands them to the page. Any failure along the way
//! becomes a single 404.

mod fetch;

pub use fetch::{Fetch, FetchError, HttpFetcher};

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SiteConfig;
use crate::content::{filter_by_category, Post};

/// Endpoint fetched when none is configured, relative to the page
pub const DEFAULT_POSTS_API: &str = "../api/posts";

/// Data handed to the category page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResult {
    /// Posts tagged with `category`, in API order
    pub filtered_posts: Vec<Post>,
    pub category: String,
}

/// Loader failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Could not find posts related to {category}")]
    NotFound { category: String },
}

impl LoadError {
    /// HTTP status to render the failure with
    pub fn status(&self) -> StatusCode {
        match self {
            LoadError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

/// Loads the data for a category page
#[derive(Debug, Clone)]
pub struct CategoryPageLoader {
    endpoint: String,
}

impl Default for CategoryPageLoader {
    fn default() -> Self {
        Self::new(DEFAULT_POSTS_API)
    }
}

impl CategoryPageLoader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.posts_api.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Load the posts of `category` through `fetch`
    pub async fn load<F: Fetch>(&self, category: &str, fetch: &F) -> Result<LoadResult, LoadError> {
        match self.try_load(category, fetch).await {
            Ok(result) => {
                tracing::debug!(
                    "Loaded {} posts for category {:?}",
                    result.filtered_posts.len(),
                    category
                );
                Ok(result)
            }
            Err(e) => {
                tracing::warn!("Failed to load posts for category {:?}: {}", category, e);
                Err(LoadError::NotFound {
                    category: category.to_string(),
                })
            }
        }
    }

    async fn try_load<F: Fetch>(&self, category: &str, fetch: &F) -> Result<LoadResult, FetchError> {
        let body = fetch.get(&self.endpoint).await?;
        let posts: Vec<Post> = serde_json::from_str(&body)?;

        Ok(LoadResult {
            filtered_posts: filter_by_category(posts, category),
            category: category.to_string(),
        })
    }
}

/// Load `category` from the default posts endpoint
pub async fn load<F: Fetch>(category: &str, fetch: &F) -> Result<LoadResult, LoadError> {
    CategoryPageLoader::default().load(category, fetch).await
}
