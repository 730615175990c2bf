//! Request-scoped fetch capability

use reqwest::{Client, Url};
use std::future::Future;
use thiserror::Error;

/// Errors raised while fetching or decoding upstream data
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid URL {url}: {message}")]
    Url { url: String, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Something that can GET a path relative to the current page
pub trait Fetch {
    /// Fetch `path` and return the response body
    fn get(&self, path: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// HTTP fetcher resolving relative paths against a page URL
///
/// Relative paths resolve the way a browser would, so `../api/posts`
/// fetched from `http://host/categories/tech` hits `http://host/api/posts`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base: String,
}

impl HttpFetcher {
    pub fn new(client: Client, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Resolve `path` against the page URL
    pub fn resolve(&self, path: &str) -> Result<Url, FetchError> {
        Url::parse(&self.base)
            .and_then(|base| base.join(path))
            .map_err(|e| FetchError::Url {
                url: format!("{} + {}", self.base, path),
                message: e.to_string(),
            })
    }
}

impl Fetch for HttpFetcher {
    async fn get(&self, path: &str) -> Result<String, FetchError> {
        let url = self.resolve(path)?;
        tracing::debug!("GET {}", url);

        // The status is not checked; the body alone decides.
        let response = self.client.get(url).send().await?;
        tracing::debug!("Upstream responded with {}", response.status());
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_endpoint() {
        let fetcher = HttpFetcher::new(Client::new(), "http://localhost:4000/categories/tech");
        let url = fetcher.resolve("../api/posts").unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/api/posts");
    }

    #[test]
    fn test_resolve_under_root() {
        let fetcher = HttpFetcher::new(Client::new(), "https://example.com/blog/categories/life");
        let url = fetcher.resolve("../api/posts").unwrap();
        assert_eq!(url.as_str(), "https://example.com/blog/api/posts");
    }

    #[test]
    fn test_resolve_absolute_endpoint() {
        let fetcher = HttpFetcher::new(Client::new(), "http://localhost:4000/categories/tech");
        let url = fetcher.resolve("https://api.example.com/posts").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/posts");
    }

    #[test]
    fn test_resolve_invalid_base() {
        let fetcher = HttpFetcher::new(Client::new(), "not a url");
        assert!(matches!(
            fetcher.resolve("../api/posts"),
            Err(FetchError::Url { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_connection_refused() {
        // Port 1 is never listening locally
        let fetcher = HttpFetcher::new(Client::new(), "http://127.0.0.1:1/categories/tech");
        assert!(matches!(
            fetcher.get("../api/posts").await,
            Err(FetchError::Transport(_))
        ));
    }
}
