//! Load a single category page and print its data

use anyhow::Result;

use crate::Site;

/// Run the category loader once and print the result as JSON
///
/// `url` overrides the page URL relative fetches resolve against.
pub async fn run(site: &Site, category: &str, url: Option<&str>) -> Result<()> {
    let page_url = url
        .map(str::to_string)
        .unwrap_or_else(|| site.config.category_url(category));
    tracing::info!("Loading category {:?} from {}", category, page_url);

    match site.load_category(category, &page_url).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(err) => anyhow::bail!("{} ({})", err, err.status()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_unreachable_site() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();

        // Nothing listens on port 1
        let err = run(&site, "tech", Some("http://127.0.0.1:1/categories/tech"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not find posts related to tech (404 Not Found)"
        );
    }
}
