//! List the categories of the local posts

use anyhow::Result;

use crate::content::category_counts;
use crate::Site;

/// Print every category with its post count
pub async fn run(site: &Site) -> Result<()> {
    let posts = site.store.load().await?;
    let categories = category_counts(&posts);

    println!("Posts ({}):", posts.len());
    println!("Categories ({}):", categories.len());
    for (cat, count) in categories {
        println!("  {} ({}) {}", cat, count, site.config.category_path(&cat));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_list_local_posts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("source")).unwrap();
        fs::write(
            dir.path().join("source/posts.json"),
            r#"[{"title":"a","categories":["tech",7]},{"categories":["life"]}]"#,
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert!(run(&site).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_without_posts_file() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert!(run(&site).await.is_err());
    }
}
