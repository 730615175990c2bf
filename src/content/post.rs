//! Post model as exposed by the posts API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A blog post
///
/// Only `categories` is required and only its string elements are ever
/// compared. Display fields are kept as the API sends them, whatever their
/// JSON type, and anything else lands in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,

    /// URL-friendly name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<Value>,

    /// Publication date, as sent by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,

    /// Short summary shown in listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<Value>,

    /// Post categories; non-string elements never match
    pub categories: Vec<Value>,

    /// Any other fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// Create a post with a title and categories
    pub fn new(title: &str, categories: &[&str]) -> Self {
        Self {
            title: Some(Value::String(title.to_string())),
            slug: None,
            date: None,
            excerpt: None,
            categories: categories
                .iter()
                .map(|c| Value::String(c.to_string()))
                .collect(),
            extra: Map::new(),
        }
    }

    /// Whether the post is tagged with `category` (exact, case-sensitive)
    pub fn in_category(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| matches!(c, Value::String(s) if s == category))
    }

    /// Title as text, when the API sent a string
    pub fn title_str(&self) -> Option<&str> {
        self.title.as_ref().and_then(Value::as_str)
    }

    /// String elements of `categories`
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().filter_map(Value::as_str)
    }
}

/// Keep the posts belonging to `category`, preserving their order
pub fn filter_by_category(posts: Vec<Post>, category: &str) -> Vec<Post> {
    posts
        .into_iter()
        .filter(|post| post.in_category(category))
        .collect()
}

/// Count posts per category, most used first (ties by name)
pub fn category_counts(posts: &[Post]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for post in posts {
        for cat in post.category_names() {
            *counts.entry(cat).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<_> = counts
        .into_iter()
        .map(|(cat, count)| (cat.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
