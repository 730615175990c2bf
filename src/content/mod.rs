//! Content module - post model and the local posts store

mod post;
pub mod store;

pub use post::{category_counts, filter_by_category, Post};
pub use store::PostStore;
