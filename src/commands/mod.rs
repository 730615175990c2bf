//! CLI commands

pub mod list;
pub mod load;
