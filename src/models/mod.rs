//! Data models
//!
//! This module contains the data structures shared across the service.
//! Models represent:
//! - Store-owned entities (Article, Issue, MediaOutlet)
//! - The fixed section label set (Category)
//! - The curation insert payload (NewArticle)

mod article;
mod issue;
mod outlet;

pub use article::{Article, Category, NewArticle};
pub use issue::Issue;
pub use outlet::MediaOutlet;
