//! Hosted data store access
//!
//! This module provides the read/write abstraction over the hosted
//! Supabase-style REST store. It supports:
//! - SupabaseStore (reqwest) - the production backend
//! - MemoryStore - in-process store for tests and local development
//!
//! All row shapes are normalized into the canonical models before they
//! leave this module; callers never see wire column names.

pub mod memory;
pub mod rows;
pub mod supabase;

use async_trait::async_trait;

use crate::models::{Article, Category, Issue, MediaOutlet, NewArticle};

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

/// Error type for data store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("Store request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The store answered with a non-success status
    #[error("Store returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body did not match the expected row shape
    #[error("Failed to decode store response: {0}")]
    Decode(String),
    /// A lookup by id matched no row
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Filter for issue list fetches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueFilter {
    /// Restrict to one section; `None` fetches every section
    pub category: Option<Category>,
}

impl IssueFilter {
    pub fn for_category(category: Category) -> Self {
        Self {
            category: Some(category),
        }
    }
}

/// Read/write interface to the hosted news store
///
/// One method per remote access pattern the service performs. Issue list
/// results arrive newest first; article batch lookups carry no ordering
/// guarantee and are reordered by the caller.
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// Fetch issues, newest first, optionally restricted to one section
    async fn fetch_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError>;

    /// Fetch a single issue by id
    async fn fetch_issue(&self, id: &str) -> Result<Issue, StoreError>;

    /// Fetch a batch of articles by id in one request
    ///
    /// Ids that match no row are silently absent from the result.
    async fn fetch_articles_by_ids(&self, ids: &[String]) -> Result<Vec<Article>, StoreError>;

    /// Fetch all media outlets, most-covered first
    async fn fetch_media_outlets(&self) -> Result<Vec<MediaOutlet>, StoreError>;

    /// Insert a curated article
    async fn insert_article(&self, article: &NewArticle) -> Result<(), StoreError>;
}
