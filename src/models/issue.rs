//! Issue model
//!
//! An `Issue` is a curated cluster of articles about one real-world story,
//! with precomputed per-leaning counts and one summary per leaning. The
//! aggregate fields are maintained by the out-of-band ingestion process;
//! this service only reads them.
//!
//! The count invariant (`progressive_count + centrist_count +
//! conservative_count == resolvable member articles`) is expected but never
//! enforced; mismatched rows still render.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

/// A curated story cluster with per-leaning aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier
    pub id: String,
    /// Story headline
    pub title: String,
    /// Section label; `None` when the stored label is missing or unknown
    pub category: Option<Category>,
    /// Total member article count
    pub article_count: i64,
    /// Member articles classified progressive
    pub progressive_count: i64,
    /// Member articles classified centrist
    pub centrist_count: i64,
    /// Member articles classified conservative
    pub conservative_count: i64,
    /// Progressive summary headline
    pub progressive_title: String,
    /// Progressive summary body
    pub progressive_body: String,
    /// Centrist summary headline
    pub centrist_title: String,
    /// Centrist summary body
    pub centrist_body: String,
    /// Conservative summary headline
    pub conservative_title: String,
    /// Conservative summary body
    pub conservative_body: String,
    /// Reference list of member article ids, string-encoded
    /// (JSON array or comma-joined; see `services::reflist`)
    pub article_ids: String,
    /// Story date, when the ingestion recorded one
    pub date: Option<DateTime<Utc>>,
    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
    /// Representative image URL
    pub image_url: Option<String>,
}

impl Issue {
    /// Whether the issue matches a section filter
    ///
    /// `None` means no filter; an issue without a recognized category never
    /// matches an active filter.
    pub fn matches_category(&self, filter: Option<Category>) -> bool {
        match filter {
            None => true,
            Some(want) => self.category == Some(want),
        }
    }
}
