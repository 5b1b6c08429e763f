//! Entity resolution
//!
//! Turns an issue's parsed reference list into full articles. One batch
//! fetch per list; the store returns rows in its own order, so the result
//! is reassembled to match the reference list. Ids the store does not know
//! are dropped without error.

use std::collections::HashMap;

use crate::datastore::{NewsStore, StoreError};
use crate::models::Article;

/// Resolve article ids into articles, preserving reference list order
///
/// Performs at most one store request. An empty id list short-circuits
/// without touching the store.
pub async fn resolve_in_order(
    store: &dyn NewsStore,
    ids: &[String],
) -> Result<Vec<Article>, StoreError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let fetched = store.fetch_articles_by_ids(ids).await?;
    let by_id: HashMap<&str, &Article> = fetched.iter().map(|a| (a.id.as_str(), a)).collect();

    Ok(ids
        .iter()
        .filter_map(|id| by_id.get(id.as_str()).map(|a| (*a).clone()))
        .collect())
}
