//! Article curation
//!
//! The write path: validates an admin-submitted article and inserts it
//! into the hosted store. Ids are generated here so a retried submission
//! cannot collide on the primary key.

use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::datastore::{NewsStore, StoreError};
use crate::models::{Category, MediaOutlet, NewArticle};

/// Error type for curation operations
#[derive(Debug, thiserror::Error)]
pub enum CurationError {
    /// The submission failed validation; the message names the field
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Admin-submitted article, as received from the client
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticleInput {
    pub outlet_id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Section label in the store's Korean form
    pub category: String,
    pub ideology: i32,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Curation service
pub struct CurationService {
    store: Arc<dyn NewsStore>,
}

impl std::fmt::Debug for CurationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurationService").finish()
    }
}

impl CurationService {
    pub fn new(store: Arc<dyn NewsStore>) -> Self {
        Self { store }
    }

    /// Validate and insert a curated article, returning its generated id
    pub async fn create_article(&self, input: CreateArticleInput) -> Result<String, CurationError> {
        let article = validate(input)?;
        let id = article.id.clone();
        self.store.insert_article(&article).await?;
        tracing::info!(article_id = %id, outlet_id = %article.outlet_id, "curated article inserted");
        Ok(id)
    }

    /// Outlets for the curation form, most-covered first
    pub async fn list_outlets(&self) -> Result<Vec<MediaOutlet>, CurationError> {
        Ok(self.store.fetch_media_outlets().await?)
    }
}

fn validate(input: CreateArticleInput) -> Result<NewArticle, CurationError> {
    let outlet_id = input.outlet_id.trim();
    if outlet_id.is_empty() {
        return Err(CurationError::Validation("outlet_id is required".into()));
    }
    let title = input.title.trim();
    if title.is_empty() {
        return Err(CurationError::Validation("title is required".into()));
    }
    let description = input.description.trim();
    if description.is_empty() {
        return Err(CurationError::Validation("description is required".into()));
    }
    let category = Category::from_str(&input.category).ok_or_else(|| {
        CurationError::Validation(format!("unknown category '{}'", input.category.trim()))
    })?;
    if !(1..=10).contains(&input.ideology) {
        return Err(CurationError::Validation(
            "ideology must be between 1 and 10".into(),
        ));
    }

    Ok(NewArticle {
        id: Uuid::new_v4().to_string(),
        outlet_id: outlet_id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        url: normalize_optional(input.url),
        category,
        ideology: input.ideology,
        image_url: normalize_optional(input.image_url),
    })
}

/// Blank optional fields are stored as null, not empty strings
fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
