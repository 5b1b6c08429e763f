//! Article model
//!
//! This module provides:
//! - `Article` entity representing a single outlet article
//! - `Category` enum for the fixed news section labels
//! - `NewArticle` input type for curation inserts
//!
//! Articles are owned by the hosted data store and are read-only here;
//! the only write path is the curation insert into `newspaper_articles`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single news article published by one outlet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Unique identifier (string key in the hosted store)
    pub id: String,
    /// Headline
    pub title: String,
    /// Body or description text
    pub body: String,
    /// Source URL, when the outlet published one
    pub url: Option<String>,
    /// Publishing outlet name
    pub press: String,
    /// Ideology score on the 1-10 scale; `None` is treated as centrist
    pub ideology: Option<i32>,
    /// Section label as stored, not guaranteed to be one of [`Category`]
    pub category: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Fixed news section labels
///
/// The hosted store keys issues by these Korean section labels. The set is
/// closed; rows carrying any other label are kept but never match a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "정치")]
    Politics,
    #[serde(rename = "경제")]
    Economy,
    #[serde(rename = "사회")]
    Society,
    #[serde(rename = "국제")]
    International,
    #[serde(rename = "문화")]
    Culture,
    #[serde(rename = "스포츠")]
    Sports,
    #[serde(rename = "IT/과학")]
    ItScience,
    #[serde(rename = "생활/건강")]
    LifeHealth,
}

impl Category {
    /// All categories in navigation order
    pub const ALL: [Category; 8] = [
        Category::Politics,
        Category::Economy,
        Category::Society,
        Category::International,
        Category::Culture,
        Category::Sports,
        Category::ItScience,
        Category::LifeHealth,
    ];

    /// Convert to the store's string label
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Politics => "정치",
            Category::Economy => "경제",
            Category::Society => "사회",
            Category::International => "국제",
            Category::Culture => "문화",
            Category::Sports => "스포츠",
            Category::ItScience => "IT/과학",
            Category::LifeHealth => "생활/건강",
        }
    }

    /// Parse from the store's string label
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "정치" => Some(Category::Politics),
            "경제" => Some(Category::Economy),
            "사회" => Some(Category::Society),
            "국제" => Some(Category::International),
            "문화" => Some(Category::Culture),
            "스포츠" => Some(Category::Sports),
            "IT/과학" => Some(Category::ItScience),
            "생활/건강" => Some(Category::LifeHealth),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A curated outlet article ready for insertion
///
/// Produced by the curation service after validation; the id is generated
/// server-side so retries cannot create duplicate keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    /// Generated identifier (UUID v4)
    pub id: String,
    /// Media outlet the article belongs to
    pub outlet_id: String,
    /// Headline
    pub title: String,
    /// Description text
    pub description: String,
    /// Source URL
    pub url: Option<String>,
    /// Section label
    pub category: Category,
    /// Ideology score on the 1-10 scale
    pub ideology: i32,
    /// Representative image URL
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_label_round_trip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_str(cat.as_str()), Some(cat));
        }
    }

    #[test]
    fn category_unknown_label_is_none() {
        assert_eq!(Category::from_str("환경"), None);
        assert_eq!(Category::from_str(""), None);
    }

    #[test]
    fn category_label_trims_whitespace() {
        assert_eq!(Category::from_str(" 정치 "), Some(Category::Politics));
    }

    #[test]
    fn category_serde_uses_store_labels() {
        let json = serde_json::to_string(&Category::ItScience).unwrap();
        assert_eq!(json, "\"IT/과학\"");
        let back: Category = serde_json::from_str("\"생활/건강\"").unwrap();
        assert_eq!(back, Category::LifeHealth);
    }
}
