//! Wire row shapes
//!
//! The hosted store exposes two generations of issue rows: the current
//! `issue_table` shape and the legacy `homepage_articles` shape. Both
//! normalize into the canonical [`Issue`] model here, so the rest of the
//! service never branches on which table a row came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Article, Category, Issue, MediaOutlet, NewArticle};

/// Current-generation issue row (`issue_table`)
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRow {
    pub id: String,
    /// Story headline
    #[serde(default)]
    pub related_major_issue: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub article_count: Option<i64>,
    #[serde(default)]
    pub progressive_count: Option<i64>,
    #[serde(default)]
    pub centrist_count: Option<i64>,
    #[serde(default)]
    pub conservative_count: Option<i64>,
    #[serde(default)]
    pub progressive_title: Option<String>,
    #[serde(default)]
    pub progressive_body: Option<String>,
    #[serde(default)]
    pub centrist_title: Option<String>,
    #[serde(default)]
    pub centrist_body: Option<String>,
    #[serde(default)]
    pub conservative_title: Option<String>,
    #[serde(default)]
    pub conservative_body: Option<String>,
    /// String-encoded member article ids
    #[serde(default)]
    pub news_ids: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Legacy issue row (`homepage_articles`)
///
/// Carries only one summary (written into the centrist slot) and no
/// per-leaning counts; normalized rows report zero counts.
#[derive(Debug, Clone, Deserialize)]
pub struct HomepageArticleRow {
    pub news_post_id: String,
    #[serde(default)]
    pub article_count: Option<i64>,
    #[serde(default)]
    pub included_article_ids: Option<String>,
    #[serde(default)]
    pub included_article_ai_summary_titles: Option<String>,
    #[serde(default)]
    pub included_article_ai_summary_descriptions: Option<String>,
    #[serde(default)]
    pub imageurl: Option<String>,
}

/// An issue row from either table generation
///
/// Untagged: serde tries the current shape first, then the legacy one.
/// The discriminating field is the primary key column name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawIssue {
    Current(IssueRow),
    Legacy(HomepageArticleRow),
}

impl RawIssue {
    /// Normalize into the canonical issue model
    pub fn normalize(self) -> Issue {
        match self {
            RawIssue::Current(row) => Issue {
                id: row.id,
                title: row.related_major_issue.unwrap_or_default(),
                category: row.category.as_deref().and_then(Category::from_str),
                article_count: row.article_count.unwrap_or(0),
                progressive_count: row.progressive_count.unwrap_or(0),
                centrist_count: row.centrist_count.unwrap_or(0),
                conservative_count: row.conservative_count.unwrap_or(0),
                progressive_title: row.progressive_title.unwrap_or_default(),
                progressive_body: row.progressive_body.unwrap_or_default(),
                centrist_title: row.centrist_title.unwrap_or_default(),
                centrist_body: row.centrist_body.unwrap_or_default(),
                conservative_title: row.conservative_title.unwrap_or_default(),
                conservative_body: row.conservative_body.unwrap_or_default(),
                article_ids: row.news_ids.unwrap_or_default(),
                date: row.date,
                created_at: row.created_at.unwrap_or_else(Utc::now),
                image_url: row.image_url,
            },
            RawIssue::Legacy(row) => Issue {
                id: row.news_post_id,
                title: row.included_article_ai_summary_titles.unwrap_or_default(),
                category: None,
                article_count: row.article_count.unwrap_or(0),
                progressive_count: 0,
                centrist_count: 0,
                conservative_count: 0,
                progressive_title: String::new(),
                progressive_body: String::new(),
                centrist_title: String::new(),
                centrist_body: row
                    .included_article_ai_summary_descriptions
                    .unwrap_or_default(),
                conservative_title: String::new(),
                conservative_body: String::new(),
                article_ids: row.included_article_ids.unwrap_or_default(),
                date: None,
                created_at: Utc::now(),
                image_url: row.imageurl,
            },
        }
    }
}

/// Article row (`articles_table`)
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleRow {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub press: Option<String>,
    #[serde(default)]
    pub press_ideology: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ArticleRow {
    pub fn normalize(self) -> Article {
        Article {
            id: self.id,
            title: self.title.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            url: self.url,
            press: self.press.unwrap_or_default(),
            ideology: self.press_ideology,
            category: self.category,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Media outlet row (`media_outlets`)
#[derive(Debug, Clone, Deserialize)]
pub struct OutletRow {
    pub id: String,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub media_description: Option<String>,
    #[serde(default)]
    pub media_article_count: Option<i64>,
    #[serde(default)]
    pub media_ideology: Option<i32>,
    #[serde(default)]
    pub media_info: Option<String>,
}

impl OutletRow {
    pub fn normalize(self) -> MediaOutlet {
        MediaOutlet {
            id: self.id,
            url: self.media_url.unwrap_or_default(),
            description: self.media_description.unwrap_or_default(),
            article_count: self.media_article_count.unwrap_or(0),
            ideology: self.media_ideology,
            info: self.media_info.unwrap_or_default(),
        }
    }
}

/// Insert payload for curated articles (`newspaper_articles`)
#[derive(Debug, Clone, Serialize)]
pub struct NewArticleRow<'a> {
    pub newspaper_post_id: &'a str,
    pub author_media_outlet_id: &'a str,
    pub news_post_title: &'a str,
    pub news_post_description: &'a str,
    pub news_post_url: Option<&'a str>,
    pub news_post_ideology: i32,
    pub image_url: Option<&'a str>,
    pub category: &'a str,
}

impl<'a> From<&'a NewArticle> for NewArticleRow<'a> {
    fn from(article: &'a NewArticle) -> Self {
        Self {
            newspaper_post_id: &article.id,
            author_media_outlet_id: &article.outlet_id,
            news_post_title: &article.title,
            news_post_description: &article.description,
            news_post_url: article.url.as_deref(),
            news_post_ideology: article.ideology,
            image_url: article.image_url.as_deref(),
            category: article.category.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn current_row_normalizes_fields() {
        let json = r#"{
            "id": "i1",
            "related_major_issue": "예산안 협상",
            "category": "정치",
            "article_count": 10,
            "progressive_count": 3,
            "centrist_count": 2,
            "conservative_count": 5,
            "centrist_body": "중도 요약",
            "news_ids": "[\"a\",\"b\"]",
            "created_at": "2025-06-01T09:00:00Z"
        }"#;
        let raw: RawIssue = serde_json::from_str(json).unwrap();
        let issue = raw.normalize();
        assert_eq!(issue.id, "i1");
        assert_eq!(issue.category, Some(Category::Politics));
        assert_eq!(issue.conservative_count, 5);
        assert_eq!(issue.centrist_body, "중도 요약");
        assert_eq!(issue.article_ids, r#"["a","b"]"#);
    }

    #[test]
    fn legacy_row_maps_summary_into_centrist_slot() {
        let json = r#"{
            "news_post_id": "legacy-7",
            "article_count": 4,
            "included_article_ids": "a, b, c",
            "included_article_ai_summary_titles": "요약 제목",
            "included_article_ai_summary_descriptions": "요약 본문",
            "imageurl": "https://img.example/x.jpg"
        }"#;
        let raw: RawIssue = serde_json::from_str(json).unwrap();
        let issue = raw.normalize();
        assert_eq!(issue.id, "legacy-7");
        assert_eq!(issue.title, "요약 제목");
        assert_eq!(issue.centrist_body, "요약 본문");
        assert_eq!(issue.article_ids, "a, b, c");
        assert_eq!(issue.progressive_count, 0);
        assert_eq!(issue.image_url.as_deref(), Some("https://img.example/x.jpg"));
    }

    #[test]
    fn unknown_category_label_becomes_none() {
        let json = r#"{"id": "i2", "category": "환경"}"#;
        let raw: RawIssue = serde_json::from_str(json).unwrap();
        assert_eq!(raw.normalize().category, None);
    }

    #[test]
    fn article_row_normalizes_nullable_fields() {
        let json = r#"{"id": "a1", "title": "기사", "press": "한겨레", "press_ideology": 2}"#;
        let row: ArticleRow = serde_json::from_str(json).unwrap();
        let article = row.normalize();
        assert_eq!(article.press, "한겨레");
        assert_eq!(article.ideology, Some(2));
        assert_eq!(article.body, "");
    }

    #[test]
    fn outlet_row_normalizes() {
        let json = r#"{"id": "o1", "media_url": "https://www.hani.co.kr", "media_ideology": 2}"#;
        let row: OutletRow = serde_json::from_str(json).unwrap();
        let outlet = row.normalize();
        assert_eq!(outlet.display_name(), "hani");
        assert_eq!(outlet.ideology, Some(2));
    }
}
