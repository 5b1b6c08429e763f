//! Supabase REST store
//!
//! Talks PostgREST to the hosted project: every read is a GET against
//! `/rest/v1/{table}` with filter operators in the query string, every
//! write a POST with a JSON payload. The anon key rides along as both the
//! `apikey` header and a bearer token.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;

use crate::config::DatastoreConfig;
use crate::datastore::rows::{ArticleRow, NewArticleRow, OutletRow, RawIssue};
use crate::datastore::{IssueFilter, NewsStore, StoreError};
use crate::models::{Article, Issue, MediaOutlet, NewArticle};

const ISSUE_TABLE: &str = "issue_table";
const LEGACY_FEED_TABLE: &str = "homepage_articles";
const ARTICLE_TABLE: &str = "articles_table";
const OUTLET_TABLE: &str = "media_outlets";
const CURATED_TABLE: &str = "newspaper_articles";

/// REST client for the hosted Supabase project
pub struct SupabaseStore {
    client: reqwest::Client,
    base_url: String,
    /// Serve the issue feed from the legacy table
    legacy_feed: bool,
}

impl std::fmt::Debug for SupabaseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseStore")
            .field("base_url", &self.base_url)
            .field("legacy_feed", &self.legacy_feed)
            .finish()
    }
}

impl SupabaseStore {
    /// Build a store client from configuration
    ///
    /// Fails only if the API key is not a valid header value or the TLS
    /// backend cannot initialize.
    pub fn new(config: &DatastoreConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        let mut api_key = HeaderValue::from_str(&config.api_key)?;
        api_key.set_sensitive(true);
        headers.insert("apikey", api_key);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            legacy_feed: config.legacy_feed,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// GET a table with PostgREST query parameters and decode the rows
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .client
            .get(self.table_url(table))
            .query(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl NewsStore for SupabaseStore {
    async fn fetch_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        let mut params = vec![("select", "*".to_string())];
        let table = if self.legacy_feed {
            params.push(("order", "news_post_id.asc".to_string()));
            LEGACY_FEED_TABLE
        } else {
            params.push(("order", "created_at.desc".to_string()));
            if let Some(category) = filter.category {
                params.push(("category", format!("eq.{}", category.as_str())));
            }
            ISSUE_TABLE
        };

        let rows: Vec<RawIssue> = self.select(table, &params).await?;
        Ok(rows.into_iter().map(RawIssue::normalize).collect())
    }

    async fn fetch_issue(&self, id: &str) -> Result<Issue, StoreError> {
        let params = [
            ("select", "*".to_string()),
            ("id", format!("eq.{id}")),
            ("limit", "1".to_string()),
        ];
        let rows: Vec<RawIssue> = self.select(ISSUE_TABLE, &params).await?;
        rows.into_iter()
            .next()
            .map(RawIssue::normalize)
            .ok_or_else(|| StoreError::NotFound(format!("issue {id}")))
    }

    async fn fetch_articles_by_ids(&self, ids: &[String]) -> Result<Vec<Article>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let params = [
            ("select", "*".to_string()),
            ("id", format!("in.({})", ids.join(","))),
            ("order", "created_at.desc".to_string()),
        ];
        let rows: Vec<ArticleRow> = self.select(ARTICLE_TABLE, &params).await?;
        Ok(rows.into_iter().map(ArticleRow::normalize).collect())
    }

    async fn fetch_media_outlets(&self) -> Result<Vec<MediaOutlet>, StoreError> {
        let params = [
            ("select", "*".to_string()),
            ("order", "media_article_count.desc".to_string()),
        ];
        let rows: Vec<OutletRow> = self.select(OUTLET_TABLE, &params).await?;
        Ok(rows.into_iter().map(OutletRow::normalize).collect())
    }

    async fn insert_article(&self, article: &NewArticle) -> Result<(), StoreError> {
        let payload = [NewArticleRow::from(article)];
        let response = self
            .client
            .post(self.table_url(CURATED_TABLE))
            .header("Prefer", "return=minimal")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn store() -> SupabaseStore {
        SupabaseStore::new(&DatastoreConfig {
            base_url: "https://demo.supabase.co/".to_string(),
            api_key: "anon-key".to_string(),
            timeout_seconds: 5,
            legacy_feed: false,
        })
        .unwrap()
    }

    #[test]
    fn table_url_trims_trailing_slash() {
        assert_eq!(
            store().table_url("issue_table"),
            "https://demo.supabase.co/rest/v1/issue_table"
        );
    }

    #[test]
    fn insert_row_uses_store_column_names() {
        let article = NewArticle {
            id: "uuid-1".to_string(),
            outlet_id: "o1".to_string(),
            title: "제목".to_string(),
            description: "본문".to_string(),
            url: None,
            category: Category::Economy,
            ideology: 6,
            image_url: None,
        };
        let row = NewArticleRow::from(&article);
        let json = serde_json::to_value(row).unwrap();
        assert_eq!(json["newspaper_post_id"], "uuid-1");
        assert_eq!(json["author_media_outlet_id"], "o1");
        assert_eq!(json["news_post_ideology"], 6);
        assert_eq!(json["category"], "경제");
        assert!(json["news_post_url"].is_null());
    }
}
