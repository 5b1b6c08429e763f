//! In-process store
//!
//! A `NewsStore` backed by plain vectors, used by service tests and for
//! local development without a hosted project. Fetches replay the
//! ordering guarantees of the real store; fault flags let tests exercise
//! the degraded paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::datastore::{IssueFilter, NewsStore, StoreError};
use crate::models::{Article, Issue, MediaOutlet, NewArticle};

/// Vector-backed news store
#[derive(Debug, Default)]
pub struct MemoryStore {
    issues: Mutex<Vec<Issue>>,
    articles: Mutex<Vec<Article>>,
    outlets: Mutex<Vec<MediaOutlet>>,
    inserted: Mutex<Vec<NewArticle>>,
    /// When set, article batch lookups fail with a synthetic status error
    fail_article_lookups: AtomicBool,
    /// When set, issue list fetches fail with a synthetic status error
    fail_issue_fetches: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issues(issues: Vec<Issue>) -> Self {
        let store = Self::new();
        *store.issues.lock().unwrap_or_else(|e| e.into_inner()) = issues;
        store
    }

    pub fn push_issue(&self, issue: Issue) {
        self.issues
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(issue);
    }

    pub fn push_article(&self, article: Article) {
        self.articles
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(article);
    }

    pub fn push_outlet(&self, outlet: MediaOutlet) {
        self.outlets
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(outlet);
    }

    /// Articles accepted through `insert_article`
    pub fn inserted_articles(&self) -> Vec<NewArticle> {
        self.inserted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn fail_article_lookups(&self, fail: bool) {
        self.fail_article_lookups.store(fail, Ordering::SeqCst);
    }

    pub fn fail_issue_fetches(&self, fail: bool) {
        self.fail_issue_fetches.store(fail, Ordering::SeqCst);
    }

    fn synthetic_failure() -> StoreError {
        StoreError::Status {
            status: 503,
            body: "store unavailable".to_string(),
        }
    }
}

#[async_trait]
impl NewsStore for MemoryStore {
    async fn fetch_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        if self.fail_issue_fetches.load(Ordering::SeqCst) {
            return Err(Self::synthetic_failure());
        }
        let mut issues: Vec<Issue> = self
            .issues
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|i| i.matches_category(filter.category))
            .cloned()
            .collect();
        // Newest first, matching the hosted store's default ordering
        issues.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(issues)
    }

    async fn fetch_issue(&self, id: &str) -> Result<Issue, StoreError> {
        if self.fail_issue_fetches.load(Ordering::SeqCst) {
            return Err(Self::synthetic_failure());
        }
        self.issues
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("issue {id}")))
    }

    async fn fetch_articles_by_ids(&self, ids: &[String]) -> Result<Vec<Article>, StoreError> {
        if self.fail_article_lookups.load(Ordering::SeqCst) {
            return Err(Self::synthetic_failure());
        }
        let mut articles: Vec<Article> = self
            .articles
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|a| ids.contains(&a.id))
            .cloned()
            .collect();
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(articles)
    }

    async fn fetch_media_outlets(&self) -> Result<Vec<MediaOutlet>, StoreError> {
        let mut outlets = self
            .outlets
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        outlets.sort_by(|a, b| b.article_count.cmp(&a.article_count));
        Ok(outlets)
    }

    async fn insert_article(&self, article: &NewArticle) -> Result<(), StoreError> {
        self.inserted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(article.clone());
        Ok(())
    }
}
