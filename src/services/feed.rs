//! Feed assembly
//!
//! Builds the paged issue feeds served to the client: the general feed,
//! the bias feed (one-sided coverage) and the controversial feed (evenly
//! split coverage). Each card combines one issue row with its resolved
//! member articles; resolution runs concurrently per page and degrades
//! per issue instead of failing the page.
//!
//! `FeedView` wraps one query's feed as a polled state machine so the
//! default view can refresh on a schedule without ever showing a torn
//! update.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::cache::MemoryCache;
use crate::datastore::{IssueFilter, NewsStore, StoreError};
use crate::models::{Article, Category, Issue};
use crate::services::categorize::{select_bias_issues, select_controversial_issues};
use crate::services::ideology::{IdeologyStats, Leaning};
use crate::services::reflist::parse_ids;
use crate::services::resolver::resolve_in_order;

/// Error type for feed assembly
///
/// Only the issue list fetch is fatal to a page; everything downstream
/// degrades per card.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Which feed variant to assemble
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    #[default]
    General,
    Bias,
    Controversial,
}

/// One feed request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    pub kind: FeedKind,
    /// Section filter; `None` spans all sections
    pub category: Option<Category>,
    /// 1-based page number, ignored while searching
    pub page: usize,
    /// Case-insensitive substring search over titles and summary bodies
    pub search: Option<String>,
}

impl FeedQuery {
    pub fn general(category: Option<Category>) -> Self {
        Self {
            kind: FeedKind::General,
            category,
            page: 1,
            search: None,
        }
    }
}

/// Compact member article representation attached to a card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    pub press: String,
    pub leaning: Leaning,
    /// Korean badge text for the leaning
    pub leaning_label: String,
    pub url: Option<String>,
}

impl From<&Article> for ArticleSummary {
    fn from(article: &Article) -> Self {
        let leaning = Leaning::classify(article.ideology);
        Self {
            id: article.id.clone(),
            title: article.title.clone(),
            press: article.press.clone(),
            leaning,
            leaning_label: leaning.label().to_string(),
            url: article.url.clone(),
        }
    }
}

/// One issue rendered for a feed page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueCard {
    pub id: String,
    pub title: String,
    pub category: Option<Category>,
    /// Centrist summary body, falling back to the conservative one
    pub description: String,
    pub image_url: Option<String>,
    /// Distribution from the issue's stored counts
    pub stats: IdeologyStats,
    pub representative: Leaning,
    /// Coarse score the client maps to a badge color
    pub representative_code: i32,
    /// Resolved member articles; empty when resolution failed
    pub articles: Vec<ArticleSummary>,
    pub created_at: DateTime<Utc>,
}

/// One assembled page of a feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPage {
    pub kind: FeedKind,
    pub cards: Vec<IssueCard>,
    /// 1-based; always 1 for search results
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Full single-issue view: summaries plus ordered member articles
///
/// Unlike feed cards, the stats here come from the resolved articles'
/// own scores, so the distribution matches the article list shown.
#[derive(Debug, Clone, Serialize)]
pub struct IssueDetail {
    pub issue: Issue,
    pub articles: Vec<Article>,
    pub stats: IdeologyStats,
    pub representative: Leaning,
}

/// Feed assembly service
pub struct FeedService {
    store: Arc<dyn NewsStore>,
    /// Resolved per-issue article lists, keyed by issue id
    article_cache: MemoryCache,
    page_size: usize,
}

impl std::fmt::Debug for FeedService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedService")
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl FeedService {
    pub fn new(store: Arc<dyn NewsStore>, page_size: usize, article_ttl: Duration) -> Self {
        Self {
            store,
            article_cache: MemoryCache::new(article_ttl),
            page_size,
        }
    }

    /// Assemble one feed page
    ///
    /// Fetches the issue list (the only fatal step), applies the variant
    /// selection, then either searches or paginates before building cards
    /// for the surviving issues.
    pub async fn assemble(&self, query: &FeedQuery) -> Result<FeedPage, FeedError> {
        let filter = IssueFilter {
            category: query.category,
        };
        let issues = self.store.fetch_issues(&filter).await?;

        let issues = match query.kind {
            FeedKind::General => issues,
            FeedKind::Bias => select_bias_issues(issues),
            FeedKind::Controversial => select_controversial_issues(issues),
        };

        if let Some(term) = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            // Search spans the whole selection; pagination does not apply
            let matches: Vec<Issue> = issues
                .into_iter()
                .filter(|i| issue_matches_search(i, term))
                .collect();
            let total = matches.len();
            let cards = self.build_cards(matches).await;
            return Ok(FeedPage {
                kind: query.kind,
                cards,
                page: 1,
                page_size: self.page_size,
                total_items: total,
                total_pages: 1,
            });
        }

        let total_items = issues.len();
        let total_pages = total_items.div_ceil(self.page_size).max(1);
        let page = query.page.max(1);
        let start = (page - 1).saturating_mul(self.page_size);
        let page_issues: Vec<Issue> = issues
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect();

        let cards = self.build_cards(page_issues).await;
        Ok(FeedPage {
            kind: query.kind,
            cards,
            page,
            page_size: self.page_size,
            total_items,
            total_pages,
        })
    }

    /// Full view of one issue
    pub async fn issue_detail(&self, id: &str) -> Result<IssueDetail, FeedError> {
        let issue = self.store.fetch_issue(id).await?;
        let articles = self.resolve_articles(&issue).await?;
        let stats = IdeologyStats::from_scores(articles.iter().map(|a| a.ideology));
        let representative = stats.representative();
        Ok(IssueDetail {
            issue,
            articles,
            stats,
            representative,
        })
    }

    /// Build cards for a page of issues, resolving members concurrently
    async fn build_cards(&self, issues: Vec<Issue>) -> Vec<IssueCard> {
        join_all(issues.into_iter().map(|issue| self.build_card(issue))).await
    }

    /// Build one card; article resolution failure degrades to an empty list
    async fn build_card(&self, issue: Issue) -> IssueCard {
        let articles = match self.resolve_articles(&issue).await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::warn!(issue_id = %issue.id, error = %e, "article resolution failed, rendering card without members");
                Vec::new()
            }
        };

        let stats = IdeologyStats::from_counts(
            issue.progressive_count,
            issue.centrist_count,
            issue.conservative_count,
        );
        let representative = stats.representative();

        IssueCard {
            description: card_description(&issue),
            articles: articles.iter().map(ArticleSummary::from).collect(),
            id: issue.id,
            title: issue.title,
            category: issue.category,
            image_url: issue.image_url,
            stats,
            representative,
            representative_code: representative.color_code(),
            created_at: issue.created_at,
        }
    }

    /// Resolve an issue's member articles, consulting the cache first
    async fn resolve_articles(&self, issue: &Issue) -> Result<Vec<Article>, StoreError> {
        let ids = parse_ids(Some(&issue.article_ids));
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let key = format!("issue_articles:{}", issue.id);
        if let Some(cached) = self.article_cache.get::<Vec<Article>>(&key).await {
            return Ok(cached);
        }

        let articles = resolve_in_order(self.store.as_ref(), &ids).await?;
        if let Err(e) = self.article_cache.set(&key, &articles).await {
            tracing::warn!(issue_id = %issue.id, error = %e, "failed to cache resolved articles");
        }
        Ok(articles)
    }
}

/// Card description: centrist summary, else the conservative one
fn card_description(issue: &Issue) -> String {
    if issue.centrist_body.trim().is_empty() {
        issue.conservative_body.clone()
    } else {
        issue.centrist_body.clone()
    }
}

fn issue_matches_search(issue: &Issue, term: &str) -> bool {
    let term = term.to_lowercase();
    let fields = [
        &issue.title,
        &issue.progressive_body,
        &issue.centrist_body,
        &issue.conservative_body,
    ];
    fields.iter().any(|f| f.to_lowercase().contains(&term))
}

/// Lifecycle of a polled feed view
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FeedState {
    /// No assembly attempted yet
    Idle,
    /// An assembly is in flight
    Loading,
    /// Last assembly succeeded
    Ready { page: FeedPage },
    /// Last assembly failed
    Error { message: String },
}

/// A feed query kept continuously assembled
///
/// Refreshes may overlap (a scheduled tick racing a query change); a
/// generation counter makes the newest refresh the only writer of the
/// final state, so stale results never clobber fresh ones.
pub struct FeedView {
    service: Arc<FeedService>,
    query: RwLock<FeedQuery>,
    state: RwLock<FeedState>,
    generation: AtomicU64,
}

impl std::fmt::Debug for FeedView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedView")
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish()
    }
}

impl FeedView {
    pub fn new(service: Arc<FeedService>, query: FeedQuery) -> Self {
        Self {
            service,
            query: RwLock::new(query),
            state: RwLock::new(FeedState::Idle),
            generation: AtomicU64::new(0),
        }
    }

    /// Current state snapshot
    pub async fn state(&self) -> FeedState {
        self.state.read().await.clone()
    }

    pub async fn query(&self) -> FeedQuery {
        self.query.read().await.clone()
    }

    /// Replace the query and reassemble
    pub async fn set_query(&self, query: FeedQuery) {
        *self.query.write().await = query;
        self.refresh().await;
    }

    /// Reassemble with the current query
    pub async fn retry(&self) {
        self.refresh().await;
    }

    /// Run one assembly cycle
    ///
    /// Transitions to Loading, assembles, then writes Ready or Error.
    /// Every state write checks the generation while holding the state
    /// lock, so a preempted older refresh can neither flip a newer Ready
    /// back to Loading nor store its stale result.
    pub async fn refresh(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            if self.generation.load(Ordering::SeqCst) == generation {
                *state = FeedState::Loading;
            }
        }

        let query = self.query.read().await.clone();
        let result = self.service.assemble(&query).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            // A newer refresh owns the state now
            return;
        }
        *state = match result {
            Ok(page) => FeedState::Ready { page },
            Err(e) => {
                tracing::error!(error = %e, "feed refresh failed");
                FeedState::Error {
                    message: e.to_string(),
                }
            }
        };
    }
}
