//! Issue categorization
//!
//! Predicates over an issue's stored per-leaning counts that select issues
//! for the bias and controversial feed variants. Ratios come from the stored
//! aggregates, never from re-resolving member articles.

use crate::models::Issue;

/// Minimum share of one side for an issue to count as biased
const BIAS_THRESHOLD: f64 = 0.70;

/// Balanced band for the controversial selection, inclusive on both ends
const BALANCE_LOW: f64 = 0.45;
const BALANCE_HIGH: f64 = 0.55;

/// Conservative share of the issue's counted articles, 0 when empty
pub fn conservative_ratio(issue: &Issue) -> f64 {
    ratio(issue.conservative_count, issue.article_count)
}

/// Progressive share of the issue's counted articles, 0 when empty
pub fn progressive_ratio(issue: &Issue) -> f64 {
    ratio(issue.progressive_count, issue.article_count)
}

fn ratio(count: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    count as f64 / total as f64
}

/// Whether coverage of an issue leans heavily to one side
///
/// An issue qualifies when either side holds at least 70% of the counted
/// articles, or when one side is entirely absent. Issues with no counted
/// articles never qualify.
pub fn is_bias_issue(issue: &Issue) -> bool {
    if issue.article_count <= 0 {
        return false;
    }
    conservative_ratio(issue) >= BIAS_THRESHOLD
        || progressive_ratio(issue) >= BIAS_THRESHOLD
        || issue.conservative_count == 0
        || issue.progressive_count == 0
}

/// Whether coverage of an issue is split down the middle
///
/// Both the conservative and the progressive share must fall inside the
/// 45-55% band. Issues with no counted articles never qualify.
pub fn is_controversial_issue(issue: &Issue) -> bool {
    if issue.article_count <= 0 {
        return false;
    }
    let cons = conservative_ratio(issue);
    let prog = progressive_ratio(issue);
    in_balance_band(cons) && in_balance_band(prog)
}

fn in_balance_band(r: f64) -> bool {
    (BALANCE_LOW..=BALANCE_HIGH).contains(&r)
}

/// Select and order the bias feed
///
/// Filters with [`is_bias_issue`] and sorts by conservative ratio,
/// highest first. The sort is stable, so equal ratios keep the incoming
/// recency order.
pub fn select_bias_issues(issues: Vec<Issue>) -> Vec<Issue> {
    let mut selected: Vec<Issue> = issues.into_iter().filter(is_bias_issue).collect();
    selected.sort_by(|a, b| {
        conservative_ratio(b)
            .partial_cmp(&conservative_ratio(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    selected
}

/// Select the controversial feed, preserving the incoming order
pub fn select_controversial_issues(issues: Vec<Issue>) -> Vec<Issue> {
    issues.into_iter().filter(is_controversial_issue).collect()
}
