//! Ideology classification
//!
//! The single source of truth for the 1-10 ideology scale. Every badge,
//! stats block, and color code goes through [`Leaning::classify`]; the
//! thresholds are never re-derived at a call site.
//!
//! Scale: low = progressive, mid = centrist, high = conservative.

use serde::{Deserialize, Serialize};

/// Midpoint of the 1-10 scale, used when a score is missing
pub const DEFAULT_SCORE: i32 = 5;

/// Political leaning bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leaning {
    Progressive,
    Centrist,
    Conservative,
}

impl Leaning {
    /// Classify a score on the 1-10 scale
    ///
    /// Inclusive thresholds: `s <= 3` progressive, `3 < s <= 5` centrist,
    /// `s > 5` conservative. A missing score defaults to the midpoint and
    /// therefore classifies as centrist.
    pub fn classify(score: Option<i32>) -> Self {
        let s = score.unwrap_or(DEFAULT_SCORE);
        if s <= 3 {
            Leaning::Progressive
        } else if s <= 5 {
            Leaning::Centrist
        } else {
            Leaning::Conservative
        }
    }

    /// Coarse score used by the client for color coding
    pub fn color_code(&self) -> i32 {
        match self {
            Leaning::Progressive => 2,
            Leaning::Centrist => 4,
            Leaning::Conservative => 7,
        }
    }

    /// Korean display label
    pub fn label(&self) -> &'static str {
        match self {
            Leaning::Progressive => "진보",
            Leaning::Centrist => "중도",
            Leaning::Conservative => "보수",
        }
    }
}

/// Derived per-leaning distribution of a collection of scores
///
/// Never persisted; recomputed on every assembly. Scores of `None` are
/// excluded from the counts and the denominator (unlike single-article
/// badges, where a missing score shows as centrist).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeologyStats {
    pub progressive: i64,
    pub moderate: i64,
    pub conservative: i64,
    pub total: i64,
    pub progressive_percent: i64,
    pub moderate_percent: i64,
    pub conservative_percent: i64,
}

impl IdeologyStats {
    /// Aggregate a collection of nullable scores
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = Option<i32>>,
    {
        let mut progressive = 0;
        let mut moderate = 0;
        let mut conservative = 0;
        for score in scores {
            let Some(s) = score else { continue };
            match Leaning::classify(Some(s)) {
                Leaning::Progressive => progressive += 1,
                Leaning::Centrist => moderate += 1,
                Leaning::Conservative => conservative += 1,
            }
        }
        Self::from_counts(progressive, moderate, conservative)
    }

    /// Build from precomputed per-leaning counts (issue aggregate fields)
    pub fn from_counts(progressive: i64, moderate: i64, conservative: i64) -> Self {
        let progressive = progressive.max(0);
        let moderate = moderate.max(0);
        let conservative = conservative.max(0);
        let total = progressive + moderate + conservative;
        Self {
            progressive,
            moderate,
            conservative,
            total,
            progressive_percent: percent(progressive, total),
            moderate_percent: percent(moderate, total),
            conservative_percent: percent(conservative, total),
        }
    }

    /// The bucket with the strictly highest count
    ///
    /// Ties break by fixed priority: progressive, then centrist, then
    /// conservative. This is an explicit rule, not iteration order.
    pub fn representative(&self) -> Leaning {
        let ordered = [
            (Leaning::Progressive, self.progressive),
            (Leaning::Centrist, self.moderate),
            (Leaning::Conservative, self.conservative),
        ];
        let mut best = ordered[0];
        for candidate in &ordered[1..] {
            if candidate.1 > best.1 {
                best = *candidate;
            }
        }
        best.0
    }
}

/// Integer percent, defined as 0 when the total is 0
fn percent(count: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as i64
}
