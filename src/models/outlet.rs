//! Media outlet model
//!
//! Read-only lookup table used by the curation form: the admin picks the
//! outlet an article belongs to, and the outlet's ideology score pre-fills
//! the slider.

use serde::{Deserialize, Serialize};

/// A media outlet known to the hosted store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaOutlet {
    /// Unique identifier
    pub id: String,
    /// Outlet homepage URL
    pub url: String,
    /// Free-text description
    pub description: String,
    /// Number of articles the store holds for this outlet
    pub article_count: i64,
    /// Outlet ideology score on the 1-10 scale
    pub ideology: Option<i32>,
    /// Additional free-text info
    pub info: String,
}

impl MediaOutlet {
    /// Short display name derived from the outlet URL host
    ///
    /// Strips the scheme, path, a leading `www.` and the common Korean
    /// news-site suffixes, so `https://www.example.co.kr/news` becomes
    /// `example`. Unparseable values are returned as-is.
    pub fn display_name(&self) -> String {
        let host = self
            .url
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        let host = host.split('/').next().unwrap_or(host);
        if host.is_empty() {
            return self.url.trim().to_string();
        }
        let host = host.strip_prefix("www.").unwrap_or(host);
        let host = host.strip_suffix(".co.kr").unwrap_or(host);
        let host = host.strip_suffix(".com").unwrap_or(host);
        host.to_string()
    }
}
