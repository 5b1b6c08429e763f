//! Business logic services
//!
//! Each service owns one concern of the news-literacy core:
//! - reflist: reference list parsing
//! - ideology: score classification and distributions
//! - categorize: bias and controversy selection
//! - resolver: batch article resolution
//! - feed: feed assembly and the polled view state machine
//! - curation: the admin write path

pub mod categorize;
pub mod curation;
pub mod feed;
pub mod ideology;
pub mod reflist;
pub mod resolver;
