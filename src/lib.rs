//! Hannune - a news-literacy service core
//!
//! Serves curated issue feeds that show how outlets across the ideological
//! spectrum cover the same story: per-leaning summaries, coverage
//! distributions, and selections for one-sided or evenly split coverage.
//! Data lives in a hosted Supabase-style store; this crate reads it,
//! normalizes it, and assembles the views the client renders.

pub mod api;
pub mod cache;
pub mod config;
pub mod datastore;
pub mod models;
pub mod services;
