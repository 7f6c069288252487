//! Read-only sales dashboard for Galunggung Green Glory's 2025 coffee sales.
//!
//! Three CSV sources (transactions, trend regression results, preference
//! results) are loaded through [`data::DataStore`], turned into metrics and
//! chart specs, and rendered page by page with [`report::render`].

pub mod analytics;
pub mod charts;
pub mod config;
pub mod data;
pub mod format;
pub mod report;
