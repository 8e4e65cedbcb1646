//! Core domain types and logic.

pub mod grid;
pub mod tabular;
pub mod ticker;
pub mod policy;
pub mod column_scoring;
pub mod fallback_scan;
pub mod extractor;
pub mod price_bar;
pub mod quote;
pub mod position;
pub mod tracker;
pub mod error;
