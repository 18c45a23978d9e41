//! Data ingestion and aggregation layer for the library insights engine.
//!
//! Responsible for flattening raw dataset documents into event tables,
//! running the five metric modules over them, and assembling the final
//! analysis report.

pub mod content;
pub mod groupby;
pub mod loader;
pub mod report;
pub mod retention;
pub mod search;
pub mod segments;
pub mod usage;

pub use insight_core as core;
