//! Domain layer for the library insights engine.
//!
//! Holds the raw dataset schema, the flattened row types, the error
//! taxonomy, the typed report tree and the fixed bucketing constants shared
//! by the aggregation layer.

pub mod buckets;
pub mod error;
pub mod models;
pub mod report;
