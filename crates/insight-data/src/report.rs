//! Report assembly: the full analysis pipeline.
//!
//! Runs all five metric modules against one loaded dataset and wraps their
//! outputs, the generation date and the total user count into a single
//! [`ReportDocument`]. The run is all-or-nothing: a load failure aborts
//! before any module runs, and the modules themselves cannot partially
//! fail.

use std::path::Path;

use chrono::{NaiveDateTime, Utc};
use insight_core::error::Result;
use insight_core::report::ReportDocument;
use tracing::{debug, info};

use crate::loader::{resolve_dataset_file, LibraryDataset};
use crate::{content, retention, search, segments, usage};

/// Assemble the full report for a loaded dataset at a fixed point in time.
///
/// Everything except `report_date` is a pure function of the dataset and
/// `now`, so repeated runs over the same snapshot reproduce byte-identical
/// output.
pub fn generate_report(data: &LibraryDataset, now: NaiveDateTime) -> ReportDocument {
    ReportDocument {
        report_date: now.format("%Y-%m-%d").to_string(),
        total_users: data.total_users(),
        usage_patterns: usage::usage_patterns(data, now),
        content_performance: content::content_performance(data),
        user_segments: segments::user_segments(data),
        search_patterns: search::search_patterns(data),
        retention_metrics: retention::retention_metrics(data, now),
    }
}

/// [`generate_report`] against the current wall clock.
pub fn analyze(data: &LibraryDataset) -> ReportDocument {
    generate_report(data, Utc::now().naive_utc())
}

/// Load the dataset at `path` (a file, or a directory to search) and
/// produce the full report.
pub fn analyze_path(path: &Path) -> Result<ReportDocument> {
    let file = resolve_dataset_file(path)?;
    debug!("Loading dataset from {}", file.display());

    let data = LibraryDataset::from_path(&file)?;
    info!(
        "Analyzing {} users ({} borrows, {} sessions, {} searches)",
        data.total_users(),
        data.borrows.len(),
        data.sessions.len(),
        data.searches.len()
    );

    Ok(analyze(&data))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
