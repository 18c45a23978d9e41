mod bootstrap;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use insight_core::report::MetricMap;
use insight_data::loader::{resolve_dataset_file, LibraryDataset};
use insight_data::report::generate_report;
use insight_data::{content, retention, search, segments, usage};

/// Derive behavioral metrics from a library-platform usage dataset.
#[derive(Debug, Parser)]
#[command(name = "library-insights", version, about)]
struct Cli {
    /// Dataset file, or a directory to search for .json files.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Emit a single metric section instead of the full report.
    #[arg(long, value_enum)]
    metric: Option<Metric>,

    /// Write the JSON report to a file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Emit single-line JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,

    /// Log filter directive (e.g. "debug", "insight_data=trace").
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// The five metric sections a caller can request individually, mirroring
/// the full report's keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Metric {
    UsagePatterns,
    ContentPerformance,
    UserSegments,
    SearchPatterns,
    Retention,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    bootstrap::setup_logging(&cli.log_level)?;

    tracing::info!("library-insights v{} starting", env!("CARGO_PKG_VERSION"));

    let data_path = match cli.data {
        Some(path) => path,
        None => bootstrap::discover_data_path()
            .context("no --data path given and no default data directory found")?,
    };

    let file = resolve_dataset_file(&data_path)?;
    tracing::info!("Using dataset {}", file.display());

    let dataset = LibraryDataset::from_path(&file)?;
    let now = chrono::Utc::now().naive_utc();

    let json = match cli.metric {
        None => to_json(&generate_report(&dataset, now), cli.compact)?,
        Some(metric) => {
            let section: MetricMap = match metric {
                Metric::UsagePatterns => usage::usage_patterns(&dataset, now),
                Metric::ContentPerformance => content::content_performance(&dataset),
                Metric::UserSegments => segments::user_segments(&dataset),
                Metric::SearchPatterns => search::search_patterns(&dataset),
                Metric::Retention => retention::retention_metrics(&dataset, now),
            };
            to_json(&section, cli.compact)?
        }
    };

    match cli.output {
        Some(path) => {
            std::fs::write(&path, &json)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}
