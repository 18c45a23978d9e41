//! Retention metrics: account tenure and activity by tenure band.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use insight_core::buckets::{tenure_band, TENURE_BANDS};
use insight_core::report::MetricMap;

use crate::groupby::{count_by, round1};
use crate::loader::LibraryDataset;

/// Tenure distribution and, when sessions exist, mean session count per
/// tenure band.
pub fn retention_metrics(data: &LibraryDataset, now: NaiveDateTime) -> MetricMap {
    let mut results = MetricMap::new();

    // Account age in whole days, bucketed into the fixed tenure bands. All
    // five bands are reported, zero-filled, in band order.
    let mut by_band: HashMap<&str, u64> = HashMap::new();
    for user in &data.users {
        let days = (now - user.registration_date).num_days();
        if let Some(label) = tenure_band(days, &TENURE_BANDS) {
            *by_band.entry(label).or_insert(0) += 1;
        }
    }
    results.insert(
        "user_tenure_distribution",
        MetricMap::from_counts(TENURE_BANDS.iter().map(|band| {
            (
                band.label.to_string(),
                by_band.get(band.label).copied().unwrap_or(0),
            )
        })),
    );

    if !data.sessions.is_empty() {
        // Session count per user joined to that user's tenure band, then
        // averaged per band. Users with no sessions do not contribute, and
        // bands without any session-having user are omitted.
        let sessions_per_user = count_by(&data.sessions, |s| s.user_id.clone());
        let band_by_user: HashMap<&str, &'static str> = data
            .users
            .iter()
            .filter_map(|u| {
                tenure_band((now - u.registration_date).num_days(), &TENURE_BANDS)
                    .map(|label| (u.user_id.as_str(), label))
            })
            .collect();

        let mut sums: HashMap<&str, (f64, u64)> = HashMap::new();
        for (user_id, count) in &sessions_per_user {
            let Some(&label) = band_by_user.get(user_id.as_str()) else {
                continue;
            };
            let acc = sums.entry(label).or_insert((0.0, 0));
            acc.0 += *count as f64;
            acc.1 += 1;
        }

        let mut by_tenure = MetricMap::new();
        for band in &TENURE_BANDS {
            if let Some((sum, users)) = sums.get(band.label) {
                by_tenure.insert(band.label, round1(sum / *users as f64));
            }
        }
        results.insert("avg_activity_by_tenure", by_tenure);
    }

    results
}
