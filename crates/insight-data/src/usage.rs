//! Usage-pattern metrics: when users read, on which devices, and how
//! recently they have logged in.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDateTime, Timelike};
use insight_core::buckets::{recency_band, DAY_ORDER, RECENCY_BANDS};
use insight_core::report::MetricMap;

use crate::groupby::mean_by;
use crate::loader::LibraryDataset;

/// Session timing, device and login-recency metrics.
///
/// The session-derived keys are present only when the session table is
/// non-empty; the login-recency distribution is always computed from the
/// user table alone.
pub fn usage_patterns(data: &LibraryDataset, now: NaiveDateTime) -> MetricMap {
    let mut results = MetricMap::new();

    if !data.sessions.is_empty() {
        // Sessions per hour of day: only hours that occurred, ascending.
        let mut hourly: BTreeMap<u32, u64> = BTreeMap::new();
        for session in &data.sessions {
            *hourly.entry(session.date.hour()).or_insert(0) += 1;
        }
        results.insert(
            "hourly_activity",
            MetricMap::from_counts(hourly.into_iter().map(|(h, c)| (h.to_string(), c))),
        );

        // Sessions per weekday, Monday through Sunday, zero-filled.
        let mut by_day = [0u64; 7];
        for session in &data.sessions {
            by_day[session.date.weekday().num_days_from_monday() as usize] += 1;
        }
        results.insert(
            "weekly_activity",
            MetricMap::from_counts(
                DAY_ORDER
                    .iter()
                    .zip(by_day)
                    .map(|(day, count)| (day.to_string(), count)),
            ),
        );

        // Mean session duration and pages read, grouped by device label.
        results.insert(
            "avg_duration_by_device",
            MetricMap::from_floats(mean_by(
                &data.sessions,
                |s| s.device.clone(),
                |s| Some(s.duration_minutes),
            )),
        );
        results.insert(
            "avg_pages_by_device",
            MetricMap::from_floats(mean_by(
                &data.sessions,
                |s| s.device.clone(),
                |s| Some(s.pages_read as f64),
            )),
        );
    }

    // Whole days since each user's last login, bucketed into the fixed
    // recency bands. All bands are reported, zero-filled, in band order.
    let mut by_band: HashMap<&str, u64> = HashMap::new();
    for user in &data.users {
        let days = (now - user.last_login).num_days();
        if let Some(label) = recency_band(days, &RECENCY_BANDS) {
            *by_band.entry(label).or_insert(0) += 1;
        }
    }
    results.insert(
        "login_recency",
        MetricMap::from_counts(RECENCY_BANDS.iter().map(|band| {
            (
                band.label.to_string(),
                by_band.get(band.label).copied().unwrap_or(0),
            )
        })),
    );

    results
}
