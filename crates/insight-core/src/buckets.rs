//! Fixed bucket boundaries and the search stopword list.
//!
//! These are named constants rather than literals inside the metric
//! modules; the classifier functions take the band slice as an argument so
//! tests can substitute their own boundaries.

// ── Bands ─────────────────────────────────────────────────────────────────────

/// One labelled day-count band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Human-readable label used as the report key.
    pub label: &'static str,
    /// Upper bound in days; `None` means unbounded.
    pub upper: Option<i64>,
}

/// Login-recency bands. Upper bounds are inclusive: a user who last logged
/// in exactly 7 days ago still counts as "Last 7 days".
pub const RECENCY_BANDS: [Band; 4] = [
    Band {
        label: "Last 7 days",
        upper: Some(7),
    },
    Band {
        label: "8-30 days",
        upper: Some(30),
    },
    Band {
        label: "31-90 days",
        upper: Some(90),
    },
    Band {
        label: "90+ days",
        upper: None,
    },
];

/// Account-tenure bands. Upper bounds are exclusive: an account exactly 30
/// days old belongs to "1-3 months".
pub const TENURE_BANDS: [Band; 5] = [
    Band {
        label: "< 1 month",
        upper: Some(30),
    },
    Band {
        label: "1-3 months",
        upper: Some(90),
    },
    Band {
        label: "3-6 months",
        upper: Some(180),
    },
    Band {
        label: "6-12 months",
        upper: Some(365),
    },
    Band {
        label: "> 1 year",
        upper: None,
    },
];

/// Classify a day count against inclusive upper bounds.
///
/// Returns `None` only when `bands` is empty or ends with a bounded band
/// that `days` exceeds.
pub fn recency_band(days: i64, bands: &[Band]) -> Option<&'static str> {
    for band in bands {
        match band.upper {
            Some(upper) if days <= upper => return Some(band.label),
            None => return Some(band.label),
            _ => {}
        }
    }
    None
}

/// Classify a day count against exclusive upper bounds.
pub fn tenure_band(days: i64, bands: &[Band]) -> Option<&'static str> {
    for band in bands {
        match band.upper {
            Some(upper) if days < upper => return Some(band.label),
            None => return Some(band.label),
            _ => {}
        }
    }
    None
}

// ── Other constants ───────────────────────────────────────────────────────────

/// Weekday report order for the weekly activity histogram.
pub const DAY_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Words removed from search queries before frequency counting.
pub const STOPWORDS: [&str; 12] = [
    "the", "a", "an", "and", "in", "on", "at", "for", "to", "of", "with", "by",
];
