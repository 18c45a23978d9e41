//! Dataset loading and flattening.
//!
//! Parses a raw hierarchical dataset document into four flat event tables,
//! normalizing every timestamp to a timezone-naive representation. Loading
//! is all-or-nothing: one malformed record or unparseable timestamp aborts
//! the whole run, and no partial dataset is ever returned.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use insight_core::error::{InsightError, Result};
use insight_core::models::{BorrowRow, RawDataset, SearchRow, SessionRow, UserRow};
use tracing::{debug, warn};

// ── LibraryDataset ────────────────────────────────────────────────────────────

/// The four derived tables built from one raw dataset document.
///
/// Immutable after construction: each analysis run loads its own instance
/// and the metric modules only ever read from it. Every event row's
/// `user_id` references a row in `users`; an event table is simply empty
/// when no events of that type exist anywhere in the dataset.
#[derive(Debug, Clone, Default)]
pub struct LibraryDataset {
    pub users: Vec<UserRow>,
    pub borrows: Vec<BorrowRow>,
    pub sessions: Vec<SessionRow>,
    pub searches: Vec<SearchRow>,
}

impl LibraryDataset {
    /// Number of user records loaded from the input.
    pub fn total_users(&self) -> usize {
        self.users.len()
    }

    /// Read and parse a dataset file from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| InsightError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse a dataset from a JSON document string.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawDataset = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    /// Flatten an already-deserialized JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawDataset = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    /// Flatten the nested document into the four tables.
    fn from_raw(raw: RawDataset) -> Result<Self> {
        let mut users = Vec::with_capacity(raw.users.len());
        let mut borrows = Vec::new();
        let mut sessions = Vec::new();
        let mut searches = Vec::new();

        for user in raw.users {
            let user_id = user.user_id;

            for book in user.activity.books_borrowed {
                borrows.push(BorrowRow {
                    user_id: user_id.clone(),
                    book_id: book.book_id,
                    title: book.title,
                    author: book.author,
                    genre: book.genre,
                    borrowed_date: parse_timestamp(&book.borrowed_date)?,
                    return_date: book
                        .return_date
                        .as_deref()
                        .map(parse_timestamp)
                        .transpose()?,
                    rating: book.rating,
                    completed: book.completed,
                });
            }

            for session in user.activity.reading_sessions {
                sessions.push(SessionRow {
                    user_id: user_id.clone(),
                    book_id: session.book_id,
                    date: parse_timestamp(&session.date)?,
                    duration_minutes: session.duration_minutes,
                    pages_read: session.pages_read,
                    device: session.device,
                });
            }

            for search in user.activity.search_history {
                searches.push(SearchRow {
                    user_id: user_id.clone(),
                    timestamp: parse_timestamp(&search.timestamp)?,
                    query: search.query,
                });
            }

            users.push(UserRow {
                user_id,
                registration_date: parse_timestamp(&user.account.registration_date)?,
                account_type: user.account.account_type,
                subscription_status: user.account.subscription_status,
                login_frequency: user.account.login_frequency,
                last_login: parse_timestamp(&user.account.last_login)?,
                age_range: user.profile.age_range,
                education_level: user.profile.education_level,
                profession: user.profile.profession,
            });
        }

        debug!(
            "Flattened dataset: {} users, {} borrows, {} sessions, {} searches",
            users.len(),
            borrows.len(),
            sessions.len(),
            searches.len()
        );

        Ok(Self {
            users,
            borrows,
            sessions,
            searches,
        })
    }
}

// ── Timestamp normalization ───────────────────────────────────────────────────

/// Parse a timestamp string into a timezone-naive datetime.
///
/// RFC 3339 (including the `Z` suffix) is tried first; any offset is
/// converted to UTC and then discarded, so no loaded timestamp retains
/// offset information. Naive date-time and date-only patterns are accepted
/// as-is. An unparseable string is a fatal load error.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(InsightError::TimestampParse(s.to_string()));
    }

    // Replace a trailing 'Z' with '+00:00' for RFC 3339 compatibility.
    let normalized = if let Some(stripped) = trimmed.strip_suffix('Z') {
        format!("{}+00:00", stripped)
    } else {
        trimmed.to_string()
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(dt.with_timezone(&Utc).naive_utc());
    }

    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(naive);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive);
        }
    }

    Err(InsightError::TimestampParse(s.to_string()))
}

// ── Dataset file discovery ────────────────────────────────────────────────────

/// Find all `.json` files recursively under `data_path`, sorted by path.
pub fn find_dataset_files(data_path: &Path) -> Vec<PathBuf> {
    if !data_path.exists() {
        warn!("Data path does not exist: {}", data_path.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "json")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Resolve `path` to a concrete dataset file.
///
/// A file path is returned as-is; for a directory, the first `.json` file
/// in path order is used.
pub fn resolve_dataset_file(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    find_dataset_files(path)
        .into_iter()
        .next()
        .ok_or_else(|| InsightError::DatasetNotFound(path.to_path_buf()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
