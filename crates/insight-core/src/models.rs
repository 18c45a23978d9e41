use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

// ── Raw document schema ───────────────────────────────────────────────────────

/// Top-level shape of an uploaded dataset document.
///
/// A document without a `users` list fails deserialization, which aborts
/// the whole analysis run.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDataset {
    pub users: Vec<RawUser>,
}

/// One user record as it appears in the raw document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    /// Opaque identity; accepts a JSON string or integer.
    #[serde(deserialize_with = "de_scalar_string")]
    pub user_id: String,
    pub account: RawAccount,
    pub profile: RawProfile,
    #[serde(default)]
    pub activity: RawActivity,
}

/// Account facts. Timestamps stay as strings here; the loader parses and
/// normalizes them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAccount {
    pub registration_date: String,
    pub account_type: String,
    pub subscription_status: String,
    #[serde(default, deserialize_with = "de_opt_scalar_string")]
    pub login_frequency: Option<String>,
    pub last_login: String,
}

/// Free-text demographic facts.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProfile {
    pub age_range: String,
    pub education_level: String,
    pub profession: String,
}

/// Per-user activity lists. Each list defaults to empty when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawActivity {
    #[serde(default)]
    pub books_borrowed: Vec<RawBorrow>,
    #[serde(default)]
    pub reading_sessions: Vec<RawSession>,
    #[serde(default)]
    pub search_history: Vec<RawSearch>,
}

/// One borrow event. Return date, rating and completed flag are genuinely
/// optional in the source data.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBorrow {
    #[serde(deserialize_with = "de_scalar_string")]
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub borrowed_date: String,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub completed: bool,
}

/// One reading session.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSession {
    #[serde(deserialize_with = "de_scalar_string")]
    pub book_id: String,
    pub date: String,
    pub duration_minutes: f64,
    pub pages_read: u64,
    pub device: String,
}

/// One search event.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSearch {
    pub timestamp: String,
    pub query: String,
}

// ── Flattened rows ────────────────────────────────────────────────────────────

/// One row of the flattened user table.
///
/// All timestamps are timezone-naive after loading; any offset present in
/// the raw document has been converted to UTC and discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub user_id: String,
    pub registration_date: NaiveDateTime,
    pub account_type: String,
    pub subscription_status: String,
    pub login_frequency: Option<String>,
    pub last_login: NaiveDateTime,
    pub age_range: String,
    pub education_level: String,
    pub profession: String,
}

/// One row of the flattened borrow table, foreign-keyed by `user_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct BorrowRow {
    pub user_id: String,
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub borrowed_date: NaiveDateTime,
    pub return_date: Option<NaiveDateTime>,
    pub rating: Option<f64>,
    pub completed: bool,
}

/// One row of the flattened reading-session table.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRow {
    pub user_id: String,
    pub book_id: String,
    pub date: NaiveDateTime,
    pub duration_minutes: f64,
    pub pages_read: u64,
    pub device: String,
}

/// One row of the flattened search table.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRow {
    pub user_id: String,
    pub timestamp: NaiveDateTime,
    pub query: String,
}

// ── Deserialization helpers ───────────────────────────────────────────────────

/// Accept a JSON string or number and normalize it to a `String`.
fn de_scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

/// Optional variant of [`de_scalar_string`]; `null` maps to `None`.
fn de_opt_scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected string, number or null, got {}",
            other
        ))),
    }
}
