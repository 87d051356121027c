//! Turns raw CSV records and pre-normalized JSON entries into [`Post`]s.

use crate::domain::{AccountType, JsonPost, Post, RawRecord};
use crate::utils::{date_portion, parse_count};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use tracing::warn;

// Substring heuristic, not a trust signal: "br" alone matches plenty of plain users.
static VERIFIED_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)oficial|news|real|rp|tech|crypto|br|456|123")
        .expect("verified account pattern is a valid regex")
});

/// Username used when a JSON entry carries neither `username` nor `person_id`
pub const UNKNOWN_USERNAME: &str = "unknown";

/// Reasons a single record is left out of the working set
#[derive(Debug, PartialEq, Eq)]
pub enum RecordError {
    MissingField(&'static str),
    MissingDate(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MissingField(name) => write!(f, "missing required field `{}`", name),
            RecordError::MissingDate(ts) => write!(f, "timestamp `{}` has no date component", ts),
        }
    }
}

impl std::error::Error for RecordError {}

/// Strips a single leading `@` from a handle
pub fn username_from_handle(person_id: &str) -> &str {
    person_id.strip_prefix('@').unwrap_or(person_id)
}

pub fn classify_account(username: &str) -> AccountType {
    if VERIFIED_PATTERN.is_match(username) {
        AccountType::Verified
    } else {
        AccountType::Regular
    }
}

/// Normalizes one CSV record
pub fn normalize(record: &RawRecord) -> Result<Post, RecordError> {
    let person_id = record
        .get("person_id")
        .ok_or(RecordError::MissingField("person_id"))?;
    let username = username_from_handle(person_id);

    build_post(
        record.get("post_id").unwrap_or_default(),
        person_id.to_string(),
        username.to_string(),
        classify_account(username),
        record.get("text").unwrap_or_default().to_string(),
        record.get("timestamp").unwrap_or_default(),
        parse_count(record.get("likes").unwrap_or_default()),
        parse_count(record.get("reposts").unwrap_or_default()),
    )
}

/// Normalizes one pre-normalized JSON entry, trusting `username` and
/// `account_type` when present and deriving them otherwise
pub fn from_json(entry: JsonPost) -> Result<Post, RecordError> {
    // Empty strings count as absent
    let username = entry.username.filter(|u| !u.is_empty());
    let person_id = entry.person_id.filter(|p| !p.is_empty());
    let username = match (username, person_id.as_deref()) {
        (Some(username), _) => username,
        (None, Some(person_id)) => username_from_handle(person_id).to_string(),
        (None, None) => UNKNOWN_USERNAME.to_string(),
    };
    let account_type = match entry.account_type.as_deref().filter(|a| !a.is_empty()) {
        Some(label) => AccountType::from(label),
        None => classify_account(&username),
    };
    let person_id = person_id.unwrap_or_else(|| format!("@{}", username));

    build_post(
        entry.post_id.as_deref().unwrap_or_default(),
        person_id,
        username,
        account_type,
        entry.text.unwrap_or_default(),
        entry.timestamp.as_deref().unwrap_or_default(),
        json_count(&entry.likes),
        json_count(&entry.reposts),
    )
}

/// Normalizes every record, logging and skipping the ones that cannot form a post
pub fn normalize_all(records: &[RawRecord]) -> Vec<Post> {
    records
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| match normalize(record) {
            Ok(post) => Some(post),
            Err(err) => {
                warn!(record = idx, error = %err, "Skipping CSV record");
                None
            }
        })
        .collect()
}

pub fn from_json_all(entries: Vec<JsonPost>) -> Vec<Post> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(idx, entry)| match from_json(entry) {
            Ok(post) => Some(post),
            Err(err) => {
                warn!(entry = idx, error = %err, "Skipping JSON post");
                None
            }
        })
        .collect()
}

fn json_count(value: &serde_json::Value) -> u64 {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64))
            .unwrap_or(0),
        serde_json::Value::String(s) => parse_count(s),
        _ => 0,
    }
}

#[allow(clippy::too_many_arguments)]
fn build_post(
    post_id: &str,
    person_id: String,
    username: String,
    account_type: AccountType,
    text: String,
    timestamp: &str,
    likes: u64,
    reposts: u64,
) -> Result<Post, RecordError> {
    if post_id.trim().is_empty() {
        return Err(RecordError::MissingField("post_id"));
    }
    if date_portion(timestamp).trim().is_empty() {
        return Err(RecordError::MissingDate(timestamp.to_string()));
    }

    Ok(Post {
        post_id: post_id.to_string(),
        person_id,
        username,
        account_type,
        text,
        timestamp: timestamp.to_string(),
        likes,
        reposts,
    })
}
