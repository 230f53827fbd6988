//! Commit messages attached to every write so upstream history stays auditable.

use chrono::{DateTime, Utc};

/// UTC timestamp with millisecond precision and no zone suffix,
/// e.g. `2024-03-05 14:07:09.042`.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

pub fn create_message(at: DateTime<Utc>) -> String {
    format!("Create file at {}", timestamp(at))
}

pub fn update_message(path: &str, at: DateTime<Utc>) -> String {
    format!("Update {} at {}", path, timestamp(at))
}

pub fn delete_message(path: &str, at: DateTime<Utc>) -> String {
    format!("Delete {} at {}", path, timestamp(at))
}
