// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a store timestamp. Accepts RFC 3339 and the space-separated
/// `YYYY-MM-DD HH:MM:SS` form SQL stores commonly emit (read as UTC).
pub fn parse_store_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format a timestamp as a calendar date for popups.
pub fn format_popup_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}
