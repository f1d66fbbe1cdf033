// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Parse a cutoff timestamp from wire input.
///
/// Accepts either a plain `yyyy-mm-dd` day (interpreted as midnight UTC) or a
/// full RFC3339 datetime. Returns `None` for anything else.
pub fn parse_day_or_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(day) = raw.parse::<NaiveDate>() {
        return Some(day.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
