//! Date parsing and calendar bucketing

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::TransactionRecord;

/// Date-time layouts accepted besides RFC 3339
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO-8601 style date string as written.
///
/// Offsets are honoured only to read the wall-clock time as written; the
/// result is never shifted into the host timezone. Partial dates (`YYYY-MM`,
/// `YYYY`) mean the first day of that month or year. Returns `None` for
/// anything unrecognised, which callers treat as an invalid date that
/// compares false against everything.
pub fn parse_date(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    match DateTime::parse_from_rfc3339(input) {
        Ok(dt) => Some(dt.naive_local()),
        Err(_) => parse_naive(input),
    }
}

/// Parse a date string as a UTC instant, for ordering comparisons.
///
/// Timestamps carrying an offset are normalised to UTC. Values without an
/// offset are taken to already be in UTC.
pub fn parse_instant(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    match DateTime::parse_from_rfc3339(input) {
        Ok(dt) => Some(dt.naive_utc()),
        Err(_) => parse_naive(input),
    }
}

fn parse_naive(input: &str) -> Option<NaiveDateTime> {
    if input.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| NaiveDate::parse_from_str(input, DATE_FORMAT).ok().map(midnight))
        .or_else(|| parse_partial(input).map(midnight))
}

/// `YYYY-MM` or `YYYY`
fn parse_partial(input: &str) -> Option<NaiveDate> {
    let (year, month) = match input.split_once('-') {
        Some((year, month)) if month.len() == 2 => (year, month.parse().ok()?),
        Some(_) => return None,
        None => (input, 1),
    };
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Count records per calendar month (1-12).
///
/// The year is ignored, so the same month of different years lands in one
/// bucket. Records with invalid dates are skipped.
pub fn month_counts<'a, I>(records: I) -> BTreeMap<u32, usize>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut counts = BTreeMap::new();
    for date in records.into_iter().filter_map(|r| r.parsed_date()) {
        *counts.entry(date.month()).or_insert(0) += 1;
    }
    counts
}

/// Month with the strictly greatest count.
///
/// Buckets are scanned in ascending month order and only a strictly larger
/// count replaces the current best, so the earliest of tied months wins.
pub fn busiest_month(counts: &BTreeMap<u32, usize>) -> Option<u32> {
    let mut best: Option<(u32, usize)> = None;
    for (&month, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((month, count)),
        }
    }
    best.map(|(month, _)| month)
}

/// Calendar components to match against, each optional.
///
/// Omitted components are wildcards. `month` is 1-indexed (January = 1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl DateParts {
    /// Matches every date
    pub fn any() -> Self {
        Self::default()
    }

    pub fn new(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Self {
        Self { year, month, day }
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }

    /// True when no component is constrained
    pub fn is_any(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none()
    }

    /// Check a parsed date against every provided component.
    ///
    /// With no components set everything matches, invalid dates included.
    pub fn matches(&self, date: Option<NaiveDateTime>) -> bool {
        if self.is_any() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };

        self.year.is_none_or(|y| date.year() == y)
            && self.month.is_none_or(|m| date.month() == m)
            && self.day.is_none_or(|d| date.day() == d)
    }
}
