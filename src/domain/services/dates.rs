//! German validity-text normalization.
//!
//! Leaflet validity strings come in a handful of loosely formatted
//! shapes. Day and month are always two digits with a trailing dot; the
//! year is optional on the first date and mandatory on the last one:
//!
//! - `02.02.2026 - 07.02.2026` full range
//! - `02.02. - 07.02.2026` short range, start year taken from the end
//! - `28.12. - 03.01.2026` short range wrapping a year boundary
//! - `von Mittwoch 01.10.2025` open-ended, end pinned to the sentinel

use chrono::{Datelike, NaiveDate};
use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::domain::model::{DateInterval, OPEN_ENDED_DATE};
use crate::utils::error::{Result, ScrapeError};

static FULL_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2})\.(\d{2})\.(\d{4})\s*-\s*(\d{2})\.(\d{2})\.(\d{4})")
        .expect("full-range pattern compiles")
});

static SHORT_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2})\.(\d{2})\.\s*-\s*(\d{2})\.(\d{2})\.(\d{4})")
        .expect("short-range pattern compiles")
});

static SINGLE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2})\.(\d{2})\.(\d{4})").expect("single-date pattern compiles"));

static WEEKDAYS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(montag|dienstag|mittwoch|donnerstag|freitag|samstag|sonntag)\b")
        .expect("weekday pattern compiles")
});

static MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(von|ab|seit)\b").expect("marker pattern compiles"));

/// Parse a raw validity string into a calendar interval.
///
/// Patterns are tried most specific first so a full range is never
/// mis-read as a lone open-ended date. `reference_year` is the capture
/// year; it does not drive year resolution (the trailing year does) but
/// flags likely format drift when the two disagree by more than a year.
pub fn parse_date_range(raw: &str, reference_year: i32) -> Result<DateInterval> {
    let text = normalize(raw);

    if let Some(caps) = FULL_RANGE.captures(&text) {
        let start = checked_date(raw, group_i32(&caps, 3), group_u32(&caps, 2), group_u32(&caps, 1))?;
        let end = checked_date(raw, group_i32(&caps, 6), group_u32(&caps, 5), group_u32(&caps, 4))?;
        if start > end {
            return Err(invalid_date(raw));
        }
        note_year_drift(raw, end.year(), reference_year);
        return Ok(DateInterval { start, end });
    }

    if let Some(caps) = SHORT_RANGE.captures(&text) {
        let end_year = group_i32(&caps, 5);
        let end = checked_date(raw, end_year, group_u32(&caps, 4), group_u32(&caps, 3))?;
        let mut start = checked_date(raw, end_year, group_u32(&caps, 2), group_u32(&caps, 1))?;
        if start > end {
            // The range wraps a year boundary (e.g. late December into
            // early January); the start belongs to the previous year.
            start = checked_date(raw, end_year - 1, group_u32(&caps, 2), group_u32(&caps, 1))?;
            if start > end {
                return Err(invalid_date(raw));
            }
        }
        note_year_drift(raw, end_year, reference_year);
        return Ok(DateInterval { start, end });
    }

    if let Some(caps) = SINGLE_DATE.captures(&text) {
        let start = checked_date(raw, group_i32(&caps, 3), group_u32(&caps, 2), group_u32(&caps, 1))?;
        note_year_drift(raw, start.year(), reference_year);
        tracing::info!("Open-ended leaflet detected: {:?} → valid from {}", raw.trim(), start);
        return Ok(DateInterval {
            start,
            end: OPEN_ENDED_DATE,
        });
    }

    Err(ScrapeError::UnrecognizedFormat {
        text: raw.trim().to_string(),
    })
}

/// Strip weekday names and introductory markers (von/ab/seit), collapse
/// dash variants to a plain hyphen.
fn normalize(raw: &str) -> String {
    let text = raw.trim().replace(['–', '—'], "-");
    let text = WEEKDAYS.replace_all(&text, "");
    let text = MARKERS.replace_all(&text, "");
    text.trim().to_string()
}

fn group_u32(caps: &Captures<'_>, index: usize) -> u32 {
    caps[index].parse().unwrap_or(0)
}

fn group_i32(caps: &Captures<'_>, index: usize) -> i32 {
    caps[index].parse().unwrap_or(0)
}

fn checked_date(raw: &str, year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid_date(raw))
}

fn invalid_date(raw: &str) -> ScrapeError {
    ScrapeError::InvalidCalendarDate {
        text: raw.trim().to_string(),
    }
}

fn note_year_drift(raw: &str, year: i32, reference_year: i32) {
    if (year - reference_year).abs() > 1 {
        tracing::debug!(
            "Validity year {} is far from capture year {} in {:?}",
            year,
            reference_year,
            raw.trim()
        );
    }
}
