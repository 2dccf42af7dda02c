use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::utils::error::{Result, ScrapeError};

/// End date standing in for "no published end". The value is part of the
/// output contract and must be emitted exactly as `9999-12-31`.
pub const OPEN_ENDED_DATE: NaiveDate = match NaiveDate::from_ymd_opt(9999, 12, 31) {
    Some(date) => date,
    None => panic!("sentinel date is a valid calendar date"),
};

/// Inclusive validity window. `start <= end` holds for every value
/// produced by the date parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    pub fn is_open_ended(&self) -> bool {
        self.end == OPEN_ENDED_DATE
    }
}

/// One promotional leaflet as it appears in the JSON output.
/// Field order matches the output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaflet {
    pub title: String,
    pub thumbnail: String,
    pub shop_name: String,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    #[serde(with = "timestamp_format")]
    pub parsed_time: NaiveDateTime,
}

impl Leaflet {
    /// Consistency check mirroring the output contract. Extraction drops
    /// records that fail here instead of emitting them.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ScrapeError::InvalidRecord {
                reason: "title cannot be empty".to_string(),
            });
        }
        if !self.thumbnail.starts_with("http") {
            return Err(ScrapeError::InvalidRecord {
                reason: format!("invalid thumbnail URL: {}", self.thumbnail),
            });
        }
        if self.shop_name.trim().is_empty() {
            return Err(ScrapeError::InvalidRecord {
                reason: "shop name cannot be empty".to_string(),
            });
        }
        if self.valid_from > self.valid_to {
            return Err(ScrapeError::InvalidRecord {
                reason: format!(
                    "valid_from ({}) is after valid_to ({})",
                    self.valid_from, self.valid_to
                ),
            });
        }
        Ok(())
    }

    pub fn is_open_ended(&self) -> bool {
        self.valid_to == OPEN_ENDED_DATE
    }
}

/// `parsed_time` serializes as `YYYY-MM-DD HH:MM:SS`, not RFC 3339.
mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// A shop entry discovered on the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shop {
    pub name: String,
    pub url: String,
}

/// Raw HTML of one shop page, paired with the shop it belongs to.
#[derive(Debug, Clone)]
pub struct ShopPage {
    pub shop: Shop,
    pub html: String,
}

/// Extract-stage output: fetched pages plus per-shop failure counts.
#[derive(Debug)]
pub struct CatalogExtract {
    pub pages: Vec<ShopPage>,
    pub shops_total: usize,
    pub shops_failed: usize,
}

/// Transform-stage output: parsed leaflets plus skip counters.
#[derive(Debug)]
pub struct ScrapeResult {
    pub leaflets: Vec<Leaflet>,
    pub leaflets_skipped: usize,
    pub open_ended: usize,
    pub shops_total: usize,
    pub shops_failed: usize,
}

/// What a completed run reports back to the caller.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    pub leaflets_written: usize,
    pub leaflets_skipped: usize,
    pub open_ended: usize,
    pub shops_total: usize,
    pub shops_failed: usize,
}
