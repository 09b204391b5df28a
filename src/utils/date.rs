//! Publish timestamps.
//!
//! Front matter carries dates as strings. Accepted forms:
//! - `2024-01-01`                   (midnight UTC)
//! - `2024-01-01T08:30:00`          (UTC)
//! - `2024-01-01 08:30:00`          (UTC)
//! - `2024-01-01T08:30:00+08:00`    (RFC 3339, any offset or `Z`)

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::fmt;

/// A publish timestamp with its original offset.
///
/// Ordering compares instants, so `10:00+08:00 == 02:00Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PubDatetime(DateTime<FixedOffset>);

impl PubDatetime {
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt));
        }

        let naive = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })?;

        Some(Self(naive.and_utc().fixed_offset()))
    }

    /// RSS `pubDate` form, e.g. `Mon, 01 Jan 2024 00:00:00 +0000`.
    pub fn to_rfc2822(self) -> String {
        self.0.to_rfc2822()
    }

    /// Sitemap `lastmod` form, `YYYY-MM-DD` in the original offset.
    pub fn ymd(self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for PubDatetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
