//! # Reports
//!
//! Calendar windows for sales reports and best-seller selection.
//!
//! ## Window Construction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "2026-01-01" .. "2026-01-31"   (calendar dates, reference zone +07:00) │
//! │         │                                                               │
//! │         ▼  parse_report_date (exactly YYYY-MM-DD)                       │
//! │  NaiveDate 2026-01-01 .. NaiveDate 2026-01-31                           │
//! │         │                                                               │
//! │         ▼  ReportWindow::for_dates                                      │
//! │  start = 2026-01-01T00:00:00.000000000 local = 2025-12-31T17:00:00Z     │
//! │  end   = 2026-01-31T23:59:59.999999999 local = 2026-01-31T16:59:59.9..Z │
//! │         │                                                               │
//! │         ▼  kasir-db ReportRepository                                    │
//! │  WHERE created_at >= start AND created_at <= end   (both inclusive)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The reference zone is a fixed offset chosen by configuration; with the
//! default `+00:00` days are UTC days.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::{CoreError, CoreResult};
use crate::types::{BestSellingProduct, ProductSales};

/// The only accepted report date format.
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Date Parsing
// =============================================================================

/// Parses a `YYYY-MM-DD` calendar date.
///
/// Unpadded forms such as `2026-1-5` are rejected.
///
/// ## Example
/// ```rust
/// use kasir_core::report::parse_report_date;
///
/// assert!(parse_report_date("2026-01-05").is_ok());
/// assert!(parse_report_date("2026-1-5").is_err());
/// assert!(parse_report_date("not-a-date").is_err());
/// ```
pub fn parse_report_date(value: &str) -> CoreResult<NaiveDate> {
    let invalid = || CoreError::InvalidDateFormat {
        value: value.to_string(),
    };

    if value.len() != 10 {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, REPORT_DATE_FORMAT).map_err(|_| invalid())
}

// =============================================================================
// Report Window
// =============================================================================

/// An inclusive `[start, end]` range of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    /// From the first instant of `start` to the last nanosecond of `end`,
    /// both read as calendar days in `offset`.
    ///
    /// A `start` after `end` gives a window that matches nothing.
    pub fn for_dates(start: NaiveDate, end: NaiveDate, offset: FixedOffset) -> Self {
        ReportWindow {
            start: start_of_day(start, offset),
            end: end_of_day(end, offset),
        }
    }

    /// The calendar day containing `now` in `offset`.
    pub fn today(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        let local_date = now.with_timezone(&offset).date_naive();
        Self::for_dates(local_date, local_date, offset)
    }
}

fn start_of_day(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let local_midnight = date.and_time(NaiveTime::MIN);
    let utc_midnight = local_midnight - Duration::seconds(i64::from(offset.local_minus_utc()));
    Utc.from_utc_datetime(&utc_midnight)
}

fn end_of_day(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    start_of_day(date, offset) + Duration::days(1) - Duration::nanoseconds(1)
}

// =============================================================================
// Best Sellers
// =============================================================================

/// Keeps every product tied at the highest quantity sold.
///
/// Ties are all returned, ordered by product id. Empty input gives an
/// empty result.
///
/// ```text
/// Indomie 15, Teh Botol 15, Aqua 4   →   [Indomie 15, Teh Botol 15]
/// ```
pub fn best_sellers(mut sales: Vec<ProductSales>) -> Vec<BestSellingProduct> {
    let Some(max) = sales.iter().map(|s| s.quantity_sold).max() else {
        return Vec::new();
    };

    sales.retain(|s| s.quantity_sold == max);
    sales.sort_by_key(|s| s.product_id);
    sales
        .into_iter()
        .map(|s| BestSellingProduct {
            name: s.name,
            quantity_sold: s.quantity_sold,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
