//! # Report Module
//!
//! Daily and multi-day sales aggregation.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  TransactionRepository::list()  (all transactions + line items) │
//! │                │                                                │
//! │                ▼                                                │
//! │  daily_report(date, &txs) ──► DailyReport                       │
//! │     filter to [00:00, 24:00) local   revenue / counts /         │
//! │     group line items by menu id      best sellers               │
//! │                                                                 │
//! │  revenue_by_day(n, &txs)  ──► Vec<DailySummary>                 │
//! │     same window filter, once per day, oldest first              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every report is recomputed from the full transaction history on
//! request. The multi-day aggregate rescans the list once per day -
//! O(days × transactions) - which is fine at warung scale and the first
//! thing to replace with a single bucketed pass anywhere bigger.

use std::collections::HashMap;

use chrono::{DateTime, Days, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Transaction;
use crate::DEFAULT_REPORT_DAYS;

// =============================================================================
// Report Types
// =============================================================================

/// Sales of one menu item within a day window.
///
/// Grouped by menu id; line items whose menu was deleted group under
/// id 0. The name comes from the first line item seen for the id, and
/// revenue uses each line's stored price, not the current menu price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestSeller {
    #[serde(rename = "id")]
    pub menu_id: i64,
    pub name: String,
    pub count: i64,
    pub revenue: Money,
}

/// The full aggregate for one calendar day. Derived, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub total_revenue: Money,
    pub total_transactions: u64,
    pub total_items: i64,
    pub best_sellers: Vec<BestSeller>,
}

/// The cheap per-day aggregate used by the multi-day window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub revenue: Money,
    pub transactions: u64,
}

// =============================================================================
// Day Window
// =============================================================================

/// Maps a local calendar date's midnight to an instant.
///
/// DST-ambiguous midnights resolve to the earliest instant; nonexistent
/// ones (clocks jumped over midnight) fall back to reading the naive
/// time as UTC.
fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&naive),
    }
}

/// The half-open interval `[00:00 of date, 00:00 of date+1)` in server
/// local time.
///
/// A transaction stamped exactly at midnight belongs to the starting
/// day, not the one before.
pub fn day_window(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = local_midnight(date);
    let end = local_midnight(date.checked_add_days(Days::new(1)).unwrap_or(date));
    (start, end)
}

/// Parses an optional `YYYY-MM-DD` query value, defaulting to today.
pub fn parse_report_date(raw: Option<&str>) -> CoreResult<NaiveDate> {
    match raw {
        None => Ok(Local::now().date_naive()),
        Some(s) if s.is_empty() => Ok(Local::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            CoreError::InvalidDateFormat {
                value: s.to_string(),
            }
        }),
    }
}

// =============================================================================
// Daily Report Engine
// =============================================================================

/// Aggregates one calendar day out of the full transaction history.
pub fn daily_report(date: NaiveDate, transactions: &[Transaction]) -> DailyReport {
    let (start, end) = day_window(date);

    let mut total_revenue = Money::zero();
    let mut total_transactions: u64 = 0;
    let mut total_items: i64 = 0;
    let mut sellers: HashMap<i64, BestSeller> = HashMap::new();

    for tx in transactions {
        if tx.created_at < start || tx.created_at >= end {
            continue;
        }
        total_transactions += 1;
        total_revenue += tx.total;

        for item in &tx.items {
            total_items += item.quantity;

            let key = item.menu_id.unwrap_or(0);
            let entry = sellers.entry(key).or_insert_with(|| BestSeller {
                menu_id: key,
                name: item.menu_name.clone(),
                count: 0,
                revenue: Money::zero(),
            });
            entry.count += item.quantity;
            entry.revenue += item.line_total();
        }
    }

    let mut best_sellers: Vec<BestSeller> = sellers.into_values().collect();
    best_sellers.sort_by(|a, b| b.revenue.cmp(&a.revenue).then(a.menu_id.cmp(&b.menu_id)));

    DailyReport {
        date,
        total_revenue,
        total_transactions,
        total_items,
        best_sellers,
    }
}

// =============================================================================
// Multi-Day Aggregator
// =============================================================================

/// Revenue per day over the `days` most recent days, ending at `ending`
/// inclusive, ordered oldest to newest.
///
/// A non-positive `days` silently falls back to [`DEFAULT_REPORT_DAYS`].
pub fn revenue_window(
    days: i64,
    ending: NaiveDate,
    transactions: &[Transaction],
) -> Vec<DailySummary> {
    let days = if days > 0 { days } else { DEFAULT_REPORT_DAYS };

    (0..days)
        .rev()
        .filter_map(|offset| ending.checked_sub_days(Days::new(offset as u64)))
        .map(|date| {
            let (start, end) = day_window(date);
            let mut revenue = Money::zero();
            let mut count: u64 = 0;
            for tx in transactions {
                if tx.created_at < start || tx.created_at >= end {
                    continue;
                }
                revenue += tx.total;
                count += 1;
            }
            DailySummary {
                date,
                revenue,
                transactions: count,
            }
        })
        .collect()
}

/// [`revenue_window`] ending today (server local time).
pub fn revenue_by_day(days: i64, transactions: &[Transaction]) -> Vec<DailySummary> {
    revenue_window(days, Local::now().date_naive(), transactions)
}

// =============================================================================
// Unit Tests
// =============================================================================
