//! Monthly revenue of a counselor from completed payments.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, error, instrument};

use model::{decode_rows, Payment, PaymentStatus, Query, Table, TableStore};

use crate::error::Result;
use crate::panel::FetchState;

/// Revenue of one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    /// `YYYY-MM`
    pub month: String,
    pub total: Decimal,
    pub count: u64,
}

/// Buckets ascending by month plus grand totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RevenueSummary {
    pub months: Vec<MonthlyRevenue>,
    pub total: Decimal,
    pub count: u64,
}

/// What the revenue panel renders. A failed load carries only the message.
pub type RevenueState = FetchState<RevenueSummary>;

/// Month bucket of a timestamp as seen in `tz`.
pub fn month_key<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    ts.with_timezone(tz).format("%Y-%m").to_string()
}

/// Aggregates completed payments per month. Other statuses are ignored.
pub fn summarize<Tz: TimeZone>(payments: &[Payment], tz: &Tz) -> RevenueSummary
where
    Tz::Offset: std::fmt::Display,
{
    let mut buckets: BTreeMap<String, (Decimal, u64)> = BTreeMap::new();
    for payment in payments.iter().filter(|p| p.is_completed()) {
        let bucket = buckets
            .entry(month_key(&payment.created_at, tz))
            .or_insert((Decimal::ZERO, 0));
        bucket.0 += payment.amount;
        bucket.1 += 1;
    }

    let months: Vec<MonthlyRevenue> = buckets
        .into_iter()
        .map(|(month, (total, count))| MonthlyRevenue { month, total, count })
        .collect();

    RevenueSummary {
        total: months.iter().map(|m| m.total).sum(),
        count: months.iter().map(|m| m.count).sum(),
        months,
    }
}

/// Completed payments whose booking belongs to the counselor.
///
/// The join filter is sent to the store, but rows are also checked here:
/// a backend may keep the payment and only null the embedded booking.
#[instrument(skip(store))]
pub async fn fetch_completed_payments(store: &dyn TableStore, counselor_id: &str) -> Result<Vec<Payment>> {
    let query = Query::from(Table::Payments)
        .embed("booking", Table::Bookings, "booking_id")
        .eq("status", "completed")
        .eq("booking.counselor_id", counselor_id);
    let rows = store.select(&query).await?;
    let fetched = decode_rows::<Payment>(Table::Payments, rows)?;
    let fetched_count = fetched.len();

    let payments: Vec<Payment> = fetched
        .into_iter()
        .filter(|p| p.status == PaymentStatus::Completed && p.counselor_id() == Some(counselor_id))
        .collect();

    debug!(
        "Kept {} of {} payments for counselor {}",
        payments.len(),
        fetched_count,
        counselor_id
    );
    Ok(payments)
}

/// Fetches and aggregates. On failure nothing partial is kept.
pub async fn load_revenue<Tz: TimeZone>(store: &dyn TableStore, counselor_id: &str, tz: &Tz) -> RevenueState
where
    Tz::Offset: std::fmt::Display,
{
    let result = fetch_completed_payments(store, counselor_id)
        .await
        .map(|payments| summarize(&payments, tz));
    if let Err(err) = &result {
        error!("Failed to load revenue for counselor {}: {}", counselor_id, err);
    }
    FetchState::from_result(result)
}
