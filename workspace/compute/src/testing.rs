//! Fixtures shared by the panel tests.

use async_trait::async_trait;
use serde_json::{json, Value};

use model::{Filter, MemoryTableStore, Query, Row, StoreError, Table, TableStore};

pub fn user_row(id: &str, email: &str, name: Option<&str>) -> Value {
    json!({ "id": id, "email": email, "name": name })
}

pub fn counselor_row(id: &str, user_id: &str) -> Value {
    json!({
        "id": id,
        "user_id": user_id,
        "profile_image": null,
        "bio": "Licensed counselor",
        "specialties": ["anxiety"],
        "profile_url": null,
        "hourly_rate": 11000
    })
}

pub fn schedule_row(id: &str, counselor_id: &str, day: u8, start: &str, end: &str, available: bool) -> Value {
    json!({
        "id": id,
        "counselor_id": counselor_id,
        "day_of_week": day,
        "start_time": start,
        "end_time": end,
        "is_available": available
    })
}

pub fn booking_row(id: &str, user_id: &str, counselor_id: &str, scheduled_at: &str, status: &str) -> Value {
    json!({
        "id": id,
        "user_id": user_id,
        "counselor_id": counselor_id,
        "scheduled_at": scheduled_at,
        "service_type": "single",
        "amount": 11000,
        "status": status,
        "notes": null
    })
}

pub fn payment_row(id: &str, booking_id: &str, amount: i64, status: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "booking_id": booking_id,
        "amount": amount,
        "status": status,
        "created_at": created_at
    })
}

/// Counselor `c1` (user `u-counselor`) with two clients, plus a second
/// counselor `c2` whose rows must never leak into `c1`'s panels.
///
/// Bookings of `c1` by descending time: b3 (u1), b2 (u2), b5 (no user row), b1 (u1).
/// Completed payments of `c1`: 5000 on 2024-01-10, 3000 on 2024-01-20, 7000 on 2024-02-01.
pub fn seeded_store() -> MemoryTableStore {
    MemoryTableStore::new()
        .with_rows(
            Table::Users,
            vec![
                user_row("u-counselor", "sato@example.com", Some("Sato")),
                user_row("u1", "aki@example.com", Some("Aki")),
                user_row("u2", "ben@example.com", None),
                user_row("u3", "chie@example.com", Some("Chie")),
            ],
        )
        .with_rows(
            Table::Counselors,
            vec![counselor_row("c1", "u-counselor"), counselor_row("c2", "u-other")],
        )
        .with_rows(
            Table::Schedules,
            vec![
                schedule_row("s1", "c1", 1, "10:00:00", "12:00:00", true),
                schedule_row("s2", "c1", 1, "09:00:00", "10:00:00", false),
                schedule_row("s3", "c1", 3, "09:00:00", "18:00:00", true),
                schedule_row("s4", "c2", 0, "09:00:00", "18:00:00", true),
            ],
        )
        .with_rows(
            Table::Bookings,
            vec![
                booking_row("b1", "u1", "c1", "2024-01-05T10:00:00Z", "pending"),
                booking_row("b2", "u2", "c1", "2024-01-20T10:00:00Z", "confirmed"),
                booking_row("b3", "u1", "c1", "2024-02-10T10:00:00Z", "completed"),
                booking_row("b4", "u3", "c2", "2024-01-25T10:00:00Z", "completed"),
                booking_row("b5", "u-deleted", "c1", "2024-01-15T10:00:00Z", "cancelled"),
            ],
        )
        .with_rows(
            Table::Payments,
            vec![
                payment_row("p1", "b1", 5000, "completed", "2024-01-10"),
                payment_row("p2", "b2", 3000, "completed", "2024-01-20"),
                payment_row("p3", "b3", 7000, "completed", "2024-02-01"),
                payment_row("p4", "b1", 9000, "pending", "2024-01-11"),
                payment_row("p5", "b4", 4000, "completed", "2024-01-26"),
                payment_row("p6", "b2", 2000, "refunded", "2024-01-21"),
            ],
        )
}

/// Store that drops dotted (joined-table) filters before delegating, like a
/// backend that ignores filters on embedded relations.
pub struct IgnoringJoinStore(pub MemoryTableStore);

#[async_trait(?Send)]
impl TableStore for IgnoringJoinStore {
    async fn select(&self, query: &Query) -> Result<Vec<Row>, StoreError> {
        let mut query = query.clone();
        query.filters.retain(|f| f.embedded().is_none());
        self.0.select(&query).await
    }

    async fn insert(&self, table: Table, row: Row) -> Result<Vec<Row>, StoreError> {
        self.0.insert(table, row).await
    }

    async fn update(&self, table: Table, filters: &[Filter], patch: Row) -> Result<Vec<Row>, StoreError> {
        self.0.update(table, filters, patch).await
    }

    async fn delete(&self, table: Table, filters: &[Filter]) -> Result<Vec<Row>, StoreError> {
        self.0.delete(table, filters).await
    }
}
