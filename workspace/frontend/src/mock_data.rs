use chrono::{Duration, Utc};
use model::{MemoryTableStore, Table};
use serde_json::{json, Value};

use crate::settings::DEMO_USER_ID;

const DEMO_COUNSELOR_ID: &str = "demo-c1";

fn user(id: &str, email: &str, name: Option<&str>) -> Value {
    json!({ "id": id, "email": email, "name": name })
}

fn slot(id: &str, day: u8, start: &str, end: &str, available: bool) -> Value {
    json!({
        "id": id,
        "counselor_id": DEMO_COUNSELOR_ID,
        "day_of_week": day,
        "start_time": start,
        "end_time": end,
        "is_available": available
    })
}

fn booking(id: &str, user_id: &str, days_from_now: i64, service: &str, amount: i64, status: &str) -> Value {
    let scheduled_at = Utc::now() + Duration::days(days_from_now);
    json!({
        "id": id,
        "user_id": user_id,
        "counselor_id": DEMO_COUNSELOR_ID,
        "scheduled_at": scheduled_at.to_rfc3339(),
        "service_type": service,
        "amount": amount,
        "status": status,
        "notes": null
    })
}

fn payment(id: &str, booking_id: &str, amount: i64, status: &str, days_ago: i64) -> Value {
    let created_at = Utc::now() - Duration::days(days_ago);
    json!({
        "id": id,
        "booking_id": booking_id,
        "amount": amount,
        "status": status,
        "created_at": created_at.to_rfc3339()
    })
}

/// In-memory store used when no backend is configured.
pub fn demo_store() -> MemoryTableStore {
    log::info!("Seeding demo store for {}", DEMO_USER_ID);

    MemoryTableStore::new()
        .with_rows(
            Table::Users,
            vec![
                user(DEMO_USER_ID, "counselor@example.com", Some("Demo Counselor")),
                user("demo-u1", "aki@example.com", Some("Aki Tanaka")),
                user("demo-u2", "ben@example.com", None),
                user("demo-u3", "chie@example.com", Some("Chie Mori")),
            ],
        )
        .with_rows(
            Table::Counselors,
            vec![json!({
                "id": DEMO_COUNSELOR_ID,
                "user_id": DEMO_USER_ID,
                "profile_image": null,
                "bio": "Career and stress counseling for working adults.",
                "specialties": ["career", "stress"],
                "profile_url": null,
                "hourly_rate": 11000
            })],
        )
        .with_rows(
            Table::Schedules,
            vec![
                slot("demo-s1", 1, "10:00:00", "17:00:00", true),
                slot("demo-s2", 3, "13:00:00", "20:00:00", true),
                slot("demo-s3", 6, "09:00:00", "12:00:00", false),
            ],
        )
        .with_rows(
            Table::Bookings,
            vec![
                booking("demo-b1", "demo-u1", -75, "single", 11000, "completed"),
                booking("demo-b2", "demo-u2", -40, "monthly", 40000, "completed"),
                booking("demo-b3", "demo-u1", -10, "single", 11000, "completed"),
                booking("demo-b4", "demo-u3", 3, "single", 11000, "confirmed"),
                booking("demo-b5", "demo-u1", 9, "single", 11000, "pending"),
                booking("demo-b6", "demo-u2", 14, "monthly", 40000, "cancelled"),
            ],
        )
        .with_rows(
            Table::Payments,
            vec![
                payment("demo-p1", "demo-b1", 11000, "completed", 75),
                payment("demo-p2", "demo-b2", 40000, "completed", 40),
                payment("demo-p3", "demo-b3", 11000, "completed", 10),
                payment("demo-p4", "demo-b4", 11000, "pending", 2),
                payment("demo-p5", "demo-b6", 40000, "refunded", 1),
            ],
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_store_is_seeded() {
        let store = demo_store();
        assert_eq!(store.rows(Table::Counselors).len(), 1);
        assert_eq!(store.rows(Table::Counselors)[0]["user_id"], DEMO_USER_ID);
        assert_eq!(store.rows(Table::Bookings).len(), 6);
    }
}
