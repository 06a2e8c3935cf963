//! Booking list and the status workflow.
//!
//! ```text
//! pending ──confirm──▶ confirmed ──complete──▶ completed
//!    │                     │                      │
//!    └───────cancel────────┴────────cancel────────┴──▶ cancelled
//! ```

use serde_json::json;
use std::fmt;
use std::str::FromStr;
use tracing::{info, instrument, warn};

use model::{decode_rows, decode_single, Booking, BookingStatus, Direction, Filter, Query, Table, TableStore};

use crate::error::{DashboardError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingAction {
    Confirm,
    Complete,
    Cancel,
}

impl BookingAction {
    /// Status a booking ends up in after the action.
    pub fn target(&self) -> BookingStatus {
        match self {
            BookingAction::Confirm => BookingStatus::Confirmed,
            BookingAction::Complete => BookingStatus::Completed,
            BookingAction::Cancel => BookingStatus::Cancelled,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingAction::Confirm => "Confirm",
            BookingAction::Complete => "Complete",
            BookingAction::Cancel => "Cancel",
        }
    }
}

impl fmt::Display for BookingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BookingAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "confirm" => Ok(BookingAction::Confirm),
            "complete" => Ok(BookingAction::Complete),
            "cancel" => Ok(BookingAction::Cancel),
            other => Err(format!("Unknown booking action: {}", other)),
        }
    }
}

/// Actions offered for a booking in the given status.
pub fn available_actions(status: BookingStatus) -> &'static [BookingAction] {
    match status {
        BookingStatus::Pending => &[BookingAction::Confirm, BookingAction::Cancel],
        BookingStatus::Confirmed => &[BookingAction::Complete, BookingAction::Cancel],
        BookingStatus::Completed => &[BookingAction::Cancel],
        BookingStatus::Cancelled => &[],
    }
}

pub fn can_transition(from: BookingStatus, action: BookingAction) -> bool {
    available_actions(from).contains(&action)
}

/// Bookings of a counselor with the client embedded, newest first.
#[instrument(skip(store))]
pub async fn fetch_bookings(store: &dyn TableStore, counselor_id: &str) -> Result<Vec<Booking>> {
    let query = Query::from(Table::Bookings)
        .embed("user", Table::Users, "user_id")
        .eq("counselor_id", counselor_id)
        .order_by("scheduled_at", Direction::Descending);
    let rows = store.select(&query).await?;
    Ok(decode_rows(Table::Bookings, rows)?)
}

/// Moves a booking to the action's target status and returns the stored row.
///
/// Transitions the workflow does not allow are rejected without touching the
/// store.
#[instrument(skip(store, booking), fields(booking_id = %booking.id, from = %booking.status))]
pub async fn apply_action(store: &dyn TableStore, booking: &Booking, action: BookingAction) -> Result<Booking> {
    let target = action.target();
    if !can_transition(booking.status, action) {
        warn!("Rejected {} on booking {} in status {}", action, booking.id, booking.status);
        return Err(DashboardError::IllegalTransition {
            from: booking.status,
            to: target,
        });
    }

    let rows = store
        .update(
            Table::Bookings,
            &[Filter::eq("id", booking.id.as_str())],
            json!({ "status": target.as_str() }),
        )
        .await?;
    let updated: Booking = decode_single(Table::Bookings, rows)?;

    info!("Booking {} is now {}", updated.id, updated.status);
    Ok(updated)
}

/// Replaces the booking with the same id in place. The embedded client is
/// carried over when the returned row does not include it.
pub fn merge_booking(bookings: &mut [Booking], mut updated: Booking) -> bool {
    match bookings.iter_mut().find(|b| b.id == updated.id) {
        Some(existing) => {
            if updated.user.is_none() {
                updated.user = existing.user.take();
            }
            *existing = updated;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::seeded_store;

    #[test]
    fn test_available_actions() {
        assert_eq!(
            available_actions(BookingStatus::Pending),
            &[BookingAction::Confirm, BookingAction::Cancel]
        );
        assert_eq!(
            available_actions(BookingStatus::Confirmed),
            &[BookingAction::Complete, BookingAction::Cancel]
        );
        assert_eq!(available_actions(BookingStatus::Completed), &[BookingAction::Cancel]);
        assert!(available_actions(BookingStatus::Cancelled).is_empty());
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!("confirm".parse::<BookingAction>(), Ok(BookingAction::Confirm));
        assert_eq!("Cancel".parse::<BookingAction>(), Ok(BookingAction::Cancel));
        assert!("archive".parse::<BookingAction>().is_err());
    }

    #[tokio::test]
    async fn test_fetch_bookings_newest_first_with_client() {
        let store = seeded_store();
        let bookings = fetch_bookings(&store, "c1").await.unwrap();

        let ids: Vec<_> = bookings.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b3", "b2", "b5", "b1"]);
        assert_eq!(bookings[0].user.as_ref().unwrap().display_name(), "Aki");
        assert!(bookings[2].user.is_none());
    }

    #[tokio::test]
    async fn test_cancel_pending_booking() {
        let store = seeded_store();
        let mut bookings = fetch_bookings(&store, "c1").await.unwrap();
        let pending = bookings.iter().find(|b| b.id == "b1").unwrap().clone();
        assert_eq!(pending.status, BookingStatus::Pending);

        let updated = apply_action(&store, &pending, BookingAction::Cancel).await.unwrap();
        assert_eq!(updated.status, BookingStatus::Cancelled);

        assert!(merge_booking(&mut bookings, updated));
        let merged = &bookings[3];
        assert_eq!(merged.id, "b1");
        assert_eq!(merged.status, BookingStatus::Cancelled);
        assert!(merged.user.is_some());

        let actions = available_actions(merged.status);
        assert!(!actions.contains(&BookingAction::Confirm));
        assert!(!actions.contains(&BookingAction::Complete));
    }

    #[tokio::test]
    async fn test_illegal_transition_skips_store() {
        let store = seeded_store();
        let bookings = fetch_bookings(&store, "c1").await.unwrap();
        let pending = bookings.iter().find(|b| b.id == "b1").unwrap();

        let err = apply_action(&store, pending, BookingAction::Complete).await.unwrap_err();
        assert!(matches!(
            err,
            DashboardError::IllegalTransition {
                from: BookingStatus::Pending,
                to: BookingStatus::Completed
            }
        ));
        assert_eq!(store.mutation_count(), 0);
    }

    #[tokio::test]
    async fn test_confirm_then_complete() {
        let store = seeded_store();
        let bookings = fetch_bookings(&store, "c1").await.unwrap();
        let pending = bookings.iter().find(|b| b.id == "b1").unwrap();

        let confirmed = apply_action(&store, pending, BookingAction::Confirm).await.unwrap();
        let completed = apply_action(&store, &confirmed, BookingAction::Complete).await.unwrap();
        assert_eq!(completed.status, BookingStatus::Completed);
        assert_eq!(store.mutation_count(), 2);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_message() {
        let store = seeded_store();
        let bookings = fetch_bookings(&store, "c1").await.unwrap();
        store.fail_with("row level security");

        let err = apply_action(&store, &bookings[0], BookingAction::Cancel).await.unwrap_err();
        assert_eq!(err.to_string(), "row level security");
    }
}
