//! Weekly availability slots for a counselor.

use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use common::converters::{format_wall_time, parse_wall_time};
use model::{decode_rows, decode_single, Direction, Filter, Query, Schedule, Table, TableStore};

use crate::error::{DashboardError, Result};
use crate::panel::FormMessage;

/// Input of the "add slot" form
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewSlot {
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: u8,
    #[validate(length(min = 1))]
    pub start_time: String,
    #[validate(length(min = 1))]
    pub end_time: String,
}

impl Default for NewSlot {
    fn default() -> Self {
        Self {
            day_of_week: 0,
            start_time: "09:00".to_string(),
            end_time: "18:00".to_string(),
        }
    }
}

/// All slots of a counselor, by day then start time.
#[instrument(skip(store))]
pub async fn fetch_slots(store: &dyn TableStore, counselor_id: &str) -> Result<Vec<Schedule>> {
    let query = Query::from(Table::Schedules)
        .eq("counselor_id", counselor_id)
        .order_by("day_of_week", Direction::Ascending)
        .order_by("start_time", Direction::Ascending);
    let rows = store.select(&query).await?;
    Ok(decode_rows(Table::Schedules, rows)?)
}

/// Inserts an available slot and returns it. Overlaps are not checked.
#[instrument(skip(store))]
pub async fn add_slot(store: &dyn TableStore, counselor_id: &str, slot: &NewSlot) -> Result<Schedule> {
    slot.validate()?;
    let start = parse_wall_time(&slot.start_time).map_err(DashboardError::Validation)?;
    let end = parse_wall_time(&slot.end_time).map_err(DashboardError::Validation)?;

    let row = json!({
        "counselor_id": counselor_id,
        "day_of_week": slot.day_of_week,
        "start_time": format_wall_time(&start),
        "end_time": format_wall_time(&end),
        "is_available": true,
    });
    let rows = store.insert(Table::Schedules, row).await?;
    let created: Schedule = decode_single(Table::Schedules, rows)?;

    info!("Added slot {} for counselor {}", created.id, counselor_id);
    Ok(created)
}

/// Flips the availability flag and returns the updated slot.
#[instrument(skip(store, slot), fields(slot_id = %slot.id))]
pub async fn toggle_slot(store: &dyn TableStore, slot: &Schedule) -> Result<Schedule> {
    let rows = store
        .update(
            Table::Schedules,
            &[Filter::eq("id", slot.id.as_str())],
            json!({ "is_available": !slot.is_available }),
        )
        .await?;
    Ok(decode_single(Table::Schedules, rows)?)
}

#[instrument(skip(store))]
pub async fn delete_slot(store: &dyn TableStore, slot_id: &str) -> Result<()> {
    store
        .delete(Table::Schedules, &[Filter::eq("id", slot_id)])
        .await?;
    info!("Deleted slot {}", slot_id);
    Ok(())
}

/// Message shown next to the add form.
pub fn add_message(result: &Result<Schedule>) -> FormMessage {
    FormMessage::from_result(result, "Slot added", "Failed to add slot")
}

/// Locally held slot list, kept in fetch order and patched with mutation
/// results instead of re-fetching.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlotList(Vec<Schedule>);

impl SlotList {
    pub fn new(slots: Vec<Schedule>) -> Self {
        Self(slots)
    }

    /// Replaces the slot with the same id, or inserts it at its day/start position.
    pub fn upsert(&mut self, slot: Schedule) {
        if let Some(existing) = self.0.iter_mut().find(|s| s.id == slot.id) {
            *existing = slot;
            return;
        }
        let position = self
            .0
            .iter()
            .position(|s| (s.day_of_week, s.start_time) > (slot.day_of_week, slot.start_time))
            .unwrap_or(self.0.len());
        self.0.insert(position, slot);
    }

    pub fn remove(&mut self, slot_id: &str) -> Option<Schedule> {
        let position = self.0.iter().position(|s| s.id == slot_id)?;
        Some(self.0.remove(position))
    }

    pub fn as_slice(&self) -> &[Schedule] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
