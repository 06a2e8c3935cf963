use anyhow::{anyhow, Result};
use common::{converters::format_wall_time, weekday_label};
use compute::{add_slot, delete_slot, fetch_slots, load_counselor, toggle_slot, NewSlot};
use model::{Schedule, TableStore};

use crate::cli::ScheduleCommand;

pub async fn run(store: &dyn TableStore, user_id: &str, command: ScheduleCommand) -> Result<String> {
    let counselor = load_counselor(store, user_id).await?;

    match command {
        ScheduleCommand::List => {
            let slots = fetch_slots(store, &counselor.id).await?;
            Ok(render(&slots))
        }
        ScheduleCommand::Add { day, start, end } => {
            let slot = NewSlot {
                day_of_week: day,
                start_time: start,
                end_time: end,
            };
            let created = add_slot(store, &counselor.id, &slot).await?;
            Ok(format!("Slot added: {}", render_slot(&created)))
        }
        ScheduleCommand::Toggle { slot } => {
            let target = own_slot(store, &counselor.id, &slot).await?;
            let updated = toggle_slot(store, &target).await?;
            Ok(render_slot(&updated))
        }
        ScheduleCommand::Delete { slot } => {
            let target = own_slot(store, &counselor.id, &slot).await?;
            delete_slot(store, &target.id).await?;
            Ok(format!("Slot {} deleted", target.id))
        }
    }
}

/// A slot of the signed-in counselor; ids of other counselors' slots are rejected.
async fn own_slot(store: &dyn TableStore, counselor_id: &str, slot_id: &str) -> Result<Schedule> {
    fetch_slots(store, counselor_id)
        .await?
        .into_iter()
        .find(|s| s.id == slot_id)
        .ok_or_else(|| anyhow!("No slot {} for this counselor", slot_id))
}

pub fn render_slot(slot: &Schedule) -> String {
    format!(
        "{}  {} {}-{}  {}",
        slot.id,
        weekday_label(slot.day_of_week),
        format_wall_time(&slot.start_time),
        format_wall_time(&slot.end_time),
        if slot.is_available { "available" } else { "unavailable" }
    )
}

pub fn render(slots: &[Schedule]) -> String {
    if slots.is_empty() {
        return "No slots".to_string();
    }
    slots.iter().map(render_slot).collect::<Vec<_>>().join("\n")
}
