use anyhow::{anyhow, Result};
use chrono::Local;
use common::{format_currency, format_datetime};
use compute::{apply_action, available_actions, fetch_bookings, load_counselor};
use model::{Booking, TableStore};
use tracing::info;

use crate::cli::BookingsCommand;

pub async fn run(store: &dyn TableStore, user_id: &str, command: BookingsCommand) -> Result<String> {
    let counselor = load_counselor(store, user_id).await?;
    let bookings = fetch_bookings(store, &counselor.id).await?;

    match command {
        BookingsCommand::List => Ok(render(&bookings)),
        BookingsCommand::Set { booking, action } => {
            let target = bookings
                .iter()
                .find(|b| b.id == booking)
                .ok_or_else(|| anyhow!("No booking {} for this counselor", booking))?;
            let updated = apply_action(store, target, action).await?;
            info!("Booking {} moved to {}", updated.id, updated.status);
            Ok(format!("Booking {} is now {}", updated.id, updated.status.label()))
        }
    }
}

/// One line per booking with the actions still available.
pub fn render(bookings: &[Booking]) -> String {
    if bookings.is_empty() {
        return "No bookings".to_string();
    }

    bookings
        .iter()
        .map(|b| {
            let client = b.user.as_ref().map(|u| u.display_name()).unwrap_or("-");
            let actions = available_actions(b.status)
                .iter()
                .map(|a| a.label().to_lowercase())
                .collect::<Vec<_>>()
                .join(",");
            format!(
                "{}  {}  {:<20} {:<15} {:>10}  {:<10} [{}]",
                b.id,
                format_datetime(&b.scheduled_at, &Local),
                client,
                b.service_type.label(),
                format_currency(b.amount),
                b.status.label(),
                actions
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
