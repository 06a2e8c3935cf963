use anyhow::Result;
use chrono::Local;
use common::{format_currency, format_datetime};
use compute::{fetch_bookings, group_by_client, load_counselor, ClientNotebook, ClientRoster};
use model::{NoteStore, TableStore};
use tracing::info;

pub async fn list<S: NoteStore>(store: &dyn TableStore, notes: S, user_id: &str) -> Result<String> {
    let counselor = load_counselor(store, user_id).await?;
    let bookings = fetch_bookings(store, &counselor.id).await?;
    let roster = group_by_client(&bookings);
    let notebook = ClientNotebook::open_or_empty(notes);

    info!("{} clients across {} bookings", roster.len(), bookings.len());
    Ok(render(&roster, &notebook))
}

pub fn set_note<S: NoteStore>(notes: S, client_id: &str, text: &str) -> Result<String> {
    let mut notebook = ClientNotebook::open_or_empty(notes);
    notebook.set_note(client_id, text)?;
    Ok(format!("Saved note for client {}", client_id))
}

pub fn render<S: NoteStore>(roster: &ClientRoster, notebook: &ClientNotebook<S>) -> String {
    if roster.is_empty() {
        return "No clients yet".to_string();
    }

    let mut out = String::new();
    for entry in roster.entries() {
        out.push_str(&format!(
            "{} <{}> ({} sessions)\n",
            entry.client.display_name(),
            entry.client.email,
            entry.sessions.len()
        ));
        for session in &entry.sessions {
            out.push_str(&format!(
                "  {}  {:<15} {:>10}  {}\n",
                format_datetime(&session.scheduled_at, &Local),
                session.service_type.label(),
                format_currency(session.amount),
                session.status.label()
            ));
        }
        let note = notebook.note_for(&entry.client.id);
        if !note.is_empty() {
            out.push_str(&format!("  Note: {}\n", note));
        }
    }
    out.trim_end().to_string()
}
