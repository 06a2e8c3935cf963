use std::cell::RefCell;
use std::rc::Rc;

use chrono::Local;
use common::format_datetime;
use compute::{group_by_client, ClientNotebook, ClientSessions};
use model::Booking;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

use super::badge::StatusBadge;
use crate::common::fetch_render::FetchRender;
use crate::common::toast::ToastContext;
use crate::hooks::FetchState;
use crate::storage::LocalStorageNotes;

type Notebook = Rc<RefCell<ClientNotebook<LocalStorageNotes>>>;

#[derive(Properties, PartialEq)]
pub struct ClientsPanelProps {
    pub bookings: FetchState<Vec<Booking>>,
    pub on_retry: Callback<()>,
}

/// Clients of the counselor with their sessions and a private note each.
/// Notes live in this browser only.
#[function_component(ClientsPanel)]
pub fn clients_panel(props: &ClientsPanelProps) -> Html {
    let notebook = use_mut_ref(|| ClientNotebook::open_or_empty(LocalStorageNotes));
    let force_update = use_force_update();
    let toast_ctx = use_context::<ToastContext>();

    let on_note = {
        let notebook = notebook.clone();
        Callback::from(move |(client_id, text): (String, String)| {
            if let Err(err) = notebook.borrow_mut().set_note(&client_id, &text) {
                log::error!("Failed to save note for {}: {}", client_id, err);
                if let Some(toast_ctx) = &toast_ctx {
                    toast_ctx.show_error(format!("Note not saved: {}", err));
                }
            }
            force_update.force_update();
        })
    };

    let render = Callback::from(move |bookings: Vec<Booking>| {
        let roster = group_by_client(&bookings);
        if roster.is_empty() {
            return html! { <p class="text-base-content/60">{"No clients yet"}</p> };
        }
        html! {
            <div class="grid gap-4 lg:grid-cols-2">
                { for roster.entries().iter().map(|entry| client_card(entry, &notebook, &on_note)) }
            </div>
        }
    });

    html! {
        <FetchRender<Vec<Booking>>
            state={props.bookings.clone()}
            {render}
            on_retry={Some(props.on_retry.clone())}
        />
    }
}

fn client_card(entry: &ClientSessions, notebook: &Notebook, on_note: &Callback<(String, String)>) -> Html {
    let client_id = entry.client.id.clone();
    let note = notebook.borrow().note_for(&client_id).to_string();
    let oninput = {
        let on_note = on_note.clone();
        let client_id = client_id.clone();
        Callback::from(move |e: InputEvent| {
            let text = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            on_note.emit((client_id.clone(), text));
        })
    };

    html! {
        <div class="card bg-base-100 shadow" key={client_id}>
            <div class="card-body">
                <h3 class="card-title text-base">
                    { entry.client.display_name() }
                    <span class="badge badge-ghost">{ format!("{} sessions", entry.sessions.len()) }</span>
                </h3>
                <p class="text-sm text-base-content/60">{ &entry.client.email }</p>
                <ul class="text-sm space-y-1">
                    { for entry.sessions.iter().map(|session| html! {
                        <li class="flex items-center gap-2" key={session.id.clone()}>
                            <span>{ format_datetime(&session.scheduled_at, &Local) }</span>
                            <span>{ session.service_type.label() }</span>
                            <StatusBadge status={session.status} />
                        </li>
                    }) }
                </ul>
                <textarea class="textarea textarea-bordered w-full mt-2" rows="3"
                    placeholder="Private notes about this client" value={note} {oninput} />
            </div>
        </div>
    }
}
