use std::rc::Rc;

use chrono::Local;
use common::{format_currency, format_datetime};
use compute::{apply_action, available_actions, BookingAction};
use model::Booking;
use yew::prelude::*;
use yew_router::prelude::*;

use super::badge::StatusBadge;
use crate::common::fetch_render::FetchRender;
use crate::common::toast::ToastContext;
use crate::hooks::{use_store, FetchState};
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct BookingsPanelProps {
    pub bookings: FetchState<Vec<Booking>>,
    pub on_retry: Callback<()>,
    pub on_updated: Callback<Booking>,
}

/// Bookings newest first, with the status actions each one still allows.
#[function_component(BookingsPanel)]
pub fn bookings_panel(props: &BookingsPanelProps) -> Html {
    let store = use_store();
    let toast_ctx = use_context::<ToastContext>();
    let busy = use_state(|| None::<String>);

    let on_action = {
        let store = store.clone();
        let busy = busy.clone();
        let on_updated = props.on_updated.clone();
        Callback::from(move |(booking, action): (Booking, BookingAction)| {
            if busy.is_some() {
                return;
            }
            busy.set(Some(booking.id.clone()));

            let store = Rc::clone(&store.store);
            let busy = busy.clone();
            let on_updated = on_updated.clone();
            let toast_ctx = toast_ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match apply_action(&*store, &booking, action).await {
                    Ok(updated) => {
                        log::info!("Booking {} is now {}", updated.id, updated.status);
                        if let Some(toast_ctx) = &toast_ctx {
                            toast_ctx.show_success(format!("Booking {}", updated.status.label().to_lowercase()));
                        }
                        on_updated.emit(updated);
                    }
                    Err(err) => {
                        log::error!("Failed to update booking {}: {}", booking.id, err);
                        if let Some(toast_ctx) = &toast_ctx {
                            toast_ctx.show_error(err.to_string());
                        }
                    }
                }
                busy.set(None);
            });
        })
    };

    let render = {
        let busy = (*busy).clone();
        Callback::from(move |bookings: Vec<Booking>| {
            if bookings.is_empty() {
                return html! {
                    <div class="alert alert-info">
                        <i class="fas fa-info-circle"></i>
                        <span>{"No bookings yet."}</span>
                    </div>
                };
            }
            html! {
                <div class="overflow-x-auto">
                    <table class="table">
                        <thead>
                            <tr>
                                <th>{"Date"}</th>
                                <th>{"Client"}</th>
                                <th>{"Service"}</th>
                                <th class="text-right">{"Amount"}</th>
                                <th>{"Status"}</th>
                                <th>{"Actions"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for bookings.into_iter().map(|booking| booking_row(booking, &on_action, busy.as_deref())) }
                        </tbody>
                    </table>
                </div>
            }
        })
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{"Bookings"}</h2>
                <FetchRender<Vec<Booking>>
                    state={props.bookings.clone()}
                    render={render}
                    on_retry={Some(props.on_retry.clone())}
                />
            </div>
        </div>
    }
}

fn booking_row(booking: Booking, on_action: &Callback<(Booking, BookingAction)>, busy: Option<&str>) -> Html {
    let client = booking
        .user
        .as_ref()
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "-".to_string());
    let disabled = busy == Some(booking.id.as_str());

    html! {
        <tr key={booking.id.clone()}>
            <td>{format_datetime(&booking.scheduled_at, &Local)}</td>
            <td>{client}</td>
            <td>{booking.service_type.label()}</td>
            <td class="text-right">{format_currency(booking.amount)}</td>
            <td><StatusBadge status={booking.status} /></td>
            <td class="flex gap-2">
                { for available_actions(booking.status).iter().map(|action| {
                    let action = *action;
                    let onclick = {
                        let on_action = on_action.clone();
                        let booking = booking.clone();
                        Callback::from(move |_| on_action.emit((booking.clone(), action)))
                    };
                    let class = match action {
                        BookingAction::Cancel => "btn btn-xs btn-outline btn-error",
                        _ => "btn btn-xs btn-primary",
                    };
                    html! { <button {class} {disabled} {onclick}>{action.label()}</button> }
                }) }
                <Link<Route> to={Route::Chat { id: booking.id.clone() }} classes="btn btn-xs btn-ghost">
                    <i class="fas fa-comments"></i>
                </Link<Route>>
            </td>
        </tr>
    }
}
