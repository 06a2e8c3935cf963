use std::rc::Rc;

use common::converters::format_wall_time;
use common::{weekday_label, WEEKDAY_LABELS};
use compute::schedule::add_message;
use compute::{add_slot, delete_slot, fetch_slots, toggle_slot, FormMessage, NewSlot, SlotList};
use model::Schedule;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::common::error::ErrorDisplay;
use crate::common::fetch_hook::{use_patched_fetch, PatchAction};
use crate::common::form_message::FormMessageView;
use crate::common::loading::LoadingSpinner;
use crate::common::toast::ToastContext;
use crate::hooks::{use_store, FetchState};

#[derive(Properties, PartialEq)]
pub struct SchedulePanelProps {
    pub counselor_id: String,
}

#[function_component(SchedulePanel)]
pub fn schedule_panel(props: &SchedulePanelProps) -> Html {
    let store = use_store();
    let toast_ctx = use_context::<ToastContext>();
    let (fetched, refetch) = use_patched_fetch(props.counselor_id.clone(), |store, counselor_id| async move {
        fetch_slots(&*store, &counselor_id).await.map(SlotList::new)
    });
    let draft = use_state(NewSlot::default);
    let message = use_state(|| None::<FormMessage>);

    // Mutation results are merged into the list, never re-fetched
    let patch = {
        let dispatcher = fetched.dispatcher();
        move |apply: Box<dyn FnOnce(&mut SlotList)>| dispatcher.dispatch(PatchAction::Apply(apply))
    };

    let on_add = {
        let store = store.clone();
        let draft = draft.clone();
        let message = message.clone();
        let patch = patch.clone();
        let counselor_id = props.counselor_id.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let store = Rc::clone(&store.store);
            let slot = (*draft).clone();
            let message = message.clone();
            let patch = patch.clone();
            let counselor_id = counselor_id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = add_slot(&*store, &counselor_id, &slot).await;
                message.set(Some(add_message(&result)));
                if let Ok(created) = result {
                    patch(Box::new(move |slots: &mut SlotList| slots.upsert(created)));
                }
            });
        })
    };

    let on_toggle = {
        let store = store.clone();
        let toast_ctx = toast_ctx.clone();
        let patch = patch.clone();
        Callback::from(move |slot: Schedule| {
            let store = Rc::clone(&store.store);
            let toast_ctx = toast_ctx.clone();
            let patch = patch.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match toggle_slot(&*store, &slot).await {
                    Ok(updated) => patch(Box::new(move |slots: &mut SlotList| slots.upsert(updated))),
                    Err(err) => {
                        log::error!("Failed to toggle slot {}: {}", slot.id, err);
                        if let Some(toast_ctx) = &toast_ctx {
                            toast_ctx.show_error(err.to_string());
                        }
                    }
                }
            });
        })
    };

    let on_delete = {
        let store = store.clone();
        let patch = patch.clone();
        Callback::from(move |slot_id: String| {
            let store = Rc::clone(&store.store);
            let toast_ctx = toast_ctx.clone();
            let patch = patch.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match delete_slot(&*store, &slot_id).await {
                    Ok(()) => patch(Box::new(move |slots: &mut SlotList| {
                        slots.remove(&slot_id);
                    })),
                    Err(err) => {
                        log::error!("Failed to delete slot {}: {}", slot_id, err);
                        if let Some(toast_ctx) = &toast_ctx {
                            toast_ctx.show_error(err.to_string());
                        }
                    }
                }
            });
        })
    };

    let on_day = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            let mut next = (*draft).clone();
            next.day_of_week = value.parse().unwrap_or(0);
            draft.set(next);
        })
    };
    let on_time = |set: fn(&mut NewSlot, String)| {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*draft).clone();
            set(&mut next, e.target_unchecked_into::<HtmlInputElement>().value());
            draft.set(next);
        })
    };

    let slots = match &fetched.state {
        FetchState::NotStarted | FetchState::Loading => html! { <LoadingSpinner /> },
        FetchState::Error(error) => html! {
            <ErrorDisplay message={error.clone()} on_retry={Some(refetch.clone())} />
        },
        FetchState::Success(slots) if slots.is_empty() => html! {
            <p class="text-base-content/60">{"No slots yet. Add your first availability window above."}</p>
        },
        FetchState::Success(slots) => html! {
            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr><th>{"Day"}</th><th>{"Time"}</th><th>{"Status"}</th><th></th></tr>
                    </thead>
                    <tbody>
                        { for slots.as_slice().iter().map(|slot| slot_row(slot, &on_toggle, &on_delete)) }
                    </tbody>
                </table>
            </div>
        },
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body space-y-4">
                <h2 class="card-title">{"Weekly schedule"}</h2>

                <form class="flex flex-wrap items-end gap-3" onsubmit={on_add}>
                    <label class="form-control">
                        <span class="label-text">{"Day"}</span>
                        <select class="select select-bordered" onchange={on_day}>
                            { for WEEKDAY_LABELS.iter().enumerate().map(|(day, label)| html! {
                                <option value={day.to_string()} selected={day == draft.day_of_week as usize}>{*label}</option>
                            }) }
                        </select>
                    </label>
                    <label class="form-control">
                        <span class="label-text">{"Start"}</span>
                        <input type="time" class="input input-bordered" value={draft.start_time.clone()}
                            oninput={on_time(|slot, v| slot.start_time = v)} />
                    </label>
                    <label class="form-control">
                        <span class="label-text">{"End"}</span>
                        <input type="time" class="input input-bordered" value={draft.end_time.clone()}
                            oninput={on_time(|slot, v| slot.end_time = v)} />
                    </label>
                    <button type="submit" class="btn btn-primary">
                        <i class="fas fa-plus mr-2"></i>{"Add slot"}
                    </button>
                </form>

                <FormMessageView message={(*message).clone()} />

                { slots }
            </div>
        </div>
    }
}

fn slot_row(slot: &Schedule, on_toggle: &Callback<Schedule>, on_delete: &Callback<String>) -> Html {
    let toggle = {
        let on_toggle = on_toggle.clone();
        let slot = slot.clone();
        Callback::from(move |_| on_toggle.emit(slot.clone()))
    };
    let delete = {
        let on_delete = on_delete.clone();
        let slot_id = slot.id.clone();
        Callback::from(move |_| on_delete.emit(slot_id.clone()))
    };
    let (badge, label, toggle_label) = if slot.is_available {
        ("badge badge-success", "Available", "Mark unavailable")
    } else {
        ("badge badge-ghost", "Unavailable", "Mark available")
    };

    html! {
        <tr key={slot.id.clone()}>
            <td>{ weekday_label(slot.day_of_week) }</td>
            <td>{ format!("{} - {}", format_wall_time(&slot.start_time), format_wall_time(&slot.end_time)) }</td>
            <td><span class={badge}>{label}</span></td>
            <td class="flex gap-2 justify-end">
                <button class="btn btn-xs btn-outline" onclick={toggle}>{toggle_label}</button>
                <button class="btn btn-xs btn-error btn-outline" onclick={delete}>
                    <i class="fas fa-trash"></i>
                </button>
            </td>
        </tr>
    }
}
