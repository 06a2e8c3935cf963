use web_sys::{window, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::common::toast::ToastContext;
use crate::settings::{self, parse_id_list, parse_level, AppSettings};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Connection and session settings, kept in localStorage. Saving reloads the
/// page so the store is rebuilt from the new values.
#[function_component(Settings)]
pub fn settings_view() -> Html {
    let draft = use_state(settings::get_settings);
    let toast_ctx = use_context::<ToastContext>();

    let text_input = |set: fn(&mut AppSettings, String)| {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*draft).clone();
            set(&mut next, e.target_unchecked_into::<HtmlInputElement>().value());
            draft.set(next);
        })
    };

    let on_level = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let raw = e.target_unchecked_into::<HtmlSelectElement>().value();
            if let Some(level) = parse_level(&raw) {
                let mut next = (*draft).clone();
                next.log_level = level;
                draft.set(next);
            }
        })
    };

    // Parsed on change, so typing a trailing comma is not eaten mid-edit
    let on_admin_ids = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let mut next = (*draft).clone();
            next.admin_user_ids = parse_id_list(&e.target_unchecked_into::<HtmlInputElement>().value());
            draft.set(next);
        })
    };

    let on_save = {
        let draft = draft.clone();
        Callback::from(move |_| {
            let mut next = (*draft).clone();
            next.store_url = next.store_url.trim().trim_end_matches('/').to_string();
            next.user_id = next.user_id.trim().to_string();

            if let Err(err) = next.save_to_storage() {
                log::error!("Failed to save settings: {:?}", err);
                if let Some(toast_ctx) = &toast_ctx {
                    toast_ctx.show_error("Could not save settings".to_string());
                }
                return;
            }
            log::info!("Settings saved, reloading");
            settings::update_settings(|s| *s = next);

            if let Some(window) = window() {
                if let Err(err) = window.location().reload() {
                    log::error!("Failed to reload: {:?}", err);
                }
            }
        })
    };

    let current_level = draft.log_level.as_str().to_lowercase();

    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-8">
            <div class="card bg-base-100 shadow">
                <div class="card-body space-y-3">
                    <h2 class="card-title">{"Connection"}</h2>
                    <label class="form-control w-full">
                        <span class="label-text">{"Store URL"}</span>
                        <input type="url" placeholder="Empty = demo mode" class="input input-bordered w-full"
                            value={draft.store_url.clone()} oninput={text_input(|s, v| s.store_url = v)} />
                    </label>
                    <label class="form-control w-full">
                        <span class="label-text">{"API key"}</span>
                        <input type="password" class="input input-bordered w-full"
                            value={draft.store_key.clone()} oninput={text_input(|s, v| s.store_key = v)} />
                    </label>
                    if draft.is_demo() {
                        <div class="alert alert-info text-sm">
                            <i class="fas fa-flask"></i>
                            <span>{"Demo mode: data is seeded in memory and lost on reload."}</span>
                        </div>
                    }
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body space-y-3">
                    <h2 class="card-title">{"Session"}</h2>
                    <label class="form-control w-full">
                        <span class="label-text">{"User id"}</span>
                        <input type="text" class="input input-bordered w-full"
                            value={draft.user_id.clone()} oninput={text_input(|s, v| s.user_id = v)} />
                    </label>
                    <label class="form-control w-full">
                        <span class="label-text">{"Admin user ids (comma separated)"}</span>
                        <input type="text" class="input input-bordered w-full"
                            value={draft.admin_user_ids.join(",")} onchange={on_admin_ids} />
                    </label>
                    <label class="form-control w-full">
                        <span class="label-text">{"Access token"}</span>
                        <input type="password" class="input input-bordered w-full"
                            value={draft.access_token.clone()} oninput={text_input(|s, v| s.access_token = v)} />
                    </label>
                    <label class="form-control w-full max-w-xs">
                        <span class="label-text">{"Log level"}</span>
                        <select class="select select-bordered" onchange={on_level}>
                            { for LOG_LEVELS.iter().map(|level| html! {
                                <option value={*level} selected={current_level == *level}>{*level}</option>
                            }) }
                        </select>
                    </label>
                </div>
            </div>

            <div class="md:col-span-2 flex justify-end">
                <button class="btn btn-primary" onclick={on_save}>{"Save & Reload"}</button>
            </div>
        </div>
    }
}
