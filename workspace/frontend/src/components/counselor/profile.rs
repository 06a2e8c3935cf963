use std::rc::Rc;
use std::str::FromStr;

use compute::{profile::save_message, save_profile, FormMessage, ProfileForm};
use model::Counselor;
use rust_decimal::Decimal;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::common::form_message::FormMessageView;
use crate::hooks::use_store;

#[derive(Properties, PartialEq)]
pub struct ProfilePanelProps {
    pub counselor: Counselor,
    /// Receives the stored row after a successful save
    pub on_saved: Callback<Counselor>,
}

/// Profile editor. Specialty edits stay local until Save sends the whole form.
#[function_component(ProfilePanel)]
pub fn profile_panel(props: &ProfilePanelProps) -> Html {
    let store = use_store();
    let form = use_state(|| ProfileForm::from_counselor(&props.counselor));
    let new_tag = use_state(String::new);
    let message = use_state(|| None::<FormMessage>);
    let saving = use_state(|| false);

    let edit = |apply: fn(&mut ProfileForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };
    let on_image = edit(|f, v| f.profile_image = v);
    let on_url = edit(|f, v| f.profile_url = v);
    let on_bio = edit(|f, v| f.bio = v);
    let on_rate = edit(|f, v| {
        if let Ok(rate) = Decimal::from_str(v.trim()) {
            f.hourly_rate = rate;
        }
    });

    let on_add_tag = {
        let form = form.clone();
        let new_tag = new_tag.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut next = (*form).clone();
            if next.specialties.add(&new_tag) {
                form.set(next);
            }
            new_tag.set(String::new());
        })
    };

    let on_remove_tag = {
        let form = form.clone();
        Callback::from(move |tag: String| {
            let mut next = (*form).clone();
            next.specialties.remove(&tag);
            form.set(next);
        })
    };

    let on_save = {
        let form = form.clone();
        let message = message.clone();
        let saving = saving.clone();
        let counselor_id = props.counselor.id.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |_| {
            if *saving {
                return;
            }
            saving.set(true);
            message.set(None);

            let store = Rc::clone(&store.store);
            let form = form.clone();
            let message = message.clone();
            let saving = saving.clone();
            let counselor_id = counselor_id.clone();
            let on_saved = on_saved.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = save_profile(&*store, &counselor_id, &form).await;
                message.set(Some(save_message(&result)));
                if let Ok(saved) = result {
                    form.set(ProfileForm::from_counselor(&saved));
                    on_saved.emit(saved);
                }
                saving.set(false);
            });
        })
    };

    let input_value = |cb: Callback<String>| {
        Callback::from(move |e: InputEvent| cb.emit(e.target_unchecked_into::<HtmlInputElement>().value()))
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body space-y-4">
                <h2 class="card-title">{"Profile"}</h2>

                <label class="form-control w-full">
                    <span class="label-text">{"Profile image URL"}</span>
                    <input type="url" class="input input-bordered w-full" value={form.profile_image.clone()} oninput={input_value(on_image)} />
                </label>

                <label class="form-control w-full">
                    <span class="label-text">{"Bio"}</span>
                    <textarea class="textarea textarea-bordered w-full" rows="4" value={form.bio.clone()}
                        oninput={Callback::from(move |e: InputEvent| on_bio.emit(e.target_unchecked_into::<HtmlTextAreaElement>().value()))} />
                </label>

                <div class="space-y-2">
                    <span class="label-text">{"Specialties"}</span>
                    <div class="flex flex-wrap gap-2">
                        { for form.specialties.iter().map(|tag| {
                            let tag = tag.to_string();
                            let onclick = {
                                let on_remove_tag = on_remove_tag.clone();
                                let tag = tag.clone();
                                Callback::from(move |_| on_remove_tag.emit(tag.clone()))
                            };
                            html! {
                                <span class="badge badge-primary gap-1" key={tag.clone()}>
                                    {tag}
                                    <button type="button" class="btn btn-ghost btn-xs btn-circle" {onclick}>
                                        <i class="fas fa-times"></i>
                                    </button>
                                </span>
                            }
                        }) }
                    </div>
                    <form class="join" onsubmit={on_add_tag}>
                        <input class="input input-bordered input-sm join-item" placeholder="Add specialty" value={(*new_tag).clone()}
                            oninput={{
                                let new_tag = new_tag.clone();
                                Callback::from(move |e: InputEvent| new_tag.set(e.target_unchecked_into::<HtmlInputElement>().value()))
                            }} />
                        <button type="submit" class="btn btn-sm join-item">{"Add"}</button>
                    </form>
                </div>

                <label class="form-control w-full">
                    <span class="label-text">{"Profile URL"}</span>
                    <input type="url" class="input input-bordered w-full" value={form.profile_url.clone()} oninput={input_value(on_url)} />
                </label>

                <label class="form-control w-full max-w-xs">
                    <span class="label-text">{"Hourly rate (¥)"}</span>
                    <input type="number" min="0" step="100" class="input input-bordered" value={form.hourly_rate.to_string()} oninput={input_value(on_rate)} />
                </label>

                <FormMessageView message={(*message).clone()} />

                <div class="card-actions justify-end">
                    <button class="btn btn-primary" disabled={*saving} onclick={on_save}>
                        if *saving { <span class="loading loading-spinner loading-sm"></span> }
                        {"Save"}
                    </button>
                </div>
            </div>
        </div>
    }
}
