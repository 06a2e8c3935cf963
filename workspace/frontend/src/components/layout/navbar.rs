use yew::prelude::*;
use crate::settings;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub title: String,
}

#[function_component(Navbar)]
pub fn navbar(props: &Props) -> Html {
    let settings = settings::get_settings();

    html! {
        <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
            <div class="flex-none lg:hidden">
                <label aria-label="open sidebar" class="btn btn-square btn-ghost" for="app-drawer">
                    <i class="fas fa-bars text-xl"></i>
                </label>
            </div>
            <div class="flex-1 px-4">
                <h1 class="text-xl font-bold" id="page-title">{ &props.title }</h1>
            </div>
            <div class="flex-none gap-2">
                if settings.is_demo() {
                    <span class="badge badge-warning">{"Demo data"}</span>
                }
                if let Some(user_id) = settings.session_user_id() {
                    <span class="badge badge-ghost"><i class="fas fa-user mr-1"></i>{user_id}</span>
                }
            </div>
        </div>
    }
}
