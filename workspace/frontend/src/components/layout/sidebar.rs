use yew::prelude::*;
use yew_router::prelude::*;
use crate::settings::get_settings;
use crate::Route;

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let is_admin = get_settings().is_admin();

    html! {
        <div class="drawer-side z-50">
            <label aria-label="close sidebar" class="drawer-overlay" for="app-drawer"></label>
            <ul class="menu p-4 w-72 min-h-full bg-base-100 text-base-content border-r border-base-300">
                <li class="mb-4">
                    <div class="flex items-center gap-3 px-2">
                        <div class="w-10 h-10 rounded-lg bg-primary flex items-center justify-center text-primary-content font-bold text-2xl">
                            <i class="fas fa-comments"></i>
                        </div>
                        <span class="text-2xl font-bold tracking-tight">{"Counsel"}</span>
                    </div>
                </li>

                <li><Link<Route> to={Route::Counselor} classes="nav-link"><i class="fas fa-user-md w-5"></i> {"Counselor"}</Link<Route>></li>
                if is_admin {
                    <li><Link<Route> to={Route::Admin} classes="nav-link"><i class="fas fa-shield-alt w-5"></i> {"Admin"}</Link<Route>></li>
                }

                <div class="divider"></div>

                <li><Link<Route> to={Route::Settings} classes="nav-link"><i class="fas fa-cog w-5"></i> {"Settings"}</Link<Route>></li>
            </ul>
        </div>
    }
}
