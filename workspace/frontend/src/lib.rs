use std::rc::Rc;

use model::TableStore;
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod mock_data;
pub mod api_client;
pub mod common;
pub mod hooks;
pub mod settings;
pub mod storage;

use common::toast::ToastProvider;
use components::admin::AdminDashboard;
use components::chat::ChatPlaceholder;
use components::counselor::CounselorDashboard;
use components::layout::layout::Layout;
use components::settings::Settings;
use hooks::StoreContext;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/counselor")]
    Counselor,
    #[at("/admin")]
    Admin,
    #[at("/settings")]
    Settings,
    #[at("/chat/:id")]
    Chat { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Home | Route::Counselor => {
            html! { <Layout title="Counselor Dashboard"><CounselorDashboard /></Layout> }
        }
        Route::Admin => {
            html! { <Layout title="Admin Dashboard"><AdminDashboard /></Layout> }
        }
        Route::Settings => {
            html! { <Layout title="Settings"><Settings /></Layout> }
        }
        Route::Chat { id } => {
            html! { <Layout title="Chat"><ChatPlaceholder booking_id={id} /></Layout> }
        }
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! { <Layout title="404"><h1>{"404 Not Found"}</h1></Layout> }
        }
    }
}

fn build_store() -> Rc<dyn TableStore> {
    let settings = settings::get_settings();
    if settings.is_demo() {
        log::info!("No store URL configured, running in demo mode");
        Rc::new(mock_data::demo_store())
    } else {
        log::info!("Using table store at {}", settings.store_url);
        Rc::new(api_client::RestTableStore::from_settings(&settings))
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let store = use_memo((), |_| StoreContext::new(build_store()));

    html! {
        <ToastProvider>
            <ContextProvider<StoreContext> context={(*store).clone()}>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </ContextProvider<StoreContext>>
        </ToastProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    settings::init_settings();

    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Counsel dashboards starting ===");
    log::debug!("Application settings: {:?}", settings);

    yew::Renderer::<App>::new().render();
}
