use yew::prelude::*;
use yew_router::prelude::*;

use crate::settings::get_settings;
use crate::Route;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum AdminTab {
    Stats,
    Bookings,
    Users,
    Counselors,
    Payments,
    Settings,
}

impl AdminTab {
    const ALL: [AdminTab; 6] = [
        AdminTab::Stats,
        AdminTab::Bookings,
        AdminTab::Users,
        AdminTab::Counselors,
        AdminTab::Payments,
        AdminTab::Settings,
    ];

    fn label(&self) -> &'static str {
        match self {
            AdminTab::Stats => "Statistics",
            AdminTab::Bookings => "Bookings",
            AdminTab::Users => "Users",
            AdminTab::Counselors => "Counselors",
            AdminTab::Payments => "Payments",
            AdminTab::Settings => "Settings",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            AdminTab::Stats => "fas fa-chart-bar",
            AdminTab::Bookings => "fas fa-calendar-alt",
            AdminTab::Users => "fas fa-users",
            AdminTab::Counselors => "fas fa-user-md",
            AdminTab::Payments => "fas fa-yen-sign",
            AdminTab::Settings => "fas fa-sliders-h",
        }
    }
}

/// Admin shell: tab navigation over placeholder panels. Sessions outside
/// `admin_user_ids` are sent back home.
#[function_component(AdminDashboard)]
pub fn admin_dashboard() -> Html {
    let tab = use_state(|| AdminTab::Stats);

    let settings = get_settings();
    if !settings.is_admin() {
        log::warn!("Admin dashboard refused for user {:?}", settings.session_user_id());
        return html! { <Redirect<Route> to={Route::Home} /> };
    }

    html! {
        <div class="space-y-6">
            <div role="tablist" class="tabs tabs-bordered">
                { for AdminTab::ALL.iter().map(|t| {
                    let t = *t;
                    let onclick = {
                        let tab = tab.clone();
                        Callback::from(move |_| {
                            log::debug!("Admin tab selected: {:?}", t);
                            tab.set(t);
                        })
                    };
                    html! {
                        <a role="tab" class={classes!("tab", (*tab == t).then_some("tab-active"))} {onclick}>
                            <i class={classes!(t.icon(), "mr-2")}></i>{t.label()}
                        </a>
                    }
                }) }
            </div>
            <PlaceholderPanel title={tab.label()} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct PlaceholderProps {
    title: &'static str,
}

#[function_component(PlaceholderPanel)]
fn placeholder_panel(props: &PlaceholderProps) -> Html {
    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{props.title}</h2>
                <div class="alert alert-info">
                    <i class="fas fa-info-circle"></i>
                    <span>{"This section is not available yet."}</span>
                </div>
            </div>
        </div>
    }
}
