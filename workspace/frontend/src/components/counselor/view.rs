use compute::{fetch_bookings, load_counselor, merge_booking};
use model::{Booking, Counselor};
use yew::prelude::*;
use yew_router::prelude::*;

use super::bookings::BookingsPanel;
use super::clients::ClientsPanel;
use super::profile::ProfilePanel;
use super::revenue::RevenuePanel;
use super::schedule::SchedulePanel;
use crate::common::fetch_hook::{use_patched_fetch, use_store_fetch, PatchAction};
use crate::common::fetch_render::FetchRender;
use crate::hooks::FetchState;
use crate::settings;
use crate::Route;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum CounselorTab {
    Profile,
    Schedule,
    Bookings,
    Clients,
    Revenue,
}

impl CounselorTab {
    const ALL: [CounselorTab; 5] = [
        CounselorTab::Profile,
        CounselorTab::Schedule,
        CounselorTab::Bookings,
        CounselorTab::Clients,
        CounselorTab::Revenue,
    ];

    fn label(&self) -> &'static str {
        match self {
            CounselorTab::Profile => "Profile",
            CounselorTab::Schedule => "Schedule",
            CounselorTab::Bookings => "Bookings",
            CounselorTab::Clients => "Clients",
            CounselorTab::Revenue => "Revenue",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            CounselorTab::Profile => "fas fa-id-card",
            CounselorTab::Schedule => "fas fa-clock",
            CounselorTab::Bookings => "fas fa-calendar-check",
            CounselorTab::Clients => "fas fa-users",
            CounselorTab::Revenue => "fas fa-chart-line",
        }
    }
}

/// Entry point of the counselor screens. Without a session only a sign-in
/// notice is shown.
#[function_component(CounselorDashboard)]
pub fn counselor_dashboard() -> Html {
    match settings::get_settings().session_user_id() {
        Some(user_id) => html! { <CounselorLoader {user_id} /> },
        None => html! {
            <div class="alert alert-warning max-w-xl">
                <i class="fas fa-sign-in-alt"></i>
                <span>{"Sign in to see your dashboard. Set your user id on the "}</span>
                <Link<Route> to={Route::Settings} classes="link">{"settings page"}</Link<Route>>
            </div>
        },
    }
}

#[derive(Properties, PartialEq)]
struct LoaderProps {
    user_id: String,
}

#[function_component(CounselorLoader)]
fn counselor_loader(props: &LoaderProps) -> Html {
    let (counselor, refetch) = use_store_fetch(props.user_id.clone(), |store, user_id| async move {
        load_counselor(&*store, &user_id).await
    });

    // A saved profile replaces the loaded row, so panels remounted later see it
    let on_saved = {
        let counselor = counselor.clone();
        Callback::from(move |saved: Counselor| counselor.set(FetchState::Success(saved)))
    };
    let render = Callback::from(move |counselor: Counselor| {
        html! { <CounselorTabs {counselor} on_saved={on_saved.clone()} /> }
    });

    html! {
        <FetchRender<Counselor>
            state={(*counselor).clone()}
            {render}
            on_retry={Some(refetch)}
            loading_text={Some("Loading your profile...".to_string())}
        />
    }
}

#[derive(Properties, PartialEq)]
struct TabsProps {
    counselor: Counselor,
    on_saved: Callback<Counselor>,
}

#[function_component(CounselorTabs)]
fn counselor_tabs(props: &TabsProps) -> Html {
    let tab = use_state(|| CounselorTab::Profile);
    let counselor_id = props.counselor.id.clone();

    // Bookings and clients render the same list
    let (bookings, refetch_bookings) = use_patched_fetch(counselor_id.clone(), |store, counselor_id| async move {
        fetch_bookings(&*store, &counselor_id).await
    });

    let on_booking_updated = {
        let dispatcher = bookings.dispatcher();
        Callback::from(move |updated: Booking| {
            dispatcher.dispatch(PatchAction::Apply(Box::new(move |list: &mut Vec<Booking>| {
                if !merge_booking(list, updated) {
                    log::warn!("Updated booking is not in the current list");
                }
            })));
        })
    };

    let panel = match *tab {
        CounselorTab::Profile => html! { <ProfilePanel counselor={props.counselor.clone()} on_saved={props.on_saved.clone()} /> },
        CounselorTab::Schedule => html! { <SchedulePanel counselor_id={counselor_id.clone()} /> },
        CounselorTab::Bookings => html! {
            <BookingsPanel
                bookings={bookings.state.clone()}
                on_retry={refetch_bookings.clone()}
                on_updated={on_booking_updated}
            />
        },
        CounselorTab::Clients => html! {
            <ClientsPanel bookings={bookings.state.clone()} on_retry={refetch_bookings.clone()} />
        },
        CounselorTab::Revenue => html! { <RevenuePanel counselor_id={counselor_id.clone()} /> },
    };

    html! {
        <div class="space-y-6">
            <div role="tablist" class="tabs tabs-bordered">
                { for CounselorTab::ALL.iter().map(|t| {
                    let t = *t;
                    let onclick = {
                        let tab = tab.clone();
                        Callback::from(move |_| tab.set(t))
                    };
                    html! {
                        <a role="tab" class={classes!("tab", (*tab == t).then_some("tab-active"))} {onclick}>
                            <i class={classes!(t.icon(), "mr-2")}></i>{t.label()}
                        </a>
                    }
                }) }
            </div>
            { panel }
        </div>
    }
}
