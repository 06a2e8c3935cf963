use chrono::Local;
use common::format_currency;
use compute::{fetch_completed_payments, summarize, RevenueSummary};
use yew::prelude::*;

use crate::common::fetch_hook::use_store_fetch;
use crate::common::loading::LoadingSpinner;

#[derive(Properties, PartialEq)]
pub struct RevenuePanelProps {
    pub counselor_id: String,
}

/// Completed payments bucketed by local calendar month. A failed fetch still
/// shows zeroed figures, with the error above them.
#[function_component(RevenuePanel)]
pub fn revenue_panel(props: &RevenuePanelProps) -> Html {
    let (state, refetch) = use_store_fetch(props.counselor_id.clone(), |store, counselor_id| async move {
        let payments = fetch_completed_payments(&*store, &counselor_id).await?;
        Ok::<_, compute::DashboardError>(summarize(&payments, &Local))
    });

    if state.is_loading() {
        return html! { <LoadingSpinner text={Some("Loading revenue...".to_string())} /> };
    }

    let summary: RevenueSummary = state.data_or_default();
    let on_retry = Callback::from(move |_| refetch.emit(()));

    html! {
        <div class="space-y-6">
            if let Some(error) = state.error() {
                <div class="alert alert-error">
                    <i class="fas fa-exclamation-circle"></i>
                    <span>{ format!("Could not load revenue: {}", error) }</span>
                    <button class="btn btn-sm" onclick={on_retry}>{"Retry"}</button>
                </div>
            }

            <div class="stats shadow">
                <div class="stat">
                    <div class="stat-title">{"Total revenue"}</div>
                    <div class="stat-value text-primary">{ format_currency(summary.total) }</div>
                </div>
                <div class="stat">
                    <div class="stat-title">{"Completed payments"}</div>
                    <div class="stat-value">{ summary.count }</div>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{"By month"}</h2>
                    if summary.months.is_empty() {
                        <p class="text-base-content/60">{"No completed payments yet"}</p>
                    } else {
                        <table class="table">
                            <thead>
                                <tr><th>{"Month"}</th><th class="text-right">{"Revenue"}</th><th class="text-right">{"Payments"}</th></tr>
                            </thead>
                            <tbody>
                                { for summary.months.iter().map(|month| html! {
                                    <tr key={month.month.clone()}>
                                        <td>{ &month.month }</td>
                                        <td class="text-right">{ format_currency(month.total) }</td>
                                        <td class="text-right">{ month.count }</td>
                                    </tr>
                                }) }
                            </tbody>
                        </table>
                    }
                </div>
            </div>
        </div>
    }
}
