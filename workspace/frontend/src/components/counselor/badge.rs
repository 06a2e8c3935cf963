use model::BookingStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    pub status: BookingStatus,
}

fn badge_class(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "badge-warning",
        BookingStatus::Confirmed => "badge-info",
        BookingStatus::Completed => "badge-success",
        BookingStatus::Cancelled => "badge-error",
    }
}

#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    html! {
        <span class={classes!("badge", badge_class(props.status))}>{props.status.label()}</span>
    }
}
