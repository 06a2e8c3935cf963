use yew::prelude::*;
use yew_router::prelude::*;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct ChatProps {
    pub booking_id: String,
}

/// Landing page of the per-booking chat link. Messaging itself lives elsewhere.
#[function_component(ChatPlaceholder)]
pub fn chat_placeholder(props: &ChatProps) -> Html {
    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title"><i class="fas fa-comments"></i>{" Chat"}</h2>
                <p class="text-sm text-gray-500">{format!("Conversation for booking {}", props.booking_id)}</p>
                <div class="card-actions justify-end">
                    <Link<Route> to={Route::Counselor} classes="btn btn-ghost btn-sm">
                        <i class="fas fa-arrow-left"></i>{" Back to dashboard"}
                    </Link<Route>>
                </div>
            </div>
        </div>
    }
}
