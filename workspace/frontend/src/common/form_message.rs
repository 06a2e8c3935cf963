use compute::FormMessage;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FormMessageProps {
    pub message: Option<FormMessage>,
}

/// Outcome of the last save/add, shown under a form until the next attempt.
#[function_component(FormMessageView)]
pub fn form_message_view(props: &FormMessageProps) -> Html {
    match &props.message {
        Some(message) => {
            let class = if message.is_success() { "alert-success" } else { "alert-error" };
            html! {
                <div class={classes!("alert", class, "text-sm")}>
                    <span>{message.text()}</span>
                </div>
            }
        }
        None => html! {},
    }
}
