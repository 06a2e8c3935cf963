use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorDisplayProps {
    /// Store or validation message, shown as-is
    pub message: String,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

/// Failed panel fetch. Nothing partial is rendered next to it.
#[function_component(ErrorDisplay)]
pub fn error_display(props: &ErrorDisplayProps) -> Html {
    let retry = props.on_retry.clone().map(|on_retry| {
        let onclick = Callback::from(move |_| on_retry.emit(()));
        html! {
            <button class="btn btn-primary btn-sm" {onclick}>
                <i class="fas fa-redo"></i>{" Try again"}
            </button>
        }
    });

    html! {
        <div class="flex flex-col items-center py-12 gap-4">
            <div role="alert" class="alert alert-error max-w-lg">
                <i class="fas fa-exclamation-circle text-2xl"></i>
                <div>
                    <h3 class="font-semibold">{"Could not load data"}</h3>
                    <p class="text-sm">{ &props.message }</p>
                </div>
            </div>
            { for retry }
        </div>
    }
}
