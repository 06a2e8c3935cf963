use std::fmt::Display;
use std::rc::Rc;

use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ToastType {
    Success,
    Error,
}

impl ToastType {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastType::Success => "alert-success",
            ToastType::Error => "alert-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastType::Success => "fas fa-check-circle",
            ToastType::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Toast {
    pub id: usize,
    pub message: String,
    pub toast_type: ToastType,
}

enum ToastAction {
    Push(String, ToastType),
    Dismiss(usize),
}

/// Visible toasts plus the id the next one gets. Expiry timers dispatch
/// `Dismiss`, so they never overwrite toasts pushed after them.
#[derive(Default, PartialEq)]
struct ToastList {
    toasts: Vec<Toast>,
    next_id: usize,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        let mut next_id = self.next_id;
        match action {
            ToastAction::Push(message, toast_type) => {
                toasts.push(Toast {
                    id: next_id,
                    message,
                    toast_type,
                });
                next_id += 1;
            }
            ToastAction::Dismiss(id) => toasts.retain(|t| t.id != id),
        }
        Rc::new(Self { toasts, next_id })
    }
}

#[derive(Clone, PartialEq)]
pub struct ToastContext {
    list: UseReducerDispatcher<ToastList>,
}

impl ToastContext {
    pub fn show_success(&self, message: String) {
        self.list.dispatch(ToastAction::Push(message, ToastType::Success));
    }

    pub fn show_error(&self, message: String) {
        self.list.dispatch(ToastAction::Push(message, ToastType::Error));
    }

    /// Logs a failed action and shows the error text.
    pub fn report_error(&self, action: &str, err: impl Display) {
        log::error!("{}: {}", action, err);
        self.show_error(err.to_string());
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let list = use_reducer(ToastList::default);
    let context = ToastContext {
        list: list.dispatcher(),
    };

    // Arm one expiry timer per toast pushed since the last render
    let armed = use_mut_ref(|| 0usize);
    {
        let dispatcher = list.dispatcher();
        use_effect_with(list.next_id, move |next_id| {
            let duration = crate::settings::get_settings().toast_duration_ms;
            let mut armed = armed.borrow_mut();
            for id in *armed..*next_id {
                let dispatcher = dispatcher.clone();
                gloo_timers::callback::Timeout::new(duration, move || {
                    dispatcher.dispatch(ToastAction::Dismiss(id));
                })
                .forget();
            }
            *armed = *next_id;
            || ()
        });
    }

    html! {
        <ContextProvider<ToastContext> {context}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                { for list.toasts.iter().map(|toast| {
                    let id = toast.id;
                    let on_close = {
                        let dispatcher = list.dispatcher();
                        Callback::from(move |_| dispatcher.dispatch(ToastAction::Dismiss(id)))
                    };

                    html! {
                        <div key={id} class={classes!("alert", toast.toast_type.alert_class(), "shadow-lg")}>
                            <i class={toast.toast_type.icon()}></i>
                            <span>{&toast.message}</span>
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                }) }
            </div>
        </ContextProvider<ToastContext>>
    }
}
