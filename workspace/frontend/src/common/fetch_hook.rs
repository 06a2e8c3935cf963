use compute::RequestGeneration;
use model::TableStore;
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

use crate::common::toast::ToastContext;
use crate::hooks::{use_store, FetchState, StoreContext};

/// Fetches on mount and whenever `deps` or the store change.
///
/// Each dispatch takes a ticket; a response whose ticket is no longer current
/// is dropped, so a slow earlier request cannot overwrite a newer one.
/// Failures land in the state as text and are also shown as a toast.
#[hook]
pub fn use_store_fetch<T, D, F, Fut>(deps: D, fetch_fn: F) -> (UseStateHandle<FetchState<T>>, Callback<()>)
where
    T: 'static,
    D: Clone + PartialEq + 'static,
    F: Fn(Rc<dyn TableStore>, D) -> Fut + 'static,
    Fut: Future<Output = compute::Result<T>> + 'static,
{
    let store = use_store();
    let fetch_state = use_state(|| FetchState::NotStarted);
    let toast_ctx = use_context::<ToastContext>();
    let fetch_fn = use_state(|| Rc::new(fetch_fn));
    let generation = use_memo((), |_| RequestGeneration::new());

    let refetch = {
        let fetch_state = fetch_state.clone();
        let fetch_fn = fetch_fn.clone();
        let generation = generation.clone();

        use_callback((deps.clone(), store.clone()), move |_, (deps, store): &(D, StoreContext)| {
            let fetch_state = fetch_state.clone();
            let toast_ctx = toast_ctx.clone();
            let generation = generation.clone();

            let ticket = generation.begin();
            fetch_state.set(FetchState::Loading);
            let fut = (*fetch_fn)(store.store.clone(), deps.clone());

            wasm_bindgen_futures::spawn_local(async move {
                let result = fut.await;
                if !generation.is_current(ticket) {
                    log::debug!("Dropping stale response (ticket {})", ticket);
                    return;
                }
                if let Err(err) = &result {
                    if let Some(toast_ctx) = &toast_ctx {
                        toast_ctx.report_error("Fetch failed", err);
                    }
                }
                fetch_state.set(FetchState::from_result(result));
            });
        })
    };

    // Fetch on mount and on dependency change
    {
        let refetch = refetch.clone();
        use_effect_with((deps, store), move |_| {
            refetch.emit(());
            || ()
        });
    }

    (fetch_state, refetch)
}

/// Fetched data that mutations patch in place.
///
/// Patches go through a reducer, so each one applies to the latest list
/// rather than to the value captured by the render that dispatched it.
pub struct Patched<T> {
    pub state: FetchState<T>,
}

impl<T> Default for Patched<T> {
    fn default() -> Self {
        Self {
            state: FetchState::NotStarted,
        }
    }
}

pub enum PatchAction<T> {
    /// A fetch finished (or started); replaces everything
    Replace(FetchState<T>),
    /// Applied to the data when there is any, dropped while loading or failed
    Apply(Box<dyn FnOnce(&mut T)>),
}

impl<T: Clone> Reducible for Patched<T> {
    type Action = PatchAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            PatchAction::Replace(state) => Rc::new(Self { state }),
            PatchAction::Apply(patch) => {
                let mut state = self.state.clone();
                match state.data_mut() {
                    Some(data) => patch(data),
                    None => log::debug!("Dropping patch, no data loaded"),
                }
                Rc::new(Self { state })
            }
        }
    }
}

/// [`use_store_fetch`] whose result can be patched by mutations.
#[hook]
pub fn use_patched_fetch<T, D, F, Fut>(deps: D, fetch_fn: F) -> (UseReducerHandle<Patched<T>>, Callback<()>)
where
    T: Clone + PartialEq + 'static,
    D: Clone + PartialEq + 'static,
    F: Fn(Rc<dyn TableStore>, D) -> Fut + 'static,
    Fut: Future<Output = compute::Result<T>> + 'static,
{
    let (fetched, refetch) = use_store_fetch(deps, fetch_fn);
    let patched = use_reducer(Patched::default);

    {
        let dispatcher = patched.dispatcher();
        use_effect_with((*fetched).clone(), move |state| {
            dispatcher.dispatch(PatchAction::Replace(state.clone()));
            || ()
        });
    }

    (patched, refetch)
}
