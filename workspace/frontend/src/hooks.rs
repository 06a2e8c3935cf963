use std::rc::Rc;

use model::{MemoryTableStore, TableStore};
use yew::prelude::*;

pub use compute::FetchState;

/// Table store shared by every panel
#[derive(Clone)]
pub struct StoreContext {
    pub store: Rc<dyn TableStore>,
}

impl StoreContext {
    pub fn new(store: Rc<dyn TableStore>) -> Self {
        Self { store }
    }
}

impl PartialEq for StoreContext {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.store), Rc::as_ptr(&other.store))
    }
}

/// Store from the nearest provider. Outside a provider an empty in-memory
/// store is returned; it is created once per component so dependent fetches
/// see a stable store.
#[hook]
pub fn use_store() -> StoreContext {
    let provided = use_context::<StoreContext>();
    let fallback = use_memo((), |_| StoreContext::new(Rc::new(MemoryTableStore::new())));
    use_effect_with(provided.is_none(), |missing| {
        if *missing {
            log::warn!("No StoreContext provided, using an empty store");
        }
        || ()
    });
    resolve_store(provided, &fallback)
}

fn resolve_store(provided: Option<StoreContext>, fallback: &StoreContext) -> StoreContext {
    provided.unwrap_or_else(|| fallback.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_store_is_stable_across_renders() {
        let fallback = StoreContext::new(Rc::new(MemoryTableStore::new()));
        let first = resolve_store(None, &fallback);
        let second = resolve_store(None, &fallback);
        assert!(first == second);
    }

    #[test]
    fn test_provided_store_wins() {
        let fallback = StoreContext::new(Rc::new(MemoryTableStore::new()));
        let provided = StoreContext::new(Rc::new(MemoryTableStore::new()));
        assert!(resolve_store(Some(provided.clone()), &fallback) == provided);
        assert!(resolve_store(Some(provided), &fallback) != fallback);
    }
}
