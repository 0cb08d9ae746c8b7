//! Process-wide current hub slot

use core_hub::{DisabledHub, Hub};
use std::sync::{Arc, OnceLock, RwLock};

fn slot() -> &'static RwLock<Arc<dyn Hub>> {
    static CURRENT: OnceLock<RwLock<Arc<dyn Hub>>> = OnceLock::new();
    CURRENT.get_or_init(|| {
        let disabled: Arc<dyn Hub> = DisabledHub::shared();
        RwLock::new(disabled)
    })
}

/// The hub every façade call is routed to.
pub fn current_hub() -> Arc<dyn Hub> {
    let hub = slot().read().unwrap_or_else(|poisoned| poisoned.into_inner());
    Arc::clone(&hub)
}

/// Install `hub` and return the previously installed one.
pub(crate) fn replace_hub(hub: Arc<dyn Hub>) -> Arc<dyn Hub> {
    let mut current = slot().write().unwrap_or_else(|poisoned| poisoned.into_inner());
    std::mem::replace(&mut *current, hub)
}
