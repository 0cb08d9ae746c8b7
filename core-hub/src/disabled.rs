//! No-op hub used while the SDK is not initialized

use async_trait::async_trait;
use core_protocol::{Breadcrumb, Event, Scope, SentryId};
use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::client::Client;
use crate::hub::{AsyncScopeCallback, Hub, ScopeFn, ScopeGuard};

/// Hub that ignores every operation.
///
/// Installed before `init`, after `close`, and when `init` receives no DSN.
/// Callbacks handed to it are never invoked.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledHub;

impl DisabledHub {
    /// The process-wide instance.
    pub fn shared() -> Arc<DisabledHub> {
        static INSTANCE: OnceLock<Arc<DisabledHub>> = OnceLock::new();
        Arc::clone(INSTANCE.get_or_init(|| Arc::new(DisabledHub)))
    }
}

#[async_trait]
impl Hub for DisabledHub {
    fn is_enabled(&self) -> bool {
        false
    }

    fn capture_event(&self, _event: Event, _scope: Option<Scope>) -> SentryId {
        SentryId::nil()
    }

    async fn flush(&self, _timeout: Duration) -> bool {
        true
    }

    fn configure_scope(&self, _callback: ScopeFn<'_>) {}

    async fn configure_scope_async(&self, _callback: AsyncScopeCallback) {}

    fn bind_client(&self, _client: Arc<dyn Client>) {}

    fn push_scope(&self) -> ScopeGuard {
        ScopeGuard::noop()
    }

    fn push_scope_with_state(&self, _state: &dyn fmt::Display) -> ScopeGuard {
        ScopeGuard::noop()
    }

    fn with_scope(&self, _callback: ScopeFn<'_>) {}

    fn add_breadcrumb(&self, _breadcrumb: Breadcrumb) {}

    fn last_event_id(&self) -> SentryId {
        SentryId::nil()
    }
}
