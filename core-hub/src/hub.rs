//! Unified hub capability surface

use async_trait::async_trait;
use core_protocol::{Breadcrumb, Event, Level, Scope, SentryId};
use futures::future::BoxFuture;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::client::Client;

/// Extra key under which `push_scope_with_state` records the state.
pub const SCOPE_STATE_KEY: &str = "scope-state";

/// Synchronous scope configuration callback.
pub type ScopeFn<'a> = Box<dyn FnOnce(&mut Scope) + Send + 'a>;

/// Asynchronous scope configuration callback.
///
/// Receives a fresh scope and resolves to the scope to write back.
pub type AsyncScopeCallback = Box<dyn FnOnce(Scope) -> BoxFuture<'static, Scope> + Send>;

/// Hub trait
///
/// The capability object behind every unified API call: a scope stack, a
/// bound client, and capture/flush operations.
///
/// # Failure Conventions
///
/// Hub operations never fail. A capture that did not happen returns the nil
/// id; a flush that did not complete in time resolves to `false`.
///
/// # Example
///
/// ```ignore
/// use core_hub::{Hub, BridgedHub};
///
/// let hub = BridgedHub::new(native_hub);
/// let _guard = hub.push_scope();
/// hub.configure_scope(Box::new(|scope| scope.set_tag("screen", "checkout")));
/// let id = hub.capture_message("payment declined", Level::Warning);
/// ```
#[async_trait]
pub trait Hub: Send + Sync {
    fn is_enabled(&self) -> bool;

    /// Capture an event, optionally replacing the current scope for this
    /// capture only.
    fn capture_event(&self, event: Event, scope: Option<Scope>) -> SentryId;

    fn capture_message(&self, message: &str, level: Level) -> SentryId {
        self.capture_event(Event::from_message(message, level), None)
    }

    /// Capture an error and its `source()` chain.
    fn capture_error(&self, error: &(dyn StdError + 'static)) -> SentryId {
        self.capture_event(Event::from_error(error), None)
    }

    /// Flush pending events, waiting at most `timeout`.
    async fn flush(&self, timeout: Duration) -> bool;

    /// Run `callback` once against the current scope.
    fn configure_scope(&self, callback: ScopeFn<'_>);

    /// Run an async callback against the current scope without blocking the
    /// calling task.
    async fn configure_scope_async(&self, callback: AsyncScopeCallback);

    /// Route subsequent captures to `client`.
    fn bind_client(&self, client: Arc<dyn Client>);

    /// Push a new scope. Dropping the guard pops it.
    fn push_scope(&self) -> ScopeGuard;

    /// Push a new scope carrying `state` as an extra under [`SCOPE_STATE_KEY`].
    fn push_scope_with_state(&self, state: &dyn fmt::Display) -> ScopeGuard;

    /// Run `callback` against a temporary scope that is popped afterwards.
    fn with_scope(&self, callback: ScopeFn<'_>);

    fn add_breadcrumb(&self, breadcrumb: Breadcrumb);

    /// Id of the last captured event, nil if none.
    fn last_event_id(&self) -> SentryId;

    /// Release the hub. Operations afterwards are no-ops.
    fn close(&self) {}
}

/// Pops the scope it was created for when dropped.
#[must_use = "the scope is popped as soon as the guard is dropped"]
pub struct ScopeGuard {
    pop: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl ScopeGuard {
    pub fn new(pop: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            pop: Some(Box::new(pop)),
        }
    }

    /// Guard that does nothing on drop.
    pub fn noop() -> Self {
        Self { pop: None }
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        if let Some(pop) = self.pop.take() {
            pop();
        }
    }
}

impl fmt::Debug for ScopeGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("armed", &self.pop.is_some())
            .finish()
    }
}
