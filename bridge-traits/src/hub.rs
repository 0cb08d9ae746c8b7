//! Native Hub and Client Contracts
//!
//! Capability surface of the native runtime's hub (scope stack + bound
//! client) and of the client it dispatches captures to.

use std::sync::Arc;

use crate::callbacks::ScopeCallback;
use crate::protocol::{Hint, NativeBreadcrumb, NativeEvent, NativeScope, NativeSentryId};

/// Native hub trait
///
/// Owns the native scope stack and the bound client. The native runtime
/// serializes access to its own internal state; callers never lock around
/// these methods.
///
/// # Callback Invocation
///
/// `configure_scope` and `with_scope` invoke the callback synchronously on a
/// thread of the runtime's choosing and only hand out the native scope for the
/// duration of that call.
pub trait NativeHub: Send + Sync {
    /// Whether the hub will process captures.
    fn is_enabled(&self) -> bool;

    /// Capture an event, optionally overriding the current scope.
    ///
    /// Returns the empty id when nothing was captured.
    fn capture_event(
        &self,
        event: NativeEvent,
        scope: Option<NativeScope>,
        hint: Hint,
    ) -> NativeSentryId;

    /// Push a copy of the current scope onto the stack.
    fn push_scope(&self);

    /// Pop the top scope. The root scope is never popped.
    fn pop_scope(&self);

    /// Run the callback against the current scope.
    fn configure_scope(&self, callback: &dyn ScopeCallback);

    /// Push a scope, run the callback against it, then pop it.
    fn with_scope(&self, callback: &dyn ScopeCallback);

    /// Replace the client captures are dispatched to.
    fn bind_client(&self, client: Arc<dyn NativeClient>);

    /// Set an extra value on the current scope.
    fn set_extra(&self, key: &str, value: &str);

    /// Record a breadcrumb on the current scope.
    fn add_breadcrumb(&self, breadcrumb: NativeBreadcrumb);

    /// Textual form of the last captured id (undashed hex).
    fn last_event_id(&self) -> String;

    /// Block until queued events are flushed or the timeout elapses.
    fn flush(&self, timeout_millis: u64);

    /// Flush and release the bound client. The hub is disabled afterwards.
    fn close(&self);
}

/// Native client trait
///
/// The component a native hub hands captures to. Implementations bound by the
/// bridge must never unwind into the native runtime.
pub trait NativeClient: Send + Sync {
    fn is_enabled(&self) -> bool;

    fn capture_event(
        &self,
        event: NativeEvent,
        scope: Option<NativeScope>,
        hint: Hint,
    ) -> NativeSentryId;

    fn close(&self);

    /// Request a flush. The native contract does not wait for completion.
    fn flush(&self, timeout_millis: u64);
}
