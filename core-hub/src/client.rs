//! Managed client contract

use async_trait::async_trait;
use core_protocol::{Event, Scope, SentryId};
use std::time::Duration;

/// Client trait
///
/// A managed component that processes captures. Binding one into a hub routes
/// the hub's captures to it, even when the hub is a native one.
///
/// # Example
///
/// ```ignore
/// struct Recorder(Mutex<Vec<Event>>);
///
/// #[async_trait]
/// impl Client for Recorder {
///     fn is_enabled(&self) -> bool { true }
///
///     fn capture_event(&self, event: Event, _scope: Option<Scope>) -> SentryId {
///         let id = event.event_id;
///         self.0.lock().unwrap().push(event);
///         id
///     }
///
///     async fn flush(&self, _timeout: Duration) -> bool { true }
///
///     fn close(&self) {}
/// }
/// ```
#[async_trait]
pub trait Client: Send + Sync {
    fn is_enabled(&self) -> bool;

    /// Process an event with the scope the hub applied. Returns the id of the
    /// captured event, or the nil id when nothing was captured.
    fn capture_event(&self, event: Event, scope: Option<Scope>) -> SentryId;

    /// Wait until queued events are processed. `false` on timeout.
    async fn flush(&self, timeout: Duration) -> bool;

    /// Release resources. Captures after `close` are ignored.
    fn close(&self);
}
