//! Unified SDK façade.
//!
//! Free functions routing every call to the process-wide current hub. Before
//! [`init`], after [`close`], and when `init` receives no DSN, the current hub
//! is the [`DisabledHub`] and every call is a silent no-op.
//!
//! ```ignore
//! use bridge_memory::InMemoryRuntime;
//! use core_service::{self as sdk, Level, SentryOptions};
//! use std::sync::Arc;
//!
//! let options = SentryOptions::builder()
//!     .dsn("https://f7f320d5c3a54709be7b28e0f2ca7081@sentry.io/1808954")
//!     .before_send(|mut event| {
//!         event.set_tag("BeforeSend", "was called");
//!         Some(event)
//!     })
//!     .build()?;
//! let effective = sdk::init(Arc::new(InMemoryRuntime::new()), options)?;
//!
//! sdk::configure_scope(|scope| scope.set_tag("screen", "main"));
//! let id = sdk::capture_message("hello", Level::Info);
//! sdk::close();
//! ```
//!
//! The current hub is replaced as a whole by `init` and `close`; readers
//! always see a complete hub.

pub mod error;

mod current;
mod init;

pub use error::{CoreError, Result};

pub use core_hub::{
    AsyncScopeCallback, BridgedHub, Client, DisabledHub, Hub, ScopeGuard, SCOPE_STATE_KEY,
};
pub use core_protocol::{Breadcrumb, Event, Level, Scope, SentryId};
pub use core_runtime::{Dsn, SentryOptions, SentryOptionsBuilder};
pub use current::current_hub;

use bridge_traits::NativeRuntime;
use futures::FutureExt;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Initialize the SDK on top of `runtime`.
///
/// Returns the effective options: the input plus the integrations the native
/// runtime seeded. Without a DSN the SDK stays disabled and the options are
/// returned unchanged.
///
/// # Errors
///
/// - The options fail validation
/// - The native runtime fails to initialize or to create a hub
pub fn init(runtime: Arc<dyn NativeRuntime>, options: SentryOptions) -> Result<SentryOptions> {
    init::init(runtime, options)
}

/// Disable the SDK and close the hub that was current.
pub fn close() {
    init::install(DisabledHub::shared());
}

pub fn is_enabled() -> bool {
    current_hub().is_enabled()
}

pub fn last_event_id() -> SentryId {
    current_hub().last_event_id()
}

/// Push a new scope. Dropping the guard pops it.
pub fn push_scope() -> ScopeGuard {
    current_hub().push_scope()
}

/// Push a new scope carrying `state` as an extra.
pub fn push_scope_with_state<T: fmt::Display>(state: T) -> ScopeGuard {
    current_hub().push_scope_with_state(&state)
}

pub fn bind_client(client: Arc<dyn Client>) {
    current_hub().bind_client(client);
}

/// Run `f` once against the current scope.
pub fn configure_scope<F>(f: F)
where
    F: FnOnce(&mut Scope) + Send,
{
    current_hub().configure_scope(Box::new(f));
}

/// Run an async scope callback on a blocking worker.
pub async fn configure_scope_async<F, Fut>(f: F)
where
    F: FnOnce(Scope) -> Fut + Send + 'static,
    Fut: Future<Output = Scope> + Send + 'static,
{
    let callback: AsyncScopeCallback = Box::new(move |scope| f(scope).boxed());
    current_hub().configure_scope_async(callback).await;
}

/// Run `f` against a temporary scope.
///
/// Changes reach the native scope when `f` returns. To capture inside a
/// configured temporary scope use [`run_in_scope`].
pub fn with_scope<F>(f: F)
where
    F: FnOnce(&mut Scope) + Send,
{
    current_hub().with_scope(Box::new(f));
}

/// Push a scope, configure it, run `work` inside it, then pop it.
pub fn run_in_scope<C, W, R>(configure: C, work: W) -> R
where
    C: FnOnce(&mut Scope) + Send,
    W: FnOnce() -> R,
{
    let _guard = push_scope();
    configure_scope(configure);
    work()
}

pub fn capture_event(event: Event) -> SentryId {
    current_hub().capture_event(event, None)
}

/// Capture `event` with `scope` replacing the current scope for this capture.
pub fn capture_event_with_scope(event: Event, scope: Scope) -> SentryId {
    current_hub().capture_event(event, Some(scope))
}

pub fn capture_error(error: &(dyn StdError + 'static)) -> SentryId {
    current_hub().capture_error(error)
}

pub fn capture_message(message: &str, level: Level) -> SentryId {
    current_hub().capture_message(message, level)
}

pub fn add_breadcrumb(breadcrumb: Breadcrumb) {
    current_hub().add_breadcrumb(breadcrumb);
}

/// Flush pending events, waiting at most `timeout`.
pub async fn flush(timeout: Duration) -> bool {
    current_hub().flush(timeout).await
}
