//! # Bridged Hub
//!
//! Implements the unified [`Hub`] surface on top of a native hub by
//! translation and delegation only.
//!
//! ## Overview
//!
//! Every call crosses the boundary the same way:
//! 1. Translate managed arguments into fresh native values
//! 2. Wrap managed closures into marshallers
//! 3. Call the native hub
//! 4. Translate the native result back
//!
//! The adapter's only own state is the `closed` flag. Once closed, no call
//! reaches the native hub again, including pops issued by outstanding scope
//! guards.
//!
//! ## Blocking Calls
//!
//! The native `flush` blocks its caller. [`BridgedHub::flush`] runs it on a
//! dedicated thread and waits with a wall-clock timeout, so a native flush
//! that never returns cannot stall the caller beyond `timeout`. Inside a tokio
//! runtime the wait is a timer; under any other executor the polling thread
//! waits on the completion channel for at most `timeout`.
//!
//! `configure_scope_async` drives the callback on tokio's blocking pool, or on
//! a dedicated thread with its own current-thread runtime when no tokio
//! runtime is running.

use async_trait::async_trait;
use bridge_traits::{Hint, NativeClient, NativeHub};
use core_protocol::{Breadcrumb, Event, Scope, SentryId};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::runtime::{Builder, Handle};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::client::Client;
use crate::client_adapter::NativeClientAdapter;
use crate::error::{HubError, Result};
use crate::hub::{AsyncScopeCallback, Hub, ScopeFn, ScopeGuard, SCOPE_STATE_KEY};
use crate::marshal::ScopeCallbackMarshaller;
use crate::translate;

/// Hub backed by a native hub.
pub struct BridgedHub {
    native: Arc<dyn NativeHub>,
    closed: Arc<AtomicBool>,
}

impl BridgedHub {
    pub fn new(native: Arc<dyn NativeHub>) -> Self {
        Self {
            native,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Fails when no native hub is supplied.
    pub fn from_optional(native: Option<Arc<dyn NativeHub>>) -> Result<Self> {
        native.map(Self::new).ok_or_else(|| {
            HubError::missing("NativeHub", "a native hub is required to build a bridged hub")
        })
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// The wrapped native hub, `None` once closed.
    fn active(&self) -> Option<&Arc<dyn NativeHub>> {
        if self.is_closed() {
            None
        } else {
            Some(&self.native)
        }
    }

    fn run_scope_callback(native: &dyn NativeHub, callback: ScopeFn<'_>, with_scope: bool) {
        let marshaller = ScopeCallbackMarshaller::new(callback);
        if with_scope {
            native.with_scope(&marshaller);
        } else {
            native.configure_scope(&marshaller);
        }
        if !marshaller.was_invoked() {
            debug!("Native hub did not invoke the scope callback");
        }
    }
}

/// Run the blocking native flush on its own thread and call `done` once it
/// returns. `false` if the thread could not be started.
fn spawn_native_flush(
    native: Arc<dyn NativeHub>,
    millis: u64,
    done: impl FnOnce() + Send + 'static,
) -> bool {
    let spawned = thread::Builder::new()
        .name("native-flush".to_string())
        .spawn(move || {
            native.flush(millis);
            done();
        });
    match spawned {
        Ok(_) => true,
        Err(err) => {
            warn!(error = %err, "Could not spawn native flush thread");
            false
        }
    }
}

impl fmt::Debug for BridgedHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgedHub")
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Hub for BridgedHub {
    fn is_enabled(&self) -> bool {
        self.active().is_some_and(|native| native.is_enabled())
    }

    fn capture_event(&self, event: Event, scope: Option<Scope>) -> SentryId {
        let Some(native) = self.active() else {
            return SentryId::nil();
        };

        let native_event = translate::event::to_native(event);
        let native_scope = scope.map(translate::scope::to_native);
        let id = native.capture_event(native_event, native_scope, Hint::empty());

        debug!(event_id = %id, "Captured event through native hub");
        translate::id::from_native(id)
    }

    async fn flush(&self, timeout: Duration) -> bool {
        let Some(native) = self.active() else {
            return true;
        };

        let native = Arc::clone(native);
        let millis = translate::options::millis(timeout);

        if Handle::try_current().is_err() {
            debug!("No async runtime; waiting for native flush on the calling thread");
            let (done_tx, done_rx) = mpsc::sync_channel(1);
            if !spawn_native_flush(native, millis, move || {
                let _ = done_tx.send(());
            }) {
                return false;
            }
            return match done_rx.recv_timeout(timeout) {
                Ok(()) => true,
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("Native flush ended without completing");
                    false
                }
                Err(RecvTimeoutError::Timeout) => {
                    warn!(timeout_ms = millis, "Native flush timed out");
                    false
                }
            };
        }

        let (done_tx, done_rx) = oneshot::channel();
        if !spawn_native_flush(native, millis, move || {
            let _ = done_tx.send(());
        }) {
            return false;
        }

        match tokio::time::timeout(timeout, done_rx).await {
            Ok(Ok(())) => true,
            Ok(Err(_)) => {
                warn!("Native flush ended without completing");
                false
            }
            Err(_) => {
                warn!(timeout_ms = millis, "Native flush timed out");
                false
            }
        }
    }

    fn configure_scope(&self, callback: ScopeFn<'_>) {
        if let Some(native) = self.active() {
            Self::run_scope_callback(native.as_ref(), callback, false);
        }
    }

    async fn configure_scope_async(&self, callback: AsyncScopeCallback) {
        let Some(native) = self.active() else {
            return;
        };
        let native = Arc::clone(native);

        let Ok(handle) = Handle::try_current() else {
            debug!("No async runtime; configuring scope on a dedicated thread");
            let (done_tx, done_rx) = futures::channel::oneshot::channel();
            let spawned = thread::Builder::new()
                .name("scope-configure".to_string())
                .spawn(move || {
                    match Builder::new_current_thread().enable_all().build() {
                        Ok(runtime) => Self::run_scope_callback(
                            native.as_ref(),
                            Box::new(move |scope: &mut Scope| {
                                let current = std::mem::take(scope);
                                *scope = runtime.block_on(callback(current));
                            }),
                            false,
                        ),
                        Err(err) => warn!(error = %err, "Could not start runtime for scope configuration"),
                    }
                    let _ = done_tx.send(());
                });
            if let Err(err) = spawned {
                warn!(error = %err, "Could not spawn scope configuration thread");
                return;
            }
            if done_rx.await.is_err() {
                warn!("Async scope configuration did not complete");
            }
            return;
        };

        let driver = handle.clone();
        let task = handle.spawn_blocking(move || {
            Self::run_scope_callback(
                native.as_ref(),
                Box::new(move |scope: &mut Scope| {
                    let current = std::mem::take(scope);
                    *scope = driver.block_on(callback(current));
                }),
                false,
            );
        });

        if let Err(err) = task.await {
            warn!(error = %err, "Async scope configuration did not complete");
        }
    }

    fn bind_client(&self, client: Arc<dyn Client>) {
        if let Some(native) = self.active() {
            let adapter: Arc<dyn NativeClient> = Arc::new(NativeClientAdapter::new(client));
            native.bind_client(adapter);
            debug!("Bound managed client to native hub");
        }
    }

    fn push_scope(&self) -> ScopeGuard {
        let Some(native) = self.active() else {
            return ScopeGuard::noop();
        };

        native.push_scope();
        let native = Arc::clone(native);
        let closed = Arc::clone(&self.closed);
        ScopeGuard::new(move || {
            if !closed.load(Ordering::SeqCst) {
                native.pop_scope();
            }
        })
    }

    fn push_scope_with_state(&self, state: &dyn fmt::Display) -> ScopeGuard {
        let guard = self.push_scope();
        if let Some(native) = self.active() {
            native.set_extra(SCOPE_STATE_KEY, &state.to_string());
        }
        guard
    }

    fn with_scope(&self, callback: ScopeFn<'_>) {
        if let Some(native) = self.active() {
            Self::run_scope_callback(native.as_ref(), callback, true);
        }
    }

    fn add_breadcrumb(&self, breadcrumb: Breadcrumb) {
        if let Some(native) = self.active() {
            native.add_breadcrumb(translate::breadcrumb::to_native(breadcrumb));
        }
    }

    fn last_event_id(&self) -> SentryId {
        let Some(native) = self.active() else {
            return SentryId::nil();
        };

        let text = native.last_event_id();
        if text.trim().is_empty() {
            return SentryId::nil();
        }
        translate::id::parse_native(&text).unwrap_or_else(|| {
            warn!(id = %text, "Native hub returned an unparseable event id");
            SentryId::nil()
        })
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.native.close();
        info!("Bridged hub closed");
    }
}
