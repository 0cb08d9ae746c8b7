//! Managed client exposed as a native client

use bridge_traits::{Hint, NativeClient, NativeEvent, NativeScope, NativeSentryId};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::runtime::{Builder, Handle};
use tracing::{debug, error, warn};

use crate::client::Client;
use crate::error::{HubError, Result};
use crate::marshal::panic_message;
use crate::translate;

/// Lets a managed [`Client`] be bound into a native hub.
///
/// Native captures are translated to managed values before reaching the
/// client. The capture hint has no managed counterpart and is dropped. Panics
/// raised by the client are caught: captures then report the empty id and
/// other calls become no-ops.
pub struct NativeClientAdapter {
    client: Arc<dyn Client>,
}

impl NativeClientAdapter {
    pub fn new(client: Arc<dyn Client>) -> Self {
        Self { client }
    }

    /// Fails when no client is supplied.
    pub fn from_optional(client: Option<Arc<dyn Client>>) -> Result<Self> {
        client.map(Self::new).ok_or_else(|| {
            HubError::missing("Client", "a managed client is required to build the adapter")
        })
    }

    pub fn client(&self) -> &Arc<dyn Client> {
        &self.client
    }

    fn guarded<T>(&self, operation: &str, fallback: T, call: impl FnOnce() -> T) -> T {
        match panic::catch_unwind(AssertUnwindSafe(call)) {
            Ok(value) => value,
            Err(payload) => {
                error!(
                    operation,
                    panic = %panic_message(payload.as_ref()),
                    "Managed client panicked"
                );
                fallback
            }
        }
    }
}

impl NativeClient for NativeClientAdapter {
    fn is_enabled(&self) -> bool {
        self.guarded("is_enabled", false, || self.client.is_enabled())
    }

    fn capture_event(
        &self,
        event: NativeEvent,
        scope: Option<NativeScope>,
        _hint: Hint,
    ) -> NativeSentryId {
        let event = translate::event::from_native(event);
        let scope = scope.map(translate::scope::from_native);

        let id = self.guarded("capture_event", core_protocol::SentryId::nil(), || {
            self.client.capture_event(event, scope)
        });
        translate::id::to_native(id)
    }

    fn close(&self) {
        self.guarded("close", (), || self.client.close());
    }

    fn flush(&self, timeout_millis: u64) {
        let client = Arc::clone(&self.client);
        let timeout = Duration::from_millis(timeout_millis);

        if let Ok(handle) = Handle::try_current() {
            handle.spawn(async move {
                let flushed = client.flush(timeout).await;
                debug!(flushed, "Managed client flush finished");
            });
            return;
        }

        let spawned = thread::Builder::new()
            .name("client-flush".to_string())
            .spawn(move || match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => {
                    let flushed = runtime.block_on(client.flush(timeout));
                    debug!(flushed, "Managed client flush finished");
                }
                Err(err) => warn!(error = %err, "Could not start runtime for client flush"),
            });
        if let Err(err) = spawned {
            warn!(error = %err, "Could not spawn client flush thread");
        }
    }
}
