//! # Callback Marshallers
//!
//! Managed closures never cross into the native runtime directly. Each one is
//! wrapped in a marshaller implementing the matching native callback trait:
//!
//! - [`ScopeCallbackMarshaller`] - `FnOnce(&mut Scope)` as a `ScopeCallback`
//! - [`BeforeSendMarshaller`] - the before-send hook as a `BeforeSendCallback`
//! - [`OptionsConfigurationMarshaller`] - managed options as the init-time
//!   `OptionsConfiguration`
//!
//! Marshallers translate through fresh values: the native scope or event is
//! only touched inside the native call, and nothing native is handed to user
//! code. A panic in user code is caught here and never unwinds into the
//! native runtime.

use bridge_traits::{
    BeforeSendCallback, Hint, NativeEvent, NativeOptions, NativeScope, OptionsConfiguration,
    ScopeCallback,
};
use core_runtime::{BeforeSendHook, SentryOptions};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;
use tracing::{debug, error};

use crate::hub::ScopeFn;
use crate::translate;

/// Adapts a one-shot managed scope callback to the native `ScopeCallback`.
pub struct ScopeCallbackMarshaller<'a> {
    callback: Mutex<Option<ScopeFn<'a>>>,
}

impl<'a> ScopeCallbackMarshaller<'a> {
    pub fn new(callback: ScopeFn<'a>) -> Self {
        Self {
            callback: Mutex::new(Some(callback)),
        }
    }

    /// Whether the native side has run the callback.
    pub fn was_invoked(&self) -> bool {
        self.callback
            .lock()
            .map(|callback| callback.is_none())
            .unwrap_or(true)
    }

    fn take(&self) -> Option<ScopeFn<'a>> {
        self.callback
            .lock()
            .ok()
            .and_then(|mut callback| callback.take())
    }
}

impl ScopeCallback for ScopeCallbackMarshaller<'_> {
    fn run(&self, native: &mut NativeScope) {
        let Some(callback) = self.take() else {
            debug!("Scope callback already ran; ignoring repeated invocation");
            return;
        };

        let mut scope = translate::scope::from_native(native.clone());
        let outcome = panic::catch_unwind(AssertUnwindSafe(move || {
            callback(&mut scope);
            scope
        }));

        match outcome {
            Ok(scope) => translate::scope::write_back(scope, native),
            Err(payload) => error!(
                panic = %panic_message(payload.as_ref()),
                "Scope callback panicked; native scope left untouched"
            ),
        }
    }
}

/// Adapts the managed before-send hook to the native `BeforeSendCallback`.
pub struct BeforeSendMarshaller {
    hook: BeforeSendHook,
}

impl BeforeSendMarshaller {
    pub fn new(hook: BeforeSendHook) -> Self {
        Self { hook }
    }
}

impl BeforeSendCallback for BeforeSendMarshaller {
    fn execute(&self, native: NativeEvent, _hint: &Hint) -> Option<NativeEvent> {
        let event = translate::event::from_native(native.clone());
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (self.hook)(event)));

        match outcome {
            Ok(Some(event)) => Some(translate::event::to_native(event)),
            Ok(None) => {
                debug!(event_id = %native.event_id, "Event dropped by before-send hook");
                None
            }
            Err(payload) => {
                error!(
                    event_id = %native.event_id,
                    panic = %panic_message(payload.as_ref()),
                    "Before-send hook panicked; sending the event unchanged"
                );
                Some(native)
            }
        }
    }
}

/// Applies the managed options during native `init` and captures the seeded
/// native options.
pub struct OptionsConfigurationMarshaller {
    options: SentryOptions,
    configured: Mutex<Option<NativeOptions>>,
}

impl OptionsConfigurationMarshaller {
    pub fn new(options: SentryOptions) -> Self {
        Self {
            options,
            configured: Mutex::new(None),
        }
    }

    /// The native options as they stood after configuration, seeded defaults
    /// included. `None` if the runtime never invoked the callback.
    pub fn take_configured(&self) -> Option<NativeOptions> {
        self.configured
            .lock()
            .ok()
            .and_then(|mut configured| configured.take())
    }
}

impl OptionsConfiguration for OptionsConfigurationMarshaller {
    fn configure(&self, native: &mut NativeOptions) {
        translate::options::apply_to_native(&self.options, native);
        debug!(
            seeded_integrations = native.integrations().len(),
            "Applied options to native runtime"
        );
        if let Ok(mut configured) = self.configured.lock() {
            *configured = Some(native.clone());
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
