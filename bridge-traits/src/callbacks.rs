//! Native Callback Contracts
//!
//! Callback capabilities the native runtime invokes. Foreign closures are
//! wrapped into objects implementing these traits before being handed over.

use crate::options::NativeOptions;
use crate::protocol::{Hint, NativeEvent, NativeScope};

/// Scope callback invoked by `NativeHub::configure_scope` / `with_scope`.
pub trait ScopeCallback: Send + Sync {
    fn run(&self, scope: &mut NativeScope);
}

/// Before-send callback invoked by the native client prior to dispatch.
///
/// Returning `None` drops the event; the native pipeline stops processing it.
pub trait BeforeSendCallback: Send + Sync {
    fn execute(&self, event: NativeEvent, hint: &Hint) -> Option<NativeEvent>;
}

/// Options configuration callback invoked by `NativeRuntime::init`.
///
/// Receives the options instance the runtime has already seeded with its
/// platform defaults.
pub trait OptionsConfiguration: Send + Sync {
    fn configure(&self, options: &mut NativeOptions);
}
