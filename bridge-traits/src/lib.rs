//! # Native Bridge Traits
//!
//! Capability contracts of the native telemetry runtime the unified API is
//! bridged onto.
//!
//! ## Overview
//!
//! The native runtime is an independently implemented SDK with its own object
//! model (events, scopes, options, ids) and its own callback conventions. This
//! crate describes that runtime purely at its interface so the bridge in
//! `core-hub` can be written, and tested, without depending on any concrete
//! native implementation.
//!
//! ## Traits
//!
//! ### Runtime & Hub
//! - [`NativeRuntime`](runtime::NativeRuntime) - Global init and hub construction
//! - [`NativeHub`](hub::NativeHub) - Scope stack, client binding, capture, flush
//! - [`NativeClient`](hub::NativeClient) - Capture dispatch target of a hub
//!
//! ### Callbacks
//! - [`ScopeCallback`](callbacks::ScopeCallback) - Scope configuration
//! - [`BeforeSendCallback`](callbacks::BeforeSendCallback) - Mutate or drop events
//! - [`OptionsConfiguration`](callbacks::OptionsConfiguration) - Init-time options hook
//! - [`Integration`](options::Integration) - Platform default integrations
//!
//! ### Host Integration
//! - [`LoggerSink`](log::LoggerSink) - Forward diagnostic logs to host logging
//!
//! ## Implementations
//!
//! | Runtime   | Implementation Crate | Status |
//! |-----------|----------------------|--------|
//! | In-memory | `bridge-memory`      | ✅ Available |
//! | Android   | TBD                  | 📋 Planned |
//! | Cocoa     | TBD                  | 📋 Planned |
//!
//! ## Failure Conventions
//!
//! The native contracts do not throw across the boundary. Captures signal
//! failure with the empty id, flushes are best-effort, and callbacks return
//! `None` to drop. Only runtime initialization returns a
//! [`BridgeError`](error::BridgeError).
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync`: the native runtime may invoke callbacks
//! on any of its threads.

pub mod callbacks;
pub mod error;
pub mod hub;
pub mod log;
pub mod options;
pub mod protocol;
pub mod runtime;

pub use error::{BridgeError, Result};

// Re-export commonly used types
pub use callbacks::{BeforeSendCallback, OptionsConfiguration, ScopeCallback};
pub use hub::{NativeClient, NativeHub};
pub use log::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use options::{Integration, NativeOptions};
pub use protocol::{
    Hint, NativeBreadcrumb, NativeEvent, NativeException, NativeLevel, NativeScope,
    NativeSentryId,
};
pub use runtime::NativeRuntime;
