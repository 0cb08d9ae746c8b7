//! # Core Hub
//!
//! The unified [`Hub`] capability and its implementations.
//!
//! ## Overview
//!
//! - [`BridgedHub`] - serves the unified surface from a native hub
//! - [`DisabledHub`] - no-op hub used while the SDK is off
//! - [`NativeClientAdapter`] - binds a managed [`Client`] into a native hub
//! - [`marshal`] - wraps managed closures as native callbacks
//! - [`translate`] - field tables between the managed and native models
//!
//! ## Ownership
//!
//! Values never share identity across the boundary. Each translation builds a
//! fresh value, and native scopes are only reachable inside the callback the
//! native hub invokes.

pub mod bridged;
pub mod client;
pub mod client_adapter;
pub mod disabled;
pub mod error;
pub mod hub;
pub mod marshal;
pub mod translate;

pub use bridged::BridgedHub;
pub use client::Client;
pub use client_adapter::NativeClientAdapter;
pub use disabled::DisabledHub;
pub use error::{HubError, Result};
pub use hub::{AsyncScopeCallback, Hub, ScopeFn, ScopeGuard, SCOPE_STATE_KEY};
pub use marshal::{BeforeSendMarshaller, OptionsConfigurationMarshaller, ScopeCallbackMarshaller};
