//! # In-Memory Native Runtime
//!
//! Implementation of the native telemetry contracts that keeps everything in
//! process memory.
//!
//! ## Overview
//!
//! This crate provides a complete stand-in for the native runtime:
//! - `InMemoryRuntime` seeds platform default integrations during `init` and
//!   creates hubs
//! - `InMemoryHub` keeps a scope stack and dispatches captures to the bound
//!   client
//! - `InMemoryClient` applies the scope, runs the before-send callback and
//!   records surviving events in an outbox
//!
//! There is no transport. Tests and demos inspect the outbox instead.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_memory::InMemoryRuntime;
//! use std::sync::Arc;
//!
//! let runtime = Arc::new(InMemoryRuntime::new());
//! let options = core_runtime::SentryOptions::builder()
//!     .dsn("https://key@sentry.io/1")
//!     .build()?;
//! core_service::init(runtime.clone(), options)?;
//!
//! core_service::capture_message("hello", Level::Info);
//! let hub = runtime.last_hub().unwrap();
//! assert_eq!(hub.default_client().sent_events().len(), 1);
//! ```

mod client;
mod hub;
mod runtime;

pub use client::InMemoryClient;
pub use hub::InMemoryHub;
pub use runtime::{BuiltinIntegration, InMemoryRuntime, DEFAULT_INTEGRATIONS};
