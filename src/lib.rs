//! Workspace umbrella crate.
//!
//! Re-exports the façade from `core-service` and the protocol value types from
//! `core-protocol` so host applications can depend on a single crate. Enable
//! the `memory-runtime` feature to also pull in the in-memory native runtime
//! used by the demos and tests.

pub use core_protocol::{Breadcrumb, Event, Level, Scope, SentryId};
pub use core_service::*;

#[cfg(feature = "memory-runtime")]
pub use bridge_memory;
