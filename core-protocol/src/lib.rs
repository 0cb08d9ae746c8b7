//! # Core Protocol
//!
//! Value types of the unified (managed-side) error-reporting API:
//! - [`Event`] - a capturable error report
//! - [`Scope`] - contextual data applied to subsequent captures
//! - [`Breadcrumb`] - trail of what happened before an event
//! - [`Level`] - event and breadcrumb severity
//! - [`SentryId`] - 128-bit event identifier
//!
//! These types carry no runtime behavior; they are independent from any
//! native representation. Conversions to and from the native object model
//! live in `core-hub`.

pub mod breadcrumb;
pub mod error;
pub mod event;
pub mod id;
pub mod level;
pub mod scope;

pub use breadcrumb::Breadcrumb;
pub use error::{ProtocolError, Result};
pub use event::{Event, Exception, DEFAULT_PLATFORM};
pub use id::SentryId;
pub use level::Level;
pub use scope::Scope;
