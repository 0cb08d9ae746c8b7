//! # Core Runtime Module
//!
//! Ambient infrastructure shared by the bridge crates:
//! - SDK options and DSN parsing with fail-fast validation
//! - Logging and tracing setup with host `LoggerSink` forwarding
//!
//! ## Overview
//!
//! Nothing in this crate talks to the native runtime. It establishes the
//! configuration model the façade validates before translation and the
//! logging conventions every crate follows.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{BeforeSendHook, Dsn, SentryOptions, SentryOptionsBuilder};
pub use error::{Error, Result};
