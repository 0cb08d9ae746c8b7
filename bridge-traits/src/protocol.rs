//! Native Protocol Types
//!
//! Value types of the native telemetry runtime's object model. They mirror the
//! shapes the native SDK exposes (events, scopes, breadcrumbs, ids) and are
//! intentionally independent from the managed protocol: the bridge always
//! builds a fresh value on the other side instead of sharing instances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::BridgeError;

/// Platform reported by events minted on the native side.
pub const NATIVE_PLATFORM: &str = "native";

/// Event identifier as minted by the native runtime.
///
/// The native textual form is the undashed 32-hex-digit representation.
/// Parsing accepts both the undashed and the dashed UUID forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NativeSentryId(Uuid);

impl NativeSentryId {
    /// Mint a new random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The empty (all-zero) id used to signal "nothing captured".
    pub const fn empty() -> Self {
        Self(Uuid::nil())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for NativeSentryId {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for NativeSentryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for NativeSentryId {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| BridgeError::InvalidId(format!("{}: {}", s, e)))
    }
}

/// Severity level understood by the native runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeLevel {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for NativeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NativeLevel::Debug => "debug",
            NativeLevel::Info => "info",
            NativeLevel::Warning => "warning",
            NativeLevel::Error => "error",
            NativeLevel::Fatal => "fatal",
        };
        f.write_str(name)
    }
}

/// Breadcrumb recorded on a native scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeBreadcrumb {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub ty: String,
    pub category: Option<String>,
    pub message: Option<String>,
    pub data: BTreeMap<String, String>,
    pub level: NativeLevel,
}

impl NativeBreadcrumb {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            ty: "default".to_string(),
            category: None,
            message: Some(message.into()),
            data: BTreeMap::new(),
            level: NativeLevel::Info,
        }
    }
}

/// Single exception entry of a native event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeException {
    #[serde(rename = "type")]
    pub ty: String,
    pub value: Option<String>,
}

/// Error report in the native object model.
///
/// Extras are string-valued: the native model has no structured extra values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeEvent {
    pub event_id: NativeSentryId,
    pub timestamp: DateTime<Utc>,
    pub message: Option<String>,
    pub level: Option<NativeLevel>,
    pub logger: Option<String>,
    pub platform: String,
    pub tags: BTreeMap<String, String>,
    pub extra: BTreeMap<String, String>,
    pub release: Option<String>,
    pub environment: Option<String>,
    pub dist: Option<String>,
    pub transaction: Option<String>,
    pub exceptions: Vec<NativeException>,
    pub breadcrumbs: Vec<NativeBreadcrumb>,
}

impl NativeEvent {
    /// Create an empty event with a freshly minted id.
    pub fn new() -> Self {
        Self {
            event_id: NativeSentryId::new(),
            timestamp: Utc::now(),
            message: None,
            level: None,
            logger: None,
            platform: NATIVE_PLATFORM.to_string(),
            tags: BTreeMap::new(),
            extra: BTreeMap::new(),
            release: None,
            environment: None,
            dist: None,
            transaction: None,
            exceptions: Vec::new(),
            breadcrumbs: Vec::new(),
        }
    }
}

impl Default for NativeEvent {
    fn default() -> Self {
        Self::new()
    }
}

/// Scope data owned by the native runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeScope {
    pub level: Option<NativeLevel>,
    pub transaction: Option<String>,
    pub tags: BTreeMap<String, String>,
    pub extra: BTreeMap<String, String>,
    pub breadcrumbs: Vec<NativeBreadcrumb>,
}

/// Opaque capture hint passed alongside native events.
///
/// The payload is whatever the native caller attached; the bridge never
/// interprets it.
#[derive(Clone, Default)]
pub struct Hint {
    payload: Option<Arc<dyn Any + Send + Sync>>,
}

impl Hint {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_payload<T: Any + Send + Sync>(payload: T) -> Self {
        Self {
            payload: Some(Arc::new(payload)),
        }
    }

    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref().and_then(|p| p.downcast_ref::<T>())
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }
}

impl fmt::Debug for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hint")
            .field("payload", &self.payload.as_ref().map(|_| "Any { ... }"))
            .finish()
    }
}
