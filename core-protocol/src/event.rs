//! Capturable error reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error as StdError;

use crate::breadcrumb::Breadcrumb;
use crate::id::SentryId;
use crate::level::Level;

/// Platform reported by events created through the unified API.
pub const DEFAULT_PLATFORM: &str = "rust";

/// One entry of an event's exception chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exception {
    #[serde(rename = "type")]
    pub ty: String,
    pub value: Option<String>,
}

/// An error report.
///
/// Built once, then handed to a hub. Extras accept any JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: SentryId,
    pub timestamp: DateTime<Utc>,
    pub message: Option<String>,
    pub level: Option<Level>,
    pub logger: Option<String>,
    pub platform: String,
    pub tags: BTreeMap<String, String>,
    pub extra: BTreeMap<String, Value>,
    pub release: Option<String>,
    pub environment: Option<String>,
    pub dist: Option<String>,
    pub transaction: Option<String>,
    /// Exception chain, root cause first.
    pub exceptions: Vec<Exception>,
    pub breadcrumbs: Vec<Breadcrumb>,
}

impl Event {
    pub fn new() -> Self {
        Self {
            event_id: SentryId::new(),
            timestamp: Utc::now(),
            message: None,
            level: None,
            logger: None,
            platform: DEFAULT_PLATFORM.to_string(),
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

    pub fn from_message(message: impl Into<String>, level: Level) -> Self {
        Self {
            message: Some(message.into()),
            level: Some(level),
            ..Self::new()
        }
    }

    /// Build an error-level event from an error and its `source()` chain.
    pub fn from_error(error: &(dyn StdError + 'static)) -> Self {
        let mut exceptions = Vec::new();
        let mut current: Option<&(dyn StdError + 'static)> = Some(error);
        while let Some(err) = current {
            exceptions.push(Exception {
                ty: type_from_debug(err),
                value: Some(err.to_string()),
            });
            current = err.source();
        }
        exceptions.reverse();

        Self {
            message: Some(error.to_string()),
            level: Some(Level::Error),
            exceptions,
            ..Self::new()
        }
    }

    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    pub fn set_extra(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.extra.insert(key.into(), value.into());
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new()
    }
}

/// Best-effort type name of an error, taken from its `Debug` output.
///
/// `Io(Custom { .. })` becomes `Io`, `ParseIntError { kind: .. }` becomes
/// `ParseIntError`.
fn type_from_debug(error: &dyn StdError) -> String {
    let debug = format!("{:?}", error);
    let head = debug
        .split(|c: char| c == '(' || c == '{' || c.is_whitespace())
        .next()
        .unwrap_or_default();
    let name = head.rsplit("::").next().unwrap_or(head);

    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        "Error".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Outer {
        inner: Inner,
    }

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("request failed")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection reset")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.inner)
        }
    }

    impl StdError for Inner {}

    #[test]
    fn test_from_message() {
        let event = Event::from_message("hello", Level::Warning);

        assert_eq!(event.message.as_deref(), Some("hello"));
        assert_eq!(event.level, Some(Level::Warning));
        assert_eq!(event.platform, DEFAULT_PLATFORM);
        assert!(!event.event_id.is_nil());
    }

    #[test]
    fn test_from_error_walks_source_chain() {
        let error = Outer { inner: Inner };
        let event = Event::from_error(&error);

        assert_eq!(event.level, Some(Level::Error));
        assert_eq!(event.message.as_deref(), Some("request failed"));
        assert_eq!(
            event.exceptions,
            vec![
                Exception {
                    ty: "Inner".to_string(),
                    value: Some("connection reset".to_string()),
                },
                Exception {
                    ty: "Outer".to_string(),
                    value: Some("request failed".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_type_from_debug_of_std_error() {
        let error = "abc".parse::<u32>().unwrap_err();
        let event = Event::from_error(&error);

        assert_eq!(event.exceptions[0].ty, "ParseIntError");
    }

    #[test]
    fn test_extras_accept_json_values() {
        let mut event = Event::new();
        event.set_extra("count", 3);
        event.set_extra("name", "value");
        event.set_tag("BeforeSend", "was called");

        assert_eq!(event.extra["count"], Value::from(3));
        assert_eq!(event.extra["name"], Value::from("value"));
        assert_eq!(event.tags["BeforeSend"], "was called");
    }
}
