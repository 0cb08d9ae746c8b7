//! Event table.
//!
//! | managed        | native         | note                  |
//! |----------------|----------------|-----------------------|
//! | `event_id`     | `event_id`     | same 128-bit value    |
//! | `timestamp`    | `timestamp`    |                       |
//! | `message`      | `message`      |                       |
//! | `level`        | `level`        | 1:1                   |
//! | `logger`       | `logger`       |                       |
//! | `platform`     | `platform`     |                       |
//! | `tags`         | `tags`         |                       |
//! | `extra`        | `extra`        | JSON ↔ string         |
//! | `release`      | `release`      |                       |
//! | `environment`  | `environment`  |                       |
//! | `dist`         | `dist`         |                       |
//! | `transaction`  | `transaction`  |                       |
//! | `exceptions`   | `exceptions`   | order kept            |
//! | `breadcrumbs`  | `breadcrumbs`  | breadcrumb table      |

use bridge_traits::{NativeEvent, NativeException};
use core_protocol::{Event, Exception};

use super::{breadcrumb, extra_from_native, extra_to_native, id, level};

pub fn to_native(event: Event) -> NativeEvent {
    NativeEvent {
        event_id: id::to_native(event.event_id),
        timestamp: event.timestamp,
        message: event.message,
        level: event.level.map(level::to_native),
        logger: event.logger,
        platform: event.platform,
        tags: event.tags,
        extra: extra_to_native(event.extra),
        release: event.release,
        environment: event.environment,
        dist: event.dist,
        transaction: event.transaction,
        exceptions: event
            .exceptions
            .into_iter()
            .map(|e| NativeException {
                ty: e.ty,
                value: e.value,
            })
            .collect(),
        breadcrumbs: event
            .breadcrumbs
            .into_iter()
            .map(breadcrumb::to_native)
            .collect(),
    }
}

pub fn from_native(event: NativeEvent) -> Event {
    Event {
        event_id: id::from_native(event.event_id),
        timestamp: event.timestamp,
        message: event.message,
        level: event.level.map(level::from_native),
        logger: event.logger,
        platform: event.platform,
        tags: event.tags,
        extra: extra_from_native(event.extra),
        release: event.release,
        environment: event.environment,
        dist: event.dist,
        transaction: event.transaction,
        exceptions: event
            .exceptions
            .into_iter()
            .map(|e| Exception {
                ty: e.ty,
                value: e.value,
            })
            .collect(),
        breadcrumbs: event
            .breadcrumbs
            .into_iter()
            .map(breadcrumb::from_native)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::NativeLevel;
    use core_protocol::{Breadcrumb, Level};
    use serde_json::json;
    use std::fmt;

    #[derive(Debug)]
    struct Declined;

    impl fmt::Display for Declined {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("card declined")
        }
    }

    impl std::error::Error for Declined {}

    #[test]
    fn test_to_native_copies_table_fields() {
        let mut event = Event::from_error(&Declined);
        event.logger = Some("payments".to_string());
        event.release = Some("1.0.0".to_string());
        event.environment = Some("production".to_string());
        event.dist = Some("7".to_string());
        event.transaction = Some("checkout".to_string());
        event.set_tag("BeforeSend", "was called");
        event.set_extra("amount", 12.5);
        event.breadcrumbs.push(Breadcrumb::new("opened cart"));

        let native = to_native(event.clone());

        assert_eq!(id::from_native(native.event_id), event.event_id);
        assert_eq!(native.timestamp, event.timestamp);
        assert_eq!(native.message.as_deref(), Some("card declined"));
        assert_eq!(native.level, Some(NativeLevel::Error));
        assert_eq!(native.logger.as_deref(), Some("payments"));
        assert_eq!(native.platform, "rust");
        assert_eq!(native.tags["BeforeSend"], "was called");
        assert_eq!(native.extra["amount"], "12.5");
        assert_eq!(native.release.as_deref(), Some("1.0.0"));
        assert_eq!(native.environment.as_deref(), Some("production"));
        assert_eq!(native.dist.as_deref(), Some("7"));
        assert_eq!(native.transaction.as_deref(), Some("checkout"));
        assert_eq!(native.exceptions.len(), 1);
        assert_eq!(native.exceptions[0].ty, "Declined");
        assert_eq!(native.breadcrumbs.len(), 1);
    }

    #[test]
    fn test_from_native_builds_fresh_event() {
        let mut native = NativeEvent::new();
        native.level = Some(NativeLevel::Fatal);
        native.logger = Some("ndk".to_string());
        native.extra.insert("thread".to_string(), "main".to_string());

        let event = from_native(native.clone());

        assert_eq!(id::to_native(event.event_id), native.event_id);
        assert_eq!(event.level, Some(Level::Fatal));
        assert_eq!(event.logger.as_deref(), Some("ndk"));
        assert_eq!(event.platform, "native");
        assert_eq!(event.extra["thread"], json!("main"));
    }

    #[test]
    fn test_string_fields_survive_round_trip() {
        let mut event = Event::from_message("hello", Level::Info);
        event.set_tag("a", "b");
        event.set_extra("note", "text");

        assert_eq!(from_native(to_native(event.clone())), event);
    }
}
