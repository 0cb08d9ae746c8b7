//! Options table.
//!
//! | managed            | native                         | note                    |
//! |--------------------|--------------------------------|-------------------------|
//! | `dsn`              | `dsn`                          | textual form            |
//! | `debug`            | `debug`                        |                         |
//! | `release`          | `release`                      |                         |
//! | `environment`      | `environment`                  |                         |
//! | `dist`             | `dist`                         |                         |
//! | `max_breadcrumbs`  | `max_breadcrumbs`              |                         |
//! | `before_send`      | `before_send`                  | `BeforeSendMarshaller`  |
//! | `anr_enabled`      | `anr_enabled`                  |                         |
//! | `anr_timeout`      | `anr_timeout_interval_millis`  | milliseconds            |
//! | `shutdown_timeout` | `shutdown_timeout_millis`      | milliseconds            |
//! | `integrations`     | `integrations`                 | names, native → managed |
//!
//! Integrations the native runtime seeded are left in place; their names are
//! reported back through [`effective_options`].

use bridge_traits::{BeforeSendCallback, NativeOptions};
use core_runtime::SentryOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::marshal::BeforeSendMarshaller;

/// Apply the managed options onto a (possibly runtime-seeded) native options
/// instance.
pub fn apply_to_native(options: &SentryOptions, target: &mut NativeOptions) {
    target.dsn = options.dsn.as_ref().map(|dsn| dsn.to_string());
    target.debug = options.debug;
    target.release = options.release.clone();
    target.environment = options.environment.clone();
    target.dist = options.dist.clone();
    target.max_breadcrumbs = options.max_breadcrumbs;
    target.before_send = options.before_send.clone().map(|hook| {
        let marshaller: Arc<dyn BeforeSendCallback> = Arc::new(BeforeSendMarshaller::new(hook));
        marshaller
    });
    target.anr_enabled = options.anr_enabled;
    target.anr_timeout_interval_millis = millis(options.anr_timeout);
    target.shutdown_timeout_millis = millis(options.shutdown_timeout);
}

/// The managed options with the integrations the native side ended up with.
pub fn effective_options(options: &SentryOptions, native: &NativeOptions) -> SentryOptions {
    let mut effective = options.clone();
    for name in native.integration_names() {
        if !effective.integrations.contains(&name) {
            effective.integrations.push(name);
        }
    }
    effective
}

pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
