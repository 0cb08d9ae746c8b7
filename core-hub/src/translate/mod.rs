//! # Translators
//!
//! One module per entity, each holding the explicit field table between the
//! managed protocol (`core-protocol`) and the native object model
//! (`bridge-traits`).
//!
//! Translation always builds a fresh value on the destination side. Fields
//! without a counterpart are dropped; translation never fails because of a
//! fidelity gap.
//!
//! | Entity     | Module         |
//! |------------|----------------|
//! | Level      | [`level`]      |
//! | SentryId   | [`id`]         |
//! | Breadcrumb | [`breadcrumb`] |
//! | Event      | [`event`]      |
//! | Scope      | [`scope`]      |
//! | Options    | [`options`]    |

pub mod breadcrumb;
pub mod event;
pub mod id;
pub mod level;
pub mod options;
pub mod scope;

use serde_json::Value;
use std::collections::BTreeMap;

/// Native extras are strings: strings pass through verbatim, every other
/// value is stored as its JSON text.
pub(crate) fn extra_to_native(extra: BTreeMap<String, Value>) -> BTreeMap<String, String> {
    extra
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(text) => text,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect()
}

pub(crate) fn extra_from_native(extra: BTreeMap<String, String>) -> BTreeMap<String, Value> {
    extra
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}
