//! Id table.
//!
//! Both sides wrap the same 128-bit value, so ids are never regenerated. The
//! native textual form is undashed; [`parse_native`] also accepts the dashed
//! form.

use bridge_traits::NativeSentryId;
use core_protocol::SentryId;

pub fn to_native(id: SentryId) -> NativeSentryId {
    NativeSentryId::from_uuid(*id.as_uuid())
}

pub fn from_native(id: NativeSentryId) -> SentryId {
    SentryId::from_uuid(*id.as_uuid())
}

/// Parse the native textual id. `None` when the text is not a UUID.
pub fn parse_native(text: &str) -> Option<SentryId> {
    text.parse::<NativeSentryId>().ok().map(from_native)
}
