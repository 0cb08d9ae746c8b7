//! Event identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ProtocolError;

/// Opaque 128-bit event identifier.
///
/// Displays as a dashed UUID. Parsing accepts both the dashed form and the
/// undashed 32-hex-digit form used by the native runtime, so ids survive a
/// round-trip through either representation unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentryId(Uuid);

impl SentryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The all-zero id returned when nothing was captured.
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for SentryId {
    fn default() -> Self {
        Self::nil()
    }
}

impl From<Uuid> for SentryId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for SentryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for SentryId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| ProtocolError::InvalidId(format!("{}: {}", s, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashed_and_undashed_parse_to_same_id() {
        let dashed: SentryId = "f7f320d5-c3a5-4709-be7b-28e0f2ca7081".parse().unwrap();
        let undashed: SentryId = "f7f320d5c3a54709be7b28e0f2ca7081".parse().unwrap();

        assert_eq!(dashed, undashed);
        assert_eq!(dashed.to_string(), "f7f320d5-c3a5-4709-be7b-28e0f2ca7081");
    }

    #[test]
    fn test_display_round_trip() {
        let id = SentryId::new();
        let parsed: SentryId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_invalid_id() {
        assert!(matches!(
            "xyz".parse::<SentryId>(),
            Err(ProtocolError::InvalidId(_))
        ));
        assert!("".parse::<SentryId>().is_err());
    }

    #[test]
    fn test_nil() {
        assert!(SentryId::nil().is_nil());
        assert!(SentryId::default().is_nil());
        assert_eq!(
            SentryId::nil().to_string(),
            "00000000-0000-0000-0000-000000000000"
        );
    }
}
