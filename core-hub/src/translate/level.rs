//! Level table: the five severities map one to one.

use bridge_traits::NativeLevel;
use core_protocol::Level;

pub fn to_native(level: Level) -> NativeLevel {
    match level {
        Level::Debug => NativeLevel::Debug,
        Level::Info => NativeLevel::Info,
        Level::Warning => NativeLevel::Warning,
        Level::Error => NativeLevel::Error,
        Level::Fatal => NativeLevel::Fatal,
    }
}

pub fn from_native(level: NativeLevel) -> Level {
    match level {
        NativeLevel::Debug => Level::Debug,
        NativeLevel::Info => Level::Info,
        NativeLevel::Warning => Level::Warning,
        NativeLevel::Error => Level::Error,
        NativeLevel::Fatal => Level::Fatal,
    }
}
