//! Scope table.
//!
//! | managed        | native         | note              |
//! |----------------|----------------|-------------------|
//! | `level`        | `level`        | 1:1               |
//! | `transaction`  | `transaction`  |                   |
//! | `tags`         | `tags`         |                   |
//! | `extra`        | `extra`        | JSON ↔ string     |
//! | `breadcrumbs`  | `breadcrumbs`  | breadcrumb table  |

use bridge_traits::NativeScope;
use core_protocol::Scope;

use super::{breadcrumb, extra_from_native, extra_to_native, level};

pub fn to_native(scope: Scope) -> NativeScope {
    NativeScope {
        level: scope.level.map(level::to_native),
        transaction: scope.transaction,
        tags: scope.tags,
        extra: extra_to_native(scope.extra),
        breadcrumbs: scope
            .breadcrumbs
            .into_iter()
            .map(breadcrumb::to_native)
            .collect(),
    }
}

pub fn from_native(scope: NativeScope) -> Scope {
    Scope {
        level: scope.level.map(level::from_native),
        transaction: scope.transaction,
        tags: scope.tags,
        extra: extra_from_native(scope.extra),
        breadcrumbs: scope
            .breadcrumbs
            .into_iter()
            .map(breadcrumb::from_native)
            .collect(),
    }
}

/// Overwrite every table field of `target` with the values of `scope`.
pub fn write_back(scope: Scope, target: &mut NativeScope) {
    *target = to_native(scope);
}
