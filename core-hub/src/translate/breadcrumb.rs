//! Breadcrumb table.
//!
//! | managed     | native      |
//! |-------------|-------------|
//! | `timestamp` | `timestamp` |
//! | `ty`        | `ty`        |
//! | `category`  | `category`  |
//! | `message`   | `message`   |
//! | `data`      | `data`      |
//! | `level`     | `level`     |

use bridge_traits::NativeBreadcrumb;
use core_protocol::Breadcrumb;

use super::level;

pub fn to_native(breadcrumb: Breadcrumb) -> NativeBreadcrumb {
    NativeBreadcrumb {
        timestamp: breadcrumb.timestamp,
        ty: breadcrumb.ty,
        category: breadcrumb.category,
        message: breadcrumb.message,
        data: breadcrumb.data,
        level: level::to_native(breadcrumb.level),
    }
}

pub fn from_native(breadcrumb: NativeBreadcrumb) -> Breadcrumb {
    Breadcrumb {
        timestamp: breadcrumb.timestamp,
        ty: breadcrumb.ty,
        category: breadcrumb.category,
        message: breadcrumb.message,
        data: breadcrumb.data,
        level: level::from_native(breadcrumb.level),
    }
}
