use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::breadcrumb::Breadcrumb;
use crate::level::Level;

/// Contextual data applied to subsequent captures.
///
/// A plain value owned by the caller. Scopes handed to configuration
/// callbacks are fresh copies; changes reach the active hub only through the
/// hub that invoked the callback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    pub level: Option<Level>,
    pub transaction: Option<String>,
    pub tags: BTreeMap<String, String>,
    pub extra: BTreeMap<String, Value>,
    pub breadcrumbs: Vec<Breadcrumb>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_level(&mut self, level: Option<Level>) {
        self.level = level;
    }

    pub fn set_transaction(&mut self, transaction: Option<&str>) {
        self.transaction = transaction.map(str::to_string);
    }

    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    pub fn remove_tag(&mut self, key: &str) {
        self.tags.remove(key);
    }

    pub fn set_extra(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.extra.insert(key.into(), value.into());
    }

    pub fn remove_extra(&mut self, key: &str) {
        self.extra.remove(key);
    }

    pub fn add_breadcrumb(&mut self, breadcrumb: Breadcrumb) {
        self.breadcrumbs.push(breadcrumb);
    }

    pub fn clear_breadcrumbs(&mut self) {
        self.breadcrumbs.clear();
    }

    /// Reset every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutators() {
        let mut scope = Scope::new();
        scope.set_level(Some(Level::Fatal));
        scope.set_transaction(Some("checkout"));
        scope.set_tag("region", "eu");
        scope.set_extra("attempt", 2);
        scope.add_breadcrumb(Breadcrumb::new("step"));

        assert_eq!(scope.level, Some(Level::Fatal));
        assert_eq!(scope.transaction.as_deref(), Some("checkout"));
        assert_eq!(scope.tags["region"], "eu");
        assert_eq!(scope.extra["attempt"], Value::from(2));
        assert_eq!(scope.breadcrumbs.len(), 1);

        scope.remove_tag("region");
        scope.remove_extra("attempt");
        scope.clear_breadcrumbs();
        assert!(scope.tags.is_empty());
        assert!(scope.extra.is_empty());
        assert!(scope.breadcrumbs.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut scope = Scope::new();
        scope.set_level(Some(Level::Error));
        scope.set_tag("a", "b");
        scope.clear();

        assert_eq!(scope, Scope::default());
    }
}
