use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::level::Level;

/// A single entry of the breadcrumb trail.
///
/// `ty` is `default` unless set; `http` and `navigation` have dedicated
/// rendering in the Sentry UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub ty: String,
    pub category: Option<String>,
    pub message: Option<String>,
    pub data: BTreeMap<String, String>,
    pub level: Level,
}

impl Breadcrumb {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = ty.into();
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

impl Default for Breadcrumb {
    fn default() -> Self {
        Self {
            timestamp: Utc::now(),
            ty: "default".to_string(),
            category: None,
            message: None,
            data: BTreeMap::new(),
            level: Level::Info,
        }
    }
}
