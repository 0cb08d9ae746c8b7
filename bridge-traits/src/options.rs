//! Native Options
//!
//! Configuration snapshot consumed by the native runtime when a hub is
//! created, plus the integration contract the runtime uses to seed platform
//! defaults.

use std::fmt;
use std::sync::Arc;

use crate::callbacks::BeforeSendCallback;
use crate::hub::NativeHub;

/// Default breadcrumb capacity of a native scope.
pub const DEFAULT_MAX_BREADCRUMBS: usize = 100;

/// Default ANR watchdog interval.
pub const DEFAULT_ANR_TIMEOUT_MILLIS: u64 = 5_000;

/// Default time the runtime waits for pending events on close.
pub const DEFAULT_SHUTDOWN_TIMEOUT_MILLIS: u64 = 2_000;

/// Native integration trait
///
/// Integrations are registered once when the runtime creates a hub.
pub trait Integration: Send + Sync {
    /// Stable name used to de-duplicate integrations.
    fn name(&self) -> &str;

    /// Hook the integration into a freshly created hub.
    fn register(&self, _hub: &dyn NativeHub, _options: &NativeOptions) {}
}

/// Options in the native object model.
#[derive(Clone)]
pub struct NativeOptions {
    pub dsn: Option<String>,
    pub debug: bool,
    pub release: Option<String>,
    pub environment: Option<String>,
    pub dist: Option<String>,
    pub max_breadcrumbs: usize,
    pub before_send: Option<Arc<dyn BeforeSendCallback>>,
    pub anr_enabled: bool,
    pub anr_timeout_interval_millis: u64,
    pub shutdown_timeout_millis: u64,
    integrations: Vec<Arc<dyn Integration>>,
}

impl Default for NativeOptions {
    fn default() -> Self {
        Self {
            dsn: None,
            debug: false,
            release: None,
            environment: None,
            dist: None,
            max_breadcrumbs: DEFAULT_MAX_BREADCRUMBS,
            before_send: None,
            anr_enabled: true,
            anr_timeout_interval_millis: DEFAULT_ANR_TIMEOUT_MILLIS,
            shutdown_timeout_millis: DEFAULT_SHUTDOWN_TIMEOUT_MILLIS,
            integrations: Vec::new(),
        }
    }
}

impl NativeOptions {
    /// Default options targeting `dsn`.
    pub fn with_dsn(dsn: impl Into<String>) -> Self {
        Self {
            dsn: Some(dsn.into()),
            ..Self::default()
        }
    }

    /// Add an integration. Integrations already present by name are ignored.
    pub fn add_integration(&mut self, integration: Arc<dyn Integration>) {
        if !self.has_integration(integration.name()) {
            self.integrations.push(integration);
        }
    }

    pub fn integrations(&self) -> &[Arc<dyn Integration>] {
        &self.integrations
    }

    pub fn has_integration(&self, name: &str) -> bool {
        self.integrations.iter().any(|i| i.name() == name)
    }

    pub fn integration_names(&self) -> Vec<String> {
        self.integrations
            .iter()
            .map(|i| i.name().to_string())
            .collect()
    }
}

impl fmt::Debug for NativeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeOptions")
            .field("dsn", &self.dsn.as_ref().map(|_| "[REDACTED]"))
            .field("debug", &self.debug)
            .field("release", &self.release)
            .field("environment", &self.environment)
            .field("dist", &self.dist)
            .field("max_breadcrumbs", &self.max_breadcrumbs)
            .field(
                "before_send",
                &self
                    .before_send
                    .as_ref()
                    .map(|_| "BeforeSendCallback { ... }"),
            )
            .field("anr_enabled", &self.anr_enabled)
            .field(
                "anr_timeout_interval_millis",
                &self.anr_timeout_interval_millis,
            )
            .field("shutdown_timeout_millis", &self.shutdown_timeout_millis)
            .field("integrations", &self.integration_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl Integration for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_defaults() {
        let options = NativeOptions::default();

        assert!(options.dsn.is_none());
        assert!(options.anr_enabled);
        assert_eq!(options.max_breadcrumbs, DEFAULT_MAX_BREADCRUMBS);
        assert!(options.integrations().is_empty());
    }

    #[test]
    fn test_add_integration_deduplicates_by_name() {
        let mut options = NativeOptions::default();
        options.add_integration(Arc::new(Named("Anr")));
        options.add_integration(Arc::new(Named("Anr")));
        options.add_integration(Arc::new(Named("DeviceContext")));

        assert_eq!(options.integration_names(), vec!["Anr", "DeviceContext"]);
        assert!(options.has_integration("DeviceContext"));
        assert!(!options.has_integration("Ndk"));
    }

    #[test]
    fn test_with_dsn_keeps_defaults() {
        let options = NativeOptions::with_dsn("https://key@example.com/1");

        assert_eq!(options.dsn.as_deref(), Some("https://key@example.com/1"));
        assert_eq!(options.max_breadcrumbs, DEFAULT_MAX_BREADCRUMBS);
        assert!(options.integrations().is_empty());
    }

    #[test]
    fn test_debug_redacts_dsn() {
        let options = NativeOptions::with_dsn("https://key@example.com/1");

        let rendered = format!("{:?}", options);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("key@"));
    }
}
