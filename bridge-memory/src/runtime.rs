//! In-memory native runtime entry point

use bridge_traits::{
    BridgeError, Integration, NativeHub, NativeOptions, NativeRuntime, OptionsConfiguration,
    Result,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::hub::InMemoryHub;

/// Integrations every options instance is seeded with during `init`.
pub const DEFAULT_INTEGRATIONS: &[&str] = &["UncaughtExceptionHandler", "Anr", "DeviceContext"];

/// Platform integration provided by the runtime itself.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinIntegration {
    name: &'static str,
}

impl BuiltinIntegration {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Integration for BuiltinIntegration {
    fn name(&self) -> &str {
        self.name
    }

    fn register(&self, _hub: &dyn NativeHub, options: &NativeOptions) {
        if self.name == "Anr" && !options.anr_enabled {
            debug!("ANR detection disabled; watchdog not started");
            return;
        }
        debug!(integration = self.name, "Integration registered");
    }
}

#[derive(Default)]
struct RuntimeState {
    global_options: Option<NativeOptions>,
    hubs: Vec<Arc<InMemoryHub>>,
}

/// Native runtime whose hubs keep all state in memory.
#[derive(Default)]
pub struct InMemoryRuntime {
    state: Mutex<RuntimeState>,
    init_calls: AtomicUsize,
    close_calls: AtomicUsize,
}

impl InMemoryRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options the last `init` produced after configuration.
    pub fn global_options(&self) -> Option<NativeOptions> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.global_options.clone())
    }

    pub fn is_initialized(&self) -> bool {
        self.global_options().is_some()
    }

    /// Most recently created hub.
    pub fn last_hub(&self) -> Option<Arc<InMemoryHub>> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.hubs.last().cloned())
    }

    pub fn hub_count(&self) -> usize {
        self.state.lock().map(|state| state.hubs.len()).unwrap_or(0)
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    fn seeded_options() -> NativeOptions {
        let mut options = NativeOptions::default();
        for name in DEFAULT_INTEGRATIONS {
            options.add_integration(Arc::new(BuiltinIntegration::new(*name)));
        }
        options
    }
}

impl NativeRuntime for InMemoryRuntime {
    fn init(&self, configuration: &dyn OptionsConfiguration) -> Result<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);

        let mut options = Self::seeded_options();
        configuration.configure(&mut options);

        let mut state = self
            .state
            .lock()
            .map_err(|_| BridgeError::OperationFailed("runtime state poisoned".to_string()))?;
        state.global_options = Some(options);
        info!("In-memory runtime initialized");
        Ok(())
    }

    fn create_hub(&self, options: NativeOptions) -> Result<Arc<dyn NativeHub>> {
        if options.dsn.as_deref().map(str::trim).unwrap_or_default().is_empty() {
            return Err(BridgeError::InvalidOptions(
                "a hub requires a DSN".to_string(),
            ));
        }

        let hub = Arc::new(InMemoryHub::new(options));
        for integration in hub.options().integrations() {
            integration.register(hub.as_ref(), hub.options());
            hub.record_integration(integration.name());
        }

        let mut state = self
            .state
            .lock()
            .map_err(|_| BridgeError::OperationFailed("runtime state poisoned".to_string()))?;
        state.hubs.push(Arc::clone(&hub));
        debug!(
            integrations = hub.registered_integrations().len(),
            "Created in-memory hub"
        );

        Ok(hub)
    }

    fn close(&self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut state) = self.state.lock() {
            state.global_options = None;
        }
        debug!("In-memory runtime global state closed");
    }
}
