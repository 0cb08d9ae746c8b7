//! Native hub with a scope stack

use bridge_traits::{
    Hint, NativeBreadcrumb, NativeClient, NativeEvent, NativeHub, NativeOptions, NativeScope,
    NativeSentryId, ScopeCallback,
};
use parking_lot::ReentrantMutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, warn};

use crate::client::InMemoryClient;

/// Native hub keeping its scope stack in memory.
///
/// The root scope is never popped. Scope callbacks run against a copy taken
/// outside the stack lock, so a callback may call back into the hub; the
/// result is written back once the callback returns. Scope mutations from
/// other threads wait until a running configuration has been written back.
pub struct InMemoryHub {
    options: NativeOptions,
    stack: Mutex<Vec<NativeScope>>,
    configuring: ReentrantMutex<()>,
    client: RwLock<Option<Arc<dyn NativeClient>>>,
    default_client: Arc<InMemoryClient>,
    last_event_id: Mutex<NativeSentryId>,
    integrations: Mutex<Vec<String>>,
    closed: AtomicBool,
}

impl InMemoryHub {
    /// Create a hub bound to a fresh [`InMemoryClient`] built from `options`.
    pub fn new(options: NativeOptions) -> Self {
        let default_client = Arc::new(InMemoryClient::new(&options));
        let bound: Arc<dyn NativeClient> = default_client.clone();
        Self {
            options,
            stack: Mutex::new(vec![NativeScope::default()]),
            configuring: ReentrantMutex::new(()),
            client: RwLock::new(Some(bound)),
            default_client,
            last_event_id: Mutex::new(NativeSentryId::empty()),
            integrations: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn options(&self) -> &NativeOptions {
        &self.options
    }

    /// The client the hub was created with, even after another was bound.
    pub fn default_client(&self) -> Arc<InMemoryClient> {
        Arc::clone(&self.default_client)
    }

    /// Number of scopes on the stack, root included.
    pub fn scope_depth(&self) -> usize {
        self.stack.lock().map(|stack| stack.len()).unwrap_or(0)
    }

    /// Copy of the current (top) scope.
    pub fn current_scope(&self) -> NativeScope {
        self.stack
            .lock()
            .ok()
            .and_then(|stack| stack.last().cloned())
            .unwrap_or_default()
    }

    pub fn registered_integrations(&self) -> Vec<String> {
        self.integrations
            .lock()
            .map(|names| names.clone())
            .unwrap_or_default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub(crate) fn record_integration(&self, name: &str) {
        if let Ok(mut names) = self.integrations.lock() {
            names.push(name.to_string());
        }
    }

    fn bound_client(&self) -> Option<Arc<dyn NativeClient>> {
        self.client.read().ok().and_then(|client| client.clone())
    }

    fn update_top(&self, update: impl FnOnce(&mut NativeScope)) {
        if let Ok(mut stack) = self.stack.lock() {
            if let Some(top) = stack.last_mut() {
                update(top);
            }
        }
    }

    fn trim_breadcrumbs(&self, scope: &mut NativeScope) {
        let overflow = scope
            .breadcrumbs
            .len()
            .saturating_sub(self.options.max_breadcrumbs);
        scope.breadcrumbs.drain(..overflow);
    }
}

impl NativeHub for InMemoryHub {
    fn is_enabled(&self) -> bool {
        !self.is_closed()
            && self
                .bound_client()
                .map(|client| client.is_enabled())
                .unwrap_or(false)
    }

    fn capture_event(
        &self,
        event: NativeEvent,
        scope: Option<NativeScope>,
        hint: Hint,
    ) -> NativeSentryId {
        if self.is_closed() {
            return NativeSentryId::empty();
        }
        let Some(client) = self.bound_client() else {
            return NativeSentryId::empty();
        };

        let scope = scope.unwrap_or_else(|| self.current_scope());
        let id = client.capture_event(event, Some(scope), hint);
        if !id.is_empty() {
            if let Ok(mut last) = self.last_event_id.lock() {
                *last = id;
            }
        }
        id
    }

    fn push_scope(&self) {
        let _configuring = self.configuring.lock();
        if let Ok(mut stack) = self.stack.lock() {
            let top = stack.last().cloned().unwrap_or_default();
            stack.push(top);
        }
    }

    fn pop_scope(&self) {
        let _configuring = self.configuring.lock();
        if let Ok(mut stack) = self.stack.lock() {
            if stack.len() > 1 {
                stack.pop();
            } else {
                warn!("Attempted to pop the root scope");
            }
        }
    }

    fn configure_scope(&self, callback: &dyn ScopeCallback) {
        let _configuring = self.configuring.lock();
        let mut scope = self.current_scope();
        callback.run(&mut scope);
        self.trim_breadcrumbs(&mut scope);
        self.update_top(|top| *top = scope);
    }

    fn with_scope(&self, callback: &dyn ScopeCallback) {
        let _configuring = self.configuring.lock();
        self.push_scope();
        self.configure_scope(callback);
        self.pop_scope();
    }

    fn bind_client(&self, client: Arc<dyn NativeClient>) {
        if let Ok(mut bound) = self.client.write() {
            *bound = Some(client);
            debug!("Bound new client to in-memory hub");
        }
    }

    fn set_extra(&self, key: &str, value: &str) {
        let _configuring = self.configuring.lock();
        self.update_top(|top| {
            top.extra.insert(key.to_string(), value.to_string());
        });
    }

    fn add_breadcrumb(&self, breadcrumb: NativeBreadcrumb) {
        let max = self.options.max_breadcrumbs;
        let _configuring = self.configuring.lock();
        self.update_top(|top| {
            top.breadcrumbs.push(breadcrumb);
            let overflow = top.breadcrumbs.len().saturating_sub(max);
            top.breadcrumbs.drain(..overflow);
        });
    }

    fn last_event_id(&self) -> String {
        self.last_event_id
            .lock()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    fn flush(&self, timeout_millis: u64) {
        if let Some(client) = self.bound_client() {
            client.flush(timeout_millis);
        }
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let client = self.client.write().ok().and_then(|mut bound| bound.take());
        if let Some(client) = client {
            client.flush(self.options.shutdown_timeout_millis);
            client.close();
        }
        debug!("In-memory hub closed");
    }
}
