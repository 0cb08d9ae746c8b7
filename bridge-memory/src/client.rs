//! Default native client with an in-memory outbox

use bridge_traits::{
    BeforeSendCallback, Hint, NativeBreadcrumb, NativeClient, NativeEvent, NativeOptions,
    NativeScope, NativeSentryId,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, trace};

/// Native client that records events instead of sending them.
///
/// Capture pipeline:
/// 1. Apply the scope (level, transaction, tags, extra, breadcrumbs)
/// 2. Fill release/environment/dist from the options
/// 3. Run the before-send callback; `None` drops the event
/// 4. Append the event to the outbox
pub struct InMemoryClient {
    before_send: Option<Arc<dyn BeforeSendCallback>>,
    release: Option<String>,
    environment: Option<String>,
    dist: Option<String>,
    max_breadcrumbs: usize,
    outbox: Mutex<Vec<NativeEvent>>,
    dropped: AtomicUsize,
    flushes: AtomicUsize,
    flush_delay: Mutex<Duration>,
    closed: AtomicBool,
}

impl InMemoryClient {
    pub fn new(options: &NativeOptions) -> Self {
        Self {
            before_send: options.before_send.clone(),
            release: options.release.clone(),
            environment: options.environment.clone(),
            dist: options.dist.clone(),
            max_breadcrumbs: options.max_breadcrumbs,
            outbox: Mutex::new(Vec::new()),
            dropped: AtomicUsize::new(0),
            flushes: AtomicUsize::new(0),
            flush_delay: Mutex::new(Duration::ZERO),
            closed: AtomicBool::new(false),
        }
    }

    /// Events that survived the pipeline, in capture order.
    pub fn sent_events(&self) -> Vec<NativeEvent> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }

    /// Number of events the before-send callback dropped.
    pub fn dropped_count(&self) -> usize {
        self.dropped.load(Ordering::SeqCst)
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Make every subsequent `flush` block for `delay` regardless of its
    /// timeout, as a stalled transport would.
    pub fn set_flush_delay(&self, delay: Duration) {
        if let Ok(mut current) = self.flush_delay.lock() {
            *current = delay;
        }
    }

    fn apply_scope(&self, event: &mut NativeEvent, scope: NativeScope) {
        if scope.level.is_some() {
            event.level = scope.level;
        }
        if event.transaction.is_none() {
            event.transaction = scope.transaction;
        }
        for (key, value) in scope.tags {
            event.tags.entry(key).or_insert(value);
        }
        for (key, value) in scope.extra {
            event.extra.entry(key).or_insert(value);
        }

        let mut breadcrumbs: Vec<NativeBreadcrumb> = scope.breadcrumbs;
        breadcrumbs.append(&mut event.breadcrumbs);
        let overflow = breadcrumbs.len().saturating_sub(self.max_breadcrumbs);
        breadcrumbs.drain(..overflow);
        event.breadcrumbs = breadcrumbs;
    }
}

impl NativeClient for InMemoryClient {
    fn is_enabled(&self) -> bool {
        !self.is_closed()
    }

    fn capture_event(
        &self,
        mut event: NativeEvent,
        scope: Option<NativeScope>,
        hint: Hint,
    ) -> NativeSentryId {
        if self.is_closed() {
            return NativeSentryId::empty();
        }

        if event.event_id.is_empty() {
            event.event_id = NativeSentryId::new();
        }
        if let Some(scope) = scope {
            self.apply_scope(&mut event, scope);
        }
        if event.release.is_none() {
            event.release = self.release.clone();
        }
        if event.environment.is_none() {
            event.environment = self.environment.clone();
        }
        if event.dist.is_none() {
            event.dist = self.dist.clone();
        }

        if let Some(before_send) = &self.before_send {
            match before_send.execute(event, &hint) {
                Some(processed) => event = processed,
                None => {
                    self.dropped.fetch_add(1, Ordering::SeqCst);
                    debug!("Event dropped by before-send callback");
                    return NativeSentryId::empty();
                }
            }
        }

        let id = event.event_id;
        trace!(event_id = %id, "Recorded event");
        if let Ok(mut outbox) = self.outbox.lock() {
            outbox.push(event);
        }
        id
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!("In-memory client closed");
        }
    }

    fn flush(&self, timeout_millis: u64) {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        let delay = self
            .flush_delay
            .lock()
            .map(|delay| *delay)
            .unwrap_or_default();
        if !delay.is_zero() {
            debug!(
                timeout_ms = timeout_millis,
                delay_ms = delay.as_millis() as u64,
                "Simulating stalled flush"
            );
            std::thread::sleep(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::NativeLevel;
    use mockall::mock;

    mock! {
        BeforeSend {}

        impl BeforeSendCallback for BeforeSend {
            fn execute(&self, event: NativeEvent, hint: &Hint) -> Option<NativeEvent>;
        }
    }

    fn options_with(before_send: Option<Arc<dyn BeforeSendCallback>>) -> NativeOptions {
        let mut options = NativeOptions::default();
        options.release = Some("1.0.0".to_string());
        options.max_breadcrumbs = 2;
        options.before_send = before_send;
        options
    }

    #[test]
    fn test_capture_applies_scope_and_options() {
        let client = InMemoryClient::new(&options_with(None));

        let mut scope = NativeScope::default();
        scope.level = Some(NativeLevel::Fatal);
        scope.transaction = Some("checkout".to_string());
        scope.tags.insert("region".to_string(), "eu".to_string());
        scope.breadcrumbs = vec![
            NativeBreadcrumb::new("one"),
            NativeBreadcrumb::new("two"),
            NativeBreadcrumb::new("three"),
        ];

        let mut event = NativeEvent::new();
        event.tags.insert("region".to_string(), "us".to_string());
        let id = client.capture_event(event, Some(scope), Hint::empty());

        let sent = client.sent_events();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].event_id, id);
        assert_eq!(sent[0].level, Some(NativeLevel::Fatal));
        assert_eq!(sent[0].transaction.as_deref(), Some("checkout"));
        assert_eq!(sent[0].tags["region"], "us");
        assert_eq!(sent[0].release.as_deref(), Some("1.0.0"));
        let messages: Vec<_> = sent[0]
            .breadcrumbs
            .iter()
            .filter_map(|b| b.message.as_deref())
            .collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_before_send_drop() {
        let mut before_send = MockBeforeSend::new();
        before_send.expect_execute().times(1).returning(|_, _| None);
        let client = InMemoryClient::new(&options_with(Some(Arc::new(before_send))));

        let id = client.capture_event(NativeEvent::new(), None, Hint::empty());

        assert!(id.is_empty());
        assert!(client.sent_events().is_empty());
        assert_eq!(client.dropped_count(), 1);
    }

    #[test]
    fn test_before_send_receives_hint() {
        let mut before_send = MockBeforeSend::new();
        before_send
            .expect_execute()
            .withf(|_, hint| hint.payload::<&'static str>() == Some(&"attachment"))
            .times(1)
            .returning(|mut event, _| {
                event.logger = Some("processed".to_string());
                Some(event)
            });
        let client = InMemoryClient::new(&options_with(Some(Arc::new(before_send))));

        client.capture_event(
            NativeEvent::new(),
            None,
            Hint::with_payload("attachment"),
        );

        assert_eq!(
            client.sent_events()[0].logger.as_deref(),
            Some("processed")
        );
    }

    #[test]
    fn test_closed_client_ignores_captures() {
        let client = InMemoryClient::new(&NativeOptions::default());
        client.close();

        assert!(!client.is_enabled());
        assert!(client
            .capture_event(NativeEvent::new(), None, Hint::empty())
            .is_empty());
    }

    #[test]
    fn test_flush_delay_ignores_timeout() {
        let client = InMemoryClient::new(&NativeOptions::default());
        client.set_flush_delay(Duration::from_millis(30));

        let started = std::time::Instant::now();
        client.flush(1);

        assert!(started.elapsed() >= Duration::from_millis(30));
        assert_eq!(client.flush_count(), 1);
    }
}
