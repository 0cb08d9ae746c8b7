//! End-to-end tests of the SDK façade over the in-memory runtime.
//!
//! The current hub is process-wide, so every test holds `SERIAL` for its
//! whole duration.

use async_trait::async_trait;
use bridge_memory::{InMemoryHub, InMemoryRuntime, DEFAULT_INTEGRATIONS};
use core_service::{self as sdk, Breadcrumb, Client, Event, Level, Scope, SentryId, SentryOptions};
use mockall::mock;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

const DSN: &str = "https://f7f320d5c3a54709be7b28e0f2ca7081@sentry.io/1808954";

static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn start(options: SentryOptions) -> (Arc<InMemoryRuntime>, Arc<InMemoryHub>, SentryOptions) {
    let runtime = Arc::new(InMemoryRuntime::new());
    let effective = sdk::init(runtime.clone(), options).expect("init succeeds");
    let hub = runtime.last_hub().expect("native hub created");
    (runtime, hub, effective)
}

fn enabled_options() -> SentryOptions {
    SentryOptions::builder().dsn(DSN).build().unwrap()
}

mock! {
    ManagedClient {}

    #[async_trait]
    impl Client for ManagedClient {
        fn is_enabled(&self) -> bool;
        fn capture_event(&self, event: Event, scope: Option<Scope>) -> SentryId;
        async fn flush(&self, timeout: Duration) -> bool;
        fn close(&self);
    }
}

#[derive(Debug)]
struct CheckoutError {
    source: std::num::ParseIntError,
}

impl fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("checkout failed")
    }
}

impl std::error::Error for CheckoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[test]
fn test_operations_are_noops_before_init() {
    let _serial = serial();
    sdk::close();

    assert!(!sdk::is_enabled());
    assert!(sdk::capture_message("x", Level::Info).is_nil());
    assert!(sdk::last_event_id().is_nil());
    let mut ran = false;
    sdk::configure_scope(|_| ran = true);
    assert!(!ran);
}

#[test]
fn test_init_without_dsn_stays_disabled() {
    let _serial = serial();
    let runtime = Arc::new(InMemoryRuntime::new());
    let options = SentryOptions::builder().dsn("").build().unwrap();

    let effective = sdk::init(runtime.clone(), options).unwrap();

    assert!(!sdk::is_enabled());
    assert!(effective.integrations.is_empty());
    assert!(sdk::capture_message("x", Level::Info).is_nil());
    assert_eq!(runtime.init_calls(), 0);
    assert_eq!(runtime.hub_count(), 0);
}

#[test]
fn test_init_reports_effective_integrations() {
    let _serial = serial();
    let (runtime, hub, effective) = start(enabled_options());

    assert!(sdk::is_enabled());
    assert_eq!(effective.integrations, DEFAULT_INTEGRATIONS.to_vec());
    assert_eq!(hub.registered_integrations(), DEFAULT_INTEGRATIONS.to_vec());
    assert_eq!(runtime.init_calls(), 1);
    assert!(!runtime.is_initialized());

    sdk::close();
}

#[test]
fn test_options_reach_native_hub() {
    let _serial = serial();
    let options = SentryOptions::builder()
        .dsn(DSN)
        .release("1.0.0")
        .environment("qa")
        .anr_enabled(false)
        .shutdown_timeout(Duration::from_millis(500))
        .build()
        .unwrap();
    let (_runtime, hub, _) = start(options);

    let native = hub.options();
    assert_eq!(native.dsn.as_deref(), Some(DSN));
    assert_eq!(native.release.as_deref(), Some("1.0.0"));
    assert_eq!(native.environment.as_deref(), Some("qa"));
    assert!(!native.anr_enabled);
    assert_eq!(native.shutdown_timeout_millis, 500);

    sdk::capture_message("tagged", Level::Info);
    let sent = hub.default_client().sent_events();
    assert_eq!(sent[0].release.as_deref(), Some("1.0.0"));

    sdk::close();
}

#[test]
fn test_capture_message_with_scope_and_breadcrumbs() {
    let _serial = serial();
    let (_runtime, hub, _) = start(enabled_options());

    sdk::configure_scope(|scope| {
        scope.set_tag("screen", "main");
        scope.set_transaction(Some("launch"));
    });
    sdk::add_breadcrumb(Breadcrumb::new("button tapped").with_category("ui"));
    let id = sdk::capture_message("Hello", Level::Warning);

    assert!(!id.is_nil());
    assert_eq!(sdk::last_event_id(), id);
    let sent = hub.default_client().sent_events();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message.as_deref(), Some("Hello"));
    assert_eq!(sent[0].tags["screen"], "main");
    assert_eq!(sent[0].transaction.as_deref(), Some("launch"));
    assert_eq!(sent[0].breadcrumbs[0].category.as_deref(), Some("ui"));

    sdk::close();
}

#[test]
fn test_capture_error_records_chain() {
    let _serial = serial();
    let (_runtime, hub, _) = start(enabled_options());

    let error = CheckoutError {
        source: "x".parse::<u32>().unwrap_err(),
    };
    sdk::capture_error(&error);

    let sent = hub.default_client().sent_events();
    let types: Vec<_> = sent[0].exceptions.iter().map(|e| e.ty.as_str()).collect();
    assert_eq!(types, vec!["ParseIntError", "CheckoutError"]);

    sdk::close();
}

#[test]
fn test_before_send_tags_and_drops() {
    let _serial = serial();
    let options = SentryOptions::builder()
        .dsn(DSN)
        .before_send(|mut event| {
            if event.level == Some(Level::Debug) {
                return None;
            }
            event.set_tag("BeforeSend", "was called");
            Some(event)
        })
        .build()
        .unwrap();
    let (_runtime, hub, _) = start(options);

    let kept = sdk::capture_message("kept", Level::Info);
    let dropped = sdk::capture_message("noise", Level::Debug);

    assert!(!kept.is_nil());
    assert!(dropped.is_nil());
    let client = hub.default_client();
    assert_eq!(client.sent_events().len(), 1);
    assert_eq!(client.sent_events()[0].tags["BeforeSend"], "was called");
    assert_eq!(client.dropped_count(), 1);

    sdk::close();
}

#[test]
fn test_push_scope_and_run_in_scope() {
    let _serial = serial();
    let (_runtime, hub, _) = start(enabled_options());

    let id = sdk::run_in_scope(
        |scope| scope.set_tag("request", "42"),
        || sdk::capture_message("inside", Level::Info),
    );
    assert_eq!(hub.scope_depth(), 1);

    {
        let _guard = sdk::push_scope_with_state("worker-7");
        assert_eq!(hub.scope_depth(), 2);
        assert_eq!(hub.current_scope().extra[sdk::SCOPE_STATE_KEY], "worker-7");
    }
    assert_eq!(hub.scope_depth(), 1);

    sdk::capture_message("outside", Level::Info);
    let sent = hub.default_client().sent_events();
    assert_eq!(sdk::SentryId::from_uuid(*sent[0].event_id.as_uuid()), id);
    assert_eq!(sent[0].tags["request"], "42");
    assert!(sent[1].tags.is_empty());

    sdk::close();
}

#[test]
fn test_with_scope_does_not_leak() {
    let _serial = serial();
    let (_runtime, hub, _) = start(enabled_options());

    sdk::with_scope(|scope| scope.set_tag("temporary", "1"));

    assert_eq!(hub.scope_depth(), 1);
    assert!(hub.current_scope().tags.is_empty());

    sdk::close();
}

#[test]
fn test_capture_event_with_scope_override() {
    let _serial = serial();
    let (_runtime, hub, _) = start(enabled_options());
    sdk::configure_scope(|scope| scope.set_tag("global", "yes"));

    let mut scope = Scope::new();
    scope.set_tag("local", "yes");
    sdk::capture_event_with_scope(Event::from_message("override", Level::Info), scope);

    let sent = hub.default_client().sent_events();
    assert!(sent[0].tags.get("global").is_none());
    assert_eq!(sent[0].tags["local"], "yes");

    sdk::close();
}

#[test]
fn test_bound_client_receives_captures() {
    let _serial = serial();
    let (_runtime, hub, _) = start(enabled_options());

    let mut client = MockManagedClient::new();
    client
        .expect_capture_event()
        .withf(|event, scope| {
            event.message.as_deref() == Some("routed")
                && scope
                    .as_ref()
                    .is_some_and(|scope| scope.tags.get("bound").map(String::as_str) == Some("yes"))
        })
        .times(1)
        .returning(|event, _| event.event_id);
    client.expect_is_enabled().return_const(true);
    client.expect_flush().returning(|_| true);
    client.expect_close().return_const(());

    sdk::bind_client(Arc::new(client));
    sdk::configure_scope(|scope| scope.set_tag("bound", "yes"));
    let event = Event::from_message("routed", Level::Info);
    let expected = event.event_id;

    assert_eq!(sdk::capture_event(event), expected);
    assert!(hub.default_client().sent_events().is_empty());

    sdk::close();
}

#[test]
fn test_close_disables_and_detaches_previous_hub() {
    let _serial = serial();
    let (_runtime, hub, _) = start(enabled_options());
    let previous = sdk::current_hub();

    sdk::close();

    assert!(!sdk::is_enabled());
    assert!(hub.is_closed());
    assert!(hub.default_client().is_closed());
    assert!(previous.capture_message("late", Level::Info).is_nil());
    assert!(hub.default_client().sent_events().is_empty());
}

#[test]
fn test_reinit_replaces_and_closes_previous_hub() {
    let _serial = serial();
    let (_first_runtime, first_hub, _) = start(enabled_options());
    let (_second_runtime, second_hub, _) = start(enabled_options());

    assert!(first_hub.is_closed());
    assert!(!second_hub.is_closed());
    sdk::capture_message("second", Level::Info);
    assert_eq!(second_hub.default_client().sent_events().len(), 1);

    sdk::close();
}

#[test]
fn test_invalid_options_are_rejected() {
    let _serial = serial();
    sdk::close();
    let mut options = enabled_options();
    options.max_breadcrumbs = 1_000;

    let result = sdk::init(Arc::new(InMemoryRuntime::new()), options);

    assert!(matches!(result, Err(sdk::CoreError::Config(_))));
    assert!(!sdk::is_enabled());
}

#[test]
fn test_concurrent_init_and_close_keep_current_hub_consistent() {
    let _serial = serial();
    sdk::close();

    let created: Vec<Arc<InMemoryHub>> = std::thread::scope(|s| {
        let writers: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    let mut hubs = Vec::new();
                    for _ in 0..25 {
                        let (_runtime, hub, _) = start(enabled_options());
                        hubs.push(hub);
                        sdk::close();
                    }
                    hubs
                })
            })
            .collect();

        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..200 {
                    let hub = sdk::current_hub();
                    hub.is_enabled();
                    hub.capture_message("racing", Level::Info);
                    hub.add_breadcrumb(Breadcrumb::new("racing"));
                    drop(hub.push_scope());
                }
            });
        }

        writers
            .into_iter()
            .flat_map(|writer| writer.join().expect("writer thread finished"))
            .collect()
    });

    assert_eq!(created.len(), 100);
    assert!(created.iter().all(|hub| hub.is_closed()));
    assert!(!sdk::is_enabled());
    assert!(sdk::capture_message("after", Level::Info).is_nil());
}

#[tokio::test]
async fn test_flush_returns_within_timeout() {
    let _serial = serial();
    let (_runtime, hub, _) = start(enabled_options());

    assert!(sdk::flush(Duration::from_secs(1)).await);

    hub.default_client().set_flush_delay(Duration::from_secs(5));
    let started = std::time::Instant::now();
    assert!(!sdk::flush(Duration::from_millis(50)).await);
    assert!(started.elapsed() < Duration::from_secs(1));

    hub.default_client().set_flush_delay(Duration::ZERO);
    sdk::close();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_configure_scope_async() {
    let _serial = serial();
    let (_runtime, hub, _) = start(enabled_options());

    sdk::configure_scope_async(|mut scope| async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        scope.set_tag("async", "done");
        scope
    })
    .await;

    assert_eq!(hub.current_scope().tags["async"], "done");
    sdk::close();
}
