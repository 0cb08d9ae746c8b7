//! Capture demo
//!
//! Initializes the SDK on the in-memory native runtime, configures the scope,
//! captures a few events and prints what reached the outbox.
//!
//! Run with: `cargo run -p core-service --example capture_demo`

use bridge_memory::InMemoryRuntime;
use core_service::{self as sdk, Breadcrumb, Level, SentryOptions};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
struct PaymentError;

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("card declined")
    }
}

impl std::error::Error for PaymentError {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = SentryOptions::builder()
        .dsn("https://f7f320d5c3a54709be7b28e0f2ca7081@sentry.io/1808954")
        .debug(true)
        .release("capture-demo@0.1.0")
        .environment("demo")
        .before_send(|mut event| {
            event.set_tag("BeforeSend", "was called");
            Some(event)
        })
        .build()?;

    let runtime = Arc::new(InMemoryRuntime::new());
    let effective = sdk::init(runtime.clone(), options)?;
    println!("Integrations: {:?}", effective.integrations);

    sdk::configure_scope(|scope| {
        scope.set_tag("screen", "checkout");
        scope.set_extra("cart_items", 3);
    });
    sdk::add_breadcrumb(Breadcrumb::new("pay tapped").with_category("ui"));

    let message_id = sdk::capture_message("Checkout started", Level::Info);
    let error_id = sdk::run_in_scope(
        |scope| scope.set_transaction(Some("payment")),
        || sdk::capture_error(&PaymentError),
    );
    println!("Captured {} and {}", message_id, error_id);

    sdk::configure_scope_async(|mut scope| async move {
        scope.set_tag("user_tier", "gold");
        scope
    })
    .await;

    let flushed = sdk::flush(Duration::from_secs(2)).await;
    println!("Flushed: {}", flushed);

    if let Some(hub) = runtime.last_hub() {
        for event in hub.default_client().sent_events() {
            println!(
                "{} [{:?}] {} tags={:?}",
                event.event_id,
                event.level,
                event.message.as_deref().unwrap_or_default(),
                event.tags
            );
        }
    }

    sdk::close();
    Ok(())
}
