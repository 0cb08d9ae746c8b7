//! SDK bootstrap
//!
//! Pipeline run by [`init`](crate::init):
//! 1. Validate the options
//! 2. Let the native runtime seed its defaults and apply the managed options
//!    through an [`OptionsConfigurationMarshaller`]
//! 3. Close the runtime's global hub; the bridge owns the hub it creates
//! 4. Report seeded integrations back in the effective options
//! 5. Create a native hub, wrap it in a [`BridgedHub`], install it

use bridge_traits::NativeRuntime;
use core_hub::translate::options::effective_options;
use core_hub::{BridgedHub, DisabledHub, Hub, OptionsConfigurationMarshaller};
use core_runtime::logging::{init_logging, LoggingConfig};
use core_runtime::SentryOptions;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::current::replace_hub;
use crate::error::{CoreError, Result};

pub(crate) fn init(runtime: Arc<dyn NativeRuntime>, options: SentryOptions) -> Result<SentryOptions> {
    options.validate()?;

    if options.debug {
        if let Err(err) = init_logging(LoggingConfig::for_options(&options)) {
            debug!(error = %err, "Diagnostic logging already configured");
        }
    }

    let Some(dsn) = options.dsn.as_ref() else {
        warn!("No DSN configured; the SDK stays disabled");
        install(DisabledHub::shared());
        return Ok(options);
    };
    info!(dsn = %dsn.redacted(), "Initializing SDK");

    let marshaller = OptionsConfigurationMarshaller::new(options.clone());
    runtime.init(&marshaller)?;
    let native_options = marshaller.take_configured().ok_or_else(|| {
        CoreError::InitializationFailed(
            "native runtime did not invoke the options configuration".to_string(),
        )
    })?;
    runtime.close();

    let effective = effective_options(&options, &native_options);
    let native_hub = runtime.create_hub(native_options)?;
    install(Arc::new(BridgedHub::new(native_hub)));

    info!(
        integrations = ?effective.integrations,
        "SDK initialized"
    );
    Ok(effective)
}

/// Install `hub` as current and close the hub it replaces.
pub(crate) fn install(hub: Arc<dyn Hub>) {
    let previous = replace_hub(hub);
    previous.close();
}
