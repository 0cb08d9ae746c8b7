//! Native Runtime Contract
//!
//! Entry point of the native telemetry SDK: global initialization and hub
//! construction.

use std::sync::Arc;

use crate::callbacks::OptionsConfiguration;
use crate::error::Result;
use crate::hub::NativeHub;
use crate::options::NativeOptions;

/// Native runtime trait
///
/// # Initialization
///
/// `init` seeds a fresh [`NativeOptions`] with the platform defaults
/// (integrations, event processors) and hands it to the configuration callback
/// before the runtime's own global hub is started. `create_hub` builds an
/// independent hub from a caller-owned options instance.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::{NativeRuntime, OptionsConfiguration, NativeOptions};
///
/// struct SetDsn;
///
/// impl OptionsConfiguration for SetDsn {
///     fn configure(&self, options: &mut NativeOptions) {
///         options.dsn = Some("https://key@example.com/1".into());
///     }
/// }
///
/// fn start(runtime: &dyn NativeRuntime) -> Result<()> {
///     runtime.init(&SetDsn)?;
///     let hub = runtime.create_hub(NativeOptions::default())?;
///     Ok(())
/// }
/// ```
pub trait NativeRuntime: Send + Sync {
    /// Initialize the runtime's global state.
    fn init(&self, configuration: &dyn OptionsConfiguration) -> Result<()>;

    /// Create a hub bound to a client built from `options`.
    fn create_hub(&self, options: NativeOptions) -> Result<Arc<dyn NativeHub>>;

    /// Shut down the runtime's global state.
    fn close(&self);
}
