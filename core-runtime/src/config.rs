//! # SDK Configuration Module
//!
//! Provides the options model of the unified API.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! [`SentryOptions`] snapshot. The builder validates every value up front so
//! the façade can translate the snapshot into the native options model without
//! further checks.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::SentryOptions;
//!
//! let options = SentryOptions::builder()
//!     .dsn("https://f7f320d5c3a54709be7b28e0f2ca7081@sentry.io/1808954")
//!     .debug(true)
//!     .release("test-release")
//!     .before_send(|mut event| {
//!         event.set_tag("BeforeSend", "was called");
//!         Some(event)
//!     })
//!     .build()
//!     .expect("valid options");
//!
//! assert!(options.is_enabled());
//! ```
//!
//! ## Disabled SDK
//!
//! A missing or blank DSN is not an error: it produces options for which
//! [`SentryOptions::is_enabled`] returns `false`, and `init` keeps the
//! disabled hub installed.
//!
//! ## Effective Configuration
//!
//! `integrations` is filled in by `init` with the integrations the native
//! runtime seeded, so the snapshot returned from `init` reflects the effective
//! configuration rather than only the user-specified subset.

use crate::error::{Error, Result};
use core_protocol::Event;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Maximum number of breadcrumbs a scope may retain.
pub const MAX_BREADCRUMBS_LIMIT: usize = 100;

/// Upper bound for the shutdown flush timeout.
pub const MAX_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(60);

const DEFAULT_ANR_TIMEOUT: Duration = Duration::from_millis(5_000);
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(2_000);

/// Hook invoked with every event before it is sent. Returning `None` drops it.
pub type BeforeSendHook = Arc<dyn Fn(Event) -> Option<Event> + Send + Sync>;

/// Parsed Data Source Name.
///
/// Format: `{scheme}://{public_key}[:{secret}]@{host}[:{port}]/[{path}/]{project_id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dsn {
    raw: String,
    scheme: String,
    public_key: String,
    host: String,
    port: Option<u16>,
    project_id: String,
}

impl Dsn {
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// The DSN with its public key masked, suitable for logs.
    pub fn redacted(&self) -> String {
        let port = self.port.map(|p| format!(":{}", p)).unwrap_or_default();
        format!(
            "{}://***@{}{}/{}",
            self.scheme, self.host, port, self.project_id
        )
    }
}

impl FromStr for Dsn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(Error::InvalidDsn("DSN cannot be empty".to_string()));
        }

        let (scheme, rest) = raw
            .split_once("://")
            .ok_or_else(|| Error::InvalidDsn("missing scheme".to_string()))?;
        if scheme != "http" && scheme != "https" {
            return Err(Error::InvalidDsn(format!("unsupported scheme '{}'", scheme)));
        }

        let (auth, location) = rest
            .split_once('@')
            .ok_or_else(|| Error::InvalidDsn("missing public key".to_string()))?;
        let public_key = auth.split(':').next().unwrap_or_default();
        if public_key.is_empty() {
            return Err(Error::InvalidDsn("missing public key".to_string()));
        }

        let (authority, path) = location
            .split_once('/')
            .ok_or_else(|| Error::InvalidDsn("missing project id".to_string()))?;
        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| Error::InvalidDsn(format!("invalid port '{}'", port)))?;
                (host, Some(port))
            }
            None => (authority, None),
        };
        if host.is_empty() {
            return Err(Error::InvalidDsn("missing host".to_string()));
        }

        let project_id = path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        if project_id.is_empty() || !project_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidDsn(format!(
                "invalid project id '{}'",
                project_id
            )));
        }

        Ok(Self {
            raw: raw.to_string(),
            scheme: scheme.to_string(),
            public_key: public_key.to_string(),
            host: host.to_string(),
            port,
            project_id: project_id.to_string(),
        })
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Options of the unified SDK.
///
/// Use [`SentryOptionsBuilder`] to construct validated instances.
#[derive(Clone)]
pub struct SentryOptions {
    /// Where events are sent. `None` disables the SDK.
    pub dsn: Option<Dsn>,

    /// Enable diagnostic logging in the SDK and the native runtime
    pub debug: bool,

    pub release: Option<String>,

    pub environment: Option<String>,

    pub dist: Option<String>,

    /// Breadcrumbs retained per scope
    pub max_breadcrumbs: usize,

    /// Hook that may mutate or drop events before they are sent
    pub before_send: Option<BeforeSendHook>,

    /// Enable Application-Not-Responding detection in the native runtime
    pub anr_enabled: bool,

    /// Main-thread block duration reported as an ANR
    pub anr_timeout: Duration,

    /// How long closing waits for queued events
    pub shutdown_timeout: Duration,

    /// Integrations active in the native runtime. Filled in by `init`.
    pub integrations: Vec<String>,
}

impl Default for SentryOptions {
    fn default() -> Self {
        Self {
            dsn: None,
            debug: false,
            release: None,
            environment: None,
            dist: None,
            max_breadcrumbs: MAX_BREADCRUMBS_LIMIT,
            before_send: None,
            anr_enabled: true,
            anr_timeout: DEFAULT_ANR_TIMEOUT,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            integrations: Vec::new(),
        }
    }
}

impl fmt::Debug for SentryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentryOptions")
            .field("dsn", &self.dsn.as_ref().map(Dsn::redacted))
            .field("debug", &self.debug)
            .field("release", &self.release)
            .field("environment", &self.environment)
            .field("dist", &self.dist)
            .field("max_breadcrumbs", &self.max_breadcrumbs)
            .field(
                "before_send",
                &self.before_send.as_ref().map(|_| "BeforeSendHook { ... }"),
            )
            .field("anr_enabled", &self.anr_enabled)
            .field("anr_timeout", &self.anr_timeout)
            .field("shutdown_timeout", &self.shutdown_timeout)
            .field("integrations", &self.integrations)
            .finish()
    }
}

impl SentryOptions {
    /// Creates a new builder for constructing `SentryOptions`.
    pub fn builder() -> SentryOptionsBuilder {
        SentryOptionsBuilder::default()
    }

    /// Whether a DSN is configured.
    pub fn is_enabled(&self) -> bool {
        self.dsn.is_some()
    }

    /// Validates the options and returns an error if invalid.
    ///
    /// This checks:
    /// - Breadcrumb capacity does not exceed the limit
    /// - The ANR timeout is positive when ANR detection is enabled
    /// - The shutdown timeout is at most one minute
    pub fn validate(&self) -> Result<()> {
        if self.max_breadcrumbs > MAX_BREADCRUMBS_LIMIT {
            return Err(Error::Config(format!(
                "max_breadcrumbs exceeds the limit of {}",
                MAX_BREADCRUMBS_LIMIT
            )));
        }

        if self.anr_enabled && self.anr_timeout.is_zero() {
            return Err(Error::Config(
                "ANR detection enabled with a zero timeout. \
                 Disable ANR detection or set a positive anr_timeout."
                    .to_string(),
            ));
        }

        if self.shutdown_timeout > MAX_SHUTDOWN_TIMEOUT {
            return Err(Error::Config(format!(
                "shutdown_timeout exceeds the maximum of {}s",
                MAX_SHUTDOWN_TIMEOUT.as_secs()
            )));
        }

        Ok(())
    }
}

/// Builder for constructing [`SentryOptions`] instances.
#[derive(Default)]
pub struct SentryOptionsBuilder {
    dsn: Option<String>,
    debug: bool,
    release: Option<String>,
    environment: Option<String>,
    dist: Option<String>,
    max_breadcrumbs: Option<usize>,
    before_send: Option<BeforeSendHook>,
    anr_enabled: Option<bool>,
    anr_timeout: Option<Duration>,
    shutdown_timeout: Option<Duration>,
}

impl SentryOptionsBuilder {
    /// Sets the DSN. A blank string leaves the SDK disabled.
    pub fn dsn(mut self, dsn: impl Into<String>) -> Self {
        self.dsn = Some(dsn.into());
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn release(mut self, release: impl Into<String>) -> Self {
        self.release = Some(release.into());
        self
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn dist(mut self, dist: impl Into<String>) -> Self {
        self.dist = Some(dist.into());
        self
    }

    /// Sets the breadcrumb capacity (default 100, maximum 100).
    pub fn max_breadcrumbs(mut self, max: usize) -> Self {
        self.max_breadcrumbs = Some(max);
        self
    }

    /// Sets the before-send hook.
    ///
    /// ```
    /// use core_runtime::config::SentryOptions;
    ///
    /// let options = SentryOptions::builder()
    ///     .before_send(|event| {
    ///         if event.logger.as_deref() == Some("noisy") {
    ///             None
    ///         } else {
    ///             Some(event)
    ///         }
    ///     })
    ///     .build()
    ///     .unwrap();
    /// assert!(options.before_send.is_some());
    /// ```
    pub fn before_send<F>(mut self, hook: F) -> Self
    where
        F: Fn(Event) -> Option<Event> + Send + Sync + 'static,
    {
        self.before_send = Some(Arc::new(hook));
        self
    }

    pub fn anr_enabled(mut self, enabled: bool) -> Self {
        self.anr_enabled = Some(enabled);
        self
    }

    pub fn anr_timeout(mut self, timeout: Duration) -> Self {
        self.anr_timeout = Some(timeout);
        self
    }

    pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = Some(timeout);
        self
    }

    /// Builds the final `SentryOptions` instance.
    ///
    /// # Errors
    ///
    /// - The DSN is present, not blank, and malformed
    /// - Any value fails [`SentryOptions::validate`]
    pub fn build(self) -> Result<SentryOptions> {
        let dsn = match self.dsn.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(raw.parse::<Dsn>()?),
            _ => None,
        };

        let defaults = SentryOptions::default();
        let options = SentryOptions {
            dsn,
            debug: self.debug,
            release: self.release,
            environment: self.environment,
            dist: self.dist,
            max_breadcrumbs: self.max_breadcrumbs.unwrap_or(defaults.max_breadcrumbs),
            before_send: self.before_send,
            anr_enabled: self.anr_enabled.unwrap_or(defaults.anr_enabled),
            anr_timeout: self.anr_timeout.unwrap_or(defaults.anr_timeout),
            shutdown_timeout: self.shutdown_timeout.unwrap_or(defaults.shutdown_timeout),
            integrations: Vec::new(),
        };

        options.validate()?;

        Ok(options)
    }
}
