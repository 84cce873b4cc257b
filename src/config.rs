//! Connection settings for a single appliance.
//!
//! A [`ClientConfig`] describes where the appliance lives, which API
//! version to address, the Basic-auth credentials and how TLS is verified.
//! It performs no I/O; [`HalonClient::new`](crate::HalonClient::new) turns
//! it into a live client.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{HalonError, Result};

/// API version addressed when none is configured.
pub const DEFAULT_API_VERSION: &str = "5.6.0";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// How the transport treats the appliance's certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsMode {
    /// HTTPS, verified against the system trust store.
    #[default]
    Verify,
    /// HTTPS, verified against the PEM bundle at the given path.
    CaBundle(PathBuf),
    /// HTTPS, certificate not verified (self-signed appliances).
    NoVerify,
    /// Plain HTTP.
    Plain,
}

impl TlsMode {
    fn scheme(&self) -> &'static str {
        match self {
            Self::Plain => "http",
            _ => "https",
        }
    }
}

/// Settings for one logical connection to one appliance.
///
/// # Example
///
/// ```
/// use halonapi::{ClientConfig, TlsMode};
///
/// let config = ClientConfig::new("mx1.example.com", "admin", "secret")
///     .port(8443)
///     .tls(TlsMode::NoVerify);
/// assert_eq!(
///     config.base_url().unwrap(),
///     "https://mx1.example.com:8443/api/5.6.0"
/// );
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) host: String,
    pub(crate) user: String,
    pub(crate) password: String,
    pub(crate) version: String,
    pub(crate) port: Option<u16>,
    pub(crate) tls: TlsMode,
    pub(crate) timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("version", &self.version)
            .field("port", &self.port)
            .field("tls", &self.tls)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Create settings for `host` with the default version and verified TLS.
    ///
    /// `host` is either a bare host name (`mx1.example.com`) or a full
    /// `scheme://host[:port]` URL. When a URL is given, its scheme wins over
    /// the one implied by [`TlsMode`].
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
            version: DEFAULT_API_VERSION.to_string(),
            port: None,
            tls: TlsMode::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Load settings from environment variables.
    ///
    /// Requires `HALON_HOST`, `HALON_USER` and `HALON_PASSWORD`. Optional:
    /// `HALON_API_VERSION`, `HALON_PORT`, `HALON_CA_BUNDLE`,
    /// `HALON_VERIFY_TLS` (`false` disables verification) and
    /// `HALON_INSECURE` (`true` selects plain HTTP).
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is unset or `HALON_PORT`
    /// is not a port number.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(
            required_var("HALON_HOST")?,
            required_var("HALON_USER")?,
            required_var("HALON_PASSWORD")?,
        );

        if let Ok(version) = env::var("HALON_API_VERSION") {
            config = config.version(version);
        }

        if let Ok(port) = env::var("HALON_PORT") {
            let port = port
                .parse()
                .map_err(|_| HalonError::Config(format!("HALON_PORT is not a port: {port}")))?;
            config = config.port(port);
        }

        if flag_var("HALON_INSECURE") == Some(true) {
            config = config.tls(TlsMode::Plain);
        } else if let Ok(bundle) = env::var("HALON_CA_BUNDLE") {
            config = config.tls(TlsMode::CaBundle(bundle.into()));
        } else if flag_var("HALON_VERIFY_TLS") == Some(false) {
            config = config.tls(TlsMode::NoVerify);
        }

        Ok(config)
    }

    /// Override the API version segment.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Override the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the TLS mode.
    pub fn tls(mut self, tls: TlsMode) -> Self {
        self.tls = tls;
        self
    }

    /// Set the per-request timeout applied by the transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured TLS mode.
    pub fn tls_mode(&self) -> &TlsMode {
        &self.tls
    }

    /// Compose `scheme://host[:port]/api/{version}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host or version cannot form a valid URL.
    pub fn base_url(&self) -> Result<String> {
        let (scheme, host, url_port) = if self.host.contains("://") {
            let url = Url::parse(&self.host)?;
            let host = url
                .host_str()
                .ok_or_else(|| HalonError::Config(format!("no host in '{}'", self.host)))?
                .to_string();
            (url.scheme().to_string(), host, url.port())
        } else {
            (self.tls.scheme().to_string(), self.host.clone(), None)
        };

        if host.is_empty() {
            return Err(HalonError::Config("host must not be empty".to_string()));
        }

        let port = self
            .port
            .or(url_port)
            .map(|p| format!(":{p}"))
            .unwrap_or_default();
        let version = self.version.trim_matches('/');
        let base = format!("{scheme}://{host}{port}/api/{version}");

        // Validate once so every later join is known to parse.
        Url::parse(&base)?;
        Ok(base)
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| HalonError::Config(format!("{name} environment variable not set")))
}

fn flag_var(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_defaults() {
        let config = ClientConfig::new("mx1.example.com", "admin", "pw");
        assert_eq!(
            config.base_url().unwrap(),
            "https://mx1.example.com/api/5.6.0"
        );
    }

    #[test]
    fn test_base_url_plain_with_port_and_version() {
        let config = ClientConfig::new("10.0.0.5", "admin", "pw")
            .tls(TlsMode::Plain)
            .port(8080)
            .version("5.8.1");
        assert_eq!(config.base_url().unwrap(), "http://10.0.0.5:8080/api/5.8.1");
    }

    #[test]
    fn test_base_url_from_full_url() {
        let config = ClientConfig::new("http://127.0.0.1:4321", "admin", "pw");
        assert_eq!(
            config.base_url().unwrap(),
            "http://127.0.0.1:4321/api/5.6.0"
        );
    }

    #[test]
    fn test_explicit_port_overrides_url_port() {
        let config = ClientConfig::new("https://mx1.example.com:1", "admin", "pw").port(443);
        assert_eq!(
            config.base_url().unwrap(),
            "https://mx1.example.com:443/api/5.6.0"
        );
    }

    #[test]
    fn test_empty_host_rejected() {
        let config = ClientConfig::new("", "admin", "pw");
        assert!(config.base_url().is_err());
    }

    #[test]
    fn test_debug_hides_password() {
        let config = ClientConfig::new("mx1", "admin", "hunter2");
        let debug = format!("{config:?}");
        assert!(debug.contains("mx1"));
        assert!(!debug.contains("hunter2"));
    }
}
