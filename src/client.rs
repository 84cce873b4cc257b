//! Halon API client.
//!
//! Holds the connection context and dispatches every request. Resource
//! accessors live in [`crate::resources`] as inherent methods that build a
//! [`RequestSpec`] and hand it to [`HalonClient::execute`].

use std::path::Path;
use std::sync::Arc;

use reqwest::{Certificate, Client, Response, StatusCode};
use serde_json::Value;

use crate::config::{ClientConfig, TlsMode};
use crate::error::{HalonError, Result};
use crate::outcome::Outcome;
use crate::request::RequestSpec;

const USER_AGENT: &str = concat!("halonapi/", env!("CARGO_PKG_VERSION"));

/// Client for one Halon appliance.
///
/// Immutable after construction. Cloning is cheap; clones share the same
/// connection pool and credentials.
///
/// # Example
///
/// ```no_run
/// use halonapi::{ClientConfig, HalonClient, TlsMode};
///
/// # async fn example() -> halonapi::Result<()> {
/// let config = ClientConfig::new("mx1.example.com", "admin", "secret")
///     .tls(TlsMode::NoVerify);
/// let client = HalonClient::new(config)?;
///
/// println!("uptime: {}s", client.get_system_uptime().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HalonClient {
    http: Client,
    base_url: Arc<str>,
    user: Arc<str>,
    password: Arc<str>,
}

impl std::fmt::Debug for HalonClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HalonClient")
            .field("base_url", &&*self.base_url)
            .field("user", &&*self.user)
            .finish_non_exhaustive()
    }
}

impl HalonClient {
    /// Create a client from environment variables.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or the resulting
    /// configuration is invalid.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a client from explicit settings.
    ///
    /// No network I/O happens here. A CA bundle, if configured, is read
    /// from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, the CA bundle cannot be
    /// loaded, or the transport cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url()?;

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout);

        match &config.tls {
            TlsMode::Verify | TlsMode::Plain => {}
            TlsMode::CaBundle(path) => {
                for cert in load_ca_bundle(path)? {
                    builder = builder.add_root_certificate(cert);
                }
            }
            TlsMode::NoVerify => {
                tracing::warn!(
                    base_url = %base_url,
                    "TLS certificate verification disabled for this client"
                );
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        let http = builder.build().map_err(HalonError::Transport)?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            user: config.user.into(),
            password: config.password.into(),
        })
    }

    /// The `scheme://host[:port]/api/{version}` prefix of every request.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and normalize the response.
    ///
    /// Returns [`Outcome::NoContent`] for `204`, the decoded body for any
    /// other 2xx, and a translated error for everything else.
    ///
    /// # Errors
    ///
    /// Returns [`HalonError::Transport`] when the call cannot complete,
    /// [`HalonError::Remote`] or [`HalonError::UnparseableRemote`] for a
    /// non-2xx status.
    #[tracing::instrument(
        level = "debug",
        skip(self, spec),
        fields(method = %spec.method(), path = spec.path())
    )]
    pub async fn execute(&self, spec: RequestSpec) -> Result<Outcome> {
        let url = format!("{}{}", self.base_url, spec.path());

        let mut request = self
            .http
            .request(spec.method().clone(), url)
            .basic_auth(&*self.user, Some(&*self.password));

        if !spec.query_pairs().is_empty() {
            request = request.query(spec.query_pairs());
        }

        let response = request
            .json(spec.payload_map())
            .send()
            .await
            .map_err(HalonError::Transport)?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "response received");

        if !status.is_success() {
            return Err(Self::translate_error(response).await);
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Outcome::NoContent);
        }

        let body = response.bytes().await.map_err(HalonError::Transport)?;
        let value: Value = serde_json::from_slice(&body)?;
        Ok(Outcome::Json(value))
    }

    /// Turn a failed response into an error carrying the appliance's message.
    ///
    /// Falls back to the transport's own description when the body is not
    /// JSON or has no `message`.
    async fn translate_error(response: Response) -> HalonError {
        let status = response.status();
        let fallback = match response.error_for_status_ref() {
            Err(e) => e.to_string(),
            Ok(_) => format!("HTTP {status}"),
        };

        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<Value>(&body).ok())
            .and_then(|json| {
                json.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            });

        match message {
            Some(message) => HalonError::Remote {
                status: status.as_u16(),
                message,
            },
            None => HalonError::UnparseableRemote {
                status: status.as_u16(),
                message: fallback,
            },
        }
    }
}

/// Read every certificate in a PEM bundle.
fn load_ca_bundle(path: &Path) -> Result<Vec<Certificate>> {
    let pem = std::fs::read(path).map_err(|e| {
        HalonError::Config(format!("failed to read CA bundle {}: {e}", path.display()))
    })?;
    let certs = Certificate::from_pem_bundle(&pem)
        .map_err(|e| HalonError::Config(format!("invalid CA bundle: {e}")))?;
    if certs.is_empty() {
        return Err(HalonError::Config(format!(
            "no certificates in CA bundle {}",
            path.display()
        )));
    }
    Ok(certs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let config = ClientConfig::new("mx1.example.com", "admin", "test-password");
        let client = HalonClient::new(config).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("HalonClient"));
        assert!(debug.contains("base_url"));
        assert!(!debug.contains("test-password"));
    }

    #[test]
    fn test_base_url_is_composed() {
        let config = ClientConfig::new("mx1.example.com", "admin", "pw")
            .tls(TlsMode::NoVerify)
            .version("5.9.0");
        let client = HalonClient::new(config).unwrap();
        assert_eq!(client.base_url(), "https://mx1.example.com/api/5.9.0");
    }

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    #[test]
    fn test_ca_bundle_loads_every_certificate() {
        let certs = load_ca_bundle(&fixture("ca-bundle.pem")).unwrap();
        assert_eq!(certs.len(), 2);

        let config = ClientConfig::new("mx1.example.com", "admin", "pw")
            .tls(TlsMode::CaBundle(fixture("ca-bundle.pem")));
        assert!(HalonClient::new(config).is_ok());
    }

    #[test]
    fn test_ca_bundle_without_certificates_is_config_error() {
        let err = load_ca_bundle(&fixture("not-a-bundle.txt")).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Config);
    }

    #[test]
    fn test_missing_ca_bundle_is_config_error() {
        let config = ClientConfig::new("mx1.example.com", "admin", "pw")
            .tls(TlsMode::CaBundle("/nonexistent/ca.pem".into()));
        let err = HalonClient::new(config).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Config);
    }
}
