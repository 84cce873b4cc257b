//! Error types for Halon API operations.

use thiserror::Error;

/// Errors that can occur during Halon API operations.
#[derive(Debug, Error)]
pub enum HalonError {
    /// Client construction input is missing or invalid.
    #[error("Halon configuration error: {0}")]
    Config(String),

    /// The HTTP call itself could not complete (DNS, TLS, connection refused).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The appliance rejected the request and said why.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// The appliance rejected the request without a readable `message`.
    #[error("{message}")]
    UnparseableRemote { status: u16, message: String },

    /// The operation is deliberately not implemented by this client.
    #[error("{operation} is unimplemented")]
    Unsupported { operation: &'static str },

    /// An argument combination the appliance would never accept.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A successful response did not have the expected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// JSON encoding or decoding error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Coarse classification of a [`HalonError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Transport,
    Remote,
    UnparseableRemote,
    Unsupported,
    InvalidArgument,
    UnexpectedResponse,
}

impl HalonError {
    /// The tagged kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) | Self::Url(_) => ErrorKind::Config,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Remote { .. } => ErrorKind::Remote,
            Self::UnparseableRemote { .. } => ErrorKind::UnparseableRemote,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::UnexpectedResponse(_) | Self::Parse(_) => ErrorKind::UnexpectedResponse,
        }
    }

    /// HTTP status of the failed response, when the appliance answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } | Self::UnparseableRemote { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }

    pub(crate) fn missing_field(field: &str) -> Self {
        Self::UnexpectedResponse(format!("response has no '{field}' field"))
    }
}

/// Result type alias for Halon operations.
pub type Result<T> = core::result::Result<T, HalonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_displays_appliance_message() {
        let err = HalonError::Remote {
            status: 404,
            message: "bad id".to_string(),
        };
        assert_eq!(err.to_string(), "bad id");
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_unsupported_has_no_status() {
        let err = HalonError::unsupported("run_hsl_script");
        assert_eq!(err.kind(), ErrorKind::Unsupported);
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("unimplemented"));
    }
}
