use thiserror::Error;
pub use url::ParseError as UrlParseError;

/// Error types for the Telesocial API client.
#[derive(Error, Debug)]
pub enum TelesocialError {
    /// No HTTP response was obtained (DNS, connection, or TLS failure).
    ///
    /// This variant is never used for a response carrying an unexpected
    /// status code; those map to [`TelesocialError::Service`].
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server responded, but outside the accepted status policy for the
    /// endpoint, or with a body that could not be interpreted as expected.
    #[error("Service error {code}: {message}")]
    Service { code: u16, message: String },

    /// Error building a request URL.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] UrlParseError),

    /// Local file access failed during an upload or download.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl TelesocialError {
    pub(crate) fn service(code: u16, message: impl Into<String>) -> Self {
        TelesocialError::Service {
            code,
            message: message.into(),
        }
    }
}

/// Result type for Telesocial API operations.
pub type TelesocialResult<T> = Result<T, TelesocialError>;
