//! Structured error handling for image analysis.

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while analyzing images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The image input is not something that can be sent as inline image data.
    UnsupportedFormat,
    /// Resolving the image into its base64 representation failed.
    Encoding,
    /// The remote service answered with a non-success HTTP status.
    Transport,
    /// The request never produced an HTTP response.
    NetworkError,
    /// Serialization/deserialization error.
    Serialization,
    /// Configuration error.
    Configuration,
}

/// Structured error type with classification and an optional HTTP status.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<String>,
    /// HTTP status code returned by the remote service, if any.
    pub status_code: Option<u16>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            status_code: None,
            source: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self::new(kind).with_source(source)
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attaches the HTTP status code returned by the remote service.
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Creates a new unsupported format error.
    pub fn unsupported_format() -> Self {
        Self::new(ErrorKind::UnsupportedFormat)
    }

    /// Creates a new encoding error.
    pub fn encoding() -> Self {
        Self::new(ErrorKind::Encoding)
    }

    /// Creates a new transport error for the given HTTP status.
    pub fn transport(status_code: u16) -> Self {
        Self::new(ErrorKind::Transport)
            .with_status_code(status_code)
            .with_message(format!("HTTP error, status: {status_code}"))
    }

    /// Creates a new network error.
    pub fn network_error() -> Self {
        Self::new(ErrorKind::NetworkError)
    }

    /// Creates a new serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }

    /// Returns the HTTP status code, if the error came from a response.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::from_source(ErrorKind::Serialization, error).with_message("Invalid JSON payload")
    }
}

impl From<url::ParseError> for Error {
    fn from(error: url::ParseError) -> Self {
        Self::from_source(ErrorKind::Configuration, error).with_message("Invalid endpoint URL")
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::network_error()
                .with_message("Request timed out")
                .with_source(error)
        } else if error.is_connect() {
            Self::network_error()
                .with_message("Connection failed")
                .with_source(error)
        } else if error.is_builder() {
            Self::configuration()
                .with_message(error.to_string())
                .with_source(error)
        } else {
            Self::network_error()
                .with_message(error.to_string())
                .with_source(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_error_new() {
        let error = Error::new(ErrorKind::Encoding);
        assert_eq!(error.kind, ErrorKind::Encoding);
        assert!(error.message.is_none());
        assert!(error.status_code.is_none());
        assert!(error.source.is_none());
    }

    #[test]
    fn test_transport_error_carries_status() {
        let error = Error::transport(503);
        assert_eq!(error.kind(), ErrorKind::Transport);
        assert_eq!(error.status_code(), Some(503));
        assert!(error.to_string().contains("503"));
    }

    #[test]
    fn test_error_display() {
        let error = Error::unsupported_format().with_message("not an image");

        let display_str = error.to_string();
        assert_eq!(display_str, "[unsupported_format]: not an image");
    }

    #[test]
    fn test_error_display_without_message() {
        let error = Error::configuration();
        assert_eq!(error.to_string(), "[configuration]");
    }

    #[test]
    fn test_from_serde() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error = Error::from(source);

        assert_eq!(error.kind, ErrorKind::Serialization);
        assert!(error.source.is_some());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            ErrorKind::from_str("unsupported_format").unwrap(),
            ErrorKind::UnsupportedFormat
        );
        assert_eq!(ErrorKind::from_str("transport").unwrap(), ErrorKind::Transport);
        assert!(ErrorKind::from_str("invalid").is_err());
        assert_eq!(Error::encoding().kind_str(), "encoding");
    }
}
