//! Defines the crate's primary error type `Error` and a convenience `Result` alias.
//!
//! Uses the `thiserror` crate for ergonomic error definition and provides `From`
//! implementations to convert common external errors into `Error` variants.
//! Errors that do not implement `Clone` are wrapped in `Arc` to allow `Error` to be cloneable.

use reqwest::{Method, StatusCode, Url};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for everything the client can fail with.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// A base URL or a request path could not be parsed or joined.
    #[error("URL Error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The base URL parsed but cannot have paths resolved against it (e.g. `mailto:`).
    #[error("URL Error: {0} cannot be used as a base URL")]
    BaseUrl(String),

    /// The configured user agent is not a valid header value.
    #[error("Invalid User-Agent {0:?}: not a valid header value")]
    UserAgent(String),

    /// The API key environment variable is missing.
    #[error("{0} environment variable is not set: cannot initialize client")]
    MissingApiKey(&'static str),

    /// The API key environment variable is set but is not valid Unicode.
    #[error("{0} environment variable is not valid Unicode: cannot initialize client")]
    InvalidApiKey(&'static str),

    /// An unknown unit system name was supplied.
    #[error("Unknown unit system '{0}'. Supported: standard, metric, imperial.")]
    Units(String),

    /// Request paths are resolved against the base URL and must not start with `/`.
    #[error("Request path {0:?} must be relative (no leading '/')")]
    AbsolutePath(String),

    /// The request body could not be JSON encoded.
    #[error("JSON Encoding Error: {0}")]
    Encode(Arc<serde_json::Error>),

    /// A successful response body could not be JSON decoded.
    #[error("JSON Parsing Error: {0}")]
    Decode(Arc<serde_json::Error>),

    /// Error originating from the HTTP transport (`reqwest`), passed through untouched.
    #[error("HTTP Error: {0}")]
    Transport(Arc<reqwest::Error>),

    /// Writing the response body into a raw sink failed.
    #[error("I/O Error: {0}")]
    Io(Arc<std::io::Error>),

    /// The API answered with a non-2xx status.
    #[error(transparent)]
    Api(#[from] ErrorResponse),
}

/// A specialized `Result` type using the crate's `Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Reports the error caused by an API request.
///
/// Formats as `<METHOD> <URL>: <STATUS> <message>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub method: Method,
    pub url: Url,
    pub status: StatusCode,
    /// Server-supplied message, or the raw body when it was not the usual JSON shape.
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} {}",
            self.method,
            self.url,
            self.status.as_u16(),
            self.message
        )
    }
}

impl std::error::Error for ErrorResponse {}

// --- From implementations ---
// serde_json errors are mapped explicitly since they can mean either encoding or decoding.

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(Arc::new(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(Arc::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_formats_method_url_status_and_message() {
        let err = ErrorResponse {
            method: Method::GET,
            url: Url::parse("http://localhost:8080/data/2.5/weather?q=Nowhere&appid=k").unwrap(),
            status: StatusCode::NOT_FOUND,
            message: "city not found".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "GET http://localhost:8080/data/2.5/weather?q=Nowhere&appid=k: 404 city not found"
        );
        // Wrapping in the crate error must not change the text.
        assert_eq!(Error::from(err.clone()).to_string(), err.to_string());
    }

    #[test]
    fn missing_api_key_message() {
        let err = Error::MissingApiKey("OPEN_WEATHER_API_KEY");
        assert_eq!(
            err.to_string(),
            "OPEN_WEATHER_API_KEY environment variable is not set: cannot initialize client"
        );
    }
}
