//! Error types for public cloud information queries.

use std::error::Error as _;

use thiserror::Error;

/// Errors that can occur while querying the information service.
#[derive(Debug, Error)]
pub enum InfoError {
    /// The server answered with a non-success status code.
    #[error("the server responded with an error: http {0}")]
    Http(u16),

    /// Request timed out.
    #[error("the server did not respond in a timely fashion")]
    Timeout,

    /// TLS handshake or certificate validation failed.
    #[error("there was a problem with the security of this request: {0}")]
    Tls(String),

    /// The server could not be reached.
    #[error("there was a problem connecting to the server, please check your network connection: {0}")]
    Connection(String),

    /// Any other HTTP request error.
    #[error("request failed: {0}")]
    Request(reqwest::Error),

    /// Response exceeds maximum allowed size.
    #[error("response too large: {0} bytes exceeds limit of {1} bytes")]
    TooLarge(usize, usize),

    /// The server answered successfully but sent no data.
    #[error("no data was returned by the server")]
    EmptyResponse,

    /// The response body was not valid JSON.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// The response document lacks the expected top-level field.
    #[error("response has no '{0}' field")]
    MissingField(String),

    /// The response field exists but has the wrong shape.
    #[error("response field '{field}' is not {expected}")]
    UnexpectedType {
        field: String,
        expected: &'static str,
    },

    /// A record does not carry the attribute a filter refers to.
    #[error("record has no '{0}' attribute")]
    MissingAttribute(String),

    /// A numeric comparison met a value that is not an integer.
    #[error("attribute '{attr}' value '{value}' is not an integer")]
    NotNumeric { attr: String, value: String },

    /// A `<`/`>` filter value is not an integer.
    #[error("filter value '{value}' for '{attr}' is not an integer")]
    InvalidFilterValue { attr: String, value: String },

    /// A `%` filter value is not a valid regular expression.
    #[error("invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// XML rendering failed.
    #[error("xml: {0}")]
    Xml(String),

    /// Rendered output was not valid UTF-8.
    #[error("invalid utf-8")]
    Utf8,
}

impl InfoError {
    /// Whether the error originates in the transport rather than the data.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            InfoError::Http(_)
                | InfoError::Timeout
                | InfoError::Tls(_)
                | InfoError::Connection(_)
                | InfoError::Request(_)
                | InfoError::TooLarge(..)
        )
    }
}

impl From<reqwest::Error> for InfoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return InfoError::Timeout;
        }
        if let Some(status) = err.status() {
            return InfoError::Http(status.as_u16());
        }

        let tls = err.source().is_some_and(is_tls_failure);
        let connect = err.is_connect();
        let err = err.without_url();
        match (connect, tls) {
            (_, true) => InfoError::Tls(error_chain(&err)),
            (true, false) => InfoError::Connection(error_chain(&err)),
            (false, false) => InfoError::Request(err),
        }
    }
}

/// Walk a source chain looking for a certificate or handshake failure.
///
/// reqwest folds TLS failures into connect errors. tokio-rustls reports
/// them as `InvalidData` I/O errors wrapping the rustls error. Only the
/// sources are inspected: the top-level reqwest error carries the request
/// URL, which may contain any text.
fn is_tls_failure(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::InvalidData {
                return true;
            }
        }
        let text = e.to_string().to_lowercase();
        if text.contains("certificate") || text.contains("tls") || text.contains("handshake") {
            return true;
        }
        current = e.source();
    }
    false
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(e) = current {
        parts.push(e.to_string());
        current = e.source();
    }
    parts.join(": ")
}
