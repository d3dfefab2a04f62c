//! HTTP client wrapper for information service requests.

use std::time::Duration;

use reqwest::{Client, Response};

use crate::error::InfoError;

/// Default timeout for service requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default information service base URL.
pub const DEFAULT_BASE_URL: &str = "https://susepubliccloudinfo.suse.com";

/// HTTP client wrapper for information service requests.
#[derive(Debug, Clone)]
pub struct InfoClient {
    inner: Client,
    base_url: String,
}

impl InfoClient {
    /// Create a new client with the specified timeout and base URL.
    pub fn new(timeout: Duration, base_url: &str) -> Result<Self, reqwest::Error> {
        let inner = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pint/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new client with the default timeout and base URL.
    pub fn with_default_timeout() -> Result<Self, reqwest::Error> {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_BASE_URL)
    }

    /// Create a new client with a custom base URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, reqwest::Error> {
        Self::new(DEFAULT_TIMEOUT, base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` and return the body as text.
    ///
    /// # Errors
    ///
    /// Transport failures map to `Http`, `Timeout`, `Tls` or `Connection`.
    /// A successful but empty body is `InfoError::EmptyResponse`.
    pub async fn fetch_text(&self, url: &str, max_size: Option<usize>) -> Result<String, InfoError> {
        tracing::debug!(%url, "requesting");

        let response = self.inner.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InfoError::Http(status.as_u16()));
        }

        let body = read_body_limited(response, max_size).await?;
        if body.is_empty() {
            return Err(InfoError::EmptyResponse);
        }

        String::from_utf8(body).map_err(|_| InfoError::Utf8)
    }
}

/// Read response body with an optional size limit.
///
/// If `max_size` is `Some`, this will:
/// 1. Check the `Content-Length` header and fail early if it exceeds the limit
/// 2. Read the body with a pre-allocated capped buffer, aborting immediately if exceeded
pub async fn read_body_limited(
    response: Response,
    max_size: Option<usize>,
) -> Result<Vec<u8>, InfoError> {
    let Some(max_size) = max_size else {
        return Ok(response.bytes().await?.to_vec());
    };

    if let Some(content_length) = response.content_length() {
        if content_length as usize > max_size {
            return Err(InfoError::TooLarge(content_length as usize, max_size));
        }
    }

    let capacity = response
        .content_length()
        .map(|cl| (cl as usize).min(max_size))
        .unwrap_or(max_size.min(8192));
    let mut body = Vec::with_capacity(capacity);
    let mut total_read = 0usize;

    let mut stream = response;
    while let Some(chunk) = stream.chunk().await? {
        if total_read.saturating_add(chunk.len()) > max_size {
            return Err(InfoError::TooLarge(
                total_read.saturating_add(chunk.len()),
                max_size,
            ));
        }
        total_read += chunk.len();
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}
