//! PublicCloudInfo struct and the query operations.

use std::fmt;
use std::sync::Arc;

use crate::client::{InfoClient, DEFAULT_BASE_URL};
use crate::decode::{decode, InfoData};
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::error::InfoError;
use crate::filter::{apply, parse_filter};
use crate::format::format_result;
use crate::info_type::{InfoType, Qualifier, ResultFormat};
use crate::url::{Query, ALL_REGIONS};

/// Per-call options shared by every query operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub format: ResultFormat,
    /// Region name, or `all`.
    pub region: String,
    /// Comma-separated filter clauses.
    pub filter: Option<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            format: ResultFormat::default(),
            region: ALL_REGIONS.to_string(),
            filter: None,
        }
    }
}

impl QueryOptions {
    pub fn json() -> Self {
        Self::default().format(ResultFormat::Json)
    }

    pub fn format(mut self, format: ResultFormat) -> Self {
        self.format = format;
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Main interface for querying the public cloud information service.
///
/// # Example
///
/// ```ignore
/// use public_cloud_info::{InfoError, PublicCloudInfo, QueryOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), InfoError> {
///     let info = PublicCloudInfo::new()?;
///     let options = QueryOptions::json().region("us-east-1").filter("name~sles");
///     println!("{}", info.images(Some("amazon"), Some("active"), &options).await?);
///     Ok(())
/// }
/// ```
pub struct PublicCloudInfo {
    client: InfoClient,
    max_size: Option<usize>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl fmt::Debug for PublicCloudInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicCloudInfo")
            .field("client", &self.client)
            .field("max_size", &self.max_size)
            .finish_non_exhaustive()
    }
}

impl PublicCloudInfo {
    /// Query the public information service.
    pub fn new() -> Result<Self, InfoError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Query a service at a custom base URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, InfoError> {
        Ok(Self::with_client(InfoClient::with_base_url(base_url)?))
    }

    /// Query through a preconfigured client.
    pub fn with_client(client: InfoClient) -> Self {
        Self {
            client,
            max_size: None,
            diagnostics: Arc::new(LogDiagnostics),
        }
    }

    /// Set the maximum accepted response size in bytes.
    ///
    /// Larger responses fail with `InfoError::TooLarge`.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Route filter warnings to `diagnostics` instead of the log.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Get the service base URL.
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// List cloud providers.
    pub async fn providers(
        &self,
        framework: Option<&str>,
        qualifier: Option<&str>,
        options: &QueryOptions,
    ) -> Result<String, InfoError> {
        let qualifier = qualifier.map_or(Qualifier::None, |q| Qualifier::ImageState(q.into()));
        self.run(InfoType::Providers, framework, qualifier, options).await
    }

    /// List images, optionally narrowed to one lifecycle state.
    pub async fn images(
        &self,
        framework: Option<&str>,
        image_state: Option<&str>,
        options: &QueryOptions,
    ) -> Result<String, InfoError> {
        let qualifier = image_state.map_or(Qualifier::None, |s| Qualifier::ImageState(s.into()));
        self.run(InfoType::Images, framework, qualifier, options).await
    }

    /// List servers, optionally narrowed to one server type.
    pub async fn servers(
        &self,
        framework: Option<&str>,
        server_type: Option<&str>,
        options: &QueryOptions,
    ) -> Result<String, InfoError> {
        let qualifier = server_type.map_or(Qualifier::None, |t| Qualifier::ServerType(t.into()));
        self.run(InfoType::Servers, framework, qualifier, options).await
    }

    /// List regions.
    pub async fn regions(
        &self,
        framework: Option<&str>,
        qualifier: Option<&str>,
        options: &QueryOptions,
    ) -> Result<String, InfoError> {
        let qualifier = qualifier.map_or(Qualifier::None, |q| Qualifier::ImageState(q.into()));
        self.run(InfoType::Regions, framework, qualifier, options).await
    }

    /// List the image lifecycle states.
    pub async fn image_states(
        &self,
        framework: Option<&str>,
        qualifier: Option<&str>,
        options: &QueryOptions,
    ) -> Result<String, InfoError> {
        let qualifier = qualifier.map_or(Qualifier::None, |q| Qualifier::ImageState(q.into()));
        self.run(InfoType::States, framework, qualifier, options).await
    }

    /// List the server types.
    pub async fn server_types(
        &self,
        framework: Option<&str>,
        qualifier: Option<&str>,
        options: &QueryOptions,
    ) -> Result<String, InfoError> {
        let qualifier = qualifier.map_or(Qualifier::None, |q| Qualifier::ServerType(q.into()));
        self.run(InfoType::Types, framework, qualifier, options).await
    }

    /// Current data version of the server listings.
    pub async fn servers_version(
        &self,
        framework: Option<&str>,
        server_type: Option<&str>,
        options: &QueryOptions,
    ) -> Result<String, InfoError> {
        let qualifier = server_type.map_or(Qualifier::None, |t| Qualifier::ServerType(t.into()));
        self.run(InfoType::ServersVersion, framework, qualifier, options).await
    }

    /// Current data version of the image listings.
    pub async fn images_version(
        &self,
        framework: Option<&str>,
        server_type: Option<&str>,
        options: &QueryOptions,
    ) -> Result<String, InfoError> {
        let qualifier = server_type.map_or(Qualifier::None, |t| Qualifier::ServerType(t.into()));
        self.run(InfoType::ImagesVersion, framework, qualifier, options).await
    }

    /// Run `query`, filter the decoded result and render it.
    pub async fn query(&self, query: &Query, filter: Option<&str>) -> Result<String, InfoError> {
        let data = self.fetch(query, filter).await?;
        format_result(&data, query.info_type, query.format)
    }

    /// Run `query` and return the filtered, unrendered result.
    ///
    /// The filter is always parsed, so malformed phrases are reported, but it
    /// only narrows listings; a version result passes through unchanged.
    pub async fn fetch(&self, query: &Query, filter: Option<&str>) -> Result<InfoData, InfoError> {
        let url = query.url(self.client.base_url());
        let body = self.client.fetch_text(&url, self.max_size).await?;
        let data = decode(&body, query.info_type)?;
        tracing::debug!(info_type = %query.info_type, count = data.len(), "decoded response");

        let predicates = parse_filter(filter, self.diagnostics.as_ref());
        match data {
            InfoData::Records(records) if !predicates.is_empty() => {
                Ok(InfoData::Records(apply(records, &predicates)?))
            }
            other => Ok(other),
        }
    }

    async fn run(
        &self,
        info_type: InfoType,
        framework: Option<&str>,
        qualifier: Qualifier,
        options: &QueryOptions,
    ) -> Result<String, InfoError> {
        let mut query = Query::new(info_type)
            .region(options.region.as_str())
            .qualifier(qualifier)
            .format(options.format);
        if let Some(framework) = framework {
            query = query.framework(framework);
        }
        self.query(&query, options.filter.as_deref()).await
    }
}
