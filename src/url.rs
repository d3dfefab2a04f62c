//! Query descriptors and request URL construction.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::info_type::{InfoType, Qualifier, ResultFormat};

/// API version path segment.
pub const API_VERSION: &str = "v1";

/// Region value meaning "do not narrow by region".
pub const ALL_REGIONS: &str = "all";

/// Characters left untouched when quoting a region: unreserved plus `/`.
const REGION_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Everything that determines a request URL and its output rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub info_type: InfoType,
    pub framework: Option<String>,
    pub region: String,
    pub qualifier: Qualifier,
    pub format: ResultFormat,
}

impl Query {
    /// Query for `info_type` across all frameworks and regions.
    pub fn new(info_type: InfoType) -> Self {
        Self {
            info_type,
            framework: None,
            region: ALL_REGIONS.to_string(),
            qualifier: Qualifier::None,
            format: ResultFormat::default(),
        }
    }

    pub fn framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = Some(framework.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn qualifier(mut self, qualifier: Qualifier) -> Self {
        self.qualifier = qualifier;
        self
    }

    pub fn format(mut self, format: ResultFormat) -> Self {
        self.format = format;
        self
    }

    /// Build the full request URL against `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        build_url(
            base_url,
            self.framework.as_deref(),
            self.info_type,
            &self.region,
            &self.qualifier,
        )
    }
}

/// Build a request URL.
///
/// Segments are `base/v1`, the framework (skipped when empty), the quoted
/// region (skipped for `all`), the info type path and the qualifier. The
/// last segment always gets `.json`; XML is rendered locally.
pub fn build_url(
    base_url: &str,
    framework: Option<&str>,
    info_type: InfoType,
    region: &str,
    qualifier: &Qualifier,
) -> String {
    let mut segments = vec![
        base_url.trim_end_matches('/').to_string(),
        API_VERSION.to_string(),
    ];

    if let Some(framework) = framework.filter(|f| !f.is_empty()) {
        segments.push(framework.to_string());
    }

    if !region.is_empty() && region != ALL_REGIONS {
        segments.push(utf8_percent_encode(region, REGION_ENCODE_SET).to_string());
    }

    segments.push(info_type.path().to_string());

    if let Some(segment) = qualifier.segment().filter(|s| !s.is_empty()) {
        segments.push(segment.to_string());
    }

    let mut url = segments.join("/");
    url.push_str(".json");

    if let Some(category) = info_type.category() {
        url.push_str("?category=");
        url.push_str(category);
    }

    url
}
