//! Info type, result format and qualifier enumerations.

use std::fmt;
use std::str::FromStr;

/// Resource categories served by the information service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoType {
    Providers,
    Images,
    Servers,
    Regions,
    /// Image lifecycle states.
    States,
    /// Server categories.
    Types,
    /// Current data version of the server listings.
    ServersVersion,
    /// Current data version of the image listings.
    ImagesVersion,
}

impl InfoType {
    /// All info types, in the order the service documents them.
    pub const ALL: [InfoType; 8] = [
        InfoType::Providers,
        InfoType::Images,
        InfoType::Servers,
        InfoType::Regions,
        InfoType::States,
        InfoType::Types,
        InfoType::ServersVersion,
        InfoType::ImagesVersion,
    ];

    /// Name used as the response field and as the output root element.
    pub fn as_str(self) -> &'static str {
        match self {
            InfoType::Providers => "providers",
            InfoType::Images => "images",
            InfoType::Servers => "servers",
            InfoType::Regions => "regions",
            InfoType::States => "states",
            InfoType::Types => "types",
            InfoType::ServersVersion => "servers_version",
            InfoType::ImagesVersion => "images_version",
        }
    }

    /// REST path segment(s) for this info type.
    pub fn path(self) -> &'static str {
        match self {
            InfoType::States => "images/states",
            InfoType::Types => "servers/types",
            InfoType::ServersVersion | InfoType::ImagesVersion => "dataversion",
            other => other.as_str(),
        }
    }

    /// Value of the `category` query parameter, for version lookups only.
    pub fn category(self) -> Option<&'static str> {
        match self {
            InfoType::ImagesVersion => Some("images"),
            InfoType::ServersVersion => Some("servers"),
            _ => None,
        }
    }

    /// Whether the response is a single version scalar instead of records.
    pub fn is_version(self) -> bool {
        self.category().is_some()
    }

    /// Element name of one record in XML output.
    pub fn singular(self) -> Option<&'static str> {
        match self {
            InfoType::Providers => Some("provider"),
            InfoType::Images => Some("image"),
            InfoType::Servers => Some("server"),
            InfoType::Regions => Some("region"),
            InfoType::States => Some("state"),
            InfoType::Types => Some("type"),
            InfoType::ServersVersion | InfoType::ImagesVersion => None,
        }
    }
}

impl fmt::Display for InfoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InfoType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InfoType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown info type: {}", s))
    }
}

/// Output rendering of a query result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultFormat {
    Json,
    #[default]
    Xml,
}

impl FromStr for ResultFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ResultFormat::Json),
            "xml" | "plain" => Ok(ResultFormat::Xml),
            _ => Err(format!("unknown format: {} (expected json or xml)", s)),
        }
    }
}

impl fmt::Display for ResultFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultFormat::Json => write!(f, "json"),
            ResultFormat::Xml => write!(f, "xml"),
        }
    }
}

/// Optional trailing path segment narrowing a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Qualifier {
    #[default]
    None,
    /// Image lifecycle state, e.g. `active` or `deprecated`.
    ImageState(String),
    /// Server category, e.g. `smt` or `regionserver`.
    ServerType(String),
}

impl Qualifier {
    /// The path segment, if any.
    pub fn segment(&self) -> Option<&str> {
        match self {
            Qualifier::None => None,
            Qualifier::ImageState(s) | Qualifier::ServerType(s) => Some(s.as_str()),
        }
    }
}
