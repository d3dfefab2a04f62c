//! Client for the public cloud information service.
//!
//! The service publishes the images, update servers, regions, image states
//! and server types of the supported public cloud frameworks (`amazon`,
//! `google`, `microsoft`, `oracle`). This crate builds the request URLs,
//! decodes the JSON responses, applies a small client-side filter language
//! and renders the result as JSON or XML.
//!
//! # Example
//!
//! ```ignore
//! use public_cloud_info::{InfoError, PublicCloudInfo, QueryOptions, ResultFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), InfoError> {
//!     let info = PublicCloudInfo::new()?;
//!
//!     // Active SLES images in one region, as JSON
//!     let options = QueryOptions::json()
//!         .region("us-east-1")
//!         .filter("name~sles,publishedon>20230101");
//!     println!("{}", info.images(Some("amazon"), Some("active"), &options).await?);
//!
//!     // SMT servers as XML
//!     let options = QueryOptions::default().format(ResultFormat::Xml);
//!     println!("{}", info.servers(Some("google"), Some("smt"), &options).await?);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Info Types
//!
//! | Info type | Path | Qualifier |
//! |-----------|------|-----------|
//! | providers | `providers` | - |
//! | images | `images` | image state |
//! | servers | `servers` | server type |
//! | regions | `regions` | - |
//! | states | `images/states` | - |
//! | types | `servers/types` | - |
//! | servers_version | `dataversion?category=servers` | - |
//! | images_version | `dataversion?category=images` | - |

mod client;
mod decode;
mod diagnostics;
mod error;
pub mod filter;
mod format;
mod info;
mod info_type;
mod url;

pub use client::{InfoClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use decode::{decode, DataVersion, InfoData, Record};
pub use diagnostics::{Collector, Diagnostics, LogDiagnostics};
pub use error::InfoError;
pub use format::format_result;
pub use info::{PublicCloudInfo, QueryOptions};
pub use info_type::{InfoType, Qualifier, ResultFormat};
pub use url::{build_url, Query, ALL_REGIONS, API_VERSION};
