//! Decoding of service responses.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::InfoError;
use crate::info_type::InfoType;

/// One flat entry of a listing, keyed by attribute name in response order.
pub type Record = Map<String, Value>;

/// Version scalar, kept as the JSON type the service sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataVersion {
    Text(String),
    Number(Number),
}

impl fmt::Display for DataVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataVersion::Text(text) => f.write_str(text),
            DataVersion::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<&str> for DataVersion {
    fn from(text: &str) -> Self {
        DataVersion::Text(text.to_string())
    }
}

/// Decoded payload of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum InfoData {
    /// Entries of a listing, in response order.
    Records(Vec<Record>),
    /// Current data version, for the version info types.
    Version(DataVersion),
}

impl InfoData {
    /// Number of records, or 1 for a version.
    pub fn len(&self) -> usize {
        match self {
            InfoData::Records(records) => records.len(),
            InfoData::Version(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse a response body and extract the field for `info_type`.
///
/// # Errors
///
/// Returns `InfoError::Json` for malformed JSON, `InfoError::MissingField`
/// if the field is absent and `InfoError::UnexpectedType` if it has the
/// wrong shape.
pub fn decode(body: &str, info_type: InfoType) -> Result<InfoData, InfoError> {
    let mut document: Value = serde_json::from_str(body)?;

    let field = if info_type.is_version() {
        "version"
    } else {
        info_type.as_str()
    };

    let value = document
        .as_object_mut()
        .ok_or_else(|| InfoError::UnexpectedType {
            field: "<root>".to_string(),
            expected: "an object",
        })?
        .remove(field)
        .ok_or_else(|| InfoError::MissingField(field.to_string()))?;

    if info_type.is_version() {
        let version =
            DataVersion::deserialize(value).map_err(|_| InfoError::UnexpectedType {
                field: field.to_string(),
                expected: "a string or number",
            })?;
        return Ok(InfoData::Version(version));
    }

    let records: Vec<Record> =
        serde_json::from_value(value).map_err(|_| InfoError::UnexpectedType {
            field: field.to_string(),
            expected: "a list of objects",
        })?;
    Ok(InfoData::Records(records))
}
