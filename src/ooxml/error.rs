//! Error types for OOXML custom property operations.

use crate::ooxml::custom_properties::VariantKind;
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
///
/// These abort the whole call. Problems confined to a single property
/// value are reported as [`ValueError`] instead.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Well-formed XML that is not a custom properties part
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A property value that cannot be written
    #[error("Unsupported value for property '{name}': {reason}")]
    UnsupportedValue { name: String, reason: String },
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for OoxmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OoxmlError::Xml(format!("Failed to parse attribute: {}", err))
    }
}

impl From<std::str::Utf8Error> for OoxmlError {
    fn from(err: std::str::Utf8Error) -> Self {
        OoxmlError::Xml(format!("Invalid UTF-8: {}", err))
    }
}

/// Failure to turn one property's variant payload into a public value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Text inside a typed variant element does not parse as that type
    #[error("Invalid {} value: '{text}'", .kind.local_name())]
    Malformed { kind: VariantKind, text: String },

    /// Integer that does not fit the 32-bit public integer
    #[error("{} value {value} does not fit a 32-bit integer", .kind.local_name())]
    OutOfRange { kind: VariantKind, value: String },

    /// Date or filetime text that is not a recognised timestamp
    #[error("Invalid {} timestamp: '{text}'", .kind.local_name())]
    InvalidDate { kind: VariantKind, text: String },
}
