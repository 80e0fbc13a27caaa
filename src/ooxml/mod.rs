//! Office Open XML (OOXML) document property parts.
//!
//! OOXML packages (.docx, .xlsx, .pptx) carry user-defined metadata in the
//! custom file properties part, `docProps/custom.xml`. This module reads and
//! writes that part; locating it inside the ZIP package is left to the
//! caller (see [`custom_properties::constants::PART_NAME`] and
//! [`custom_properties::constants::CONTENT_TYPE`]).
//!
//! # Example
//!
//! ```rust
//! use ooxml_custom_props::ooxml::{CustomProperty, decode_custom_properties, encode_custom_properties};
//!
//! let xml = encode_custom_properties(&[CustomProperty::new("Department", "Finance")])?;
//! let decoded = decode_custom_properties(&xml)?;
//! assert_eq!(decoded.properties[0].name, "Department");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod custom_properties;
pub mod error;

// Re-export custom properties
pub use custom_properties::{
    CustomProperties, CustomProperty, DecodedProperties, PropertyValue, decode_custom_properties,
    encode_custom_properties,
};

// Re-export error types
pub use error::{OoxmlError, Result, ValueError};
