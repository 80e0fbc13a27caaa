//! ooxml-custom-props - custom document properties for Office Open XML files
//!
//! This library reads and writes the custom file properties part
//! (`docProps/custom.xml`) of Office Open XML packages: the user-defined
//! name/value metadata shown under "Custom" in Office's document properties
//! dialog.
//!
//! # Features
//!
//! - **Full variant catalogue**: all File Properties Variant Types (`vt:i1`
//!   through `vt:clsid`) are read, kept with their exact width and kind,
//!   and written back in place
//! - **Tolerant reading**: variant elements decode with or without the `vt:`
//!   prefix, so documents that declare the variant namespace as default
//!   read the same as canonical ones
//! - **Canonical writing**: output always declares and uses the `vt` prefix
//! - **Partial failure**: a property with a malformed or unsupported value
//!   loses its value, never the rest of the document
//!
//! # Example - Reading custom properties
//!
//! ```rust
//! use ooxml_custom_props::ooxml::{PropertyValue, decode_custom_properties};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let xml = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
//! <Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
//!     <property fmtid="{D5CDD505-2E9C-101B-9397-08002B2CF9AE}" pid="2" name="Reviewed"><bool>true</bool></property>
//! </Properties>"#;
//!
//! let decoded = decode_custom_properties(xml)?;
//! for property in &decoded.properties {
//!     println!("{}: {:?}", property.name, property.value);
//! }
//! assert_eq!(decoded.properties[0].value, Some(PropertyValue::Boolean(true)));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Writing custom properties
//!
//! ```rust
//! use ooxml_custom_props::ooxml::CustomProperties;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut props = CustomProperties::new();
//! props.set_property("Department", "Finance");
//! props.set_property("Budget", 12345.67);
//!
//! let xml = String::from_utf8(props.to_xml()?)?;
//! assert!(xml.contains("<vt:lpwstr>Finance</vt:lpwstr>"));
//! # Ok(())
//! # }
//! ```

/// OOXML (Office Open XML) document property parts
///
/// This module provides the custom properties reader and writer and its
/// error types.
pub mod ooxml;

// Re-export commonly used types for convenience
pub use ooxml::{CustomProperties, CustomProperty, OoxmlError, PropertyValue};
