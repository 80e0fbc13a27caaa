//! OOXML custom document properties.
//!
//! This module reads and writes the custom file properties part
//! (`docProps/custom.xml`) of Office Open XML packages. Each property has a
//! name, a property ID and a value typed by one of the File Properties
//! Variant Types (`vt:i4`, `vt:lpwstr`, `vt:filetime`, ...).
//!
//! # Layers
//!
//! - [`variant`]: the variant type catalogue and its two element spellings
//!   ([`Dialect::Emit`] always writes `vt:`-prefixed names,
//!   [`Dialect::Accept`] reads prefixed or bare names).
//! - [`PropertyContainer`] / [`PropertyRecord`]: the part as written,
//!   keeping every variant kind, unparsable values and document order.
//! - [`CustomProperty`] / [`PropertyValue`]: what callers see. Values are
//!   narrowed to integer, double, string, boolean or timestamp; anything
//!   else has no value.
//! - [`CustomProperties`]: an ordered name-to-value collection on top.
//!
//! # Supported Property Types
//!
//! | Public value | Written as | Read from                              |
//! |--------------|------------|----------------------------------------|
//! | `Integer`    | `i4`       | `i1` `i2` `i4` `i8` `int` `ui1`..`uint` that fit 32 bits |
//! | `Double`     | `r8`       | `r4` `r8`                              |
//! | `String`     | `lpwstr`   | `lpstr` `lpwstr` `bstr`                |
//! | `Boolean`    | `bool`     | `bool`                                 |
//! | `DateTime`   | `date`     | `date` `filetime`                      |
//!
//! # Example Usage
//!
//! ```rust
//! use ooxml_custom_props::ooxml::custom_properties::{CustomProperties, PropertyValue};
//!
//! let mut props = CustomProperties::new();
//! props.set_property("Department", "Finance");
//! props.set_property("Version", 42);
//! props.set_property("IsApproved", true);
//!
//! let xml = props.to_xml()?;
//! let parsed = CustomProperties::from_xml(&xml)?;
//!
//! assert_eq!(parsed.get_property("Version"), Some(&PropertyValue::Integer(42)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod constants;
mod reader;
mod record;
mod value;
pub mod variant;
mod writer;

pub use record::{DecodedProperties, PropertyContainer, PropertyRecord, RejectedProperty, Slot};
pub use value::{CustomProperty, PropertyValue, format_timestamp, parse_timestamp};
pub use variant::{Dialect, Variant, VariantKind};

use crate::ooxml::error::Result;

/// Decode a custom properties part into caller-facing properties.
///
/// Fails only on malformed XML or a root other than `Properties`. A
/// property whose value cannot be converted keeps its place with no value
/// and is listed in [`DecodedProperties::rejected`].
///
/// # Example
///
/// ```rust
/// use ooxml_custom_props::ooxml::custom_properties::{decode_custom_properties, PropertyValue};
///
/// let xml = br#"<Properties xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
///     <property fmtid="{D5CDD505-2E9C-101B-9397-08002B2CF9AE}" pid="2" name="Answer"><vt:i4>42</vt:i4></property>
/// </Properties>"#;
///
/// let decoded = decode_custom_properties(xml)?;
/// assert_eq!(decoded.properties[0].value, Some(PropertyValue::Integer(42)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode_custom_properties(xml: &[u8]) -> Result<DecodedProperties> {
    Ok(PropertyContainer::from_xml(xml)?.project())
}

/// Encode caller-facing properties as a custom properties part.
///
/// Properties are numbered from pid 2 in the order given. Fails with
/// [`OoxmlError::UnsupportedValue`](crate::ooxml::OoxmlError::UnsupportedValue)
/// naming the first property that has no value.
pub fn encode_custom_properties(properties: &[CustomProperty]) -> Result<Vec<u8>> {
    PropertyContainer::from_properties(properties)?.to_xml()
}

/// Ordered collection of custom document properties.
///
/// Properties keep insertion order, which is also the pid order when the
/// collection is written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomProperties {
    properties: Vec<CustomProperty>,
}

impl CustomProperties {
    /// Create a new empty custom properties collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property value.
    ///
    /// An existing property with the same name is updated in place and its
    /// previous value returned; otherwise the property is appended.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ooxml_custom_props::ooxml::custom_properties::{CustomProperties, PropertyValue};
    ///
    /// let mut props = CustomProperties::new();
    /// props.set_property("Version", 1);
    /// let old = props.set_property("Version", 2);
    /// assert_eq!(old, Some(PropertyValue::Integer(1)));
    /// ```
    pub fn set_property(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        let name = name.into();
        let value = value.into();

        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.value.replace(value),
            None => {
                self.properties.push(CustomProperty {
                    name,
                    value: Some(value),
                });
                None
            },
        }
    }

    /// Set or delete a property value.
    ///
    /// `Some` behaves like [`set_property`](Self::set_property); `None`
    /// removes the property. The previous value is returned either way.
    pub fn set_property_value(
        &mut self,
        name: impl Into<String>,
        value: Option<PropertyValue>,
    ) -> Option<PropertyValue> {
        match value {
            Some(value) => self.set_property(name, value),
            None => self.remove_property(&name.into()),
        }
    }

    /// Get a property value by name.
    ///
    /// Returns `None` both for unknown names and for properties read from a
    /// document whose value has no public form.
    pub fn get_property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.value.as_ref())
    }

    /// Remove a property by name, returning its value.
    pub fn remove_property(&mut self, name: &str) -> Option<PropertyValue> {
        let index = self.properties.iter().position(|p| p.name == name)?;
        self.properties.remove(index).value
    }

    /// Check if a property with the given name exists.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name == name)
    }

    /// Get the number of custom properties.
    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Check if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Get an iterator over all property names, in order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name.as_str())
    }

    /// Get an iterator over all properties, in order.
    pub fn iter(&self) -> impl Iterator<Item = &CustomProperty> {
        self.properties.iter()
    }

    /// Clear all custom properties.
    pub fn clear(&mut self) {
        self.properties.clear();
    }

    /// Generate the XML content of `docProps/custom.xml`.
    ///
    /// Properties without a value (read from a document but not
    /// representable) are left out.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let writable: Vec<CustomProperty> = self
            .properties
            .iter()
            .filter(|p| {
                if p.value.is_none() {
                    log::debug!("Not writing custom property '{}' without a value", p.name);
                }
                p.value.is_some()
            })
            .cloned()
            .collect();
        encode_custom_properties(&writable)
    }

    /// Parse custom properties from the XML content of `docProps/custom.xml`.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let decoded = decode_custom_properties(xml)?;
        Ok(Self {
            properties: decoded.properties,
        })
    }
}

impl FromIterator<CustomProperty> for CustomProperties {
    fn from_iter<I: IntoIterator<Item = CustomProperty>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CustomProperties {
    type Item = &'a CustomProperty;
    type IntoIter = std::slice::Iter<'a, CustomProperty>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}
