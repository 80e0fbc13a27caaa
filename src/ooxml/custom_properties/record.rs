//! Property records and the `Properties` container.
//!
//! These mirror the XML one to one: a container holds the `vt` namespace
//! declaration and the ordered `property` elements, and each record holds
//! the element's attributes plus at most one variant child.

use super::constants::{FIRST_PID, FORMAT_ID, VTYPES_NS};
use super::value::{CustomProperty, PropertyValue};
use super::variant::{Variant, VariantKind};
use super::{reader, writer};
use crate::ooxml::error::{OoxmlError, Result, ValueError};
use chrono::Datelike;

/// The variant child of a `property` element.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// No variant child.
    Empty,
    /// A variant child whose text parsed as its kind.
    Value(Variant),
    /// A typed variant child whose text did not parse.
    ///
    /// The text is kept so the element is written back unchanged.
    Malformed { kind: VariantKind, text: String },
}

impl Slot {
    /// Build a slot from element text, keeping unparsable text as malformed.
    pub fn from_text(kind: VariantKind, text: &str) -> Self {
        match Variant::parse(kind, text) {
            Some(variant) => Slot::Value(variant),
            None => Slot::Malformed {
                kind,
                text: text.to_string(),
            },
        }
    }

    /// Kind of the variant child, if there is one.
    pub fn kind(&self) -> Option<VariantKind> {
        match self {
            Slot::Empty => None,
            Slot::Value(variant) => Some(variant.kind()),
            Slot::Malformed { kind, .. } => Some(*kind),
        }
    }

    /// Project onto a public value.
    ///
    /// An empty slot is an absent value, not an error.
    pub fn to_value(&self) -> std::result::Result<Option<PropertyValue>, ValueError> {
        match self {
            Slot::Empty => Ok(None),
            Slot::Value(variant) => PropertyValue::from_variant(variant),
            Slot::Malformed { kind, text } => Err(ValueError::Malformed {
                kind: *kind,
                text: text.clone(),
            }),
        }
    }
}

/// A single `property` element.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRecord {
    /// Format ID (`fmtid` attribute)
    pub fmtid: String,
    /// Property ID (`pid` attribute)
    pub pid: i32,
    /// Property name (`name` attribute)
    pub name: Option<String>,
    /// Link target (`linkTarget` attribute), used instead of a name for linked properties
    pub link_target: Option<String>,
    /// The variant child
    pub slot: Slot,
}

impl PropertyRecord {
    /// Build a record for a caller-supplied property.
    ///
    /// The value is written with its canonical kind (`i4`, `r8`, `lpwstr`,
    /// `bool` or `date`). A property without a value cannot be written,
    /// nor can a timestamp outside the four-digit years xsd:dateTime text
    /// reads back.
    pub fn from_property(property: &CustomProperty, pid: i32) -> Result<Self> {
        let value = property
            .value
            .as_ref()
            .ok_or_else(|| OoxmlError::UnsupportedValue {
                name: property.name.clone(),
                reason: "property has no value".to_string(),
            })?;

        if let PropertyValue::DateTime(dt) = value
            && !(1..=9999).contains(&dt.year())
        {
            return Err(OoxmlError::UnsupportedValue {
                name: property.name.clone(),
                reason: format!("timestamp year {} is outside 0001-9999", dt.year()),
            });
        }

        Ok(Self {
            fmtid: FORMAT_ID.to_string(),
            pid,
            name: Some(property.name.clone()),
            link_target: None,
            slot: Slot::Value(value.to_variant()),
        })
    }

    /// Name shown to callers: the `name` attribute, else the link target.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.link_target.as_deref())
            .unwrap_or_default()
    }

    /// Project onto the caller-facing property.
    pub fn to_custom_property(&self) -> std::result::Result<CustomProperty, ValueError> {
        Ok(CustomProperty {
            name: self.display_name().to_string(),
            value: self.slot.to_value()?,
        })
    }
}

/// A property whose value could not be converted during decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedProperty {
    /// Property ID
    pub pid: i32,
    /// Property name
    pub name: String,
    /// Why the value was dropped
    pub error: ValueError,
}

/// Result of decoding a custom properties part.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedProperties {
    /// Every property in document order. Rejected and unsupported values are `None`.
    pub properties: Vec<CustomProperty>,
    /// Properties whose value failed to convert.
    pub rejected: Vec<RejectedProperty>,
}

/// The `Properties` root element.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyContainer {
    /// Value of the `xmlns:vt` declaration, empty if the document had none
    pub vt_namespace: String,
    /// Properties in document order
    pub properties: Vec<PropertyRecord>,
}

impl Default for PropertyContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyContainer {
    /// Create an empty container declaring the variant type namespace.
    pub fn new() -> Self {
        Self {
            vt_namespace: VTYPES_NS.to_string(),
            properties: Vec::new(),
        }
    }

    /// Build a container from caller properties, numbering them from pid 2.
    ///
    /// Names are not deduplicated. Fails on the first property that has
    /// no value.
    pub fn from_properties(properties: &[CustomProperty]) -> Result<Self> {
        let properties = properties
            .iter()
            .zip(FIRST_PID..)
            .map(|(property, pid)| PropertyRecord::from_property(property, pid))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            vt_namespace: VTYPES_NS.to_string(),
            properties,
        })
    }

    /// Parse a custom properties part.
    ///
    /// Variant children are matched with or without the `vt:` prefix.
    /// Only malformed XML or a foreign root element fail the call.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        reader::read_container(xml)
    }

    /// Serialize as a custom properties part with `vt:`-prefixed variants.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        writer::write_container(self)
    }

    /// Project every record onto caller-facing properties.
    ///
    /// Records whose value fails to convert keep their position with no
    /// value and are listed in [`DecodedProperties::rejected`].
    pub fn project(&self) -> DecodedProperties {
        let mut decoded = DecodedProperties {
            properties: Vec::with_capacity(self.properties.len()),
            rejected: Vec::new(),
        };

        for record in &self.properties {
            match record.to_custom_property() {
                Ok(property) => decoded.properties.push(property),
                Err(error) => {
                    log::warn!(
                        "Dropping value of custom property '{}' (pid {}): {}",
                        record.display_name(),
                        record.pid,
                        error
                    );
                    decoded
                        .properties
                        .push(CustomProperty::absent(record.display_name()));
                    decoded.rejected.push(RejectedProperty {
                        pid: record.pid,
                        name: record.display_name().to_string(),
                        error,
                    });
                },
            }
        }

        decoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, slot: Slot) -> PropertyRecord {
        PropertyRecord {
            fmtid: FORMAT_ID.to_string(),
            pid: FIRST_PID,
            name: Some(name.to_string()),
            link_target: None,
            slot,
        }
    }

    #[test]
    fn test_slot_from_text() {
        assert_eq!(
            Slot::from_text(VariantKind::I4, "42"),
            Slot::Value(Variant::I4(42))
        );
        assert_eq!(
            Slot::from_text(VariantKind::I4, "4x2"),
            Slot::Malformed {
                kind: VariantKind::I4,
                text: "4x2".to_string(),
            }
        );
        assert_eq!(Slot::Empty.kind(), None);
        assert_eq!(
            Slot::from_text(VariantKind::Storage, "").kind(),
            Some(VariantKind::Storage)
        );
    }

    #[test]
    fn test_sequential_pids() {
        let container = PropertyContainer::from_properties(&[
            CustomProperty::new("A", 1),
            CustomProperty::new("B", "two"),
            CustomProperty::new("C", true),
        ])
        .unwrap();

        let pids: Vec<_> = container.properties.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![2, 3, 4]);
        assert!(container.properties.iter().all(|p| p.fmtid == FORMAT_ID));
        assert_eq!(container.vt_namespace, VTYPES_NS);
    }

    #[test]
    fn test_from_property_selects_canonical_kind() {
        let rec = PropertyRecord::from_property(&CustomProperty::new("Department", "Finance"), 2)
            .unwrap();
        assert_eq!(rec.slot, Slot::Value(Variant::LpwStr("Finance".to_string())));
        assert_eq!(rec.name.as_deref(), Some("Department"));

        let rec = PropertyRecord::from_property(&CustomProperty::new("Rate", 0.25), 3).unwrap();
        assert_eq!(rec.slot.kind(), Some(VariantKind::R8));
    }

    #[test]
    fn test_from_property_rejects_absent_value() {
        let err = PropertyRecord::from_property(&CustomProperty::absent("Ghost"), 2).unwrap_err();
        match err {
            OoxmlError::UnsupportedValue { name, .. } => assert_eq!(name, "Ghost"),
            other => panic!("unexpected error: {other}"),
        }

        let err = PropertyContainer::from_properties(&[
            CustomProperty::new("Fine", 1),
            CustomProperty::absent("Ghost"),
        ])
        .unwrap_err();
        assert!(matches!(err, OoxmlError::UnsupportedValue { name, .. } if name == "Ghost"));
    }

    #[test]
    fn test_from_property_rejects_unwritable_years() {
        use chrono::{TimeZone, Utc};

        for dt in [
            Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(-1, 12, 31, 23, 59, 59).unwrap(),
            Utc.with_ymd_and_hms(0, 6, 1, 0, 0, 0).unwrap(),
        ] {
            let err = PropertyRecord::from_property(&CustomProperty::new("When", dt), 2)
                .unwrap_err();
            assert!(matches!(err, OoxmlError::UnsupportedValue { ref name, .. } if name == "When"));
        }

        for dt in [
            Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap(),
        ] {
            let rec = PropertyRecord::from_property(&CustomProperty::new("When", dt), 2).unwrap();
            assert_eq!(rec.to_custom_property().unwrap().value, Some(dt.into()));
        }
    }

    #[test]
    fn test_project_tolerates_bad_values() {
        let container = PropertyContainer {
            vt_namespace: VTYPES_NS.to_string(),
            properties: vec![
                record("Count", Slot::Value(Variant::I4(7))),
                record(
                    "Broken",
                    Slot::Malformed {
                        kind: VariantKind::I4,
                        text: "seven".to_string(),
                    },
                ),
                record("Blob", Slot::Value(Variant::Storage("AAAA".to_string()))),
                record("Nothing", Slot::Empty),
                record("When", Slot::Value(Variant::Date("yesterday".to_string()))),
            ],
        };

        let decoded = container.project();
        assert_eq!(
            decoded.properties,
            vec![
                CustomProperty::new("Count", 7),
                CustomProperty::absent("Broken"),
                CustomProperty::absent("Blob"),
                CustomProperty::absent("Nothing"),
                CustomProperty::absent("When"),
            ]
        );

        let rejected: Vec<_> = decoded.rejected.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(rejected, vec!["Broken", "When"]);
        assert!(matches!(
            decoded.rejected[1].error,
            ValueError::InvalidDate { kind: VariantKind::Date, .. }
        ));
    }

    #[test]
    fn test_display_name_falls_back_to_link_target() {
        let mut rec = record("Linked", Slot::Empty);
        rec.name = None;
        rec.link_target = Some("_Toc123".to_string());
        assert_eq!(rec.display_name(), "_Toc123");

        rec.link_target = None;
        assert_eq!(rec.display_name(), "");
    }
}
