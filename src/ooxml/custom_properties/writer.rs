//! XML generation for `docProps/custom.xml`.
//!
//! Output always binds the variant namespace to `vt` and writes every
//! variant element in the [`Dialect::Emit`] spelling.

use super::constants::{CUSTOM_PROPERTIES_NS, VT_PREFIX, VTYPES_NS};
use super::record::{PropertyContainer, PropertyRecord, Slot};
use super::variant::{Dialect, VariantKind};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;

pub(crate) fn write_container(container: &PropertyContainer) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(|e| OoxmlError::Xml(format!("Failed to write XML declaration: {}", e)))?;

    let vt_namespace = if container.vt_namespace.is_empty() {
        VTYPES_NS
    } else {
        container.vt_namespace.as_str()
    };
    let vt_declaration = format!("xmlns:{}", VT_PREFIX);

    let mut root = BytesStart::new("Properties");
    root.push_attribute(("xmlns", CUSTOM_PROPERTIES_NS));
    root.push_attribute((vt_declaration.as_str(), vt_namespace));

    if container.properties.is_empty() {
        writer
            .write_event(Event::Empty(root))
            .map_err(|e| OoxmlError::Xml(format!("Failed to write Properties element: {}", e)))?;
    } else {
        writer
            .write_event(Event::Start(root))
            .map_err(|e| OoxmlError::Xml(format!("Failed to write Properties element: {}", e)))?;

        for record in &container.properties {
            write_property(&mut writer, record)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("Properties")))
            .map_err(|e| OoxmlError::Xml(format!("Failed to close Properties element: {}", e)))?;
    }

    Ok(writer.into_inner().into_inner())
}

fn write_property(writer: &mut Writer<Cursor<Vec<u8>>>, record: &PropertyRecord) -> Result<()> {
    let mut pid = itoa::Buffer::new();
    let mut elem = BytesStart::new("property");
    elem.push_attribute(("fmtid", record.fmtid.as_str()));
    elem.push_attribute(("pid", pid.format(record.pid)));
    if let Some(name) = &record.name {
        elem.push_attribute(("name", name.as_str()));
    }
    if let Some(link_target) = &record.link_target {
        elem.push_attribute(("linkTarget", link_target.as_str()));
    }

    match &record.slot {
        Slot::Empty => {
            return writer
                .write_event(Event::Empty(elem))
                .map_err(|e| OoxmlError::Xml(format!("Failed to write property element: {}", e)));
        },
        Slot::Value(variant) => {
            write_start(writer, elem)?;
            write_variant(writer, variant.kind(), &variant.text())?;
        },
        Slot::Malformed { kind, text } => {
            write_start(writer, elem)?;
            write_variant(writer, *kind, text)?;
        },
    }

    writer
        .write_event(Event::End(BytesEnd::new("property")))
        .map_err(|e| OoxmlError::Xml(format!("Failed to close property element: {}", e)))
}

fn write_start(writer: &mut Writer<Cursor<Vec<u8>>>, elem: BytesStart) -> Result<()> {
    writer
        .write_event(Event::Start(elem))
        .map_err(|e| OoxmlError::Xml(format!("Failed to write property element: {}", e)))
}

fn write_variant(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    kind: VariantKind,
    text: &str,
) -> Result<()> {
    let name = Dialect::Emit.element_name(kind);

    if text.is_empty() {
        return writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(|e| OoxmlError::Xml(format!("Failed to write <{}>: {}", name, e)));
    }

    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(|e| OoxmlError::Xml(format!("Failed to write <{}>: {}", name, e)))?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(|e| OoxmlError::Xml(format!("Failed to write <{}> text: {}", name, e)))?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| OoxmlError::Xml(format!("Failed to close <{}>: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::custom_properties::constants::FORMAT_ID;
    use crate::ooxml::custom_properties::variant::Variant;

    fn record(pid: i32, name: &str, slot: Slot) -> PropertyRecord {
        PropertyRecord {
            fmtid: FORMAT_ID.to_string(),
            pid,
            name: Some(name.to_string()),
            link_target: None,
            slot,
        }
    }

    fn write(container: &PropertyContainer) -> String {
        String::from_utf8(write_container(container).unwrap()).unwrap()
    }

    #[test]
    fn test_write_empty_container() {
        let xml = write(&PropertyContainer::new());
        assert_eq!(
            xml,
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/custom-properties" "#,
                r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"/>"#,
            )
        );
    }

    #[test]
    fn test_write_prefixed_variant() {
        let container = PropertyContainer {
            vt_namespace: VTYPES_NS.to_string(),
            properties: vec![record(
                2,
                "Department",
                Slot::Value(Variant::LpwStr("Finance".to_string())),
            )],
        };

        let xml = write(&container);
        assert!(xml.contains(
            r#"<property fmtid="{D5CDD505-2E9C-101B-9397-08002B2CF9AE}" pid="2" name="Department"><vt:lpwstr>Finance</vt:lpwstr></property>"#
        ));
    }

    #[test]
    fn test_write_missing_namespace_uses_default() {
        let container = PropertyContainer {
            vt_namespace: String::new(),
            properties: Vec::new(),
        };
        assert!(write(&container).contains(&format!(r#"xmlns:vt="{}""#, VTYPES_NS)));
    }

    #[test]
    fn test_write_escapes_text_and_attributes() {
        let container = PropertyContainer {
            vt_namespace: VTYPES_NS.to_string(),
            properties: vec![record(
                2,
                "R&D <team>",
                Slot::Value(Variant::LpwStr("a < b & c".to_string())),
            )],
        };
        let xml = write(&container);
        assert!(xml.contains(r#"name="R&amp;D &lt;team&gt;""#));
        assert!(xml.contains("<vt:lpwstr>a &lt; b &amp; c</vt:lpwstr>"));
    }

    #[test]
    fn test_write_empty_slots_and_link_targets() {
        let mut linked = record(3, "ignored", Slot::Value(Variant::Bool(true)));
        linked.name = None;
        linked.link_target = Some("Bookmark1".to_string());

        let container = PropertyContainer {
            vt_namespace: VTYPES_NS.to_string(),
            properties: vec![
                record(2, "NoChild", Slot::Empty),
                linked,
                record(4, "Blank", Slot::Value(Variant::LpwStr(String::new()))),
            ],
        };
        let xml = write(&container);
        assert!(xml.contains(r#"pid="2" name="NoChild"/>"#));
        assert!(xml.contains(r#"pid="3" linkTarget="Bookmark1"><vt:bool>true</vt:bool>"#));
        assert!(xml.contains("<vt:lpwstr/>"));
    }

    #[test]
    fn test_write_malformed_slot_verbatim() {
        let container = PropertyContainer {
            vt_namespace: VTYPES_NS.to_string(),
            properties: vec![record(
                2,
                "Bad",
                Slot::Malformed {
                    kind: VariantKind::I4,
                    text: "twelve".to_string(),
                },
            )],
        };
        assert!(write(&container).contains("<vt:i4>twelve</vt:i4>"));
    }
}
