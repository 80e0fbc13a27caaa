//! Streaming parser for `docProps/custom.xml`.
//!
//! Element names are matched by local name, so the part decodes the same
//! whether the producer wrote `<vt:i4>` under a prefixed declaration or
//! `<i4>` under a default one.

use super::constants::VT_PREFIX;
use super::record::{PropertyContainer, PropertyRecord, Slot};
use super::variant::{Dialect, VariantKind};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, Event};

pub(crate) fn read_container(xml: &[u8]) -> Result<PropertyContainer> {
    let mut reader = Reader::from_reader(xml);

    let mut container: Option<PropertyContainer> = None;
    let mut current: Option<PropertyRecord> = None;
    let mut root_closed = false;

    loop {
        let event = reader.read_event()?;
        let is_empty = matches!(event, Event::Empty(_));

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                if root_closed {
                    return Err(OoxmlError::Xml(format!(
                        "Unexpected element <{}> after Properties root",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }

                let Some(root) = container.as_mut() else {
                    container = Some(read_root(e)?);
                    root_closed = is_empty;
                    continue;
                };

                if let Some(record) = current.as_mut() {
                    read_property_child(&mut reader, record, e, is_empty)?;
                } else if e.local_name().as_ref() == b"property" {
                    let record = read_property_attributes(e)?;
                    if is_empty {
                        root.properties.push(record);
                    } else {
                        current = Some(record);
                    }
                } else {
                    log::debug!(
                        "Skipping unexpected element <{}> in custom properties",
                        String::from_utf8_lossy(e.name().as_ref())
                    );
                    if !is_empty {
                        reader.read_to_end(e.name())?;
                    }
                }
            },
            Event::End(_) => {
                // Nested elements are consumed whole, so an end tag here
                // closes either a property or the root.
                match (container.as_mut(), current.take()) {
                    (Some(container), Some(record)) => container.properties.push(record),
                    (Some(_), None) => root_closed = true,
                    _ => {},
                }
            },
            Event::Eof if container.is_some() && (!root_closed || current.is_some()) => {
                return Err(OoxmlError::Xml(
                    "Unexpected end of document inside Properties".to_string(),
                ));
            },
            Event::Eof => break,
            _ => {},
        }
    }

    container.ok_or_else(|| OoxmlError::Xml("Missing Properties root element".to_string()))
}

fn read_root(e: &BytesStart) -> Result<PropertyContainer> {
    if e.local_name().as_ref() != b"Properties" {
        return Err(OoxmlError::InvalidFormat(format!(
            "Expected Properties root element, found <{}>",
            String::from_utf8_lossy(e.name().as_ref())
        )));
    }

    let mut vt_namespace = String::new();
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref().strip_prefix(b"xmlns:") == Some(VT_PREFIX.as_bytes()) {
            vt_namespace = unescape_attr(&attr)?;
        }
    }

    Ok(PropertyContainer {
        vt_namespace,
        properties: Vec::new(),
    })
}

fn read_property_attributes(e: &BytesStart) -> Result<PropertyRecord> {
    let mut record = PropertyRecord {
        fmtid: String::new(),
        pid: 0,
        name: None,
        link_target: None,
        slot: Slot::Empty,
    };

    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.local_name().as_ref() {
            b"fmtid" => record.fmtid = unescape_attr(&attr)?,
            b"pid" => {
                let value = unescape_attr(&attr)?;
                record.pid = atoi_simd::parse::<i32>(value.trim().as_bytes()).map_err(|_| {
                    OoxmlError::InvalidFormat(format!("Invalid pid attribute: '{}'", value))
                })?;
            },
            b"name" => record.name = Some(unescape_attr(&attr)?),
            b"linkTarget" => record.link_target = Some(unescape_attr(&attr)?),
            _ => {},
        }
    }

    Ok(record)
}

fn unescape_attr(attr: &quick_xml::events::attributes::Attribute) -> Result<String> {
    attr.unescape_value()
        .map(|v| v.into_owned())
        .map_err(|e| OoxmlError::Xml(format!("Failed to unescape attribute: {}", e)))
}

fn read_property_child(
    reader: &mut Reader<&[u8]>,
    record: &mut PropertyRecord,
    e: &BytesStart,
    is_empty: bool,
) -> Result<()> {
    let Some(kind) = Dialect::Accept.resolve(e.name().as_ref()) else {
        log::debug!(
            "Skipping unknown element <{}> in property pid {}",
            String::from_utf8_lossy(e.name().as_ref()),
            record.pid
        );
        if !is_empty {
            reader.read_to_end(e.name())?;
        }
        return Ok(());
    };

    let text = if is_empty {
        String::new()
    } else {
        read_variant_text(reader, kind)?
    };
    fill_slot(record, kind, &text);
    Ok(())
}

fn fill_slot(record: &mut PropertyRecord, kind: VariantKind, text: &str) {
    if let Some(existing) = record.slot.kind() {
        log::warn!(
            "Property pid {} has both <{}> and <{}>; keeping the first",
            record.pid,
            existing.local_name(),
            kind.local_name()
        );
        return;
    }
    record.slot = Slot::from_text(kind, text);
}

/// Collect the text content of a variant element up to its end tag.
///
/// Text inside nested elements (e.g. the members of a `vector`) is
/// concatenated. Whitespace is kept as written.
fn read_variant_text(reader: &mut Reader<&[u8]>, kind: VariantKind) -> Result<String> {
    let mut text = String::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Text(t) => {
                let raw = std::str::from_utf8(&t)?;
                let unescaped = quick_xml::escape::unescape(raw).map_err(|e| {
                    OoxmlError::Xml(format!("Invalid text in <{}>: {}", kind.local_name(), e))
                })?;
                text.push_str(&unescaped);
            },
            Event::CData(c) => text.push_str(std::str::from_utf8(&c)?),
            Event::GeneralRef(r) => push_reference(&mut text, &r)?,
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => {
                return Err(OoxmlError::Xml(format!(
                    "Unexpected end of document inside <{}>",
                    kind.local_name()
                )));
            },
            _ => {},
        }
    }

    Ok(text)
}

fn push_reference(text: &mut String, reference: &BytesRef) -> Result<()> {
    let char_ref = reference
        .resolve_char_ref()
        .map_err(|e| OoxmlError::Xml(format!("Invalid character reference: {}", e)))?;
    if let Some(ch) = char_ref {
        text.push(ch);
        return Ok(());
    }

    let name = reference
        .decode()
        .map_err(|e| OoxmlError::Xml(format!("Invalid entity reference: {}", e)))?;
    match quick_xml::escape::resolve_predefined_entity(&name) {
        Some(value) => {
            text.push_str(value);
            Ok(())
        },
        None => Err(OoxmlError::Xml(format!("Unknown entity reference &{};", name))),
    }
}
