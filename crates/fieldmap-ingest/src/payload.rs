//! Operator-supplied payload parsing.
//!
//! Accepts JSON or XML text and produces a JSON value tree for the
//! flattener. A parse failure is reported to the caller and never mutates
//! any session state.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

use crate::error::{IngestError, Result};

/// Parses payload text, sniffing the format from the first character:
/// `{`/`[` for JSON, `<` for XML.
pub fn parse_payload(text: &str) -> Result<Value> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        Ok(serde_json::from_str(trimmed)?)
    } else if trimmed.starts_with('<') {
        xml_to_value(trimmed)
    } else {
        Err(IngestError::UnsupportedFormat)
    }
}

/// One open element while walking the XML event stream.
struct Frame {
    name: String,
    members: Map<String, Value>,
    text: String,
}

/// Converts an XML document into a JSON value tree.
///
/// Element children become object members, repeated sibling elements
/// collapse into arrays, attributes are prefixed with `@`, and mixed
/// element/text content keeps its text under `#text`. An element with no
/// attributes and only text becomes a plain string; an empty element
/// becomes null.
pub fn xml_to_value(text: &str) -> Result<Value> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                stack.push(Frame {
                    name: element_name(&start),
                    members: attribute_members(&start)?,
                    text: String::new(),
                });
            }
            Ok(Event::Empty(start)) => {
                let members = attribute_members(&start)?;
                let value = if members.is_empty() {
                    Value::Null
                } else {
                    Value::Object(members)
                };
                attach(&mut stack, &mut root, element_name(&start), value)?;
            }
            Ok(Event::Text(text)) => {
                let decoded = text
                    .unescape()
                    .map_err(|e| IngestError::Xml(e.to_string()))?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&decoded);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Ok(Event::End(_)) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| IngestError::Xml("unbalanced end tag".to_string()))?;
                let value = close_frame(frame.members, frame.text);
                attach(&mut stack, &mut root, frame.name, value)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(IngestError::Xml(e.to_string())),
        }
    }

    match root {
        Some((name, value)) => {
            let mut doc = Map::new();
            doc.insert(name, value);
            Ok(Value::Object(doc))
        }
        None => Err(IngestError::Xml("document has no root element".to_string())),
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn attribute_members(start: &BytesStart<'_>) -> Result<Map<String, Value>> {
    let mut members = Map::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| IngestError::Xml(e.to_string()))?;
        let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
        let value = attr
            .unescape_value()
            .map_err(|e| IngestError::Xml(e.to_string()))?;
        members.insert(key, Value::String(value.into_owned()));
    }
    Ok(members)
}

fn close_frame(mut members: Map<String, Value>, text: String) -> Value {
    let text = text.trim().to_string();
    if members.is_empty() {
        if text.is_empty() {
            Value::Null
        } else {
            Value::String(text)
        }
    } else {
        if !text.is_empty() {
            members.insert("#text".to_string(), Value::String(text));
        }
        Value::Object(members)
    }
}

/// Inserts a closed element into its parent, collapsing repeated sibling
/// names into arrays. With no parent on the stack it becomes the root.
fn attach(
    stack: &mut Vec<Frame>,
    root: &mut Option<(String, Value)>,
    name: String,
    value: Value,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            match parent.members.get_mut(&name) {
                Some(Value::Array(siblings)) => siblings.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    parent.members.insert(name, value);
                }
            }
            Ok(())
        }
        None => {
            if root.is_some() {
                return Err(IngestError::Xml("multiple root elements".to_string()));
            }
            *root = Some((name, value));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_json_objects_and_arrays() {
        assert_eq!(parse_payload(r#"{"a": 1}"#).unwrap(), json!({"a": 1}));
        assert_eq!(parse_payload("[1, 2]").unwrap(), json!([1, 2]));
    }

    #[test]
    fn rejects_unknown_formats() {
        assert!(matches!(
            parse_payload("courier,field\na,b"),
            Err(IngestError::UnsupportedFormat)
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(parse_payload("{broken"), Err(IngestError::Json(_))));
    }

    #[test]
    fn xml_elements_become_objects() {
        let value = parse_payload("<order><id>42</id><status>ok</status></order>").unwrap();
        assert_eq!(value, json!({"order": {"id": "42", "status": "ok"}}));
    }

    #[test]
    fn repeated_xml_siblings_become_arrays() {
        let value = parse_payload("<order><item>a</item><item>b</item></order>").unwrap();
        assert_eq!(value, json!({"order": {"item": ["a", "b"]}}));
    }

    #[test]
    fn attributes_and_text_are_kept() {
        let value = parse_payload(r#"<order id="7">open</order>"#).unwrap();
        assert_eq!(value, json!({"order": {"@id": "7", "#text": "open"}}));
    }

    #[test]
    fn nested_xml_flattens_like_json() {
        let value =
            parse_payload("<order><customer><name>Ana</name></customer></order>").unwrap();
        let fields = fieldmap_core::flatten(&value);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].path.as_str(), "order.customer.name");
    }

    #[test]
    fn empty_elements_are_null() {
        let value = parse_payload("<order><note/></order>").unwrap();
        assert_eq!(value, json!({"order": {"note": null}}));
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(matches!(
            parse_payload("<order><id>42</order>"),
            Err(IngestError::Xml(_))
        ));
    }
}
