//! JSON and XML renderers

use anyhow::{Context, Result};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::{Map, Value};

use crate::lens::rows::RowSet;

/// Root element of the XML document
pub const XML_ROOT: &str = "Targets";
/// Element wrapping one row when there are several columns
pub const XML_ROW: &str = "Target";

/// Build the JSON value for a row set
///
/// Several headers give an array of objects (keys in header order), a single
/// header gives an array of bare values and no header gives `[]`.
pub fn json_value(set: &RowSet) -> Value {
    let items = match set.headers.len() {
        0 => vec![],
        1 => set
            .rows
            .iter()
            .map(|row| Value::String(row.first().cloned().unwrap_or_default()))
            .collect(),
        _ => set
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = set
                    .headers
                    .iter()
                    .zip(row)
                    .map(|(header, cell)| (header.clone(), Value::String(cell.clone())))
                    .collect();
                Value::Object(object)
            })
            .collect(),
    };
    Value::Array(items)
}

/// Pretty-printed JSON array (two-space indentation)
pub fn render_json(set: &RowSet) -> Result<String> {
    serde_json::to_string_pretty(&json_value(set)).context("failed to serialize JSON output")
}

/// XML document rooted at `Targets`
///
/// With several headers each row is a `Target` element holding one child per
/// header. With a single header each row is an element named after it.
pub fn render_xml(set: &RowSet) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    if set.headers.is_empty() || set.rows.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(XML_ROOT)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(XML_ROOT)))?;
        for row in &set.rows {
            if let [header] = set.headers.as_slice() {
                write_text_element(&mut writer, header, row.first().map_or("", String::as_str))?;
            } else {
                writer.write_event(Event::Start(BytesStart::new(XML_ROW)))?;
                for (header, cell) in set.headers.iter().zip(row) {
                    write_text_element(&mut writer, header, cell)?;
                }
                writer.write_event(Event::End(BytesEnd::new(XML_ROW)))?;
            }
        }
        writer.write_event(Event::End(BytesEnd::new(XML_ROOT)))?;
    }

    String::from_utf8(writer.into_inner()).context("XML output is not valid UTF-8")
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(name)))?;
        writer.write_event(Event::Text(BytesText::new(text)))?;
        writer.write_event(Event::End(BytesEnd::new(name)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(headers: &[&str], rows: &[&[&str]]) -> RowSet {
        RowSet {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_json_objects_round_trip() {
        let rows = set(
            &["netname", "inetnum", "country"],
            &[&["A", "192.0.2.0/30", "NL"], &["B", "", "DE"]],
        );
        let out = render_json(&rows).unwrap();
        let parsed: Vec<Map<String, Value>> = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed.len(), rows.rows.len());
        for (object, row) in parsed.iter().zip(&rows.rows) {
            let expected: Vec<(String, Value)> = rows
                .headers
                .iter()
                .zip(row)
                .map(|(h, c)| (h.clone(), Value::String(c.clone())))
                .collect();
            let actual: Vec<(String, Value)> =
                object.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_json_single_header() {
        let out = render_json(&set(&["inetnum"], &[&["192.0.2.0/30"], &["198.51.100.0/24"]]))
            .unwrap();
        assert_eq!(out, "[\n  \"192.0.2.0/30\",\n  \"198.51.100.0/24\"\n]");
    }

    #[test]
    fn test_json_no_headers() {
        assert_eq!(render_json(&RowSet::default()).unwrap(), "[]");
    }

    #[test]
    fn test_xml_multiple_headers() {
        let out = render_xml(&set(&["netname", "descr"], &[&["A", "Smith & Sons"], &["B", ""]]))
            .unwrap();
        assert_eq!(
            out,
            "<Targets>\
             <Target><netname>A</netname><descr>Smith &amp; Sons</descr></Target>\
             <Target><netname>B</netname><descr/></Target>\
             </Targets>"
        );
    }

    #[test]
    fn test_xml_single_header() {
        let out = render_xml(&set(&["inetnum"], &[&["192.0.2.0/30"]])).unwrap();
        assert_eq!(out, "<Targets><inetnum>192.0.2.0/30</inetnum></Targets>");
    }

    #[test]
    fn test_xml_empty() {
        assert_eq!(render_xml(&RowSet::default()).unwrap(), "<Targets/>");
        assert_eq!(render_xml(&set(&["a", "b"], &[])).unwrap(), "<Targets/>");
    }
}
