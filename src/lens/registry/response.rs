//! Registry response decoding
//!
//! The full-text search endpoint answers in a Solr-like layout, either as XML
//! or as JSON depending on the negotiated content type. Both encodings are
//! decoded into the same [`ResultPage`] so field extraction never has to care
//! which one was received.

use anyhow::{anyhow, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::RawResponse;

// =============================================================================
// Types
// =============================================================================

/// Physical encoding of a registry response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Xml,
    Json,
}

impl ResponseFormat {
    /// Pick the encoding from a `Content-Type` header value
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let content_type = content_type.to_ascii_lowercase();
        if content_type.contains("application/json") {
            Some(Self::Json)
        } else if content_type.contains("application/xml") || content_type.contains("text/xml") {
            Some(Self::Xml)
        } else {
            None
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml => write!(f, "xml"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// One result entry: the `(name, value)` string fields of a registry object
///
/// Names keep the casing used by the registry; values are already trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDoc {
    pub fields: Vec<(String, String)>,
}

/// A decoded page of search results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Total number of matches reported by the registry for the query
    pub num_found: u64,
    /// Entries contained in this page
    pub docs: Vec<ResultDoc>,
}

impl ResultPage {
    /// Decode a raw response, selecting the decoder from its content type
    pub fn decode(response: &RawResponse) -> Result<Self> {
        let format = ResponseFormat::from_content_type(&response.content_type)
            .ok_or_else(|| anyhow!("Unexpected content type: {}", response.content_type))?;
        Self::decode_as(format, &response.body)
    }

    /// Decode a body with an explicit encoding
    pub fn decode_as(format: ResponseFormat, body: &str) -> Result<Self> {
        match format {
            ResponseFormat::Xml => Self::from_xml(body),
            ResponseFormat::Json => Self::from_json(body),
        }
    }

    /// Decode the XML encoding
    ///
    /// `numFound` is read from the first `<result>` element. Every `<doc>` is
    /// an entry, and every named `<str>` with text anywhere below it is a
    /// field.
    pub fn from_xml(body: &str) -> Result<Self> {
        let mut reader = Reader::from_str(body);

        let mut num_found: Option<u64> = None;
        let mut docs = vec![];
        let mut current_doc: Option<ResultDoc> = None;
        let mut doc_depth = 0usize;
        // name and accumulated text of the <str> being read
        let mut current_field: Option<(String, String)> = None;

        loop {
            match reader.read_event().context("malformed XML response")? {
                Event::Start(e) => {
                    let tag = e.name();
                    match tag.as_ref() {
                        b"result" if num_found.is_none() => {
                            num_found = Some(read_num_found(&e)?);
                        }
                        b"doc" if current_doc.is_none() => {
                            current_doc = Some(ResultDoc::default());
                            doc_depth = 0;
                            continue;
                        }
                        b"str" if current_doc.is_some() => {
                            current_field = str_name(&e)?.map(|name| (name, String::new()));
                        }
                        _ => {}
                    }
                    if current_doc.is_some() {
                        doc_depth += 1;
                    }
                }
                Event::Empty(e) => match e.name().as_ref() {
                    b"result" if num_found.is_none() => {
                        num_found = Some(read_num_found(&e)?);
                    }
                    b"doc" if current_doc.is_none() => docs.push(ResultDoc::default()),
                    // a <str/> without text carries no value
                    _ => {}
                },
                Event::Text(t) => {
                    if let Some((_, text)) = current_field.as_mut() {
                        text.push_str(&t.unescape().context("invalid XML text")?);
                    }
                }
                Event::CData(t) => {
                    if let Some((_, text)) = current_field.as_mut() {
                        text.push_str(&String::from_utf8_lossy(&t));
                    }
                }
                Event::End(e) => {
                    if current_doc.is_none() {
                        continue;
                    }
                    if doc_depth == 0 && e.name().as_ref() == b"doc" {
                        if let Some(doc) = current_doc.take() {
                            docs.push(doc);
                        }
                        continue;
                    }
                    doc_depth = doc_depth.saturating_sub(1);
                    if e.name().as_ref() == b"str" {
                        if let (Some(doc), Some((name, text))) =
                            (current_doc.as_mut(), current_field.take())
                        {
                            if !text.is_empty() {
                                doc.fields.push((name, text.trim().to_string()));
                            }
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        let num_found =
            num_found.ok_or_else(|| anyhow!("no <result> element in XML response"))?;

        Ok(ResultPage { num_found, docs })
    }

    /// Decode the JSON encoding
    ///
    /// Entries are read from `result.docs`. Both the flat entry form
    /// (`{"strs": [{"name": .., "value": ..}]}`) and the wrapped form returned
    /// by the live API (`{"doc": {"strs": [{"str": {..}}]}}`) are accepted.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body).context("malformed JSON response")?;
        let result = value.get("result");

        let num_found = match result.and_then(|r| r.get("numFound")) {
            None | Some(Value::Null) => 0,
            Some(Value::Number(n)) => n
                .as_u64()
                .ok_or_else(|| anyhow!("invalid numFound value: {}", n))?,
            Some(Value::String(s)) => s
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid numFound value: {}", s))?,
            Some(other) => return Err(anyhow!("invalid numFound value: {}", other)),
        };

        let docs = result
            .and_then(|r| r.get("docs"))
            .and_then(Value::as_array)
            .map(|docs| docs.iter().map(json_doc).collect())
            .unwrap_or_default();

        Ok(ResultPage { num_found, docs })
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn read_num_found(e: &BytesStart) -> Result<u64> {
    match e
        .try_get_attribute("numFound")
        .context("invalid <result> attributes")?
    {
        Some(attr) => {
            let value = attr.unescape_value().context("invalid numFound attribute")?;
            value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid numFound value: {}", value))
        }
        None => Ok(0),
    }
}

fn str_name(e: &BytesStart) -> Result<Option<String>> {
    let Some(attr) = e
        .try_get_attribute("name")
        .context("invalid <str> attributes")?
    else {
        return Ok(None);
    };
    let name = attr.unescape_value().context("invalid field name")?;
    if name.is_empty() {
        Ok(None)
    } else {
        Ok(Some(name.into_owned()))
    }
}

fn json_doc(doc: &Value) -> ResultDoc {
    let entry = doc.get("doc").unwrap_or(doc);
    let fields = entry
        .get("strs")
        .and_then(Value::as_array)
        .map(|strs| {
            strs.iter()
                .filter_map(|field| {
                    let field = field.get("str").unwrap_or(field);
                    let name = field.get("name").and_then(Value::as_str)?;
                    let value = field.get("value").and_then(Value::as_str)?;
                    if name.is_empty() || value.is_empty() {
                        return None;
                    }
                    Some((name.to_string(), value.trim().to_string()))
                })
                .collect()
        })
        .unwrap_or_default();
    ResultDoc { fields }
}
