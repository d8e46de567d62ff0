//! Common output types shared across lens modules
//!
//! This module provides the output format selectors used by the renderers and
//! the command-line surface.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text emitted by the text renderers when there is no column to show
pub const NO_DATA_MESSAGE: &str = "No data to display.";

/// Notice shown when a search yields no record at all
pub const NO_RECORDS_MESSAGE: &str = "No data extracted.";

/// Kind of output document produced for a search
///
/// `Plain` covers the human/line oriented renderings (see [`PlainStyle`]),
/// the other two variants produce structured documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Plain text (table, grepable or list)
    #[default]
    Plain,
    /// Pretty-printed JSON array
    Json,
    /// XML document rooted at `Targets`
    Xml,
}

impl OutputFormat {
    /// Check if this format produces a structured document
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Json | Self::Xml)
    }

    /// Get a list of all format names for help text
    pub fn all_names() -> &'static [&'static str] {
        &["plain", "json", "xml"]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Xml => write!(f, "xml"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            _ => Err(format!(
                "Unknown output type '{}'. Valid types: {}",
                s,
                Self::all_names().join(", ")
            )),
        }
    }
}

/// Layout used for [`OutputFormat::Plain`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlainStyle {
    /// Aligned fixed-width table
    Table,
    /// One separator-joined line per row, headers first
    Grepable,
    /// `Parameter: value` blocks, or separator-joined rows when fields were selected
    #[default]
    List,
}

impl PlainStyle {
    /// Resolve the style from the command-line switches; table wins over grepable
    pub fn from_flags(table: bool, grepable: bool) -> Self {
        if table {
            Self::Table
        } else if grepable {
            Self::Grepable
        } else {
            Self::List
        }
    }
}

impl fmt::Display for PlainStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Grepable => write!(f, "grepable"),
            Self::List => write!(f, "list"),
        }
    }
}

/// Split a comma-separated field list into trimmed, lowercase names
///
/// Empty entries are dropped. Returns `None` when no name is left, meaning
/// "no field selection".
///
/// # Examples
///
/// ```
/// use ripeq::lens::utils::parse_field_list;
///
/// assert_eq!(
///     parse_field_list(" NetName, inetnum "),
///     Some(vec!["netname".to_string(), "inetnum".to_string()])
/// );
/// assert_eq!(parse_field_list(" , "), None);
/// ```
pub fn parse_field_list(fields: &str) -> Option<Vec<String>> {
    let names: Vec<String> = fields
        .split(',')
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty())
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(
            OutputFormat::from_str("plain").unwrap(),
            OutputFormat::Plain
        );
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("xml").unwrap(), OutputFormat::Xml);
        assert!(OutputFormat::from_str("yaml").is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Plain.to_string(), "plain");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Xml.to_string(), "xml");
    }

    #[test]
    fn test_output_format_is_structured() {
        assert!(!OutputFormat::Plain.is_structured());
        assert!(OutputFormat::Json.is_structured());
        assert!(OutputFormat::Xml.is_structured());
    }

    #[test]
    fn test_plain_style_from_flags() {
        assert_eq!(PlainStyle::from_flags(true, true), PlainStyle::Table);
        assert_eq!(PlainStyle::from_flags(false, true), PlainStyle::Grepable);
        assert_eq!(PlainStyle::from_flags(false, false), PlainStyle::List);
    }

    #[test]
    fn test_parse_field_list() {
        assert_eq!(
            parse_field_list("netname,INETNUM,,country"),
            Some(vec![
                "netname".to_string(),
                "inetnum".to_string(),
                "country".to_string()
            ])
        );
        assert_eq!(parse_field_list(""), None);
    }
}
