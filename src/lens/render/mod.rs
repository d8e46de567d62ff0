//! Output rendering and sinks
//!
//! All renderers consume the same [`RowSet`]; [`render`] picks one according
//! to [`RenderOptions`] and [`write_output`] delivers the resulting text.
//!
//! # Example
//!
//! ```rust,ignore
//! use ripeq::lens::render::{render, write_output, OutputSink, RenderOptions};
//! use ripeq::lens::utils::{OutputFormat, PlainStyle};
//!
//! let options = RenderOptions::new(OutputFormat::Plain).with_style(PlainStyle::Table);
//! let text = render(&row_set, &options)?;
//! write_output(&text, &OutputSink::Console)?;
//! ```

pub mod structured;
pub mod text;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;

use crate::lens::registry::Record;
use crate::lens::rows::{build_rows, RowOptions, RowSet};
use crate::lens::utils::{OutputFormat, PlainStyle};

pub use structured::{json_value, render_json, render_xml};
pub use text::{render_grepable, render_list, render_table};

/// Default separator for grepable and plain list output
pub const DEFAULT_SEPARATOR: &str = ",";

/// Rendering options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Kind of document
    pub format: OutputFormat,
    /// Layout for plain output
    pub style: PlainStyle,
    /// Cell separator for grepable and plain list output
    pub separator: String,
    /// Whether the caller selected fields; switches lists to one line per row
    pub fields_selected: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            style: PlainStyle::default(),
            separator: DEFAULT_SEPARATOR.to_string(),
            fields_selected: false,
        }
    }
}

impl RenderOptions {
    /// Options for the given format with default style and separator
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Set the plain text layout
    pub fn with_style(mut self, style: PlainStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the cell separator
    pub fn with_separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_string();
        self
    }

    /// Record whether fields were selected
    pub fn with_fields_selected(mut self, fields_selected: bool) -> Self {
        self.fields_selected = fields_selected;
        self
    }
}

/// Render a row set to text
pub fn render(set: &RowSet, options: &RenderOptions) -> Result<String> {
    match options.format {
        OutputFormat::Plain => Ok(match options.style {
            PlainStyle::Table => render_table(set),
            PlainStyle::Grepable => render_grepable(set, &options.separator),
            PlainStyle::List => render_list(set, !options.fields_selected, &options.separator),
        }),
        OutputFormat::Json => render_json(set),
        OutputFormat::Xml => render_xml(set),
    }
}

/// Build rows out of `records` and render them
///
/// Returns `None` without building or rendering anything when there is no
/// record, so callers can report the empty result instead.
pub fn render_records(
    records: &[Record],
    row_options: &RowOptions,
    options: &RenderOptions,
) -> Result<Option<String>> {
    if records.is_empty() {
        return Ok(None);
    }
    let set = build_rows(records, row_options);
    render(&set, options).map(Some)
}

/// Destination of rendered output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputSink {
    /// Standard output
    #[default]
    Console,
    /// File, overwritten if it exists
    File(PathBuf),
}

impl OutputSink {
    /// File sink when a path is given, console otherwise
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Console,
        }
    }
}

/// Deliver rendered text
///
/// Files receive the text verbatim. On the console a final newline is added
/// when the text does not end with one.
pub fn write_output(output: &str, sink: &OutputSink) -> Result<()> {
    match sink {
        OutputSink::File(path) => std::fs::write(path, output)
            .with_context(|| format!("unable to write {}", path.display())),
        OutputSink::Console => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            if !output.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
            Ok(())
        }
    }
}
