//! Row assembly for rendering
//!
//! Turns accumulated [`Record`]s into a header list and aligned rows, applying
//! the field selection, optional CIDR conversion and deduplication.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::lens::cidr::to_cidr;
use crate::lens::registry::{Record, INETNUM_FIELD};

/// Options controlling row assembly
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowOptions {
    /// Selected fields, in output column order
    pub fields: Option<Vec<String>>,
    /// Replace `inetnum` ranges with comma-joined CIDR blocks
    pub cidr: bool,
    /// Drop rows identical to an earlier row
    pub unique: bool,
}

impl RowOptions {
    /// Options with an optional field selection and both switches off
    pub fn new(fields: Option<Vec<String>>) -> Self {
        Self {
            fields,
            ..Default::default()
        }
    }

    /// Set CIDR conversion
    pub fn with_cidr(mut self, cidr: bool) -> Self {
        self.cidr = cidr;
        self
    }

    /// Set deduplication
    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Field selection, `None` when no field was selected
    pub fn selected_fields(&self) -> Option<&[String]> {
        self.fields.as_deref().filter(|f| !f.is_empty())
    }
}

/// Headers plus rows aligned to them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RowSet {
    /// Whether there is no row to show
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the header list and rows out of `records`
///
/// With a field selection the headers are the selected fields in the given
/// order and records whose selected fields are all empty are skipped.
/// Without one the headers are the sorted union of all field names. Rows whose
/// cells are all empty never appear.
pub fn build_rows(records: &[Record], options: &RowOptions) -> RowSet {
    let selected = options.selected_fields();

    let headers: Vec<String> = match selected {
        Some(fields) => fields.to_vec(),
        None => records
            .iter()
            .flat_map(|r| r.keys().cloned())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect(),
    };

    let rows = records
        .iter()
        .filter(|record| match selected {
            Some(fields) => fields
                .iter()
                .any(|f| record.get(f).is_some_and(|v| !v.is_empty())),
            None => true,
        })
        .map(|record| {
            headers
                .iter()
                .map(|header| cell_value(record, header, options.cidr))
                .collect::<Vec<String>>()
        })
        .filter(|row| row.iter().any(|cell| !cell.is_empty()));

    let rows: Vec<Vec<String>> = if options.unique {
        rows.unique().collect()
    } else {
        rows.collect()
    };

    RowSet { headers, rows }
}

fn cell_value(record: &Record, header: &str, cidr: bool) -> String {
    let value = record.get(header).cloned().unwrap_or_default();
    if cidr && header == INETNUM_FIELD && !value.is_empty() {
        to_cidr(&value).join(",")
    } else {
        value
    }
}
