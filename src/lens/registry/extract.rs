//! Field extraction from decoded result pages

use std::collections::BTreeMap;

use super::response::ResultPage;

/// Field name that is always kept, whatever the field selection
pub const INETNUM_FIELD: &str = "inetnum";

/// One flattened registry object: lowercase field name to trimmed value
pub type Record = BTreeMap<String, String>;

/// Turn every entry of a page into a [`Record`]
///
/// Field names are lowercased. `inetnum` is always kept; other fields are kept
/// only when `fields` is `None` or lists them. With a field selection, every
/// selected name is present on the returned records, empty when the entry did
/// not carry it.
pub fn extract(page: &ResultPage, fields: Option<&[String]>) -> Vec<Record> {
    let fields = fields.filter(|f| !f.is_empty());

    page.docs
        .iter()
        .map(|doc| {
            let mut record = Record::new();
            for (name, value) in &doc.fields {
                let name = name.to_lowercase();
                if name == INETNUM_FIELD {
                    record.insert(INETNUM_FIELD.to_string(), value.trim().to_string());
                } else if fields.map_or(true, |f| f.contains(&name)) {
                    record.insert(name, value.trim().to_string());
                }
            }
            if let Some(fields) = fields {
                for field in fields {
                    record.entry(field.clone()).or_default();
                }
            }
            record
        })
        .collect()
}
