//! Plain text renderers
//!
//! Every function returns newline-terminated lines. When there is no header
//! at all the [`NO_DATA_MESSAGE`] line is returned instead.

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::style::HorizontalLine;
use tabled::settings::{Padding, Style};

use crate::lens::rows::RowSet;
use crate::lens::utils::NO_DATA_MESSAGE;

/// Width of the rule line framing list blocks
pub const LIST_RULE_WIDTH: usize = 30;

fn no_data() -> String {
    format!("{}\n", NO_DATA_MESSAGE)
}

/// Aligned table: header line, `-+-` separator line, then one line per row
///
/// Columns are padded to their widest cell and joined by `" | "`.
pub fn render_table(set: &RowSet) -> String {
    if set.headers.is_empty() {
        return no_data();
    }

    let mut builder = Builder::default();
    builder.push_record(set.headers.iter().cloned());
    for row in &set.rows {
        builder.push_record(row.iter().cloned());
    }

    let mut table = builder.build();
    table.with(
        Style::empty()
            .vertical('|')
            .horizontals([(1, HorizontalLine::new('-').intersection('+'))]),
    );
    if set.headers.len() == 1 {
        table.modify(Columns::first(), Padding::zero());
    } else {
        table.modify(Columns::first(), Padding::new(0, 1, 0, 0));
        table.modify(Columns::last(), Padding::new(1, 0, 0, 0));
    }

    format!("{}\n", table)
}

/// Header line and rows joined by `separator`, without padding
pub fn render_grepable(set: &RowSet, separator: &str) -> String {
    if set.headers.is_empty() {
        return no_data();
    }

    let mut lines = vec![set.headers.join(separator)];
    lines.extend(set.rows.iter().map(|row| row.join(separator)));
    terminate(lines)
}

/// List rendering
///
/// In block mode every row is framed by rule lines and rendered as
/// `header: value` lines, skipping empty cells. Otherwise each row is one
/// line of all its cells joined by `separator`.
pub fn render_list(set: &RowSet, blocks: bool, separator: &str) -> String {
    if set.headers.is_empty() {
        return no_data();
    }

    let mut lines = vec![];
    if blocks {
        let rule = "-".repeat(LIST_RULE_WIDTH);
        for row in &set.rows {
            lines.push(rule.clone());
            for (header, value) in set.headers.iter().zip(row) {
                if !value.is_empty() {
                    lines.push(format!("{}: {}", header, value));
                }
            }
        }
        if !set.rows.is_empty() {
            lines.push(rule);
        }
    } else {
        lines.extend(set.rows.iter().map(|row| row.join(separator)));
    }

    terminate(lines)
}

fn terminate(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}
