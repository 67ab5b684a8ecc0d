//! Table structure document parser

use once_cell::sync::Lazy;
use regex::Regex;

use super::field_line::parse_field_line;
use crate::models::field::is_customer_field_name;
use crate::models::TableStructure;

/// Column header announcing the field rows, e.g.
/// `Field       Data Type  Length  Description`.
static COLUMN_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^field\s{2,}.*data\s*type").unwrap());

/// `Table: <NAME>` document header.
pub(crate) static TABLE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)table:\s*([A-Za-z0-9_/]+)").unwrap());

/// True for lines composed solely of `-` or `=` (ruler lines under headers).
fn is_separator(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == '-' || c == '=')
}

/// Parse a full structure document for one table.
///
/// Everything before the column header is preamble; a prose line following
/// a `Table:` header becomes the table description. After the column header
/// every non-blank, non-separator line is handed to the field-line parser,
/// and unparseable lines are skipped.
///
/// A document without a column header (or an empty document) yields an
/// empty structure; absence of data is a representable state, not an
/// error.
pub fn parse_table_structure(table_name: &str, document: &str) -> TableStructure {
    let mut table = TableStructure::new(table_name);
    let mut in_fields = false;
    let mut saw_table_header = false;

    for line in document.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_separator(trimmed) {
            continue;
        }

        if !in_fields {
            if COLUMN_HEADER.is_match(trimmed) {
                in_fields = true;
            } else if TABLE_HEADER.is_match(trimmed) {
                saw_table_header = true;
            } else if saw_table_header && table.description.is_none() {
                table.description = Some(trimmed.to_string());
            }
            continue;
        }

        if let Some(mut field) = parse_field_line(line) {
            field.is_custom = is_customer_field_name(&field.name);
            table.push_field(field);
        }
    }

    table
}
