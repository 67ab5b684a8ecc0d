//! Custom-field catalog parser
//!
//! A catalog lists customer fields grouped under `Table: <NAME>` headers:
//!
//! ```text
//! Table: VBAK
//! ZZPRIORITY  NUMC  1   Priority Level (1-5)
//! ZZREFERRAL  CHAR  20  Referral Source
//!
//! Table: VBAP
//! ZZDISCOUNT  DEC   5,2  Negotiated discount
//! ```

use std::collections::BTreeMap;

use super::field_line::parse_field_line;
use super::table_structure::TABLE_HEADER;
use crate::models::field::is_customer_field_name;
use crate::models::Field;

/// Parse a catalog document into a table-name → field-list map.
///
/// Each `Table:` header opens (or resets) the bucket for that table, so a
/// header with no following field rows still produces an empty entry.
/// Lines before the first header are discarded, and lines the field parser
/// rejects are silently skipped.
pub fn parse_custom_fields(document: &str) -> BTreeMap<String, Vec<Field>> {
    let mut catalog = BTreeMap::new();
    let mut current: Option<String> = None;

    for line in document.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(caps) = TABLE_HEADER.captures(trimmed) {
            let name = caps[1].to_uppercase();
            catalog.insert(name.clone(), Vec::new());
            current = Some(name);
            continue;
        }

        let Some(bucket) = current.as_ref().and_then(|t| catalog.get_mut(t)) else {
            continue;
        };
        if let Some(mut field) = parse_field_line(line) {
            field.is_custom = is_customer_field_name(&field.name);
            bucket.push(field);
        }
    }

    catalog
}
