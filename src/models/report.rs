//! Customization report aggregated over a config-file set

use std::collections::BTreeMap;

use serde::Serialize;

use super::field::Field;
use super::table::TableStructure;

/// Aggregate of everything the extractor found across one batch of config
/// files.
///
/// Built incrementally by folding over the batch; an unreadable file leaves
/// the report partial rather than failing it. `BTreeMap` keeps the
/// serialized `customFields` section in a deterministic order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationReport {
    /// Parsed table structures, one per structure document
    pub tables: Vec<TableStructure>,
    /// Custom fields grouped by table name
    pub custom_fields: BTreeMap<String, Vec<Field>>,
    /// BAPI names found in function catalogs (currently never populated,
    /// see the extractor's function route)
    pub bapis: Vec<String>,
    /// User-exit names (`EXIT_...`) found in enhancement lists
    pub user_exits: Vec<String>,
}

impl CustomizationReport {
    /// Merge a custom-field catalog into the report. Later documents
    /// overwrite earlier entries for the same table.
    pub fn merge_custom_fields(&mut self, catalog: BTreeMap<String, Vec<Field>>) {
        self.custom_fields.extend(catalog);
    }
}

/// Customer-namespace identifiers found by the free-text scanner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomObjects {
    /// Candidate custom table names (`Z...`/`Y...`)
    pub tables: Vec<String>,
    /// Candidate custom field names (`ZZ...`/`YY...`)
    pub fields: Vec<String>,
}
