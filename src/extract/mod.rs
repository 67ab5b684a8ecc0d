//! Customization extraction over a set of config files
//!
//! Routes each configured file to the right parser based on its filename,
//! folds the results into one [`CustomizationReport`], and tolerates
//! unreadable files (the batch never aborts). Also hosts the best-effort
//! free-text scanner for customer-namespace identifiers.

use std::collections::BTreeSet;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::models::{CustomObjects, CustomizationReport, FocusArea};
use crate::parse::table_structure::TABLE_HEADER;
use crate::parse::{parse_custom_fields, parse_table_structure};

/// What a config file contains, decided from its filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    /// Field listing for a single table (`VBAK_structure.txt`)
    TableStructure,
    /// Customer fields grouped under `Table:` headers (`custom_fields.txt`)
    CustomFieldCatalog,
    /// BAPI / function-module catalog (`bapi_list.txt`)
    FunctionCatalog,
    /// User-exit or enhancement listing (`user_exits.txt`)
    UserExitList,
}

/// Ordered classification rules; the first matching substring wins, so
/// `custom_table_structure.txt` routes to the structure parser, not the
/// catalog parser.
const CLASSIFICATION_RULES: &[(&[&str], ConfigKind)] = &[
    (&["structure", "table"], ConfigKind::TableStructure),
    (&["custom_fields"], ConfigKind::CustomFieldCatalog),
    (&["bapi", "function"], ConfigKind::FunctionCatalog),
    (&["exit", "enhancement"], ConfigKind::UserExitList),
];

/// `WORD_` filename prefix used to derive the table name
/// (`VBAK_structure.txt` → `VBAK`).
static FILENAME_TABLE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9]+)_").unwrap());

/// User-exit identifiers as they appear in enhancement lists.
static EXIT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bEXIT_[A-Z0-9_]+").unwrap());

/// Candidate custom table names: single namespace letter plus at least
/// three identifier characters.
static CUSTOM_TABLE_CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b[ZY][A-Z0-9_]{3,}\b").unwrap());

/// Candidate custom field names: doubled namespace prefix.
static CUSTOM_FIELD_CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:ZZ|YY)[A-Z0-9_]+\b").unwrap());

/// Classify a config file by filename substrings.
///
/// Matching is case-insensitive and follows the order of the rule table;
/// a filename matching none of the rules is not extracted from.
pub fn classify(filename: &str) -> Option<ConfigKind> {
    let lower = filename.to_lowercase();
    for (needles, kind) in CLASSIFICATION_RULES {
        if needles.iter().any(|n| lower.contains(n)) {
            return Some(*kind);
        }
    }
    None
}

fn focus_allows(kind: ConfigKind, focus: Option<FocusArea>) -> bool {
    match focus {
        None => true,
        Some(FocusArea::Tables) => kind == ConfigKind::TableStructure,
        Some(FocusArea::Fields) => kind == ConfigKind::CustomFieldCatalog,
        Some(FocusArea::Bapis) => kind == ConfigKind::FunctionCatalog,
        Some(FocusArea::Exits) => kind == ConfigKind::UserExitList,
    }
}

/// Derive the table name for a structure file: filename prefix first,
/// `Table:` header in the content second.
fn derive_table_name(path: &Path, content: &str) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();
    if let Some(caps) = FILENAME_TABLE_PREFIX.captures(&stem) {
        return Some(caps[1].to_uppercase());
    }
    TABLE_HEADER
        .captures(content)
        .map(|caps| caps[1].to_uppercase())
}

/// Analyze a batch of config files into one customization report.
///
/// Files are processed in order; an unreadable path is logged and skipped,
/// never failing the batch. `focus` restricts which report sections are
/// populated; `None` extracts everything.
pub fn analyze_configs<P: AsRef<Path>>(
    paths: &[P],
    focus: Option<FocusArea>,
) -> CustomizationReport {
    let mut report = CustomizationReport::default();

    for path in paths {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let Some(kind) = classify(&filename) else {
            debug!(file = %path.display(), "config file matched no classification rule");
            continue;
        };
        if !focus_allows(kind, focus) {
            continue;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!(file = %path.display(), %err, "skipping unreadable config file");
                continue;
            }
        };

        match kind {
            ConfigKind::TableStructure => {
                let Some(table_name) = derive_table_name(path, &content) else {
                    debug!(file = %path.display(), "no table name derivable, skipping");
                    continue;
                };
                let table = parse_table_structure(&table_name, &content);
                if table.custom_field_count() > 0 && focus.is_none() {
                    report.custom_fields.insert(
                        table.table_name.clone(),
                        table.custom_fields().cloned().collect(),
                    );
                }
                report.tables.push(table);
            }
            ConfigKind::CustomFieldCatalog => {
                report.merge_custom_fields(parse_custom_fields(&content));
            }
            ConfigKind::FunctionCatalog => {
                // TODO: structured BAPI extraction once the catalog export
                // format is settled; until then the route is a no-op.
            }
            ConfigKind::UserExitList => {
                for m in EXIT_NAME.find_iter(&content) {
                    report.user_exits.push(m.as_str().to_string());
                }
            }
        }
    }

    report
}

/// Best-effort scan of free text for customer-namespaced identifiers.
///
/// Anything matching the `Z`/`Y` table pattern or the `ZZ`/`YY` field
/// pattern is collected; results are deduplicated and sorted. Doubled-prefix
/// names necessarily match the table pattern too, so a field candidate also
/// appears among the table candidates; callers filter by context.
pub fn extract_custom_objects(text: &str) -> CustomObjects {
    let tables: BTreeSet<String> = CUSTOM_TABLE_CANDIDATE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    let fields: BTreeSet<String> = CUSTOM_FIELD_CANDIDATE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    CustomObjects {
        tables: tables.into_iter().collect(),
        fields: fields.into_iter().collect(),
    }
}
