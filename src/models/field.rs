//! Field model for parsed structure documents

use serde::{Deserialize, Serialize};

/// The two letters SAP reserves for customer-namespace objects.
pub const CUSTOMER_NAMESPACE_LETTERS: [char; 2] = ['Z', 'Y'];

/// A single field row from a table-structure or custom-field document.
///
/// Built once by the field-line parser and never mutated afterwards, except
/// that the caller flips `is_custom` once the namespace convention has been
/// checked against the field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field name as it appeared in the export (e.g. `VBELN`, `ZZPRIORITY`)
    pub name: String,
    /// Raw ABAP data type token (e.g. `CHAR`, `CURR`, `DATS`)
    pub data_type: String,
    /// Declared length, when the row carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Decimal places, only meaningful for numeric types like `CURR 15,2`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
    /// Free-text description column, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// True iff the source line carried the leading `*` key marker
    #[serde(default)]
    pub is_key: bool,
    /// True iff the name starts with a doubled customer-namespace prefix
    #[serde(default)]
    pub is_custom: bool,
    /// Heuristic: the negation of the key marker, not a DDL nullability fact
    #[serde(default = "default_true")]
    pub nullable: bool,
}

fn default_true() -> bool {
    true
}

impl Field {
    /// Create a field with the given name and data type.
    ///
    /// Defaults match an unmarked structure row: not a key, not custom,
    /// nullable.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            length: None,
            decimals: None,
            description: None,
            is_key: false,
            is_custom: false,
            nullable: true,
        }
    }
}

/// Check whether a field name follows the doubled customer-namespace
/// convention (`ZZ...` / `YY...`, case-insensitive).
///
/// The first two characters must match each other and both must be one of
/// the reserved namespace letters.
///
/// # Examples
///
/// ```
/// use sap_config_core::models::field::is_customer_field_name;
///
/// assert!(is_customer_field_name("ZZPRIORITY"));
/// assert!(is_customer_field_name("yyReferral"));
/// assert!(!is_customer_field_name("ZPRIORITY"));
/// assert!(!is_customer_field_name("VBELN"));
/// ```
pub fn is_customer_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
        return false;
    };
    let first = first.to_ascii_uppercase();
    let second = second.to_ascii_uppercase();
    first == second && CUSTOMER_NAMESPACE_LETTERS.contains(&first)
}

/// Check whether a table name sits in the customer namespace (single `Z`
/// or `Y` prefix).
pub fn is_customer_table_name(name: &str) -> bool {
    name.chars()
        .next()
        .map(|c| CUSTOMER_NAMESPACE_LETTERS.contains(&c.to_ascii_uppercase()))
        .unwrap_or(false)
}
