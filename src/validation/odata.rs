//! OData entity and `$metadata` validation
//!
//! Checks generated service metadata for completeness before it is treated
//! as ready. The XML checks are purely textual (presence tokens plus a
//! regex tag count), deliberately not a real XML parse: attribute values
//! containing `<` or `>` can skew the balance heuristic in either
//! direction, which is why the imbalance is a warning and not an error.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use super::ValidationResult;
use crate::models::SchemaEntity;

/// EDM primitive types accepted without a warning.
const KNOWN_EDM_TYPES: &[&str] = &[
    "Edm.String",
    "Edm.Boolean",
    "Edm.Byte",
    "Edm.Int16",
    "Edm.Int32",
    "Edm.Int64",
    "Edm.Single",
    "Edm.Double",
    "Edm.Decimal",
    "Edm.DateTime",
    "Edm.Time",
    "Edm.DateTimeOffset",
    "Edm.Guid",
    "Edm.Binary",
];

/// ABAP dictionary type → EDM primitive type.
static ABAP_TO_EDM: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("CHAR", "Edm.String"),
        ("NUMC", "Edm.String"),
        ("CLNT", "Edm.String"),
        ("LANG", "Edm.String"),
        ("CUKY", "Edm.String"),
        ("UNIT", "Edm.String"),
        ("STRING", "Edm.String"),
        ("SSTRING", "Edm.String"),
        ("DATS", "Edm.DateTime"),
        ("TIMS", "Edm.Time"),
        ("CURR", "Edm.Decimal"),
        ("DEC", "Edm.Decimal"),
        ("QUAN", "Edm.Decimal"),
        ("FLTP", "Edm.Double"),
        ("INT1", "Edm.Byte"),
        ("INT2", "Edm.Int16"),
        ("INT4", "Edm.Int32"),
        ("INT8", "Edm.Int64"),
        ("RAW", "Edm.Binary"),
        ("RAWSTRING", "Edm.Binary"),
    ])
});

/// Any tag that is not a closing tag (self-closing tags included).
static OPENING_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[A-Za-z][^<>]*>").unwrap());
static CLOSING_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</[A-Za-z][^<>]*>").unwrap());
static SELF_CLOSING_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[A-Za-z][^<>]*/>").unwrap());

/// Tokens that must appear in a generated `$metadata` document.
const REQUIRED_METADATA_TOKENS: &[(&str, &str)] = &[
    ("<?xml", "Missing XML declaration"),
    ("<edmx:Edmx", "Missing edmx:Edmx root element"),
    ("<Schema", "Missing Schema element"),
    ("<EntityType", "Missing EntityType element: metadata defines no entities"),
    ("xmlns:edmx=", "Missing edmx namespace declaration"),
];

/// Validate an entity definition for completeness and consistency.
///
/// Missing name, properties or keys are errors, as is a key that names no
/// property. Unknown EDM types and unlengthed strings are warnings.
pub fn validate_entity(entity: &SchemaEntity) -> ValidationResult {
    let mut result = ValidationResult::new();

    if entity.name.trim().is_empty() {
        result.add_error("Entity name must not be empty");
    }
    if entity.properties.is_empty() {
        result.add_error("Entity must define at least one property");
    }
    if entity.keys.is_empty() {
        result.add_error("Entity must define at least one key");
    }

    for property in &entity.properties {
        if property.name.trim().is_empty() {
            result.add_error("Property name must not be empty");
            continue;
        }
        if property.edm_type.trim().is_empty() {
            result.add_error(format!("Property '{}' has no type", property.name));
            continue;
        }
        if !KNOWN_EDM_TYPES.contains(&property.edm_type.as_str()) {
            result.add_warning(format!(
                "Property '{}' uses unknown EDM type '{}'",
                property.name, property.edm_type
            ));
        }
        if property.edm_type == "Edm.String" && property.max_length.is_none() {
            result.add_warning(format!(
                "String property '{}' has no MaxLength facet",
                property.name
            ));
        }
    }

    for key in &entity.keys {
        if !entity.properties.iter().any(|p| &p.name == key) {
            result.add_error(format!("Key '{}' does not match any property", key));
        }
    }

    result
}

/// Validate generated `$metadata` XML by textual presence checks plus a
/// tag-count balance heuristic.
pub fn validate_metadata_xml(xml: &str) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (token, message) in REQUIRED_METADATA_TOKENS {
        if !xml.contains(token) {
            result.add_error(*message);
        }
    }

    let opening = OPENING_TAG.find_iter(xml).count();
    let closing = CLOSING_TAG.find_iter(xml).count();
    let self_closing = SELF_CLOSING_TAG.find_iter(xml).count();
    if closing != opening - self_closing {
        result.add_warning(format!(
            "Possible unbalanced tags: {} opening, {} closing, {} self-closing",
            opening, closing, self_closing
        ));
    }

    result
}

/// Map an ABAP dictionary type to its EDM primitive type.
///
/// The lookup is case-insensitive; unknown types map to `Edm.String`
/// rather than failing. Length and decimals are accepted for facet-mapping
/// call sites but do not change the base type.
///
/// # Examples
///
/// ```
/// use sap_config_core::validation::map_abap_type;
///
/// assert_eq!(map_abap_type("CURR", Some(15), Some(2)), "Edm.Decimal");
/// assert_eq!(map_abap_type("dats", None, None), "Edm.DateTime");
/// assert_eq!(map_abap_type("WHATEVER", None, None), "Edm.String");
/// ```
pub fn map_abap_type(abap_type: &str, _length: Option<u32>, _decimals: Option<u32>) -> &'static str {
    ABAP_TO_EDM
        .get(abap_type.to_uppercase().as_str())
        .copied()
        .unwrap_or("Edm.String")
}
