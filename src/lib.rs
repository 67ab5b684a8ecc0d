//! SAP Config Core - configuration parsing and artifact validation
//!
//! Turns semi-structured SAP metadata exports (table/field listings,
//! custom-field catalogs, user-exit lists) into normalized records, and
//! runs static checks over generated artifacts (ABAP source and OData
//! `$metadata` XML) before they are treated as ready.
//!
//! Provides:
//! - Structure-document parsing (`parse`)
//! - Customization extraction over config-file sets (`extract`)
//! - ABAP and OData metadata validation (`validation`)
//! - The shared data model and boundary enums (`models`)
//!
//! Everything here is a synchronous pure function over in-memory strings;
//! the only I/O is the file loop in [`extract::analyze_configs`], which
//! skips unreadable paths instead of failing the batch. Code generation
//! itself lives with the orchestration collaborator, not here.

pub mod extract;
pub mod models;
pub mod parse;
pub mod validation;

// Re-export commonly used types
pub use extract::{analyze_configs, classify, extract_custom_objects, ConfigKind};
pub use models::{
    CustomObjects, CustomizationReport, EnumParseError, Field, FocusArea, SapVersion,
    SchemaEntity, SchemaProperty, TableStructure,
};
pub use parse::{parse_custom_fields, parse_field_line, parse_table_structure};
pub use validation::{
    map_abap_type, validate_abap, validate_entity, validate_metadata_xml, ValidationResult,
};
