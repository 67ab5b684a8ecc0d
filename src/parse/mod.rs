//! Parsers for semi-structured SAP metadata exports
//!
//! These documents are typed or copy-pasted by a human from SE11-style
//! listings, so the parsers tolerate ragged input: a line that cannot be
//! tokenized is skipped, and a document without recognizable structure
//! parses to an empty result rather than an error.

pub mod custom_fields;
pub mod field_line;
pub mod table_structure;

pub use custom_fields::parse_custom_fields;
pub use field_line::{parse_field_line, MIN_COLUMN_GAP};
pub use table_structure::parse_table_structure;
