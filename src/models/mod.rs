//! Data model for parsed SAP configuration documents and validator findings
//!
//! All boundary types serialize to camelCase JSON so the tool-invocation
//! layer can present them without reshaping (`tableName`, `isKey`,
//! `customFields`, ...).

pub mod entity;
pub mod enums;
pub mod field;
pub mod report;
pub mod table;

pub use entity::{SchemaEntity, SchemaProperty};
pub use enums::{EnumParseError, FocusArea, SapVersion};
pub use field::Field;
pub use report::{CustomObjects, CustomizationReport};
pub use table::TableStructure;
