//! Table structure model

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::field::Field;

/// A parsed table-structure document: ordered fields plus the key and
/// customer-field subsets.
///
/// Custom fields are stored as indices into `fields` rather than copies, so
/// a field is represented exactly once. Serialization resolves the indices
/// and emits `customFields` as a field array, matching the boundary shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableStructure {
    /// Table name (e.g. `VBAK`)
    pub table_name: String,
    /// Prose description line from the document header, when present
    pub description: Option<String>,
    /// All parsed fields, in source order
    pub fields: Vec<Field>,
    /// Names of primary-key fields, first-seen order, deduplicated
    pub keys: Vec<String>,
    custom_field_indices: Vec<usize>,
}

impl TableStructure {
    /// Create an empty structure for the given table name.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Default::default()
        }
    }

    /// Append a parsed field, maintaining the key and custom-field subsets.
    pub fn push_field(&mut self, field: Field) {
        if field.is_key && !self.keys.iter().any(|k| k == &field.name) {
            self.keys.push(field.name.clone());
        }
        if field.is_custom {
            self.custom_field_indices.push(self.fields.len());
        }
        self.fields.push(field);
    }

    /// Customer-namespace fields, resolved from their back-references.
    pub fn custom_fields(&self) -> impl Iterator<Item = &Field> {
        self.custom_field_indices.iter().map(|&i| &self.fields[i])
    }

    /// Number of customer-namespace fields.
    pub fn custom_field_count(&self) -> usize {
        self.custom_field_indices.len()
    }

    /// True when the document yielded no recognizable field rows.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for TableStructure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TableStructure", 5)?;
        state.serialize_field("tableName", &self.table_name)?;
        if self.description.is_some() {
            state.serialize_field("description", &self.description)?;
        } else {
            state.skip_field("description")?;
        }
        state.serialize_field("fields", &self.fields)?;
        state.serialize_field("keys", &self.keys)?;
        let custom: Vec<&Field> = self.custom_fields().collect();
        state.serialize_field("customFields", &custom)?;
        state.end()
    }
}
