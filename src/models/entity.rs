//! OData entity definition supplied by the generation collaborator

use serde::{Deserialize, Serialize};

/// A property of a generated OData entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub edm_type: String,
    /// Whether the property is nullable; absent means unspecified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// MaxLength facet, expected for `Edm.String` properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

impl SchemaProperty {
    pub fn new(name: impl Into<String>, edm_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            edm_type: edm_type.into(),
            nullable: None,
            max_length: None,
        }
    }
}

/// An entity definition (property list + key list) to validate before the
/// generated service metadata is treated as ready.
///
/// The invariant that every key names an existing property is checked by
/// the validator, not enforced by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaEntity {
    pub name: String,
    pub properties: Vec<SchemaProperty>,
    pub keys: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_round_trips_through_json() {
        let entity = SchemaEntity {
            name: "Quote".to_string(),
            properties: vec![SchemaProperty::new("QuoteId", "Edm.String")],
            keys: vec!["QuoteId".to_string()],
        };
        let json = serde_json::to_string(&entity).unwrap();
        assert!(json.contains("\"type\":\"Edm.String\""));
        let back: SchemaEntity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entity);
    }
}
