//! Validation of generated artifacts
//!
//! Two validators run over generated text before it is treated as ready:
//! [`abap::validate_abap`] for ABAP source and the [`odata`] checks for
//! entity definitions and `$metadata` XML. Findings are data, never
//! exceptions: each check appends to the result and no check can
//! short-circuit another.

pub mod abap;
pub mod odata;

use serde::Serialize;

pub use abap::validate_abap;
pub use odata::{map_abap_type, validate_entity, validate_metadata_xml};

/// Accumulated findings of a validator run.
///
/// Errors block acceptance, warnings do not; `is_valid` holds exactly when
/// no error was recorded. The lists keep check execution order, which
/// golden-output tests rely on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    /// Start with an empty, valid result.
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.is_valid = false;
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_invalidate_warnings_do_not() {
        let mut result = ValidationResult::new();
        assert!(result.is_valid);

        result.add_warning("heuristic finding");
        assert!(result.is_valid);

        result.add_error("hard finding");
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn default_result_is_valid_with_no_findings() {
        let result = ValidationResult::default();
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.is_valid, result.errors.is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(ValidationResult::new()).unwrap();
        assert_eq!(json["isValid"], true);
        assert!(json["errors"].as_array().unwrap().is_empty());
    }
}
