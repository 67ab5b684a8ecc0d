//! Version and focus-area tags shared with the orchestration layer

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failed to parse an enum tag supplied at the boundary.
///
/// This is the only error this crate returns: domain parsing represents
/// malformed input as empty/partial results instead.
#[derive(Debug, Clone, Error)]
#[error("unknown {kind}: '{value}'")]
pub struct EnumParseError {
    kind: &'static str,
    value: String,
}

/// Target SAP release for the generated ABAP code.
///
/// Affects which constructs the code validator treats as forbidden or
/// obsolete; `R3` is the oldest supported release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SapVersion {
    R3,
    #[serde(rename = "ECC6")]
    Ecc6,
    #[serde(rename = "S4HANA")]
    S4Hana,
}

impl FromStr for SapVersion {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "R3" => Ok(Self::R3),
            "ECC6" => Ok(Self::Ecc6),
            "S4HANA" => Ok(Self::S4Hana),
            _ => Err(EnumParseError {
                kind: "SAP version",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SapVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::R3 => write!(f, "R3"),
            Self::Ecc6 => write!(f, "ECC6"),
            Self::S4Hana => write!(f, "S4HANA"),
        }
    }
}

/// Restricts which sections of the customization report are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusArea {
    Tables,
    Fields,
    Bapis,
    Exits,
}

impl FromStr for FocusArea {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tables" => Ok(Self::Tables),
            "fields" => Ok(Self::Fields),
            "bapis" => Ok(Self::Bapis),
            "exits" => Ok(Self::Exits),
            _ => Err(EnumParseError {
                kind: "focus area",
                value: s.to_string(),
            }),
        }
    }
}
