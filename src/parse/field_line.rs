//! Single-line field parser for structure exports
//!
//! Structure documents are copy-pasted from SE11-style listings, so columns
//! are aligned with runs of whitespace rather than a real delimiter. A line
//! looks like:
//!
//! ```text
//! *MANDT      CLNT       3       Client
//! NETWR       CURR       15,2    Net Value of the Sales Order
//! ```
//!
//! The leading `*` marks a primary-key field. Length and decimals either
//! ride inside the type column (`CURR 15,2` is a single column when the
//! inner gap is below [`MIN_COLUMN_GAP`]) or form their own column.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Field;

/// Minimum run of whitespace treated as a column separator.
///
/// Anything narrower stays inside the column, which is what lets
/// `CURR 15,2` survive tokenization as one type token.
pub const MIN_COLUMN_GAP: usize = 2;

static COLUMN_GAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\s{{{},}}", MIN_COLUMN_GAP)).unwrap());

/// `name` column: plain identifier characters only.
static NAME_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// Bare `length` or `length,decimals` column.
static LENGTH_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)(?:,(\d+))?$").unwrap());

/// Type column with an embedded length, e.g. `CHAR 10` or `CURR 15,2`.
static TYPE_WITH_LENGTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9_]*)\s+(\d+)(?:,(\d+))?$").unwrap());

/// Parse one non-comment line of a structure document into a [`Field`].
///
/// Returns `None` for anything that does not look like a field row (blank
/// line, lone key marker, fewer than two columns, non-identifier name).
/// Malformed lines are not errors; callers skip them.
///
/// `is_custom` is left `false` here; the caller applies the namespace
/// convention once the table context is known.
///
/// # Examples
///
/// ```
/// use sap_config_core::parse::parse_field_line;
///
/// let field = parse_field_line("NETWR  CURR  15,2  Net Value").unwrap();
/// assert_eq!(field.name, "NETWR");
/// assert_eq!(field.data_type, "CURR");
/// assert_eq!(field.length, Some(15));
/// assert_eq!(field.decimals, Some(2));
///
/// let key = parse_field_line("*VBELN  CHAR  10  Sales Document").unwrap();
/// assert!(key.is_key);
/// assert!(!key.nullable);
///
/// assert!(parse_field_line("   ").is_none());
/// assert!(parse_field_line("ORPHAN").is_none());
/// ```
pub fn parse_field_line(line: &str) -> Option<Field> {
    let trimmed = line.trim();
    let (is_key, rest) = match trimmed.strip_prefix('*') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    if rest.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = COLUMN_GAP.split(rest).collect();
    if tokens.len() < 2 {
        return None;
    }

    let name = tokens[0];
    if !NAME_TOKEN.is_match(name) {
        return None;
    }

    let mut field = Field::new(name, "");
    field.is_key = is_key;
    field.nullable = !is_key;

    let description_tokens: &[&str];
    if let Some(caps) = TYPE_WITH_LENGTH.captures(tokens[1]) {
        field.data_type = caps[1].to_string();
        field.length = caps[2].parse().ok();
        field.decimals = caps.get(3).and_then(|m| m.as_str().parse().ok());
        description_tokens = &tokens[2..];
    } else {
        field.data_type = tokens[1].to_string();
        if tokens.len() > 2
            && let Some(caps) = LENGTH_TOKEN.captures(tokens[2])
        {
            field.length = caps[1].parse().ok();
            field.decimals = caps.get(2).and_then(|m| m.as_str().parse().ok());
            description_tokens = &tokens[3..];
        } else {
            description_tokens = &tokens[2..];
        }
    }

    if !description_tokens.is_empty() {
        field.description = Some(description_tokens.join(" "));
    }

    Some(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_field_row() {
        let field = parse_field_line("VBELN       CHAR       10      Sales Document Number")
            .expect("field row");
        assert_eq!(field.name, "VBELN");
        assert_eq!(field.data_type, "CHAR");
        assert_eq!(field.length, Some(10));
        assert_eq!(field.decimals, None);
        assert_eq!(field.description.as_deref(), Some("Sales Document Number"));
        assert!(!field.is_key);
        assert!(field.nullable);
    }

    #[test]
    fn parses_decimal_length_component_wise() {
        let field = parse_field_line("NETWR  CURR  15,2  Net Value").unwrap();
        assert_eq!(field.length, Some(15));
        assert_eq!(field.decimals, Some(2));
    }

    #[test]
    fn parses_length_embedded_in_type_column() {
        // Single space between type and length keeps them in one column
        let field = parse_field_line("WAERK  CUKY 5  SD document currency").unwrap();
        assert_eq!(field.data_type, "CUKY");
        assert_eq!(field.length, Some(5));
        assert_eq!(field.description.as_deref(), Some("SD document currency"));
    }

    #[test]
    fn column_gap_follows_the_documented_minimum() {
        let gap = " ".repeat(MIN_COLUMN_GAP);
        let narrow = " ".repeat(MIN_COLUMN_GAP - 1);
        // A sub-minimum gap keeps type and length in one column
        let line = format!("NETWR{gap}CURR{narrow}15,2{gap}Net Value");
        let field = parse_field_line(&line).unwrap();
        assert_eq!(field.data_type, "CURR");
        assert_eq!(field.length, Some(15));
        assert_eq!(field.decimals, Some(2));
        assert_eq!(field.description.as_deref(), Some("Net Value"));
    }

    #[test]
    fn key_marker_clears_nullable() {
        let field = parse_field_line("*MANDT      CLNT       3       Client").unwrap();
        assert!(field.is_key);
        assert!(!field.nullable);
        assert_eq!(field.name, "MANDT");
    }

    #[test]
    fn key_marker_with_space_is_stripped() {
        let field = parse_field_line("* VBELN    CHAR    10").unwrap();
        assert_eq!(field.name, "VBELN");
        assert!(field.is_key);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_field_line("").is_none());
        assert!(parse_field_line("    ").is_none());
        assert!(parse_field_line("*").is_none());
        assert!(parse_field_line("*   ").is_none());
        assert!(parse_field_line("ONLY_ONE_TOKEN").is_none());
        // Name column must be identifier-shaped
        assert!(parse_field_line("not a name  CHAR  10").is_none());
    }

    #[test]
    fn two_token_line_has_no_length_or_description() {
        let field = parse_field_line("KUNNR  CHAR").unwrap();
        assert_eq!(field.data_type, "CHAR");
        assert_eq!(field.length, None);
        assert_eq!(field.description, None);
    }

    #[test]
    fn multi_column_description_is_rejoined() {
        let field = parse_field_line("ERDAT  DATS  8  Date on which  record was created").unwrap();
        assert_eq!(
            field.description.as_deref(),
            Some("Date on which record was created")
        );
    }
}
