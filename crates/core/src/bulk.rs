//! Bulk import parsing for pasted lists of file names.
//!
//! Input is either one name per line, or a single line of comma-separated
//! names. Parsing keeps duplicates; the store rejects them on insert.

use serde::Serialize;
use thiserror::Error;

/// Problems found by [`validate_bulk`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BulkInputError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("No valid file names found")]
    NoValidNames,

    #[error("Duplicate entries found: {}", .0.join(", "))]
    DuplicateInInput(Vec<String>),
}

impl Serialize for BulkInputError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of validating bulk input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkValidation {
    pub valid: bool,
    pub errors: Vec<BulkInputError>,
    /// Number of names parsed, even when invalid.
    pub file_count: usize,
}

/// Split pasted text into cleaned names.
pub fn parse_bulk(text: &str) -> Vec<String> {
    let lines = split_clean(text, '\n');

    if lines.len() == 1 && lines[0].contains(',') {
        return split_clean(&lines[0], ',');
    }
    lines
}

fn split_clean(text: &str, separator: char) -> Vec<String> {
    text.split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Check pasted text before importing it.
pub fn validate_bulk(text: &str) -> BulkValidation {
    if text.trim().is_empty() {
        return BulkValidation {
            valid: false,
            errors: vec![BulkInputError::EmptyInput],
            file_count: 0,
        };
    }

    let names = parse_bulk(text);
    let mut errors = Vec::new();

    if names.is_empty() {
        errors.push(BulkInputError::NoValidNames);
    }

    let duplicates = repeated_names(&names);
    if !duplicates.is_empty() {
        errors.push(BulkInputError::DuplicateInInput(duplicates));
    }

    BulkValidation {
        valid: errors.is_empty(),
        errors,
        file_count: names.len(),
    }
}

/// Names occurring more than once, each listed once, ordered by first repeat.
fn repeated_names(names: &[String]) -> Vec<String> {
    let mut repeated: Vec<String> = Vec::new();
    for (index, name) in names.iter().enumerate() {
        if names[..index].contains(name) && !repeated.contains(name) {
            repeated.push(name.clone());
        }
    }
    repeated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_newlines_and_commas_agree() {
        let expected = vec!["a", "b", "c"];
        assert_eq!(parse_bulk("a,b,c"), expected);
        assert_eq!(parse_bulk("a\nb\nc"), expected);
        assert_eq!(parse_bulk("a\r\nb\r\nc\r\n"), expected);
    }

    #[test]
    fn test_parse_drops_blank_pieces() {
        assert_eq!(parse_bulk("  ,a, ,b,"), vec!["a", "b"]);
        assert_eq!(
            parse_bulk("\n\n  song1.psarc  \n\n song2.psarc\n"),
            vec!["song1.psarc", "song2.psarc"]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_bulk("").is_empty());
        assert!(parse_bulk("   \n\t\n").is_empty());
        assert!(parse_bulk(" , , ").is_empty());
    }

    #[test]
    fn test_parse_commas_ignored_with_multiple_lines() {
        assert_eq!(
            parse_bulk("Artist, The - Song.psarc\nother.psarc"),
            vec!["Artist, The - Song.psarc", "other.psarc"]
        );
    }

    #[test]
    fn test_parse_keeps_duplicates_and_order() {
        assert_eq!(parse_bulk("b\na\nb"), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_parse_single_name() {
        assert_eq!(parse_bulk("  only.psarc "), vec!["only.psarc"]);
    }

    #[test]
    fn test_validate_empty() {
        let result = validate_bulk("  \n ");
        assert!(!result.valid);
        assert_eq!(result.errors, vec![BulkInputError::EmptyInput]);
        assert_eq!(result.file_count, 0);
    }

    #[test]
    fn test_validate_no_valid_names() {
        let result = validate_bulk(", ,");
        assert!(!result.valid);
        assert_eq!(result.errors, vec![BulkInputError::NoValidNames]);
        assert_eq!(result.file_count, 0);
    }

    #[test]
    fn test_validate_duplicates() {
        let result = validate_bulk("a\na");
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![BulkInputError::DuplicateInInput(vec!["a".to_string()])]
        );
        assert_eq!(result.file_count, 2);
    }

    #[test]
    fn test_validate_duplicates_listed_once() {
        let result = validate_bulk("x,y,x,y,x");
        assert_eq!(result.file_count, 5);
        assert_eq!(
            result.errors[0].to_string(),
            "Duplicate entries found: x, y"
        );
    }

    #[test]
    fn test_validate_ok() {
        let result = validate_bulk("song1.psarc\nsong2.psarc");
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.file_count, 2);
    }

    #[test]
    fn test_validation_serializes_messages() {
        let json = serde_json::to_value(validate_bulk("")).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"][0], "Input is empty");
        assert_eq!(json["fileCount"], 0);
    }
}
