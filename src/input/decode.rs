use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::error::InputError;

static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\]").expect("trailing comma pattern is a valid regex"));

/// Turns free text into raw server entries.
///
/// Text starting with `[` is treated as an array literal and must parse as
/// one after single quotes are swapped for double quotes and trailing commas
/// are dropped. Anything else is read one entry per non-blank line.
pub fn parse_input(input: &str) -> Result<Vec<String>, InputError> {
    let input = input.trim();

    if input.starts_with('[') {
        if let Some(entries) = parse_array_literal(input)? {
            return non_empty(entries);
        }
    }

    non_empty(
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// `Ok(None)` means the literal parsed but is not a list of strings, in which
/// case the caller falls back to line splitting.
fn parse_array_literal(input: &str) -> Result<Option<Vec<String>>, InputError> {
    if !input.ends_with(']') {
        return Err(InputError::MalformedList("missing closing bracket".to_string()));
    }

    let quoted = input.replace('\'', "\"");
    let repaired = TRAILING_COMMA_RE.replace_all(&quoted, "]");
    let parsed: Value =
        serde_json::from_str(&repaired).map_err(|e| InputError::MalformedList(e.to_string()))?;

    let Value::Array(items) = parsed else {
        return Ok(None);
    };

    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            _ => None,
        })
        .collect())
}

fn non_empty(entries: Vec<String>) -> Result<Vec<String>, InputError> {
    if entries.is_empty() {
        Err(InputError::Empty)
    } else {
        Ok(entries)
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn test_line_based_input() {
        let text = "\n  stun.l.google.com:19302 \n\n stun:stun.cloudflare.com:3478\n";
        assert_eq!(
            parse_input(text),
            Ok(vec![
                "stun.l.google.com:19302".to_string(),
                "stun:stun.cloudflare.com:3478".to_string(),
            ])
        );
    }

    #[test]
    fn test_lenient_array_literal() {
        let text = "['stun:a.example.com', \" b.example.com:3478 \",\n]";
        assert_eq!(
            parse_input(text),
            Ok(vec![
                "stun:a.example.com".to_string(),
                "b.example.com:3478".to_string(),
            ])
        );
    }

    #[test]
    fn test_unterminated_array_is_an_error() {
        assert!(matches!(
            parse_input("[foo, bar"),
            Err(InputError::MalformedList(_))
        ));
    }

    #[test]
    fn test_unquoted_array_is_an_error() {
        assert!(matches!(
            parse_input("[foo, bar]"),
            Err(InputError::MalformedList(_))
        ));
    }

    #[test]
    fn test_non_string_array_falls_back_to_lines() {
        assert_eq!(parse_input("[1, 2]"), Ok(vec!["[1, 2]".to_string()]));
    }

    #[test]
    fn test_blank_input_is_empty() {
        assert_eq!(parse_input("   \n \n"), Err(InputError::Empty));
        assert_eq!(parse_input("[]"), Err(InputError::Empty));
    }
}
