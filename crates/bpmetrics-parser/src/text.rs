//! Free-text normalization for labels and glossary links.

use serde_json::Value;

const GLOSSARY_PREFIX: &str = "/glossary/";

/// Clean a display name.
///
/// Every newline and carriage return becomes one space, then surrounding
/// whitespace is trimmed. Nothing else is touched.
pub fn clean_label(raw: &str) -> String {
    raw.replace(['\n', '\r'], " ").trim().to_string()
}

/// Normalize the `glossaryLinks.name` entry of a shape.
///
/// Strings and arrays of strings are accepted; array items are joined with
/// `", "`. Bracket and quote characters and every `/glossary/` prefix are
/// stripped. Anything else, or an entry that is empty after stripping,
/// yields `None`.
pub fn normalize_glossary_link(raw: Option<&Value>) -> Option<String> {
    let joined = match raw? {
        Value::String(link) => link.clone(),
        Value::Array(items) => {
            let links: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
            links?.join(", ")
        }
        _ => return None,
    };

    let normalized: String = joined
        .replace(GLOSSARY_PREFIX, "")
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '\'' | '"'))
        .collect();
    let normalized = normalized.trim();

    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_clean_label_replaces_line_breaks() {
        assert_eq!(clean_label("Check\norder"), "Check order");
        assert_eq!(clean_label("Check\r\norder"), "Check  order");
        assert_eq!(clean_label("  \nShip goods\r "), "Ship goods");
    }

    #[test]
    fn test_clean_label_keeps_inner_text() {
        assert_eq!(clean_label("Approve (2x) – fast"), "Approve (2x) – fast");
        assert_eq!(clean_label(""), "");
    }

    #[test]
    fn test_glossary_single_link() {
        let raw = json!(["/glossary/5f1c0a"]);
        assert_eq!(
            normalize_glossary_link(Some(&raw)).as_deref(),
            Some("5f1c0a")
        );
    }

    #[test]
    fn test_glossary_multiple_links() {
        let raw = json!(["/glossary/a1", "/glossary/b2"]);
        assert_eq!(
            normalize_glossary_link(Some(&raw)).as_deref(),
            Some("a1, b2")
        );
    }

    #[test]
    fn test_glossary_string_with_brackets() {
        let raw = json!("['/glossary/x9']");
        assert_eq!(normalize_glossary_link(Some(&raw)).as_deref(), Some("x9"));
    }

    #[test]
    fn test_glossary_absent_or_unusable() {
        assert_eq!(normalize_glossary_link(None), None);
        assert_eq!(normalize_glossary_link(Some(&json!(null))), None);
        assert_eq!(normalize_glossary_link(Some(&json!([]))), None);
        assert_eq!(normalize_glossary_link(Some(&json!({"a": 1}))), None);
        assert_eq!(normalize_glossary_link(Some(&json!([1, 2]))), None);
    }
}
