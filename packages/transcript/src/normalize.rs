//! Page text normalization.
//!
//! Applied once per page before line segmentation:
//! 1. Join the page's text fragments with single spaces
//! 2. Replace every `(...)` span with a space (transcripts print English
//!    translations of course names in parentheses)
//! 3. Collapse whitespace runs to a single space
//! 4. Trim

use regex::Regex;
use std::sync::LazyLock;

/// Regex matching a parenthesised span up to the first closing parenthesis.
/// Nesting is not tracked.
static PARENTHESIZED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("valid regex"));

/// Regex to collapse whitespace runs into a single space.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalizes one page's text.
#[must_use]
pub fn normalize(input: &str) -> String {
    let stripped = PARENTHESIZED_RE.replace_all(input, " ");
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
}

/// Joins a page's fragments with single spaces and normalizes the result.
#[must_use]
pub fn normalize_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    let joined = fragments
        .iter()
        .map(AsRef::<str>::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    normalize(&joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_parenthesized_translations() {
        assert_eq!(
            normalize("CMPE101 Algoritma (Algorithms) Z Tr"),
            "CMPE101 Algoritma Z Tr"
        );
    }

    #[test]
    fn strips_multiple_spans() {
        assert_eq!(normalize("a (b) c (d e) f"), "a c f");
    }

    #[test]
    fn keeps_unbalanced_parenthesis() {
        assert_eq!(normalize("Fizik (Physics Z Tr"), "Fizik (Physics Z Tr");
    }

    #[test]
    fn stops_at_first_closing_parenthesis() {
        assert_eq!(normalize("a (b (c) d) e"), "a d) e");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  CMPE101 \t Algoritma\n\nZ  "), "CMPE101 Algoritma Z");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("()"), "");
    }

    #[test]
    fn joins_fragments_with_spaces() {
        let fragments = ["CMPE101", "Algoritma", "(Algorithms)", "Z"];
        assert_eq!(normalize_fragments(&fragments), "CMPE101 Algoritma Z");
    }

    #[test]
    fn joins_fragments_spanning_a_parenthesis() {
        let fragments = vec!["Veri (Data".to_owned(), "Structures) Yapıları".to_owned()];
        assert_eq!(normalize_fragments(&fragments), "Veri Yapıları");
    }
}
