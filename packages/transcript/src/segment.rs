//! Row boundary reconstruction.
//!
//! PDF text decoding keeps word order but drops row separators, so a page
//! arrives as one long run of tokens. Every token that looks like a course
//! code opens a new candidate row; everything up to the next such token
//! belongs to it. Text before the first code cannot hold a course row and is
//! set aside as the leading fragment.
//!
//! Tokens that accidentally match the code pattern split a real row in two.
//! See [`CodePattern`] for the stricter opt-in rule.

use regex::Regex;
use std::sync::LazyLock;

use crate::code::CodePattern;

/// Regex matching one whitespace-delimited token.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("valid regex"));

/// Candidate rows recovered from one normalized page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation<'a> {
    /// Text preceding the first course code (page headers, student details).
    pub leading: Option<&'a str>,
    /// One entry per course code occurrence, in page order. Each row starts
    /// with its code token.
    pub rows: Vec<&'a str>,
}

/// Splits normalized page text into candidate rows.
#[must_use]
pub fn segment<'a>(text: &'a str, pattern: &CodePattern) -> Segmentation<'a> {
    let boundaries: Vec<usize> = TOKEN_RE
        .find_iter(text)
        .filter(|m| pattern.matches(m.as_str()))
        .map(|m| m.start())
        .collect();

    let leading_end = boundaries.first().copied().unwrap_or(text.len());
    let leading = Some(text[..leading_end].trim()).filter(|s| !s.is_empty());

    let rows = boundaries
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = boundaries.get(i + 1).copied().unwrap_or(text.len());
            text[start..end].trim_end()
        })
        .collect();

    Segmentation { leading, rows }
}

/// Returns only the candidate rows of `text`.
#[must_use]
pub fn candidate_rows<'a>(text: &'a str, pattern: &CodePattern) -> Vec<&'a str> {
    segment(text, pattern).rows
}
