//! Course code recognition.
//!
//! A course code is the only context-free anchor in flattened transcript
//! text: 5 to 9 characters drawn from uppercase Latin letters, the Turkish
//! uppercase letters `ÇĞİÖŞÜ`, and ASCII digits. Line segmentation and row
//! parsing both rely on the same [`CodePattern`].

use regex::Regex;
use std::sync::LazyLock;

/// Regex matching a whole course code token. Length is counted in
/// characters, not bytes.
static COURSE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-ZÇĞİÖŞÜ0-9]{5,9}$").expect("valid regex"));

/// Returns `true` if `token` has the shape of a course code.
#[must_use]
pub fn is_course_code(token: &str) -> bool {
    COURSE_CODE_RE.is_match(token)
}

/// The course code rule applied during one parse.
///
/// The default is the plain shape check from [`is_course_code`]. Any
/// all-caps word of the right length (a department abbreviation in a
/// header, for example) passes it and starts a spurious row.
/// [`CodePattern::require_digit`] narrows the rule to tokens containing at
/// least one digit; it is opt-in until checked against real transcripts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodePattern {
    require_digit: bool,
}

impl CodePattern {
    /// Creates the default pattern.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            require_digit: false,
        }
    }

    /// Sets whether a code must contain at least one ASCII digit.
    #[must_use]
    pub const fn require_digit(mut self, require: bool) -> Self {
        self.require_digit = require;
        self
    }

    /// Returns whether this pattern requires a digit.
    #[must_use]
    pub const fn requires_digit(&self) -> bool {
        self.require_digit
    }

    /// Returns `true` if `token` is a course code under this pattern.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        is_course_code(token) && (!self.require_digit || token.bytes().any(|b| b.is_ascii_digit()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_codes() {
        assert!(is_course_code("CMPE101"));
        assert!(is_course_code("BIL10"));
        assert!(is_course_code("MAT101123"));
        assert!(is_course_code("TÜRK102"));
        assert!(is_course_code("İŞL2001"));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_course_code("BIL1"));
        assert!(!is_course_code("CMPE101234"));
        assert!(!is_course_code(""));
    }

    #[test]
    fn counts_turkish_letters_as_single_characters() {
        // 9 characters, 13 bytes
        assert!(is_course_code("ÇĞİÖŞÜ123"));
        assert!(!is_course_code("ÇĞİÖŞÜ1234"));
    }

    #[test]
    fn rejects_lowercase_and_punctuation() {
        assert!(!is_course_code("Cmpe101"));
        assert!(!is_course_code("CMPE-101"));
        assert!(!is_course_code("CMPE101."));
    }

    #[test]
    fn default_pattern_accepts_all_caps_words() {
        assert!(CodePattern::new().matches("DERSLER"));
        assert!(!CodePattern::new().matches("TRANSKRİPTİ"));
    }

    #[test]
    fn digit_requirement_rejects_all_caps_words() {
        let strict = CodePattern::new().require_digit(true);
        assert!(strict.requires_digit());
        assert!(!strict.matches("DERSLER"));
        assert!(strict.matches("CMPE101"));
        assert!(strict.matches("20201"));
    }
}
