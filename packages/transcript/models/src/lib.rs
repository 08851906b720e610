#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Course record types extracted from student transcripts.
//!
//! A [`CourseRecord`] is one row of a transcript as recovered by the
//! extraction engine in `exemption_transcript`. Records are plain values:
//! they are created once per recognised row and never mutated afterwards.
//! Downstream helpers ([`TranscriptSummary`], [`passed_courses`]) live here
//! so that callers can work with extracted records without depending on
//! the PDF stack.

pub mod stats;
pub mod summary;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use stats::{ExtractionStats, RowRejection};
pub use summary::{TranscriptSummary, passed_courses};

/// Whether a course is mandatory or elective in the issuing curriculum.
///
/// Transcripts print the status as a single-letter token, which is also the
/// serialized and displayed form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum CourseStatus {
    /// `Z` (zorunlu): the course is required by the curriculum
    #[serde(rename = "Z")]
    #[strum(serialize = "Z")]
    Mandatory,
    /// `S` (seçmeli): the course was taken as an elective
    #[serde(rename = "S")]
    #[strum(serialize = "S")]
    Elective,
}

impl CourseStatus {
    /// Returns the status for an exact transcript token, or `None` if the
    /// token is not a status marker.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Z" => Some(Self::Mandatory),
            "S" => Some(Self::Elective),
            _ => None,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Mandatory, Self::Elective]
    }
}

/// One course row recovered from a transcript.
///
/// Numeric columns are `None` when the transcript printed the `-` sentinel,
/// when the row ended before the column, or when the token could not be read
/// as a non-negative number. `grade` is `None` for the `--` sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    /// Course code (e.g. `"CMPE101"`).
    pub code: String,
    /// Course name as printed, tokens joined with single spaces.
    pub name: String,
    /// Mandatory/elective marker.
    pub status: CourseStatus,
    /// Language of instruction token (e.g. `"Tr"`, `"En"`).
    pub language: Option<String>,
    /// Weekly theory hours.
    pub theory: Option<f64>,
    /// Weekly practice hours.
    pub practice: Option<f64>,
    /// National credit.
    pub national_credit: Option<f64>,
    /// ECTS credit.
    pub ects: Option<f64>,
    /// Numeric score.
    pub points: Option<f64>,
    /// Letter grade (e.g. `"BA"`).
    pub grade: Option<String>,
    /// Trailing tokens after the grade, in transcript order.
    pub comments: Vec<String>,
}

impl CourseRecord {
    /// Formats the credit triple as `theory-practice-nationalCredit`.
    ///
    /// Missing values are rendered as `0`, which is how exemption documents
    /// print courses with incomplete credit columns.
    ///
    /// ```
    /// use exemption_transcript_models::{CourseRecord, CourseStatus};
    ///
    /// let record = CourseRecord {
    ///     code: "CMPE101".to_owned(),
    ///     name: "Algoritma".to_owned(),
    ///     status: CourseStatus::Mandatory,
    ///     language: Some("Tr".to_owned()),
    ///     theory: Some(2.5),
    ///     practice: None,
    ///     national_credit: Some(3.0),
    ///     ects: Some(5.0),
    ///     points: None,
    ///     grade: None,
    ///     comments: vec![],
    /// };
    ///
    /// assert_eq!(record.credit_label(), "2.5-0-3");
    /// ```
    #[must_use]
    pub fn credit_label(&self) -> String {
        format!(
            "{}-{}-{}",
            self.theory.unwrap_or(0.0),
            self.practice.unwrap_or(0.0),
            self.national_credit.unwrap_or(0.0)
        )
    }

    /// Returns `true` if any trailing comment token equals `marker`.
    #[must_use]
    pub fn has_comment(&self, marker: &str) -> bool {
        self.comments.iter().any(|c| c == marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr as _;

    fn sample() -> CourseRecord {
        CourseRecord {
            code: "CMPE101".to_owned(),
            name: "Algoritma ve Programlama".to_owned(),
            status: CourseStatus::Mandatory,
            language: Some("Tr".to_owned()),
            theory: Some(3.0),
            practice: Some(0.0),
            national_credit: Some(3.0),
            ects: Some(5.0),
            points: Some(85.0),
            grade: Some("BA".to_owned()),
            comments: vec!["G".to_owned()],
        }
    }

    #[test]
    fn status_round_trips_through_tokens() {
        for status in CourseStatus::all() {
            let token = status.to_string();
            assert_eq!(CourseStatus::from_token(&token), Some(*status));
            assert_eq!(CourseStatus::from_str(&token).unwrap(), *status);
        }
    }

    #[test]
    fn status_token_is_case_sensitive() {
        assert_eq!(CourseStatus::from_token("z"), None);
        assert_eq!(CourseStatus::from_token("ZS"), None);
        assert!(CourseStatus::from_str("s").is_err());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["nationalCredit"], 3.0);
        assert_eq!(json["status"], "Z");
        assert_eq!(json["comments"][0], "G");
    }

    #[test]
    fn serializes_missing_values_as_null() {
        let mut record = sample();
        record.theory = None;
        record.grade = None;
        let json = serde_json::to_value(record).unwrap();
        assert!(json["theory"].is_null());
        assert!(json["grade"].is_null());
    }

    #[test]
    fn credit_label_drops_integral_fraction() {
        assert_eq!(sample().credit_label(), "3-0-3");
    }

    #[test]
    fn has_comment_matches_whole_tokens() {
        let record = sample();
        assert!(record.has_comment("G"));
        assert!(!record.has_comment("GR"));
    }
}
