//! Aggregates over extracted course records.
//!
//! The extraction engine never filters or deduplicates; these helpers are
//! what the application layer uses to present totals and to pick the rows
//! that are eligible for an exemption request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CourseRecord, CourseStatus};

/// Totals over a sequence of [`CourseRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSummary {
    /// Number of records, repeats included.
    pub course_count: usize,
    /// Records with [`CourseStatus::Mandatory`].
    pub mandatory_count: usize,
    /// Records with [`CourseStatus::Elective`].
    pub elective_count: usize,
    /// Sum of the ECTS column; missing values contribute nothing.
    pub total_ects: f64,
    /// Sum of the national credit column; missing values contribute nothing.
    pub total_national_credit: f64,
    /// Number of distinct course codes.
    pub distinct_codes: usize,
    /// Codes that appear on more than one row, in first-seen order.
    pub repeated_codes: Vec<String>,
}

impl TranscriptSummary {
    /// Computes the summary of `records`.
    #[must_use]
    pub fn from_records(records: &[CourseRecord]) -> Self {
        let mut summary = Self {
            course_count: records.len(),
            ..Self::default()
        };

        // code -> (first index, occurrences)
        let mut seen: BTreeMap<&str, (usize, usize)> = BTreeMap::new();

        for (i, record) in records.iter().enumerate() {
            match record.status {
                CourseStatus::Mandatory => summary.mandatory_count += 1,
                CourseStatus::Elective => summary.elective_count += 1,
            }
            summary.total_ects += record.ects.unwrap_or(0.0);
            summary.total_national_credit += record.national_credit.unwrap_or(0.0);

            seen.entry(record.code.as_str())
                .and_modify(|(_, count)| *count += 1)
                .or_insert((i, 1));
        }

        summary.distinct_codes = seen.len();

        let mut repeated: Vec<(usize, &str)> = seen
            .into_iter()
            .filter(|(_, (_, count))| *count > 1)
            .map(|(code, (first, _))| (first, code))
            .collect();
        repeated.sort_unstable();
        summary.repeated_codes = repeated
            .into_iter()
            .map(|(_, code)| code.to_owned())
            .collect();

        summary
    }
}

/// Returns the records whose comments contain `marker`, in order.
///
/// Transcripts annotate passed courses with a comment token (`"G"` on the
/// transcripts this was written for); only those rows can be submitted for
/// an exemption.
#[must_use]
pub fn passed_courses<'a>(records: &'a [CourseRecord], marker: &str) -> Vec<&'a CourseRecord> {
    records.iter().filter(|r| r.has_comment(marker)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, status: CourseStatus, ects: Option<f64>, comment: &str) -> CourseRecord {
        CourseRecord {
            code: code.to_owned(),
            name: "Ders".to_owned(),
            status,
            language: Some("Tr".to_owned()),
            theory: Some(3.0),
            practice: Some(0.0),
            national_credit: Some(3.0),
            ects,
            points: None,
            grade: None,
            comments: vec![comment.to_owned()],
        }
    }

    #[test]
    fn summarizes_counts_and_totals() {
        let records = vec![
            record("CMPE101", CourseStatus::Mandatory, Some(5.0), "G"),
            record("MATH101", CourseStatus::Mandatory, None, "K"),
            record("HIST201", CourseStatus::Elective, Some(2.5), "G"),
        ];

        let summary = TranscriptSummary::from_records(&records);

        assert_eq!(summary.course_count, 3);
        assert_eq!(summary.mandatory_count, 2);
        assert_eq!(summary.elective_count, 1);
        assert!((summary.total_ects - 7.5).abs() < f64::EPSILON);
        assert!((summary.total_national_credit - 9.0).abs() < f64::EPSILON);
        assert_eq!(summary.distinct_codes, 3);
        assert!(summary.repeated_codes.is_empty());
    }

    #[test]
    fn reports_retaken_courses_in_first_seen_order() {
        let records = vec![
            record("PHYS101", CourseStatus::Mandatory, Some(5.0), "K"),
            record("CMPE101", CourseStatus::Mandatory, Some(5.0), "K"),
            record("CMPE101", CourseStatus::Mandatory, Some(5.0), "G"),
            record("PHYS101", CourseStatus::Mandatory, Some(5.0), "G"),
        ];

        let summary = TranscriptSummary::from_records(&records);

        assert_eq!(summary.course_count, 4);
        assert_eq!(summary.distinct_codes, 2);
        assert_eq!(summary.repeated_codes, vec!["PHYS101", "CMPE101"]);
    }

    #[test]
    fn empty_summary() {
        let summary = TranscriptSummary::from_records(&[]);
        assert_eq!(summary, TranscriptSummary::default());
    }

    #[test]
    fn filters_passed_courses_preserving_order() {
        let records = vec![
            record("CMPE101", CourseStatus::Mandatory, Some(5.0), "K"),
            record("CMPE101", CourseStatus::Mandatory, Some(5.0), "G"),
            record("HIST201", CourseStatus::Elective, Some(2.0), "G"),
        ];

        let passed = passed_courses(&records, "G");

        assert_eq!(passed.len(), 2);
        assert_eq!(passed[0].code, "CMPE101");
        assert_eq!(passed[0].comments, vec!["G"]);
        assert_eq!(passed[1].code, "HIST201");
    }
}
