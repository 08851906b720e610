//! Extraction counters reported alongside the records of a transcript.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// Why a candidate row did not produce a [`crate::CourseRecord`].
///
/// Rejections are expected on every transcript (headers, footers, page
/// numbers) and are never surfaced as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RowRejection {
    /// The row contained no tokens.
    Empty,
    /// The first token is not a course code.
    InvalidCode,
    /// The status token directly follows the code.
    MissingName,
    /// No `Z`/`S` token follows the code.
    MissingStatus,
}

/// Counters collected while extracting one page or one whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    /// Pages processed.
    pub pages: u64,
    /// Candidate rows produced by line segmentation.
    pub candidate_rows: u64,
    /// Records materialised.
    pub records: u64,
    /// Rows whose first token is not a course code.
    pub rejected_invalid_code: u64,
    /// Rows without a course name.
    pub rejected_missing_name: u64,
    /// Rows without a status token.
    pub rejected_missing_status: u64,
    /// Empty rows.
    pub rejected_empty: u64,
    /// Numeric tokens that were neither a sentinel nor a valid number and
    /// were replaced by `None`.
    pub invalid_numeric_fields: u64,
}

impl ExtractionStats {
    /// Counts one rejected row.
    pub const fn record_rejection(&mut self, reason: RowRejection) {
        match reason {
            RowRejection::Empty => self.rejected_empty += 1,
            RowRejection::InvalidCode => self.rejected_invalid_code += 1,
            RowRejection::MissingName => self.rejected_missing_name += 1,
            RowRejection::MissingStatus => self.rejected_missing_status += 1,
        }
    }

    /// Total number of rejected candidate rows.
    #[must_use]
    pub const fn rejected_rows(&self) -> u64 {
        self.rejected_empty
            + self.rejected_invalid_code
            + self.rejected_missing_name
            + self.rejected_missing_status
    }

    /// Adds the counters of `other` (typically one page) into `self`.
    pub const fn absorb(&mut self, other: &Self) {
        self.pages += other.pages;
        self.candidate_rows += other.candidate_rows;
        self.records += other.records;
        self.rejected_invalid_code += other.rejected_invalid_code;
        self.rejected_missing_name += other.rejected_missing_name;
        self.rejected_missing_status += other.rejected_missing_status;
        self.rejected_empty += other.rejected_empty;
        self.invalid_numeric_fields += other.invalid_numeric_fields;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_rejections_by_reason() {
        let mut stats = ExtractionStats::default();
        stats.record_rejection(RowRejection::InvalidCode);
        stats.record_rejection(RowRejection::MissingStatus);
        stats.record_rejection(RowRejection::MissingStatus);

        assert_eq!(stats.rejected_invalid_code, 1);
        assert_eq!(stats.rejected_missing_status, 2);
        assert_eq!(stats.rejected_rows(), 3);
    }

    #[test]
    fn absorbs_page_counters() {
        let page = ExtractionStats {
            pages: 1,
            candidate_rows: 4,
            records: 3,
            rejected_missing_status: 1,
            invalid_numeric_fields: 2,
            ..ExtractionStats::default()
        };

        let mut total = ExtractionStats::default();
        total.absorb(&page);
        total.absorb(&page);

        assert_eq!(total.pages, 2);
        assert_eq!(total.candidate_rows, 8);
        assert_eq!(total.records, 6);
        assert_eq!(total.rejected_rows(), 2);
        assert_eq!(total.invalid_numeric_fields, 4);
    }

    #[test]
    fn rejection_displays_snake_case() {
        assert_eq!(RowRejection::MissingStatus.to_string(), "missing_status");
    }
}
