//! Positional field grammar for one candidate row.
//!
//! A course row reads, left to right:
//!
//! ```text
//! CODE NAME... STATUS LANGUAGE THEORY PRACTICE CREDIT ECTS POINTS GRADE COMMENTS...
//! ```
//!
//! `NAME` runs until the first token that is exactly `Z` or `S`. After the
//! status every slot consumes exactly one token. A row that ends early
//! leaves the remaining slots empty; numeric tokens that fail to parse are
//! replaced by `None` and reported in [`ParsedRow::invalid_numbers`].
//!
//! A status token directly after the code is rejected as
//! [`RowRejection::MissingName`] instead of producing a record with an empty
//! name, so not every code followed by `Z`/`S` yields a record.

use std::str::SplitWhitespace;

use exemption_transcript_models::{CourseRecord, CourseStatus, RowRejection};

use crate::code::CodePattern;
use crate::numeric::{InvalidNumber, parse_locale_number};

/// Token printed in the grade column when no grade was given.
pub const MISSING_GRADE: &str = "--";

/// A row that produced a [`CourseRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    /// The extracted record.
    pub record: CourseRecord,
    /// Numeric tokens that were replaced by `None`, in column order.
    pub invalid_numbers: Vec<InvalidNumber>,
}

/// Consumes the post-status slots of a row one token at a time.
struct FieldCursor<'a> {
    tokens: SplitWhitespace<'a>,
    invalid_numbers: Vec<InvalidNumber>,
}

impl FieldCursor<'_> {
    fn text(&mut self) -> Option<String> {
        self.tokens.next().map(str::to_owned)
    }

    fn number(&mut self) -> Option<f64> {
        match parse_locale_number(self.tokens.next()) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("Treating {e} as missing");
                self.invalid_numbers.push(e);
                None
            }
        }
    }

    fn grade(&mut self) -> Option<String> {
        self.tokens
            .next()
            .filter(|t| *t != MISSING_GRADE)
            .map(str::to_owned)
    }

    fn rest(&mut self) -> Vec<String> {
        self.tokens.by_ref().map(str::to_owned).collect()
    }
}

/// Parses one candidate row into a [`CourseRecord`].
///
/// # Errors
///
/// Returns the [`RowRejection`] reason when the row is not a course row:
/// no tokens, a first token that is not a code under `pattern`, a status
/// token directly after the code, or no status token at all.
pub fn parse_row(row: &str, pattern: &CodePattern) -> Result<ParsedRow, RowRejection> {
    let mut tokens = row.split_whitespace();

    let code = tokens.next().ok_or(RowRejection::Empty)?;
    if !pattern.matches(code) {
        return Err(RowRejection::InvalidCode);
    }

    let mut name = Vec::new();
    let status = loop {
        let token = tokens.next().ok_or(RowRejection::MissingStatus)?;
        if let Some(status) = CourseStatus::from_token(token) {
            break status;
        }
        name.push(token);
    };
    if name.is_empty() {
        return Err(RowRejection::MissingName);
    }

    let mut cursor = FieldCursor {
        tokens,
        invalid_numbers: Vec::new(),
    };

    let record = CourseRecord {
        code: code.to_owned(),
        name: name.join(" "),
        status,
        language: cursor.text(),
        theory: cursor.number(),
        practice: cursor.number(),
        national_credit: cursor.number(),
        ects: cursor.number(),
        points: cursor.number(),
        grade: cursor.grade(),
        comments: cursor.rest(),
    };

    Ok(ParsedRow {
        record,
        invalid_numbers: cursor.invalid_numbers,
    })
}
