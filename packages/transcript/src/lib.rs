#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Course record extraction from PDF transcripts.
//!
//! PDF text decoding discards layout, so each transcript page arrives as a
//! flat run of words. This crate rebuilds the course table from it:
//!
//! 1. [`decoder`]: bytes to ordered pages of text fragments ([`pdf_extract`])
//! 2. [`normalize`]: strip parenthesised annotations, collapse whitespace
//! 3. [`segment`]: cut the page into candidate rows at every course code
//! 4. [`row`]: read each row against the fixed column grammar
//! 5. [`TranscriptParser`]: concatenate records in page and row order
//!
//! Rows that are not course rows are dropped silently and only counted in
//! [`ExtractionStats`]. The only fatal failure is a document that cannot be
//! decoded.

pub mod code;
pub mod config;
pub mod decoder;
pub mod normalize;
pub mod numeric;
pub mod progress;
pub mod row;
pub mod segment;

use std::sync::Arc;

pub use exemption_transcript_models::{
    CourseRecord, CourseStatus, ExtractionStats, RowRejection, TranscriptSummary,
    passed_courses,
};

use crate::code::CodePattern;
use crate::config::ParserConfig;
use crate::decoder::{PageText, PageTextExtractor};
use crate::progress::{CancellationToken, ProgressCallback, null_progress};

/// Errors that abort a transcript parse.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    /// The PDF could not be decoded.
    #[error("PDF decode error: {0}")]
    Decode(String),

    /// The document exceeds the configured size limit.
    #[error("Document is {size} bytes, limit is {limit} bytes")]
    DocumentTooLarge {
        /// Size of the rejected document in bytes.
        size: usize,
        /// Configured maximum in bytes.
        limit: usize,
    },

    /// The parse was cancelled before the given zero-indexed page.
    #[error("Parsing cancelled before page {page}")]
    Cancelled {
        /// The page that was about to be processed.
        page: usize,
    },

    /// The configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The records extracted from one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    /// Records in page order, then row order. Repeated codes are kept.
    pub records: Vec<CourseRecord>,
    /// Counters for the whole document.
    pub stats: ExtractionStats,
}

impl Transcript {
    /// Computes the [`TranscriptSummary`] of the extracted records.
    #[must_use]
    pub fn summary(&self) -> TranscriptSummary {
        TranscriptSummary::from_records(&self.records)
    }
}

/// Extracts the records of one page from its raw text fragments.
#[must_use]
pub fn extract_page<S: AsRef<str>>(fragments: &[S], pattern: &CodePattern) -> Transcript {
    let normalized = normalize::normalize_fragments(fragments);
    extract_normalized(&normalized, pattern)
}

/// Extracts the records of one page given as a single string.
#[must_use]
pub fn parse_page_text(text: &str, pattern: &CodePattern) -> Transcript {
    extract_normalized(&normalize::normalize(text), pattern)
}

fn extract_normalized(normalized: &str, pattern: &CodePattern) -> Transcript {
    let mut page = Transcript {
        stats: ExtractionStats {
            pages: 1,
            ..ExtractionStats::default()
        },
        ..Transcript::default()
    };

    for candidate in segment::candidate_rows(normalized, pattern) {
        page.stats.candidate_rows += 1;
        match row::parse_row(candidate, pattern) {
            Ok(parsed) => {
                page.stats.invalid_numeric_fields += parsed.invalid_numbers.len() as u64;
                page.stats.records += 1;
                page.records.push(parsed.record);
            }
            Err(reason) => {
                log::trace!("Dropped row ({reason}): {candidate}");
                page.stats.record_rejection(reason);
            }
        }
    }

    page
}

/// Runs extraction over every page of a document.
///
/// Pages are processed one at a time, in order. Cancellation is checked
/// before decoding and before every page.
pub struct TranscriptParser {
    pattern: CodePattern,
    progress: Arc<dyn ProgressCallback>,
    cancellation: CancellationToken,
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

impl TranscriptParser {
    /// Creates a parser from parser settings.
    #[must_use]
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            pattern: config.code_pattern(),
            progress: null_progress(),
            cancellation: CancellationToken::new(),
        }
    }

    /// Reports page progress to `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressCallback>) -> Self {
        self.progress = progress;
        self
    }

    /// Stops at the next page boundary once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Returns the code pattern used for segmentation and row parsing.
    #[must_use]
    pub const fn code_pattern(&self) -> &CodePattern {
        &self.pattern
    }

    /// Decodes `bytes` with `extractor` and extracts every page.
    ///
    /// # Errors
    ///
    /// Returns the extractor's error if decoding fails, or
    /// [`TranscriptError::Cancelled`] if the token was cancelled.
    pub fn parse_document(
        &self,
        extractor: &dyn PageTextExtractor,
        bytes: &[u8],
    ) -> Result<Transcript, TranscriptError> {
        self.check_cancelled(0)?;
        let document = extractor.decode(bytes)?;
        self.parse_pages(document.pages())
    }

    /// Extracts every page of an already decoded document.
    ///
    /// # Errors
    ///
    /// Returns [`TranscriptError::Cancelled`] if the token was cancelled
    /// before the last page was processed. No partial result is returned.
    pub fn parse_pages(&self, pages: &[PageText]) -> Result<Transcript, TranscriptError> {
        let mut transcript = Transcript::default();

        self.progress.set_total(pages.len() as u64);

        for (index, page) in pages.iter().enumerate() {
            self.check_cancelled(index)?;

            let extracted = extract_page(page.text_fragments(), &self.pattern);

            log::debug!(
                "Page {}/{}: {} records from {} candidate rows",
                index + 1,
                pages.len(),
                extracted.stats.records,
                extracted.stats.candidate_rows
            );

            transcript.stats.absorb(&extracted.stats);
            transcript.records.extend(extracted.records);
            self.progress.inc(1);
        }

        log::info!(
            "Extracted {} records from {} pages ({} rows dropped, {} numeric fields unreadable)",
            transcript.stats.records,
            transcript.stats.pages,
            transcript.stats.rejected_rows(),
            transcript.stats.invalid_numeric_fields
        );
        self.progress
            .finish(format!("{} courses extracted", transcript.records.len()));

        Ok(transcript)
    }

    fn check_cancelled(&self, page: usize) -> Result<(), TranscriptError> {
        if self.cancellation.is_cancelled() {
            log::info!("Transcript parsing cancelled before page {page}");
            self.progress.finish_and_clear();
            return Err(TranscriptError::Cancelled { page });
        }
        Ok(())
    }
}

/// Parses a PDF transcript with default settings and the shared decoder.
///
/// # Errors
///
/// Returns [`TranscriptError::Decode`] if the PDF cannot be decoded.
pub fn parse_pdf(bytes: &[u8]) -> Result<Transcript, TranscriptError> {
    TranscriptParser::default().parse_document(decoder::decoder(), bytes)
}
