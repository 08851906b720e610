//! Plain-text reports printed by the CLI.

use std::fmt::Write as _;

use exemption_transcript::code::CodePattern;
use exemption_transcript::decoder::DecodedDocument;
use exemption_transcript::{Transcript, normalize, row, segment};

/// Prints course totals and extraction counters.
pub fn print_summary(transcript: &Transcript) {
    let summary = transcript.summary();
    let stats = &transcript.stats;

    println!("{:<28} {}", "Courses", summary.course_count);
    println!("{:<28} {}", "  mandatory (Z)", summary.mandatory_count);
    println!("{:<28} {}", "  elective (S)", summary.elective_count);
    println!("{:<28} {}", "Distinct codes", summary.distinct_codes);
    println!("{:<28} {}", "Total ECTS", summary.total_ects);
    println!(
        "{:<28} {}",
        "Total national credit", summary.total_national_credit
    );
    if !summary.repeated_codes.is_empty() {
        println!(
            "{:<28} {}",
            "Repeated codes",
            summary.repeated_codes.join(", ")
        );
    }

    println!("{}", "-".repeat(40));
    println!("{:<28} {}", "Pages", stats.pages);
    println!("{:<28} {}", "Candidate rows", stats.candidate_rows);
    println!("{:<28} {}", "Rows dropped", stats.rejected_rows());
    println!("{:<28} {}", "  not a course code", stats.rejected_invalid_code);
    println!("{:<28} {}", "  no course name", stats.rejected_missing_name);
    println!("{:<28} {}", "  no status token", stats.rejected_missing_status);
    println!(
        "{:<28} {}",
        "Unreadable numeric fields", stats.invalid_numeric_fields
    );
}

/// Prints every page's normalized text and how each candidate row was
/// read, for checking the segmentation against a real transcript.
pub fn print_rows(document: &DecodedDocument, pattern: &CodePattern) {
    print!("{}", format_rows(document, pattern));
}

fn format_rows(document: &DecodedDocument, pattern: &CodePattern) -> String {
    let mut out = String::new();

    for (index, page) in document.pages().iter().enumerate() {
        let normalized = normalize::normalize_fragments(page.text_fragments());
        let segmentation = segment::segment(&normalized, pattern);

        let _ = writeln!(out, "=== page {} ===", index + 1);
        let _ = writeln!(out, "{normalized}");
        let _ = writeln!(out, "---");
        if let Some(leading) = segmentation.leading {
            let _ = writeln!(out, "  [leading] {leading}");
        }
        for candidate in segmentation.rows {
            match row::parse_row(candidate, pattern) {
                Ok(_) => {
                    let _ = writeln!(out, "  [ok] {candidate}");
                }
                Err(reason) => {
                    let _ = writeln!(out, "  [{reason}] {candidate}");
                }
            }
        }
    }

    out
}
