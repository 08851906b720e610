#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for transcript course extraction.
//!
//! Reads a PDF transcript, runs the extraction engine on a blocking task
//! and prints the records, a summary, or the raw row segmentation. Ctrl-C
//! cancels the parse at the next page boundary.
//!
//! Uses `indicatif-log-bridge` (via [`exemption_cli_utils::init_logger`])
//! so log lines and the page progress bar never fight for the terminal.

mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use exemption_cli_utils::{IndicatifProgress, MultiProgress};
use exemption_transcript::config::TranscriptConfig;
use exemption_transcript::decoder::{PageTextExtractor as _, PdfExtractDecoder, init_decoder};
use exemption_transcript::progress::CancellationToken;
use exemption_transcript::{Transcript, TranscriptParser, passed_courses};

#[derive(Parser)]
#[command(
    name = "exemption_cli",
    about = "Extract course records from PDF transcripts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Path to the PDF transcript
    pdf: PathBuf,
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Only treat tokens containing a digit as course codes
    #[arg(long)]
    require_code_digit: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the extracted records as a JSON array
    Records {
        #[command(flatten)]
        input: InputArgs,
        /// Only print courses whose comments contain the passed marker
        #[arg(long)]
        passed_only: bool,
        /// Comment token marking a passed course (overrides the config file)
        #[arg(long)]
        passed_marker: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print course totals and extraction statistics
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print each page's normalized text and candidate rows
    Rows {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Loads the configuration file (if any) and applies command-line
/// overrides.
fn load_config(input: &InputArgs) -> Result<TranscriptConfig, Box<dyn std::error::Error>> {
    let mut config = match &input.config {
        Some(path) => TranscriptConfig::load(path)?,
        None => TranscriptConfig::default(),
    };
    if input.require_code_digit {
        config.parser.require_code_digit = true;
    }
    Ok(config)
}

/// Runs the parser on a blocking task, cancelling it on Ctrl-C.
#[allow(clippy::future_not_send)]
async fn parse(
    bytes: Vec<u8>,
    decoder: &'static PdfExtractDecoder,
    config: &TranscriptConfig,
    multi: &MultiProgress,
) -> Result<Transcript, Box<dyn std::error::Error>> {
    let token = CancellationToken::new();
    let parser = TranscriptParser::new(&config.parser)
        .with_progress(IndicatifProgress::pages_bar(multi, "Reading transcript"))
        .with_cancellation(token.clone());

    let mut task = tokio::task::spawn_blocking(move || parser.parse_document(decoder, &bytes));

    let transcript = tokio::select! {
        result = &mut task => result??,
        _ = tokio::signal::ctrl_c() => {
            log::warn!("Interrupted, stopping at the next page");
            token.cancel();
            task.await??
        }
    };

    Ok(transcript)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = exemption_cli_utils::init_logger();
    let cli = Cli::parse();

    let input = match &cli.command {
        Commands::Records { input, .. } | Commands::Summary { input } | Commands::Rows { input } => {
            input
        }
    };

    let config = load_config(input)?;
    let pdf_decoder = init_decoder(config.decoder);

    let bytes = tokio::fs::read(&input.pdf).await?;
    log::info!("Read {} bytes from {}", bytes.len(), input.pdf.display());

    match &cli.command {
        Commands::Records {
            passed_only,
            passed_marker,
            pretty,
            ..
        } => {
            let transcript = parse(bytes, pdf_decoder, &config, &multi).await?;
            let marker = passed_marker
                .as_deref()
                .unwrap_or(&config.filter.passed_marker);

            let records: Vec<_> = if *passed_only {
                passed_courses(&transcript.records, marker)
            } else {
                transcript.records.iter().collect()
            };

            let json = if *pretty {
                serde_json::to_string_pretty(&records)?
            } else {
                serde_json::to_string(&records)?
            };
            println!("{json}");
        }
        Commands::Summary { .. } => {
            let transcript = parse(bytes, pdf_decoder, &config, &multi).await?;
            report::print_summary(&transcript);
        }
        Commands::Rows { .. } => {
            let pattern = config.parser.code_pattern();
            let document = tokio::task::spawn_blocking(move || pdf_decoder.decode(&bytes)).await??;
            report::print_rows(&document, &pattern);
        }
    }

    Ok(())
}
