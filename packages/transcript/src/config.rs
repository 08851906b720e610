//! TOML configuration for transcript extraction.
//!
//! Every field has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! [parser]
//! require_code_digit = false
//!
//! [decoder]
//! max_document_bytes = 33554432
//!
//! [filter]
//! passed_marker = "G"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::TranscriptError;
use crate::code::CodePattern;

/// Default comment token marking a passed course.
pub const DEFAULT_PASSED_MARKER: &str = "G";

/// Top-level extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranscriptConfig {
    /// Row recognition settings.
    pub parser: ParserConfig,
    /// PDF decoding settings.
    pub decoder: DecoderOptions,
    /// Settings for downstream record filtering.
    pub filter: FilterConfig,
}

/// Row recognition settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Only treat tokens containing a digit as course codes.
    pub require_code_digit: bool,
}

impl ParserConfig {
    /// Returns the [`CodePattern`] these settings describe.
    #[must_use]
    pub const fn code_pattern(&self) -> CodePattern {
        CodePattern::new().require_digit(self.require_code_digit)
    }
}

/// Settings applied once when the shared PDF decoder is initialised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderOptions {
    /// Documents larger than this many bytes are refused before decoding.
    pub max_document_bytes: Option<usize>,
}

/// Settings for downstream record filtering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Comment token marking a passed course.
    pub passed_marker: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            passed_marker: DEFAULT_PASSED_MARKER.to_owned(),
        }
    }
}

impl TranscriptConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`TranscriptError::Config`] if the text is not valid TOML or
    /// contains unknown keys or mistyped values.
    pub fn from_toml_str(text: &str) -> Result<Self, TranscriptError> {
        toml::from_str(text).map_err(|e| TranscriptError::Config(e.to_string()))
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`TranscriptError::Io`] if the file cannot be read, or
    /// [`TranscriptError::Config`] if its contents are invalid.
    pub fn load(path: &Path) -> Result<Self, TranscriptError> {
        let text = std::fs::read_to_string(path)?;
        log::debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&text)
    }
}
