//! The PDF decode boundary.
//!
//! Turning PDF bytes into text is delegated to [`pdf_extract`]; the engine
//! only consumes ordered pages of ordered text fragments through
//! [`PageTextExtractor`]. Alternative decoders (and test fakes) plug in at
//! that trait.
//!
//! The shared [`PdfExtractDecoder`] is initialised once per process with
//! [`init_decoder`] before first use; [`decoder`] falls back to default
//! options if nothing initialised it.

use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;

use crate::TranscriptError;
use crate::config::DecoderOptions;

/// The text of one decoded page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageText {
    fragments: Vec<String>,
}

impl PageText {
    /// Creates a page from its ordered text fragments.
    #[must_use]
    pub const fn new(fragments: Vec<String>) -> Self {
        Self { fragments }
    }

    /// Creates a page whose fragments are the lines of `text`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines().map(str::to_owned).collect())
    }

    /// Returns the page's text fragments in decoder order.
    #[must_use]
    pub fn text_fragments(&self) -> &[String] {
        &self.fragments
    }
}

/// A decoded document: its pages in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedDocument {
    pages: Vec<PageText>,
}

impl DecodedDocument {
    /// Creates a document from its ordered pages.
    #[must_use]
    pub const fn new(pages: Vec<PageText>) -> Self {
        Self { pages }
    }

    /// Returns the pages in document order.
    #[must_use]
    pub fn pages(&self) -> &[PageText] {
        &self.pages
    }
}

/// Decodes PDF bytes into page text.
pub trait PageTextExtractor: Send + Sync {
    /// Decodes `bytes` into ordered pages.
    ///
    /// # Errors
    ///
    /// Returns a [`TranscriptError`] if the document cannot be decoded at
    /// all. Decoding failures are fatal; no partial document is returned.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedDocument, TranscriptError>;
}

/// [`PageTextExtractor`] backed by [`pdf_extract`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PdfExtractDecoder {
    options: DecoderOptions,
}

impl PdfExtractDecoder {
    /// Creates a decoder with the given options.
    #[must_use]
    pub const fn new(options: DecoderOptions) -> Self {
        Self { options }
    }
}

impl PageTextExtractor for PdfExtractDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedDocument, TranscriptError> {
        if let Some(limit) = self.options.max_document_bytes
            && bytes.len() > limit
        {
            return Err(TranscriptError::DocumentTooLarge {
                size: bytes.len(),
                limit,
            });
        }

        // pdf-extract panics on some malformed documents
        let pages = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }))
        .map_err(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_owned())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_owned());
            TranscriptError::Decode(format!("PDF decoder panicked: {message}"))
        })?
        .map_err(|e| TranscriptError::Decode(format!("failed to extract text from PDF: {e}")))?;

        log::debug!("Decoded {} bytes into {} pages", bytes.len(), pages.len());

        Ok(DecodedDocument::new(
            pages.iter().map(|text| PageText::from_text(text)).collect(),
        ))
    }
}

static DECODER: OnceLock<PdfExtractDecoder> = OnceLock::new();

/// Initialises the process-wide PDF decoder.
///
/// The first call wins. Later calls return the existing decoder and log a
/// warning if they asked for different options.
pub fn init_decoder(options: DecoderOptions) -> &'static PdfExtractDecoder {
    let mut initialised = false;
    let decoder = DECODER.get_or_init(|| {
        initialised = true;
        log::info!("Initialised PDF decoder ({options:?})");
        PdfExtractDecoder::new(options)
    });

    if !initialised && decoder.options != options {
        log::warn!(
            "PDF decoder already initialised with {:?}; ignoring {options:?}",
            decoder.options
        );
    }

    decoder
}

/// Returns the process-wide PDF decoder, initialising it with default
/// options on first use.
pub fn decoder() -> &'static PdfExtractDecoder {
    DECODER.get_or_init(|| {
        log::info!("Initialised PDF decoder with default options");
        PdfExtractDecoder::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_fragments_are_lines() {
        let page = PageText::from_text("CMPE101 Algoritma\nZ Tr 3 0 3 5 85 BA G\n");
        assert_eq!(
            page.text_fragments(),
            ["CMPE101 Algoritma", "Z Tr 3 0 3 5 85 BA G"]
        );
    }

    #[test]
    fn document_keeps_page_order() {
        let document = DecodedDocument::new(vec![
            PageText::from_text("first"),
            PageText::from_text("second"),
        ]);
        assert_eq!(document.pages().len(), 2);
        assert_eq!(document.pages()[1].text_fragments(), ["second"]);
    }

    #[test]
    fn refuses_oversized_documents() {
        let decoder = PdfExtractDecoder::new(DecoderOptions {
            max_document_bytes: Some(4),
        });
        let err = decoder.decode(b"%PDF-1.7").unwrap_err();
        assert!(matches!(
            err,
            TranscriptError::DocumentTooLarge { size: 8, limit: 4 }
        ));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = PdfExtractDecoder::default()
            .decode(b"this is not a pdf")
            .unwrap_err();
        assert!(matches!(err, TranscriptError::Decode(_)));
    }

    #[test]
    fn shared_decoder_is_initialised_once() {
        let first = init_decoder(DecoderOptions::default());
        let second = decoder();
        assert!(std::ptr::eq(first, second));
    }
}
