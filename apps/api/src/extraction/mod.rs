//! Document extraction — turns an uploaded CV into the plain text the workflow consumes.
//!
//! Runs before the workflow starts; an `ExtractionError` means no evaluation is attempted.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
pub mod fixtures;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("uploaded document is empty")]
    EmptyDocument,

    #[error("uploaded document is not a PDF")]
    NotPdf,

    #[error("could not read text from PDF: {0}")]
    Parse(String),

    #[error("PDF parser crashed on this document")]
    ParserPanicked,
}

/// Extracts all page text from a PDF held in memory, trimmed of surrounding whitespace.
///
/// A PDF with no text layer yields an empty string, which is still valid workflow input.
pub fn extract_text(document: &[u8]) -> Result<String, ExtractionError> {
    if document.is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }
    if !looks_like_pdf(document) {
        return Err(ExtractionError::NotPdf);
    }

    let text = pdf_extract::extract_text_from_mem(document)
        .map_err(|e| ExtractionError::Parse(e.to_string()))?;
    let text = text.trim().to_string();

    debug!(
        "Extracted {} chars from {} byte PDF",
        text.chars().count(),
        document.len()
    );
    Ok(text)
}

/// Runs `extract_text` on the blocking pool. Parsing is CPU-bound and the
/// parser may panic on malformed input; a panic is reported as `ParserPanicked`.
pub async fn extract_document_text(document: Bytes) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text(&document))
        .await
        .map_err(|_| ExtractionError::ParserPanicked)?
}

/// Accepts the `%PDF` header anywhere in the first 1024 bytes, as PDF readers do.
fn looks_like_pdf(document: &[u8]) -> bool {
    let head = &document[..document.len().min(1024)];
    head.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}
