//! Text extraction from uploaded documents.
//!
//! Extractors read a staged file and return its plain text as a
//! [`TextBlock`]. A document that parses but contains no text yields
//! an empty block rather than an error so later stages can degrade
//! gracefully.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::core::error::{DocRagError, Result};
use crate::core::types::TextBlock;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Turns a staged document into plain text
pub trait TextExtractor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Whether this extractor handles the file's extension
    fn can_extract(&self, path: &Path) -> bool;

    /// Extract text; `source` is the document name recorded on the block
    fn extract(&self, path: &Path, source: &str) -> Result<TextBlock>;
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// PDF text extraction via `pdf-extract`
#[derive(Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfExtractor {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn can_extract(&self, path: &Path) -> bool {
        has_extension(path, &["pdf"])
    }

    fn extract(&self, path: &Path, source: &str) -> Result<TextBlock> {
        tracing::debug!("Extracting PDF: {:?}", path);

        let bytes = fs::read(path)
            .map_err(|e| DocRagError::extraction(source, format!("cannot read staged file: {e}")))?;

        if !bytes.starts_with(PDF_MAGIC) {
            return Err(DocRagError::extraction(source, "not a PDF document"));
        }

        // pdf-extract panics on some malformed inputs
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(&bytes)
        }));

        let text = match outcome {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                return Err(DocRagError::extraction(
                    source,
                    format!("PDF extraction failed: {e}"),
                ))
            }
            Err(_) => {
                return Err(DocRagError::extraction(
                    source,
                    "PDF extraction failed: malformed document",
                ))
            }
        };

        Ok(TextBlock::new(source, text))
    }
}

/// UTF-8 text files
#[derive(Debug, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "text"
    }

    fn can_extract(&self, path: &Path) -> bool {
        has_extension(path, &["txt", "text", "md", "markdown", "csv", "log"])
    }

    fn extract(&self, path: &Path, source: &str) -> Result<TextBlock> {
        tracing::debug!("Extracting text: {:?}", path);

        let text = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                DocRagError::extraction(source, "document is not valid UTF-8 text")
            } else {
                DocRagError::extraction(source, format!("cannot read staged file: {e}"))
            }
        })?;

        Ok(TextBlock::new(source, text))
    }
}

/// Picks an extractor by extension, then by sniffing content
pub struct ExtractorRegistry {
    pdf: PdfExtractor,
    text: PlainTextExtractor,
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self {
            pdf: PdfExtractor::new(),
            text: PlainTextExtractor::new(),
        }
    }

    /// Resolve the extractor for a staged file
    pub fn for_path(&self, path: &Path, source: &str) -> Result<&dyn TextExtractor> {
        if self.pdf.can_extract(path) {
            return Ok(&self.pdf);
        }
        if self.text.can_extract(path) {
            return Ok(&self.text);
        }

        // Unknown extension: look at the bytes
        let bytes = fs::read(path)
            .map_err(|e| DocRagError::extraction(source, format!("cannot read staged file: {e}")))?;

        if bytes.starts_with(PDF_MAGIC) {
            Ok(&self.pdf)
        } else if std::str::from_utf8(&bytes).is_ok() {
            Ok(&self.text)
        } else {
            Err(DocRagError::extraction(source, "unsupported document format"))
        }
    }

    /// Extract text from a staged file
    pub fn extract(&self, path: &Path, source: &str) -> Result<TextBlock> {
        let extractor = self.for_path(path, source)?;
        tracing::debug!("Using '{}' extractor for {}", extractor.name(), source);
        extractor.extract(path, source)
    }
}
