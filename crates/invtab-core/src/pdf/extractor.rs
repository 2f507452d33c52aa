//! PDF loading with lopdf and text extraction with pdf-extract.

use lopdf::Document;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// Full text of a PDF as emitted by `invtab text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfText {
    /// Text of all pages.
    pub text: String,
    /// Number of pages.
    pub pages: u32,
}

/// PDF text extractor.
pub struct PdfTextExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfTextExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load a PDF and extract its full text in one step.
    pub fn read(data: &[u8]) -> Result<PdfText> {
        let mut extractor = Self::new();
        extractor.load(data)?;
        Ok(PdfText {
            text: extractor.extract_text()?,
            pages: extractor.page_count(),
        })
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfTextExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        self.raw_data = if doc.is_encrypted() {
            unlock(&mut doc)?
        } else {
            data.to_vec()
        };

        match doc.get_pages().len() {
            0 => Err(PdfError::NoPages),
            pages => {
                debug!("Loaded PDF with {} pages", pages);
                self.document = Some(doc);
                Ok(())
            }
        }
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        debug!("Extracted {} chars of text", text.len());
        Ok(text)
    }
}

/// Open an encrypted document with an empty user password.
///
/// Returns the re-serialized plaintext, which is what pdf-extract reads.
fn unlock(doc: &mut Document) -> Result<Vec<u8>> {
    doc.decrypt("").map_err(|_| PdfError::Encrypted)?;
    debug!("Opened encrypted PDF with an empty password");

    let mut plain = Vec::new();
    doc.save_to(&mut plain)
        .map_err(|e| PdfError::Parse(format!("cannot re-serialize decrypted PDF: {}", e)))?;
    Ok(plain)
}
