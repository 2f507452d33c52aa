//! Error types for the invtab-core library.
//!
//! Row extraction itself never fails: malformed trees degrade to an empty
//! row list. These errors cover the glue around it (reading result trees,
//! configuration files and PDFs).

use thiserror::Error;

/// Main error type for the invtab library.
#[derive(Error, Debug)]
pub enum InvtabError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// The layout engine output is not valid JSON.
    #[error("invalid result tree: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Result type for the invtab library.
pub type Result<T> = std::result::Result<T, InvtabError>;
