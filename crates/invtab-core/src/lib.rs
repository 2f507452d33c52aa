//! Core library for invoice line-item extraction.
//!
//! This crate provides:
//! - Table search in layout engine result trees (PP-Structure style JSON)
//! - Header detection and fixed-width row chunking of table cells
//! - Best-effort numeric and currency coercion of cell text
//! - Raw PDF text extraction for the text-based fallback path

pub mod error;
pub mod invoice;
pub mod models;
pub mod ocr;
#[cfg(feature = "pdf")]
pub mod pdf;

pub use error::{InvtabError, PdfError, Result};
pub use invoice::{
    extract_invoice_rows, ColumnIndex, InvoiceTableParser, LineItemExtractor, RowExtractor,
};
pub use models::config::{ExtractionConfig, InvtabConfig};
pub use models::row::{InvoiceRow, RawColumns};
pub use ocr::{load_result_tree, parse_result_tree, TableCandidate, TableLocator};
#[cfg(feature = "pdf")]
pub use pdf::{PdfProcessor, PdfText, PdfTextExtractor};
