//! Invoice line-item extraction from located tables.

mod header;
mod parser;
mod rows;
pub mod rules;

pub use header::ColumnIndex;
pub use parser::{extract_invoice_rows, InvoiceTableParser};
pub use rows::{RowExtractor, MIN_ROW_CELLS, ROW_WIDTH};

use serde_json::Value;

use crate::error::Result;
use crate::models::row::InvoiceRow;
use crate::ocr::parse_result_tree;

/// Trait for line-item extractors working on a layout engine result tree.
pub trait LineItemExtractor {
    /// Extract rows from a parsed result tree. Never fails; a tree without
    /// a usable table gives an empty list.
    fn extract_rows(&self, tree: &Value) -> Vec<InvoiceRow>;

    /// Extract rows from raw JSON. Fails only if the JSON is invalid.
    fn extract_rows_from_json(&self, data: &[u8]) -> Result<Vec<InvoiceRow>> {
        let tree = parse_result_tree(data)?;
        Ok(self.extract_rows(&tree))
    }
}
