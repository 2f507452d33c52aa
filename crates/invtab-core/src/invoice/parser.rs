//! Table search and row extraction over a whole result tree.

use std::path::Path;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info};

use super::rows::RowExtractor;
use super::LineItemExtractor;
use crate::error::Result;
use crate::models::config::ExtractionConfig;
use crate::models::row::InvoiceRow;
use crate::ocr::{load_result_tree, TableLocator};

/// Finds the invoice table in a result tree and extracts its rows.
///
/// Tables are tried in document order; the first one yielding at least
/// one row wins.
#[derive(Debug, Clone, Default)]
pub struct InvoiceTableParser {
    config: ExtractionConfig,
}

impl InvoiceTableParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from an extraction config.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Set the maximum nesting depth searched for tables.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Set the exclusive upper bound for valid quantities.
    pub fn with_max_quantity(mut self, max_quantity: f64) -> Self {
        self.config.max_quantity = max_quantity;
        self
    }

    /// Set the inclusive upper bound for valid tax percentages.
    pub fn with_max_tax_pct(mut self, max_tax_pct: f64) -> Self {
        self.config.max_tax_pct = max_tax_pct;
        self
    }

    /// Current extraction settings.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Read a saved result tree and extract its rows.
    pub fn extract_file(&self, path: &Path) -> Result<Vec<InvoiceRow>> {
        let tree = load_result_tree(path)?;
        Ok(self.extract_rows(&tree))
    }
}

impl LineItemExtractor for InvoiceTableParser {
    fn extract_rows(&self, tree: &Value) -> Vec<InvoiceRow> {
        let start = Instant::now();
        let extractor = RowExtractor::from_config(&self.config);

        for (idx, table) in TableLocator::with_max_depth(tree, self.config.max_depth).enumerate() {
            let rows = extractor.extract(&table);
            if !rows.is_empty() {
                info!(
                    "Extracted {} rows from table candidate {} in {}ms",
                    rows.len(),
                    idx,
                    start.elapsed().as_millis()
                );
                return rows;
            }
            debug!("Table candidate {} yielded no rows", idx);
        }

        debug!("No table candidate yielded rows");
        Vec::new()
    }
}

/// Extract rows from a result tree with default settings.
pub fn extract_invoice_rows(tree: &Value) -> Vec<InvoiceRow> {
    InvoiceTableParser::new().extract_rows(tree)
}
