//! Row chunking and typed row construction for one table.

use tracing::{debug, trace};

use super::header::ColumnIndex;
use super::rules::{parse_currency_to_cents, parse_numeric, to_cents};
use crate::models::config::ExtractionConfig;
use crate::models::row::{InvoiceRow, RawColumns};
use crate::ocr::TableCandidate;

/// Cells per logical row: description, qty, unit price, tax, amount.
pub const ROW_WIDTH: usize = 5;

/// Shortest trailing chunk still read as a row (no tax column).
pub const MIN_ROW_CELLS: usize = 4;

/// First-cell texts marking a header or separator row.
const HEADER_LABELS: [&str; 3] = ["description", "qty", "amount"];

/// Turns one table candidate into invoice rows.
///
/// Header columns only gate extraction: data is always read from fixed
/// offsets of each five-cell chunk.
#[derive(Debug, Clone)]
pub struct RowExtractor {
    max_quantity: f64,
    max_tax_pct: f64,
}

impl RowExtractor {
    /// Create an extractor with default ranges.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create an extractor using the ranges of an extraction config.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            max_quantity: config.max_quantity,
            max_tax_pct: config.max_tax_pct,
        }
    }

    /// Extract rows from a table, or nothing if its header is not confirmed.
    pub fn extract(&self, table: &TableCandidate<'_>) -> Vec<InvoiceRow> {
        let texts = table.cell_texts();
        if texts.is_empty() {
            trace!("Table candidate has no cells");
            return Vec::new();
        }

        let columns = ColumnIndex::detect(&texts);
        if !columns.is_confirmed() {
            debug!(
                "Skipping table with {} cells: header not confirmed ({:?})",
                texts.len(),
                columns
            );
            return Vec::new();
        }

        self.extract_from_texts(&texts)
    }

    /// Build rows from cell texts whose header has already been confirmed.
    fn extract_from_texts<S: AsRef<str>>(&self, texts: &[S]) -> Vec<InvoiceRow> {
        let mut rows = Vec::new();

        for chunk in texts.chunks(ROW_WIDTH) {
            if chunk.len() < MIN_ROW_CELLS {
                trace!("Dropping trailing chunk of {} cells", chunk.len());
                continue;
            }

            let description = chunk[0].as_ref().trim();
            if description.is_empty() || is_header_label(description) {
                continue;
            }

            let quantity = parse_numeric(Some(chunk[1].as_ref()));
            let unit_price = parse_numeric(Some(chunk[2].as_ref()));
            let tax_pct = parse_numeric(Some(chunk[3].as_ref()));

            let amount_cell = chunk.get(4).unwrap_or(&chunk[3]).as_ref();
            let amount_cents = parse_currency_to_cents(Some(amount_cell))
                .or_else(|| parse_currency_to_cents(Some(chunk[3].as_ref())));

            if amount_cents.is_none() && (quantity.is_none() || description.is_empty()) {
                trace!("Dropping chunk without amount or quantity: {:?}", description);
                continue;
            }

            rows.push(InvoiceRow {
                row_index: rows.len(),
                description: Some(description.to_string()),
                quantity: quantity
                    .filter(|q| (0.0..self.max_quantity).contains(q))
                    .map(|q| q as i64),
                unit_price_cents: unit_price.and_then(to_cents),
                tax_pct: tax_pct.filter(|t| (0.0..=self.max_tax_pct).contains(t)),
                amount_cents,
                raw_columns: RawColumns(quantity, unit_price, tax_pct, amount_cents),
            });
        }

        rows
    }
}

impl Default for RowExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn is_header_label(text: &str) -> bool {
    HEADER_LABELS
        .iter()
        .any(|label| text.eq_ignore_ascii_case(label))
}
