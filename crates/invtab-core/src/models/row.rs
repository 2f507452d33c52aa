//! Invoice line-item rows produced by table extraction.

use serde::{Deserialize, Serialize};

/// One extracted invoice line item.
///
/// Absent values serialize as `null`, so a missing amount is never
/// confused with a zero amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRow {
    /// Position in the output list (dense, 0-based).
    pub row_index: usize,

    /// Line item description.
    pub description: Option<String>,

    /// Quantity, truncated to an integer. Only values in `[0, max_quantity)`.
    pub quantity: Option<i64>,

    /// Unit price in cents.
    pub unit_price_cents: Option<i64>,

    /// Tax percentage. Only values in `[0, max_tax_pct]`.
    pub tax_pct: Option<f64>,

    /// Line amount in cents.
    pub amount_cents: Option<i64>,

    /// Parsed values before range filtering.
    pub raw_columns: RawColumns,
}

/// Parsed numeric columns of a row chunk before any range filtering.
///
/// Serializes as a four-element array:
/// `[quantity, unit_price, tax_pct, amount_cents]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawColumns(
    pub Option<f64>,
    pub Option<f64>,
    pub Option<f64>,
    pub Option<i64>,
);

impl RawColumns {
    /// Raw quantity value.
    pub fn quantity(&self) -> Option<f64> {
        self.0
    }

    /// Raw unit price (currency units, not cents).
    pub fn unit_price(&self) -> Option<f64> {
        self.1
    }

    /// Raw tax percentage.
    pub fn tax_pct(&self) -> Option<f64> {
        self.2
    }

    /// Amount in cents.
    pub fn amount_cents(&self) -> Option<i64> {
        self.3
    }
}

impl InvoiceRow {
    /// Sum of amounts over a slice of rows, ignoring rows without one.
    pub fn total_amount_cents(rows: &[InvoiceRow]) -> i64 {
        rows.iter().filter_map(|r| r.amount_cents).sum()
    }
}
