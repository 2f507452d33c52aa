//! WASM bindings for invoice line-item extraction.
//!
//! Layout engine output is passed in as a JSON string; rows come back as
//! plain JS objects.

use wasm_bindgen::prelude::*;

use invtab_core::invoice::rules;
use invtab_core::{InvoiceRow, InvoiceTableParser, LineItemExtractor};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract invoice rows from a layout engine result tree (JSON text).
///
/// Returns an empty array when no table yields rows; throws only on
/// invalid JSON.
#[wasm_bindgen]
pub fn extract_rows(json: &str) -> Result<JsValue, JsValue> {
    RowExtractor::new().extract(json)
}

/// Parse a plain number (comma accepted as decimal separator).
#[wasm_bindgen]
pub fn parse_numeric(text: &str) -> Option<f64> {
    rules::parse_numeric(Some(text))
}

/// Parse a currency amount into integer cents.
#[wasm_bindgen]
pub fn parse_currency_to_cents(text: &str) -> Option<f64> {
    rules::parse_currency_to_cents(Some(text)).map(|cents| cents as f64)
}

/// Row extractor class for browser use.
#[wasm_bindgen]
pub struct RowExtractor {
    parser: InvoiceTableParser,
}

#[wasm_bindgen]
impl RowExtractor {
    /// Create a new row extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: InvoiceTableParser::new(),
        }
    }

    /// Limit how deep the result tree is searched for tables.
    #[wasm_bindgen]
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.parser = self.parser.clone().with_max_depth(max_depth);
    }

    /// Extract rows from result tree JSON.
    #[wasm_bindgen]
    pub fn extract(&self, json: &str) -> Result<JsValue, JsValue> {
        let rows = self
            .parser
            .extract_rows_from_json(json.as_bytes())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        if rows.is_empty() {
            web_sys::console::debug_1(&JsValue::from_str("invtab: no invoice rows found"));
        }

        rows_to_js(&rows)
    }

    /// Extract rows and return the sum of their amounts in cents.
    #[wasm_bindgen]
    pub fn total_amount_cents(&self, json: &str) -> Result<f64, JsValue> {
        let rows = self
            .parser
            .extract_rows_from_json(json.as_bytes())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(InvoiceRow::total_amount_cents(&rows) as f64)
    }
}

impl Default for RowExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert rows to a JS array of plain objects.
///
/// Absent fields become `null` rather than `undefined`.
fn rows_to_js(rows: &[InvoiceRow]) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let array = js_sys::Array::new();

    for row in rows {
        let value = serde::Serialize::serialize(row, &serializer)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        array.push(&value);
    }

    Ok(array.into())
}
