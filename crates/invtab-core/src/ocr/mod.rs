//! Handling of the layout engine's result tree.
//!
//! The layout engine (PP-Structure style table recognition) emits a JSON
//! tree whose shape varies between documents. This module finds the
//! table-shaped parts of that tree and exposes their cells as text.

mod locator;
mod table;

pub use locator::{TableLocator, TABLE_SET_KEYS};
pub use table::{cell_text, TableCandidate};

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::Result;

/// Parse a result tree from raw JSON bytes.
pub fn parse_result_tree(data: &[u8]) -> Result<Value> {
    let tree: Value = serde_json::from_slice(data)?;
    debug!("Parsed result tree ({} bytes)", data.len());
    Ok(tree)
}

/// Read and parse a result tree saved by the layout engine.
pub fn load_result_tree(path: &Path) -> Result<Value> {
    let data = std::fs::read(path)?;
    parse_result_tree(&data)
}
