//! Table candidates and cell text access.

use std::borrow::Cow;

use serde_json::{Map, Value};

/// A mapping believed to represent one table.
#[derive(Debug, Clone, Copy)]
pub struct TableCandidate<'a> {
    node: &'a Map<String, Value>,
}

impl<'a> TableCandidate<'a> {
    /// Wrap a table-shaped mapping.
    pub fn new(node: &'a Map<String, Value>) -> Self {
        Self { node }
    }

    /// The underlying mapping.
    pub fn node(&self) -> &'a Map<String, Value> {
        self.node
    }

    /// Flat cell list of this table.
    ///
    /// Reads `cells`, falling back to `res.cells` when that is missing or
    /// empty. Returns an empty slice when neither holds cells.
    pub fn cells(&self) -> &'a [Value] {
        non_empty_cells(self.node)
            .or_else(|| {
                self.node
                    .get("res")
                    .and_then(Value::as_object)
                    .and_then(non_empty_cells)
            })
            .unwrap_or(&[])
    }

    /// Text of every cell, in cell order.
    pub fn cell_texts(&self) -> Vec<Cow<'a, str>> {
        self.cells().iter().map(cell_text).collect()
    }
}

fn non_empty_cells(node: &Map<String, Value>) -> Option<&[Value]> {
    node.get("cells")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .filter(|cells| !cells.is_empty())
}

/// Raw text of a cell.
///
/// Uses `text`, or `content` when `text` is missing or empty. Numbers are
/// rendered as text; anything else reads as empty.
pub fn cell_text(cell: &Value) -> Cow<'_, str> {
    let Some(cell) = cell.as_object() else {
        return Cow::Borrowed("");
    };

    ["text", "content"]
        .iter()
        .find_map(|key| match cell.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => Some(Cow::Borrowed(s.as_str())),
            Some(Value::Number(n)) => Some(Cow::Owned(n.to_string())),
            _ => None,
        })
        .unwrap_or(Cow::Borrowed(""))
}
