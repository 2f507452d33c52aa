//! Depth-first search for table candidates in a result tree.

use serde_json::{Map, Value};
use tracing::{trace, warn};

use super::table::TableCandidate;
use crate::models::config::ExtractionConfig;

/// Keys under which layout engines list recognized tables, in probe order.
pub const TABLE_SET_KEYS: [&str; 3] = ["table_recognition_res", "tables", "table_res"];

/// Pending work on the traversal stack.
enum Work<'a> {
    /// Inspect a node found at the given depth.
    Visit(&'a Value, usize),
    /// Hand out a table candidate.
    Emit(&'a Map<String, Value>),
}

/// Tables found directly on one mapping.
enum TableSet<'a> {
    Many(&'a [Value]),
    One(&'a Map<String, Value>),
}

/// Lazy iterator over every table candidate in a result tree.
///
/// Candidates come out in document order. Once a mapping lists tables (or
/// is itself tagged as a table) the rest of that mapping is not searched.
pub struct TableLocator<'a> {
    stack: Vec<Work<'a>>,
    max_depth: usize,
}

impl<'a> TableLocator<'a> {
    /// Create a locator with the default depth cap.
    pub fn new(root: &'a Value) -> Self {
        Self::with_max_depth(root, ExtractionConfig::default().max_depth)
    }

    /// Create a locator that skips containers nested deeper than `max_depth`.
    pub fn with_max_depth(root: &'a Value, max_depth: usize) -> Self {
        Self {
            stack: vec![Work::Visit(root, 0)],
            max_depth,
        }
    }

    fn expand(&mut self, node: &'a Value, depth: usize) {
        if depth > self.max_depth {
            warn!("Result tree nested deeper than {} levels, skipping subtree", self.max_depth);
            return;
        }

        match node {
            Value::Array(items) => {
                for item in items.iter().rev() {
                    self.stack.push(Work::Visit(item, depth + 1));
                }
            }
            Value::Object(map) => match table_set(map) {
                Some(TableSet::Many(tables)) => {
                    trace!("Found {} tables at depth {}", tables.len(), depth);
                    for table in tables.iter().rev() {
                        match table {
                            Value::Object(table) => self.stack.push(Work::Emit(table)),
                            other => trace!("Skipping non-mapping table entry: {}", other),
                        }
                    }
                }
                Some(TableSet::One(table)) => {
                    trace!("Found single table at depth {}", depth);
                    self.stack.push(Work::Emit(table));
                }
                None => {
                    for value in map.values().rev() {
                        if value.is_object() || value.is_array() {
                            self.stack.push(Work::Visit(value, depth + 1));
                        }
                    }
                }
            },
            _ => {}
        }
    }
}

impl<'a> Iterator for TableLocator<'a> {
    type Item = TableCandidate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(work) = self.stack.pop() {
            match work {
                Work::Emit(table) => return Some(TableCandidate::new(table)),
                Work::Visit(node, depth) => self.expand(node, depth),
            }
        }
        None
    }
}

fn table_set(node: &Map<String, Value>) -> Option<TableSet<'_>> {
    for key in TABLE_SET_KEYS {
        match node.get(key) {
            Some(Value::Array(tables)) if !tables.is_empty() => {
                return Some(TableSet::Many(tables));
            }
            Some(Value::Object(table)) if !table.is_empty() => {
                return Some(TableSet::One(table));
            }
            _ => {}
        }
    }

    if is_table_tagged(node) {
        return Some(TableSet::One(node));
    }

    None
}

fn is_table_tagged(node: &Map<String, Value>) -> bool {
    node.get("type")
        .and_then(Value::as_str)
        .is_some_and(|t| t.to_lowercase().contains("table"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(tree: &Value) -> Vec<String> {
        TableLocator::new(tree)
            .map(|t| t.node()["id"].as_str().unwrap_or("?").to_string())
            .collect()
    }

    #[test]
    fn test_no_tables() {
        let tree = json!({"pages": [{"text": "hello"}, 3, "x"], "meta": {"dpi": 300}});
        assert_eq!(TableLocator::new(&tree).count(), 0);
        assert_eq!(TableLocator::new(&json!("scalar")).count(), 0);
    }

    #[test]
    fn test_key_probe_order() {
        let tree = json!({
            "table_res": [{"id": "c"}],
            "table_recognition_res": [{"id": "a"}, {"id": "b"}],
        });
        assert_eq!(ids(&tree), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_table_list_falls_through() {
        let tree = json!({"table_recognition_res": [], "tables": null, "table_res": {"id": "r"}});
        assert_eq!(ids(&tree), vec!["r"]);
    }

    #[test]
    fn test_type_tag_is_fallback() {
        let tree = json!({"type": "Table", "id": "self"});
        assert_eq!(ids(&tree), vec!["self"]);

        let tree = json!({"type": "table", "id": "self", "tables": [{"id": "inner"}]});
        assert_eq!(ids(&tree), vec!["inner"]);
    }

    #[test]
    fn test_found_tables_stop_recursion() {
        let tree = json!({
            "tables": [{"id": "top"}],
            "children": {"tables": [{"id": "hidden"}]},
        });
        assert_eq!(ids(&tree), vec!["top"]);
    }

    #[test]
    fn test_document_order_across_siblings() {
        let tree = json!([
            {"page": {"tables": [{"id": "p1"}]}},
            {"other": "x"},
            {"layout": [{"block": {"type": "table_block", "id": "p3"}}]},
        ]);
        assert_eq!(ids(&tree), vec!["p1", "p3"]);
    }

    #[test]
    fn test_non_mapping_entries_skipped() {
        let tree = json!({"tables": ["junk", 4, {"id": "ok"}]});
        assert_eq!(ids(&tree), vec!["ok"]);
    }

    #[test]
    fn test_scalar_table_key_ignored() {
        let tree = json!({"tables": "none", "nested": {"table_res": [{"id": "deep"}]}});
        assert_eq!(ids(&tree), vec!["deep"]);
    }

    #[test]
    fn test_depth_cap() {
        let tree = json!({"a": {"b": {"c": {"tables": [{"id": "deep"}]}}}});
        assert_eq!(TableLocator::with_max_depth(&tree, 2).count(), 0);
        assert_eq!(TableLocator::with_max_depth(&tree, 3).count(), 1);
    }

    #[test]
    fn test_is_lazy() {
        let tree = json!({"tables": [{"id": "first"}, {"id": "second"}]});
        let mut locator = TableLocator::new(&tree);
        assert_eq!(locator.next().map(|t| t.node()["id"].clone()), Some(json!("first")));
        assert_eq!(locator.stack.len(), 1);
    }
}
