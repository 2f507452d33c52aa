use invtab_core::{
    extract_invoice_rows, InvoiceRow, InvoiceTableParser, LineItemExtractor, RawColumns,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn cells(texts: &[&str]) -> Vec<Value> {
    texts.iter().map(|t| json!({ "text": t, "bbox": [0, 0, 10, 10] })).collect()
}

/// Result tree shaped like a PP-StructureV3 JSON export of a one-page invoice.
fn structure_export() -> Value {
    json!({
        "input_path": "invoice.pdf",
        "page_index": 0,
        "model_settings": {"use_table_recognition": true},
        "parsing_res_list": [
            {"block_label": "text", "block_content": "Invoice number 8F2A-0001"},
            {"block_label": "text", "block_content": "Date due January 15, 2026"},
        ],
        "layout_det_res": {
            "boxes": [
                {"label": "table", "coordinate": [40.0, 300.0, 560.0, 420.0]},
            ]
        },
        "overall_ocr_res": {"rec_texts": ["Invoice", "Description", "Qty"]},
        "layout": {
            "regions": [
                {"type": "paragraph", "children": [{"text": "Bill to"}]},
                {
                    "type": "figure",
                    "content": {
                        "table_recognition_res": [
                            {
                                "pred_html": "<table>...</table>",
                                "res": {
                                    "cells": [
                                        {"content": "Description"},
                                        {"content": "Qty"},
                                        {"content": "Unit price"},
                                        {"content": "Tax"},
                                        {"content": "Amount"},
                                        {"content": "Pro plan seats"},
                                        {"content": "12"},
                                        {"content": "$20.00"},
                                        {"content": "\u{2014}"},
                                        {"content": "$240.00"},
                                        {"content": "Usage-based requests"},
                                        {"content": "1"},
                                        {"content": "1,120.35"},
                                        {"content": "0"},
                                        {"content": "$1,120.35"},
                                        {"content": ""},
                                        {"content": ""},
                                        {"content": ""},
                                        {"content": ""},
                                        {"content": ""},
                                    ]
                                }
                            }
                        ]
                    }
                }
            ]
        }
    })
}

#[test]
fn extracts_rows_from_nested_export() {
    let rows = extract_invoice_rows(&structure_export());

    assert_eq!(
        rows,
        vec![
            InvoiceRow {
                row_index: 0,
                description: Some("Pro plan seats".to_string()),
                quantity: Some(12),
                unit_price_cents: None,
                tax_pct: None,
                amount_cents: Some(24000),
                raw_columns: RawColumns(Some(12.0), None, None, Some(24000)),
            },
            InvoiceRow {
                row_index: 1,
                description: Some("Usage-based requests".to_string()),
                quantity: Some(1),
                unit_price_cents: None,
                tax_pct: Some(0.0),
                amount_cents: Some(112035),
                raw_columns: RawColumns(Some(1.0), None, Some(0.0), Some(112035)),
            },
        ]
    );
}

#[test]
fn spec_example_table() {
    let tree = json!({
        "tables": [{
            "cells": cells(&[
                "Description", "Qty", "Unit Price", "Tax", "Amount",
                "Widget A", "3", "10.00", "5", "30.00",
                "", "", "", "", "",
            ])
        }]
    });

    let rows = extract_invoice_rows(&tree);

    assert_eq!(
        serde_json::to_value(&rows).unwrap(),
        json!([{
            "row_index": 0,
            "description": "Widget A",
            "quantity": 3,
            "unit_price_cents": 1000,
            "tax_pct": 5.0,
            "amount_cents": 3000,
            "raw_columns": [3.0, 10.0, 5.0, 3000],
        }])
    );
}

#[test]
fn table_three_levels_deep_among_siblings() {
    let tree = json!({
        "meta": {"pages": 1, "engine": {"name": "layout", "version": "3"}},
        "blocks": [
            {"kind": "header", "lines": [{"text": "ACME Corp"}]},
            {
                "kind": "body",
                "inner": {
                    "noise": [1, 2, 3],
                    "table_res": {
                        "cells": cells(&[
                            "Description", "Qty", "Unit Price", "Tax", "Amount",
                            "Consulting", "8", "150.00", "20", "1,200.00",
                        ])
                    }
                }
            }
        ]
    });

    let rows = extract_invoice_rows(&tree);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description.as_deref(), Some("Consulting"));
    assert_eq!(rows[0].unit_price_cents, Some(15000));
    assert_eq!(rows[0].amount_cents, Some(120000));
}

#[test]
fn no_table_anywhere_gives_empty() {
    let tree = json!({
        "parsing_res_list": [{"block_label": "text", "block_content": "Description Qty Amount"}],
        "pages": [[{"text": "Description"}, {"text": "Amount"}]],
    });

    assert!(extract_invoice_rows(&tree).is_empty());
}

#[test]
fn header_without_amount_label_gives_empty() {
    let tree = json!({
        "tables": [{
            "cells": cells(&[
                "Description", "Qty", "Unit Price", "Tax", "Total",
                "Widget A", "3", "10.00", "5", "30.00",
            ])
        }]
    });

    assert!(extract_invoice_rows(&tree).is_empty());
}

#[test]
fn row_indices_are_dense_across_skipped_chunks() {
    let tree = json!({
        "tables": [{
            "cells": cells(&[
                "Description", "Qty", "Unit Price", "Tax", "Amount",
                "A", "1", "1.00", "0", "1.00",
                "", "", "", "", "",
                "Description", "Qty", "Unit Price", "Tax", "Amount",
                "B", "2", "1.00", "0", "2.00",
                "note", "", "", "", "",
                "C", "3", "1.00", "0", "3.00",
            ])
        }]
    });

    let rows = extract_invoice_rows(&tree);

    let indices: Vec<usize> = rows.iter().map(|r| r.row_index).collect();
    assert_eq!(indices, (0..rows.len()).collect::<Vec<_>>());
    assert_eq!(rows.len(), 3);
}

#[test]
fn quantity_out_of_range_is_visible_in_raw_columns() {
    let tree = json!({
        "tables": [{
            "cells": cells(&[
                "Description", "Qty", "Unit Price", "Tax", "Amount",
                "Tokens", "15000", "0.01", "0", "150.00",
            ])
        }]
    });

    let rows = extract_invoice_rows(&tree);
    let json = serde_json::to_value(&rows[0]).unwrap();

    assert_eq!(json["quantity"], Value::Null);
    assert_eq!(json["raw_columns"][0], json!(15000.0));
}

#[test]
fn parser_settings_apply() {
    let tree = json!({
        "tables": [{
            "cells": cells(&[
                "Description", "Qty", "Unit Price", "Tax", "Amount",
                "Seats", "50", "10.00", "25", "500.00",
            ])
        }]
    });

    let rows = InvoiceTableParser::new()
        .with_max_quantity(20.0)
        .with_max_tax_pct(23.0)
        .extract_rows(&tree);

    assert_eq!(rows[0].quantity, None);
    assert_eq!(rows[0].tax_pct, None);
    assert_eq!(rows[0].amount_cents, Some(50000));
}
