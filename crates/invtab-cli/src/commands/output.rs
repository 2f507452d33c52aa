//! Row serialization shared by the rows and batch commands.

use invtab_core::models::config::OutputFormat;
use invtab_core::InvoiceRow;

/// Output format selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
    /// JSON array of row objects
    Json,
    /// CSV, one line per row
    Csv,
}

impl From<OutputFormat> for FormatArg {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Self::Json,
            OutputFormat::Csv => Self::Csv,
        }
    }
}

impl FormatArg {
    /// File extension for files written in this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Serialize rows in the requested format.
pub fn format_rows(rows: &[InvoiceRow], format: FormatArg, pretty: bool) -> anyhow::Result<String> {
    match format {
        FormatArg::Json if pretty => Ok(serde_json::to_string_pretty(rows)?),
        FormatArg::Json => Ok(serde_json::to_string(rows)?),
        FormatArg::Csv => format_csv(rows),
    }
}

fn format_csv(rows: &[InvoiceRow]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "row_index",
        "description",
        "quantity",
        "unit_price_cents",
        "tax_pct",
        "amount_cents",
        "raw_quantity",
        "raw_unit_price",
        "raw_tax_pct",
        "raw_amount_cents",
    ])?;

    for row in rows {
        let raw = row.raw_columns;
        wtr.write_record([
            row.row_index.to_string(),
            row.description.clone().unwrap_or_default(),
            opt(row.quantity),
            opt(row.unit_price_cents),
            opt(row.tax_pct),
            opt(row.amount_cents),
            opt(raw.quantity()),
            opt(raw.unit_price()),
            opt(raw.tax_pct()),
            opt(raw.amount_cents()),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use invtab_core::RawColumns;

    fn row() -> InvoiceRow {
        InvoiceRow {
            row_index: 0,
            description: Some("Widget, large".to_string()),
            quantity: None,
            unit_price_cents: Some(1000),
            tax_pct: Some(5.0),
            amount_cents: Some(3000),
            raw_columns: RawColumns(Some(15000.0), Some(10.0), Some(5.0), Some(3000)),
        }
    }

    #[test]
    fn test_csv_output() {
        let csv = format_rows(&[row()], FormatArg::Csv, false).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("row_index,description,quantity"));
        assert_eq!(lines[1], "0,\"Widget, large\",,1000,5,3000,15000,10,5,3000");
    }

    #[test]
    fn test_json_output() {
        let json = format_rows(&[row()], FormatArg::Json, false).unwrap();
        assert!(json.starts_with("[{\"row_index\":0"));
        assert!(!json.contains('\n'));

        let pretty = format_rows(&[row()], FormatArg::Json, true).unwrap();
        assert!(pretty.contains('\n'));
    }
}
