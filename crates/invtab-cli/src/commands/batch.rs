//! Batch command - extract rows from many saved result trees.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use invtab_core::{InvoiceRow, InvoiceTableParser};

use super::config::load_config;
use super::output::{format_rows, FormatArg};
use super::rows::parser_for;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching result tree JSON files
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file rows
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Also write summary.csv to the output directory
    #[arg(long, requires = "output_dir")]
    summary: bool,

    /// Continue when a file cannot be read or parsed
    #[arg(long)]
    continue_on_error: bool,

    /// Maximum nesting depth searched for tables
    #[arg(long)]
    max_depth: Option<usize>,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    rows: Vec<InvoiceRow>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("json"))
        })
        .collect();

    if files.is_empty() {
        warn!("No JSON files found for pattern: {}", args.input);
        return Ok(ExitCode::FAILURE);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let parser = parser_for(&config, args.max_depth);
    let format = args.format.unwrap_or_else(|| config.output.format.into());
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        pb.set_message(path.display().to_string());
        let result = process_file(&path, &parser);

        if let Some(ref e) = result.error {
            error!("Failed to process {}: {}", path.display(), e);
            if !args.continue_on_error {
                pb.abandon();
                anyhow::bail!(
                    "Stopping after error in {} (use --continue-on-error)",
                    path.display()
                );
            }
        }

        if let Some(output_dir) = args.output_dir.as_ref().filter(|_| !result.rows.is_empty()) {
            let output_path = output_dir.join(output_name(&path, format));
            fs::write(&output_path, format_rows(&result.rows, format, config.output.pretty)?)?;
            debug!("Wrote {}", output_path.display());
        }

        results.push(result);
        pb.inc(1);
    }

    pb.finish_and_clear();

    print_summary(&results);

    if args.summary {
        if let Some(ref output_dir) = args.output_dir {
            let summary_path = output_dir.join("summary.csv");
            write_summary_csv(&results, &summary_path)?;
            eprintln!(
                "{} Summary written to {}",
                style("✓").green(),
                summary_path.display()
            );
        }
    }

    debug!("Batch finished in {:?}", start.elapsed());

    if results.iter().any(|r| !r.rows.is_empty()) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn process_file(path: &Path, parser: &InvoiceTableParser) -> FileResult {
    let file_start = Instant::now();
    let (rows, error) = match parser.extract_file(path) {
        Ok(rows) => (rows, None),
        Err(e) => (Vec::new(), Some(e.to_string())),
    };

    FileResult {
        path: path.to_path_buf(),
        rows,
        error,
        processing_time_ms: file_start.elapsed().as_millis() as u64,
    }
}

/// `invoice.json` becomes `invoice.rows.json` (or `.rows.csv`).
fn output_name(path: &Path, format: FormatArg) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    format!("{}.rows.{}", stem, format.extension())
}

fn print_summary(results: &[FileResult]) {
    let with_rows = results.iter().filter(|r| !r.rows.is_empty()).count();
    let failed = results.iter().filter(|r| r.error.is_some()).count();

    for result in results {
        let status = match (&result.error, result.rows.len()) {
            (Some(_), _) => style("error".to_string()).red(),
            (None, 0) => style("no rows".to_string()).yellow(),
            (None, n) => style(format!("{} rows", n)).green(),
        };
        println!("{}  {}", result.path.display(), status);
    }

    println!();
    println!(
        "{} {} files, {} with rows, {} empty, {} failed",
        style("ℹ").blue(),
        results.len(),
        with_rows,
        results.len() - with_rows - failed,
        failed
    );
}

fn write_summary_csv(results: &[FileResult], path: &Path) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "file",
        "rows",
        "total_amount_cents",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        wtr.write_record([
            result.path.display().to_string(),
            result.rows.len().to_string(),
            InvoiceRow::total_amount_cents(&result.rows).to_string(),
            result.processing_time_ms.to_string(),
            result.error.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_name() {
        assert_eq!(
            output_name(Path::new("/tmp/scan-01.json"), FormatArg::Json),
            "scan-01.rows.json"
        );
        assert_eq!(
            output_name(Path::new("page.res.json"), FormatArg::Csv),
            "page.res.rows.csv"
        );
    }
}
