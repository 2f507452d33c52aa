//! Rows command - extract invoice rows from one saved result tree.
//!
//! Exit status is part of the contract: 0 with a non-empty row array on
//! stdout, otherwise `[]` on stdout and status 1. Callers use the status to
//! decide whether to fall back to the PDF text path.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use invtab_core::models::config::InvtabConfig;
use invtab_core::{InvoiceRow, InvoiceTableParser};

use super::config::load_config;
use super::output::{format_rows, FormatArg};

/// Arguments for the rows command.
#[derive(Args)]
pub struct RowsArgs {
    /// Result tree JSON saved by the layout engine
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Maximum nesting depth searched for tables
    #[arg(long)]
    max_depth: Option<usize>,
}

pub async fn run(args: RowsArgs, config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    let start = Instant::now();

    let (rows, config) = match extract(&args, config_path) {
        Ok(result) => result,
        Err(e) => return Ok(fail(&e)),
    };

    if rows.is_empty() {
        info!("No invoice rows found in {}", args.input.display());
        println!("[]");
        return Ok(ExitCode::FAILURE);
    }

    if let Err(e) = emit(&args, &config, &rows) {
        return Ok(fail(&e));
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(ExitCode::SUCCESS)
}

/// Report a failure the way callers expect: `[]` on stdout, status 1.
fn fail(e: &anyhow::Error) -> ExitCode {
    warn!("Extraction failed: {:#}", e);
    println!("[]");
    ExitCode::FAILURE
}

/// Serialize rows and write them to the output file or stdout.
fn emit(args: &RowsArgs, config: &InvtabConfig, rows: &[InvoiceRow]) -> anyhow::Result<()> {
    let format = args.format.unwrap_or_else(|| config.output.format.into());
    let output = format_rows(rows, format, args.pretty || config.output.pretty)?;

    match &args.output {
        Some(output_path) => {
            fs::write(output_path, &output)
                .with_context(|| format!("cannot write {}", output_path.display()))?;
            eprintln!(
                "{} {} rows written to {}",
                style("✓").green(),
                rows.len(),
                output_path.display()
            );
        }
        None => println!("{}", output),
    }

    Ok(())
}

fn extract(
    args: &RowsArgs,
    config_path: Option<&str>,
) -> anyhow::Result<(Vec<InvoiceRow>, InvtabConfig)> {
    let config = load_config(config_path)?;

    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing result tree: {}", args.input.display());

    let rows = parser_for(&config, args.max_depth).extract_file(&args.input)?;
    Ok((rows, config))
}

/// Build a parser from config, with an optional depth override.
pub fn parser_for(config: &InvtabConfig, max_depth: Option<usize>) -> InvoiceTableParser {
    let parser = InvoiceTableParser::with_config(config.extraction.clone());
    match max_depth {
        Some(depth) => parser.with_max_depth(depth),
        None => parser,
    }
}
