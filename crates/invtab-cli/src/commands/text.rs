//! Text command - dump the raw text of a PDF as JSON.
//!
//! Prints `{"text": ..., "pages": N}` and exits 0, or prints nothing and
//! exits 1 when the PDF cannot be read.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use tracing::{debug, warn};

use invtab_core::PdfTextExtractor;

/// Arguments for the text command.
#[derive(Args)]
pub struct TextArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

pub async fn run(args: TextArgs) -> anyhow::Result<ExitCode> {
    let data = match tokio::fs::read(&args.input).await {
        Ok(data) => data,
        Err(e) => {
            warn!("Cannot read {}: {}", args.input.display(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let extracted = tokio::task::spawn_blocking(move || PdfTextExtractor::read(&data)).await?;

    match extracted {
        Ok(pdf_text) => {
            debug!(
                "Extracted {} chars from {} pages",
                pdf_text.text.len(),
                pdf_text.pages
            );
            let output = if args.pretty {
                serde_json::to_string_pretty(&pdf_text)?
            } else {
                serde_json::to_string(&pdf_text)?
            };
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            warn!("Text extraction failed for {}: {}", args.input.display(), e);
            Ok(ExitCode::FAILURE)
        }
    }
}
