//! Ingest command - build the collection from one document

use crate::cli::output::{colors, format_duration_ms};
use crate::cli::OutputFormat;
use crate::core::services::RagService;
use crate::core::types::Document;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the ingest command
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Path to the document (PDF or UTF-8 text)
    pub path: PathBuf,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Execute the ingest command
pub fn execute(
    args: IngestArgs,
    service: &Arc<RagService>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if !args.path.is_file() {
        return Err(format!(
            "Path '{}' is not a file. Provide a PDF or text document.",
            args.path.display()
        )
        .into());
    }

    let document = Document::from_path(&args.path)?;

    if format == OutputFormat::Human && !args.quiet {
        println!(
            "{} {}...",
            colors::dim("Ingesting"),
            colors::file_path(&args.path.display().to_string())
        );
    }

    let ready = service.ingest(&document)?;

    match format {
        OutputFormat::Human => {
            println!(
                "{} {}",
                colors::success("Ingested"),
                colors::source(&ready.source)
            );
            println!(
                "  {}: {}",
                colors::label("Characters"),
                colors::number(&ready.text_chars.to_string())
            );
            println!(
                "  {}: {}",
                colors::label("Chunks"),
                colors::number(&ready.chunks_created.to_string())
            );
            println!(
                "  {}: {}",
                colors::label("Dimensions"),
                colors::number(&ready.dimensions.to_string())
            );
            println!(
                "  {}: {}",
                colors::label("Stored in"),
                colors::file_path(&ready.storage_path.display().to_string())
            );
            println!(
                "  {}: {}",
                colors::label("Duration"),
                colors::number(&format_duration_ms(ready.duration_ms))
            );
            if ready.chunks_created == 0 {
                println!(
                    "{}",
                    colors::warning("No text could be extracted; answers will have no context.")
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&ready)?);
        }
    }

    Ok(())
}
