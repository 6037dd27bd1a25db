//! Status command - show lifecycle state and collection details

use crate::cli::output::{colors, format_bytes, format_relative_time, format_status};
use crate::cli::OutputFormat;
use crate::core::services::RagService;
use crate::core::storage::CollectionInfo;
use crate::core::types::IndexStatus;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

/// Status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: IndexStatus,
    pub collection: Option<CollectionInfo>,
}

/// Execute the status command
pub fn execute(
    _args: StatusArgs,
    service: &Arc<RagService>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = StatusResponse {
        status: service.status(),
        collection: service.info()?,
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{}: {}",
                colors::label("Status"),
                format_status(response.status)
            );

            match &response.collection {
                Some(info) => {
                    let meta = &info.metadata;
                    println!(
                        "  {}: {}",
                        colors::label("Collection"),
                        colors::source(&meta.name)
                    );
                    println!(
                        "  {}: {}",
                        colors::label("Document"),
                        colors::source(&meta.source)
                    );
                    println!(
                        "  {}: {}",
                        colors::label("Chunks"),
                        colors::number(&meta.chunk_count.to_string())
                    );
                    println!(
                        "  {}: {} ({})",
                        colors::label("Embeddings"),
                        colors::number(&meta.dimensions.to_string()),
                        colors::dim(&meta.embedding_model)
                    );
                    println!(
                        "  {}: {}",
                        colors::label("Size"),
                        colors::number(&format_bytes(info.size_bytes))
                    );
                    println!(
                        "  {}: {}",
                        colors::label("Created"),
                        colors::dim(&format_relative_time(&meta.created_at))
                    );
                    println!(
                        "  {}: {}",
                        colors::label("Path"),
                        colors::file_path(&info.path.display().to_string())
                    );
                }
                None => {
                    println!(
                        "No document ingested. Run '{}' to get started.",
                        colors::label("docrag ingest <path>")
                    );
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
