//! Config command - show current configuration

use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    pub config_file: String,
    pub data_dir: String,
    #[serde(flatten)]
    pub config: &'a Config,
}

/// Execute the config command
pub fn execute(
    _args: ConfigArgs,
    config: &Config,
    xdg: &XdgDirs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = ConfigResponse {
        config_file: xdg.config_file().to_string_lossy().into_owned(),
        data_dir: xdg.data_dir.to_string_lossy().into_owned(),
        config,
    };

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  config_file: {}", response.config_file);
            println!("  data_dir: {}", response.data_dir);
            println!("  ingest:");
            println!("    chunk_size: {}", config.ingest.chunk_size);
            println!("    overlap: {}", config.ingest.overlap);
            println!(
                "    max_document_size_mb: {}",
                config.ingest.max_document_size_mb
            );
            println!("  storage:");
            println!("    index_dir: {}", config.storage.index_dir.display());
            println!("    collection_name: {}", config.storage.collection_name);
            println!("    cleanup_retries: {}", config.storage.cleanup_retries);
            println!(
                "    cleanup_retry_delay_ms: {}",
                config.storage.cleanup_retry_delay_ms
            );
            println!(
                "    cleanup_backoff_factor: {}",
                config.storage.cleanup_backoff_factor
            );
            println!("  retrieval:");
            println!("    k_per_query: {}", config.retrieval.k_per_query);
            println!("    query_variants: {}", config.retrieval.query_variants);
            println!(
                "    expansion_temperature: {}",
                config.retrieval.expansion_temperature
            );
            println!("  generation:");
            println!("    temperature: {}", config.generation.temperature);
            println!(
                "    max_context_chars: {}",
                config.generation.max_context_chars
            );
            println!("  providers:");
            println!("    ollama_url: {}", config.providers.ollama_url);
            println!(
                "    embedding_backend: {:?}",
                config.providers.embedding_backend
            );
            println!("    embedding_model: {}", config.providers.embedding_model);
            println!("    chat_model: {}", config.providers.chat_model);
            match config.providers.request_timeout_sec {
                Some(secs) => println!("    request_timeout_sec: {secs}"),
                None => println!("    request_timeout_sec: none"),
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
