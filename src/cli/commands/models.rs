//! Models command - list models installed on the Ollama server

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::providers::{self, ModelCatalog};
use clap::Args;
use serde::Serialize;

/// Arguments for the models command
#[derive(Args, Debug)]
pub struct ModelsArgs {}

/// Models response
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub server: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub models: Vec<String>,
}

/// Execute the models command
pub fn execute(
    args: ModelsArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = providers::build_catalog(&config.providers)?;
    execute_with(args, config, catalog.as_ref(), format)
}

/// Execute against an explicit catalog
pub fn execute_with(
    _args: ModelsArgs,
    config: &Config,
    catalog: &dyn ModelCatalog,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = ModelsResponse {
        server: config.providers.ollama_url.clone(),
        chat_model: config.providers.chat_model.clone(),
        embedding_model: config.providers.embedding_model.clone(),
        models: catalog.list_models()?,
    };

    match format {
        OutputFormat::Human => {
            if response.models.is_empty() {
                println!(
                    "No models installed on {}. Run '{}' first.",
                    colors::file_path(&response.server),
                    colors::label(&format!("ollama pull {}", response.chat_model))
                );
            } else {
                println!(
                    "{} ({}):",
                    colors::label("Models"),
                    colors::number(&response.models.len().to_string())
                );
                for model in &response.models {
                    let marker = if is_same_model(model, &response.chat_model) {
                        colors::success(" (chat)").to_string()
                    } else if is_same_model(model, &response.embedding_model) {
                        colors::success(" (embedding)").to_string()
                    } else {
                        String::new()
                    };
                    println!("  {}{}", colors::source(model), marker);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Ollama reports `name:tag`; an untagged name means `latest`
pub fn is_same_model(installed: &str, configured: &str) -> bool {
    let normalize = |name: &str| {
        if name.contains(':') {
            name.to_string()
        } else {
            format!("{name}:latest")
        }
    };
    normalize(installed) == normalize(configured)
}
