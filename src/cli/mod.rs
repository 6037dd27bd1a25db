//! CLI adapter for docrag
//!
//! Command-line front end over the RAG core: ingest a document, ask
//! questions about it, chat interactively and manage the collection.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |      core/       |
//!              |  (RAG engine)    |
//!              +--------+---------+
//!                       |
//!                       v
//!              +------------------+
//!              |      cli/        |
//!              | (clap adapter)   |
//!              +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// docrag - chat with a single document
///
/// Ingest one PDF or text document into a local vector collection and
/// ask questions answered only from its content by a local Ollama model.
#[derive(Parser, Debug)]
#[command(name = "docrag")]
#[command(version)]
#[command(about = "Single-document RAG over local Ollama models", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest a document, replacing the current collection
    Ingest(commands::IngestArgs),

    /// Ask a question about the ingested document
    Ask(commands::AskArgs),

    /// Interactive chat about the ingested document
    Chat(commands::ChatArgs),

    /// Delete the collection
    Reset(commands::ResetArgs),

    /// Show collection status
    Status(commands::StatusArgs),

    /// List models available on the Ollama server
    Models(commands::ModelsArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  docrag completions bash > ~/.local/share/bash-completion/completions/docrag
    ///   zsh:   docrag completions zsh > ~/.zfunc/_docrag
    ///   fish:  docrag completions fish > ~/.config/fish/completions/docrag.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::RagService;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need config)
    let command = match cli.command {
        Commands::Completions(args) => return commands::completions::execute(args),
        command => command,
    };

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    xdg.ensure_dirs_exist()?;
    xdg.log_paths();

    // Load configuration
    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    let format = cli.format;
    let service = |chat_model: Option<&str>| -> crate::core::Result<Arc<RagService>> {
        Ok(Arc::new(RagService::with_chat_model(
            config.clone(),
            chat_model,
        )?))
    };

    match command {
        Commands::Ingest(args) => commands::ingest::execute(args, &service(None)?, format),
        Commands::Ask(args) => {
            let service = service(args.model.as_deref())?;
            commands::ask::execute(args, &service, format)
        }
        Commands::Chat(args) => {
            let service = service(args.model.as_deref())?;
            commands::chat::execute(args, &service, format)
        }
        Commands::Reset(args) => commands::reset::execute(args, &service(None)?, format),
        Commands::Status(args) => commands::status::execute(args, &service(None)?, format),
        Commands::Models(args) => commands::models::execute(args, &config, format),
        Commands::ShowConfig(args) => commands::config::execute(args, &config, &xdg, format),
        Commands::Completions(_) => Ok(()), // Handled above
    }
}
