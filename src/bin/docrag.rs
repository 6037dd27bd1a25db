//! docrag - chat with a single document from the command line
//!
//! # Examples
//!
//! ```bash
//! # Ingest a document (replaces any previous one)
//! docrag ingest ./paper.pdf
//!
//! # Ask a question
//! docrag ask "What is the main contribution?" --show-sources
//!
//! # Interactive chat with a specific model
//! docrag chat --model mistral
//!
//! # Delete the collection
//! docrag reset --force
//! ```

use clap::Parser;
use docrag::cli::{output, run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs go to stderr; stdout carries command output
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "docrag=info".into());
    let json = std::env::var("DOCRAG_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
