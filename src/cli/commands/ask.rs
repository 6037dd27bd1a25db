//! Ask command - answer one question from the collection

use crate::cli::output::{colors, format_duration_ms, format_score, format_span};
use crate::cli::OutputFormat;
use crate::core::services::RagService;
use crate::core::types::Answer;
use clap::Args;
use std::sync::Arc;

/// Arguments for the ask command
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to answer
    pub question: String,

    /// Chat model to use instead of the configured one
    #[arg(long, short = 'm')]
    pub model: Option<String>,

    /// Show the chunks the answer was grounded on
    #[arg(long)]
    pub show_sources: bool,
}

/// Execute the ask command
pub fn execute(
    args: AskArgs,
    service: &Arc<RagService>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let answer = service.ask(&args.question)?;

    match format {
        OutputFormat::Human => print_answer(&answer, args.show_sources),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&answer)?);
        }
    }

    Ok(())
}

/// Human-readable answer, optionally followed by its sources
pub fn print_answer(answer: &Answer, show_sources: bool) {
    println!("{}", answer.text.trim());

    if !show_sources {
        return;
    }

    println!();
    println!(
        "{} ({} queries, {})",
        colors::label("Sources"),
        colors::number(&answer.queries.len().to_string()),
        colors::dim(&format_duration_ms(answer.duration_ms))
    );
    for (rank, source) in answer.sources.iter().enumerate() {
        println!(
            "  {}. {} chunk {} {}  score: {}",
            colors::rank(&(rank + 1).to_string()),
            colors::source(&source.source),
            colors::number(&source.chunk_index.to_string()),
            format_span(source.start_offset, source.length),
            colors::score(&format_score(source.score))
        );
        println!("     {} {}", colors::dim("via"), colors::dim(&source.query));
    }
}
