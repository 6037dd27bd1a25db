//! Reset command - delete the collection

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::services::RagService;
use crate::core::types::IndexStatus;
use clap::Args;
use std::io::{self, Write};
use std::sync::Arc;

/// Arguments for the reset command
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Skip confirmation prompt
    #[arg(long, short = 'f')]
    pub force: bool,
}

/// Execute the reset command
pub fn execute(
    args: ResetArgs,
    service: &Arc<RagService>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let had_collection = service.status() == IndexStatus::Ready;

    // Confirmation prompt unless --force
    if had_collection && !args.force {
        print!("Delete the current collection? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("{}", colors::dim("Cancelled."));
            return Ok(());
        }
    }

    service.reset()?;

    match format {
        OutputFormat::Human => {
            if had_collection {
                println!("{} collection", colors::success("Deleted"));
            } else {
                println!("{}", colors::dim("No collection to delete."));
            }
        }
        OutputFormat::Json => {
            let response = serde_json::json!({
                "deleted": had_collection,
                "status": service.status(),
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
