//! Chat command - interactive question loop
//!
//! Reads one question per line. Lines starting with `/` are commands:
//!
//! - `/ingest <path>` - replace the collection with a new document
//! - `/reset` - delete the collection and clear history
//! - `/status` - show the collection state
//! - `/history` - print the conversation so far
//! - `/help` - list commands
//! - `/quit` or `/exit` - leave the chat

use crate::cli::output::{colors, format_score, format_status};
use crate::cli::OutputFormat;
use crate::core::error::DocRagError;
use crate::core::services::RagService;
use crate::core::session::ChatSession;
use crate::core::types::{Answer, Document, IndexReady, Role};
use clap::Args;
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Arguments for the chat command
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Chat model to use instead of the configured one
    #[arg(long, short = 'm')]
    pub model: Option<String>,

    /// Ingest this document before the first question
    #[arg(long, short = 'd')]
    pub document: Option<PathBuf>,

    /// Show sources after each answer
    #[arg(long)]
    pub show_sources: bool,
}

/// Execute the chat command
pub fn execute(args: ChatArgs, service: &Arc<RagService>, format: OutputFormat) -> CliResult {
    let mut session = ChatSession::new(Arc::clone(service));
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(path) = &args.document {
        let ready = ingest(&session, path)?;
        print_ingested(&ready, &mut out, format)?;
    }

    if format == OutputFormat::Human {
        writeln!(
            out,
            "{} Type a question, {} for commands, {} to leave.",
            colors::label("docrag chat."),
            colors::label("/help"),
            colors::label("/quit")
        )?;
    }

    run_loop(&mut session, stdin.lock(), &mut out, format, args.show_sources)
}

/// Drive the chat until end of input or `/quit`
pub fn run_loop<R: BufRead, W: Write>(
    session: &mut ChatSession,
    input: R,
    out: &mut W,
    format: OutputFormat,
    show_sources: bool,
) -> CliResult {
    let mut lines = input.lines();

    loop {
        if format == OutputFormat::Human {
            write!(out, "{} ", colors::prompt("you>"))?;
            out.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            let (name, rest) = command
                .split_once(char::is_whitespace)
                .map(|(n, r)| (n, r.trim()))
                .unwrap_or((command, ""));

            match name {
                "quit" | "exit" => break,
                "help" => print_help(out)?,
                "status" => print_status(session, out, format)?,
                "history" => print_history(session, out, format)?,
                "reset" => match session.reset() {
                    Ok(()) => report(out, format, "reset", "Collection deleted, history cleared")?,
                    Err(e) => report_error(out, format, &e)?,
                },
                "ingest" if !rest.is_empty() => {
                    match ingest(session, Path::new(rest)) {
                        Ok(ready) => print_ingested(&ready, out, format)?,
                        Err(e) => report_error(out, format, &e)?,
                    }
                }
                _ => writeln!(
                    out,
                    "{}: unknown command '/{}', try /help",
                    colors::warning("Warning"),
                    command
                )?,
            }
            continue;
        }

        match session.ask(line) {
            Ok(answer) => print_answer(&answer, out, format, show_sources)?,
            Err(e) => report_error(out, format, &e)?,
        }
    }

    Ok(())
}

fn ingest(session: &ChatSession, path: &Path) -> Result<IndexReady, DocRagError> {
    let document = Document::from_path(path)?;
    session.ingest(&document)
}

fn print_ingested<W: Write>(ready: &IndexReady, out: &mut W, format: OutputFormat) -> CliResult {
    match format {
        OutputFormat::Human => writeln!(
            out,
            "{} {} ({} chunks)",
            colors::success("Ingested"),
            colors::source(&ready.source),
            colors::number(&ready.chunks_created.to_string())
        )?,
        OutputFormat::Json => writeln!(out, "{}", json!({ "event": "ingested", "result": ready }))?,
    }
    Ok(())
}

fn print_answer<W: Write>(
    answer: &Answer,
    out: &mut W,
    format: OutputFormat,
    show_sources: bool,
) -> CliResult {
    match format {
        OutputFormat::Human => {
            writeln!(out, "{} {}", colors::prompt("docrag>"), answer.text.trim())?;
            if show_sources {
                for source in &answer.sources {
                    writeln!(
                        out,
                        "  {} {} chunk {} ({})",
                        colors::dim("-"),
                        colors::source(&source.source),
                        colors::number(&source.chunk_index.to_string()),
                        colors::score(&format_score(source.score))
                    )?;
                }
            }
        }
        OutputFormat::Json => writeln!(out, "{}", json!({ "event": "answer", "answer": answer }))?,
    }
    Ok(())
}

fn print_status<W: Write>(session: &ChatSession, out: &mut W, format: OutputFormat) -> CliResult {
    let status = session.status();
    match format {
        OutputFormat::Human => {
            writeln!(out, "{}: {}", colors::label("Status"), format_status(status))?;
            if let Ok(Some(info)) = session.service().info() {
                writeln!(
                    out,
                    "  {} ({} chunks)",
                    colors::source(&info.metadata.source),
                    colors::number(&info.metadata.chunk_count.to_string())
                )?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", json!({ "event": "status", "status": status }))?,
    }
    Ok(())
}

fn print_history<W: Write>(session: &ChatSession, out: &mut W, format: OutputFormat) -> CliResult {
    match format {
        OutputFormat::Human => {
            if session.turns().is_empty() {
                writeln!(out, "{}", colors::dim("No messages yet."))?;
            }
            for turn in session.turns() {
                let who = match turn.role {
                    Role::User => colors::prompt("you>"),
                    Role::Assistant => colors::prompt("docrag>"),
                };
                writeln!(out, "{} {}", who, turn.content.trim())?;
            }
        }
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({ "event": "history", "turns": session.turns() })
        )?,
    }
    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> CliResult {
    writeln!(out, "{}", colors::label("Commands:"))?;
    writeln!(out, "  /ingest <path>  replace the collection with a document")?;
    writeln!(out, "  /reset          delete the collection and clear history")?;
    writeln!(out, "  /status         show the collection state")?;
    writeln!(out, "  /history        show this conversation")?;
    writeln!(out, "  /quit           leave the chat")?;
    Ok(())
}

fn report<W: Write>(out: &mut W, format: OutputFormat, event: &str, message: &str) -> CliResult {
    match format {
        OutputFormat::Human => writeln!(out, "{}", colors::success(message))?,
        OutputFormat::Json => writeln!(out, "{}", json!({ "event": event, "ok": true }))?,
    }
    Ok(())
}

/// Query errors are shown and the loop continues
fn report_error<W: Write>(out: &mut W, format: OutputFormat, error: &DocRagError) -> CliResult {
    match format {
        OutputFormat::Human => {
            writeln!(out, "{}: {}", colors::error("Error"), error)?;
            if matches!(error, DocRagError::IndexNotReady(_)) {
                writeln!(
                    out,
                    "{}",
                    colors::dim("Use /ingest <path> to load a document first.")
                )?;
            }
        }
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({ "event": "error", "kind": error.kind(), "message": error.to_string() })
        )?,
    }
    Ok(())
}
