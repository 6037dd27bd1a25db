//! Tests for argument parsing and shell completions

use clap::Parser;
use clap_complete::Shell;
use docrag::cli::commands::completions::write_completions;
use docrag::cli::{Cli, Commands, OutputFormat};

#[test]
fn test_parse_ask_with_options() {
    let cli = Cli::try_parse_from([
        "docrag",
        "ask",
        "What colour is the sky?",
        "--model",
        "mistral",
        "--show-sources",
    ])
    .unwrap();

    assert_eq!(cli.format, OutputFormat::Human);
    match cli.command {
        Commands::Ask(args) => {
            assert_eq!(args.question, "What colour is the sky?");
            assert_eq!(args.model.as_deref(), Some("mistral"));
            assert!(args.show_sources);
        }
        other => panic!("expected ask, got {other:?}"),
    }
}

#[test]
fn test_parse_global_format_after_subcommand() {
    let cli = Cli::try_parse_from(["docrag", "status", "--format", "json"]).unwrap();
    assert_eq!(cli.format, OutputFormat::Json);
    assert!(matches!(cli.command, Commands::Status(_)));
}

#[test]
fn test_parse_show_config_name() {
    let cli = Cli::try_parse_from(["docrag", "show-config"]).unwrap();
    assert!(matches!(cli.command, Commands::ShowConfig(_)));
}

#[test]
fn test_parse_chat_with_document() {
    let cli = Cli::try_parse_from(["docrag", "chat", "-d", "report.pdf"]).unwrap();
    match cli.command {
        Commands::Chat(args) => {
            assert_eq!(args.document.unwrap().to_str(), Some("report.pdf"));
            assert!(args.model.is_none());
        }
        other => panic!("expected chat, got {other:?}"),
    }
}

#[test]
fn test_ingest_requires_path() {
    assert!(Cli::try_parse_from(["docrag", "ingest"]).is_err());
}

#[test]
fn test_completions_mention_commands() {
    let mut out = Vec::new();
    write_completions(Shell::Bash, &mut out);
    let script = String::from_utf8(out).unwrap();

    assert!(script.contains("docrag"));
    assert!(script.contains("ingest"));
    assert!(script.contains("show-config"));
}
