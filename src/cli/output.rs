//! Terminal rendering for docrag commands
//!
//! Color styles for answers, sources and collection details, plus
//! formatters for sizes, durations, ages, scores and chunk spans.
//! Coloring is disabled automatically when `NO_COLOR` is set.

use crate::core::types::IndexStatus;

/// Styles used across commands
pub mod colors {
    use colored::{ColoredString, Colorize};

    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Document names
    pub fn source(s: &str) -> ColoredString {
        s.cyan()
    }

    pub fn file_path(s: &str) -> ColoredString {
        s.blue()
    }

    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    pub fn warning(s: &str) -> ColoredString {
        s.yellow().bold()
    }

    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }

    /// Secondary detail (queries, timings, hints)
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    /// Cosine similarity
    pub fn score(s: &str) -> ColoredString {
        s.magenta()
    }

    /// Position of a source in an answer
    pub fn rank(s: &str) -> ColoredString {
        s.green().bold()
    }

    /// `you>` / `docrag>` in chat
    pub fn prompt(s: &str) -> ColoredString {
        s.cyan().bold()
    }
}

/// Collection size, e.g. `1.5 MB`
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Ingest or answer time: `850ms`, `2.40s`, `1m 5.5s`
pub fn format_duration_ms(ms: u64) -> String {
    match ms {
        0..=999 => format!("{ms}ms"),
        1_000..=59_999 => format!("{:.2}s", ms as f64 / 1000.0),
        _ => {
            let minutes = ms / 60_000;
            let seconds = (ms % 60_000) as f64 / 1000.0;
            format!("{minutes}m {seconds:.1}s")
        }
    }
}

/// Age of the collection: `just now`, `5m ago`, `3h ago`, `2d ago`
pub fn format_relative_time(timestamp: &chrono::DateTime<chrono::Utc>) -> String {
    let age = chrono::Utc::now().signed_duration_since(*timestamp);

    if age.num_seconds() < 0 {
        "in the future".to_string()
    } else if age.num_days() > 0 {
        format!("{}d ago", age.num_days())
    } else if age.num_hours() > 0 {
        format!("{}h ago", age.num_hours())
    } else if age.num_minutes() > 0 {
        format!("{}m ago", age.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Colored lifecycle state
pub fn format_status(status: IndexStatus) -> String {
    use colored::Colorize;

    let text = status.to_string();
    let styled = match status {
        IndexStatus::Ready => text.green(),
        IndexStatus::Building | IndexStatus::Destroying => text.yellow(),
        IndexStatus::Empty => text.dimmed(),
    };
    styled.to_string()
}

/// Similarity score with three decimals
pub fn format_score(score: f32) -> String {
    format!("{score:.3}")
}

/// Character range of a chunk in its document, `[start..end)`
pub fn format_span(start_offset: usize, length: usize) -> String {
    format!("[{}..{})", start_offset, start_offset + length)
}

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{}: {}", colors::error("Error"), message);
}
