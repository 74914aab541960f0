//! Output layer for pretty/text/JSON parity.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` / hidden `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.
//!
//! Results go to stdout, errors to stderr.

use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

use mentionrank_core::RankConfig;
use mentionrank_core::error::{ErrorCode, RankError};
use mentionrank_core::graph::{GraphStats, IngestStats};
use mentionrank_core::pipeline::RankReport;
use mentionrank_core::report::RankedEntry;

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<20} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (sections, aligned columns).
    Pretty,
    /// Plain tab-separated text for pipes and scripts.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Core resolution logic, separated from I/O for testability.
fn resolve_output_mode_inner(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }

    if json_flag {
        return OutputMode::Json;
    }

    if let Some(val) = format_env {
        match val.to_lowercase().as_str() {
            "json" => return OutputMode::Json,
            "text" => return OutputMode::Text,
            "pretty" => return OutputMode::Pretty,
            _ => {} // unknown value: fall through to TTY detection
        }
    }

    if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

/// Resolve the output mode from CLI flags, environment, and TTY defaults.
pub fn resolve_output_mode(format_flag: Option<OutputMode>, json_flag: bool) -> OutputMode {
    let env_val = std::env::var("FORMAT").ok();
    let is_tty = io::stdout().is_terminal();
    resolve_output_mode_inner(format_flag, json_flag, env_val.as_deref(), is_tty)
}

// ---------------------------------------------------------------------------
// Ranking output
// ---------------------------------------------------------------------------

/// Everything one `mrank` run reports.
#[derive(Debug, Serialize)]
pub struct RankOutput {
    pub config: RankConfig,
    pub ingest: IngestStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<GraphStats>,
    pub report: RankReport,
}

/// Render a [`RankOutput`] to `w` in the given mode.
pub fn write_rank_output(
    mode: OutputMode,
    output: &RankOutput,
    w: &mut dyn Write,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *w, output)?;
            writeln!(w)?;
        }
        OutputMode::Text => write_text(output, w)?,
        OutputMode::Pretty => write_pretty(output, w)?,
    }
    Ok(())
}

fn write_pretty(output: &RankOutput, w: &mut dyn Write) -> io::Result<()> {
    let k = output.config.top_k;

    if let Some(stats) = &output.stats {
        pretty_section(w, "Mention Graph")?;
        pretty_kv(w, "records", output.ingest.records.to_string())?;
        pretty_kv(w, "nodes", stats.node_count.to_string())?;
        pretty_kv(w, "edges", stats.edge_count.to_string())?;
        pretty_kv(w, "density", format!("{:.6}", stats.density))?;
        pretty_kv(w, "components", stats.component_count.to_string())?;
        pretty_kv(w, "largest component", stats.largest_component_size().to_string())?;
        pretty_kv(w, "isolated nodes", stats.isolated_node_count.to_string())?;
        pretty_kv(w, "max in-degree", stats.max_in_degree.to_string())?;
        pretty_kv(w, "max out-degree", stats.max_out_degree.to_string())?;
        pretty_kv(w, "self mentions", output.ingest.self_mentions.to_string())?;
        pretty_kv(w, "repeat mentions", output.ingest.duplicate_mentions.to_string())?;
        pretty_kv(w, "content hash", &stats.content_hash)?;
        writeln!(w)?;
    }

    pretty_section(w, &format!("Top {k} Hubs"))?;
    write_pretty_entries(&output.report.hubs, w)?;
    writeln!(w)?;
    pretty_section(w, &format!("Top {k} Authorities"))?;
    write_pretty_entries(&output.report.authorities, w)
}

fn write_pretty_entries(entries: &[RankedEntry], w: &mut dyn Write) -> io::Result<()> {
    let width = entries
        .iter()
        .map(|e| e.identity.chars().count())
        .max()
        .unwrap_or(0)
        .max(8);
    for (rank, entry) in entries.iter().enumerate() {
        writeln!(
            w,
            "{:>3}. {:<width$}  {:.6}",
            rank + 1,
            entry.identity,
            entry.score
        )?;
    }
    Ok(())
}

fn write_text(output: &RankOutput, w: &mut dyn Write) -> io::Result<()> {
    let k = output.config.top_k;

    if let Some(stats) = &output.stats {
        writeln!(w, "records\t{}", output.ingest.records)?;
        writeln!(w, "nodes\t{}", stats.node_count)?;
        writeln!(w, "edges\t{}", stats.edge_count)?;
        writeln!(w, "density\t{}", stats.density)?;
        writeln!(w, "components\t{}", stats.component_count)?;
        writeln!(w, "largest_component\t{}", stats.largest_component_size())?;
        writeln!(w, "isolated_nodes\t{}", stats.isolated_node_count)?;
        writeln!(w, "max_in_degree\t{}", stats.max_in_degree)?;
        writeln!(w, "max_out_degree\t{}", stats.max_out_degree)?;
        writeln!(w, "content_hash\t{}", stats.content_hash)?;
        writeln!(w)?;
    }

    writeln!(w, "Top {k} Hubs")?;
    for entry in &output.report.hubs {
        writeln!(w, "{}\t{}", entry.identity, entry.score)?;
    }
    writeln!(w)?;
    writeln!(w, "Top {k} Authorities")?;
    for entry in &output.report.authorities {
        writeln!(w, "{}\t{}", entry.identity, entry.score)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A run failure tagged with the code shown to the user.
#[derive(Debug)]
pub struct Failure {
    pub code: ErrorCode,
    pub error: anyhow::Error,
}

impl From<RankError> for Failure {
    fn from(err: RankError) -> Self {
        Self {
            code: err.error_code(),
            error: err.into(),
        }
    }
}

/// Attach an [`ErrorCode`] to any fallible result.
pub trait TagExt<T> {
    fn tag(self, code: ErrorCode) -> Result<T, Failure>;
}

impl<T, E: Into<anyhow::Error>> TagExt<T> for Result<T, E> {
    fn tag(self, code: ErrorCode) -> Result<T, Failure> {
        self.map_err(|e| Failure {
            code,
            error: e.into(),
        })
    }
}

/// Structured error for CLI output.
#[derive(Debug, Clone, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. "E2002").
    pub error_code: String,
}

impl From<&Failure> for CliError {
    fn from(failure: &Failure) -> Self {
        Self {
            message: format!("{:#}", failure.error),
            suggestion: failure.code.hint().map(str::to_string),
            error_code: failure.code.code().to_string(),
        }
    }
}

/// Render an error to `w` in the requested format.
pub fn write_error(mode: OutputMode, error: &CliError, w: &mut dyn Write) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut *w, &wrapper)?;
            writeln!(w)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(w, "error[{}]: {}", error.error_code, error.message)?;
            if let Some(ref suggestion) = error.suggestion {
                writeln!(w, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}
