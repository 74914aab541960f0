#![forbid(unsafe_code)]

mod output;
mod reader;

use clap::Parser;
use mentionrank_core::config::load_config;
use mentionrank_core::error::ErrorCode;
use mentionrank_core::graph::GraphStats;
use mentionrank_core::{MentionGraph, RankConfig, rank_graph};
use output::{CliError, Failure, OutputMode, RankOutput, TagExt};
use reader::{ReadError, TweetReader};
use std::env;
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Config file consulted when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "mentionrank.toml";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "mrank: hub and authority ranking of a tweet mention graph",
    long_about = None,
    after_help = "EXAMPLES:\n    # Rank a tweet dump\n    mrank tweets.ndjson\n\n    # Read from stdin, top 10, machine-readable\n    cat tweets.ndjson | mrank - --top-k 10 --format json"
)]
struct Cli {
    /// Newline-delimited tweet JSON, or `-` for stdin.
    input: PathBuf,

    /// TOML config file [default: ./mentionrank.toml if present].
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of HITS power iterations (overrides config).
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Entries per ranked list (overrides config).
    #[arg(short = 'k', long, allow_negative_numbers = true)]
    top_k: Option<i64>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, hide = true)]
    json: bool,

    /// Include mention-graph statistics in the output.
    #[arg(long)]
    stats: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Merge the config file with command-line overrides.
    fn rank_config(&self) -> Result<RankConfig, Failure> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if self.config.is_some() && !path.exists() {
            return Err(Failure {
                code: ErrorCode::ConfigNotFound,
                error: anyhow::anyhow!("config file not found: {}", path.display()),
            });
        }

        let mut config = load_config(&path).tag(ErrorCode::ConfigParseError)?;
        if let Some(n) = self.iterations {
            config.iteration_count = n;
        }
        if let Some(k) = self.top_k {
            config.top_k = k;
        }
        debug!(?config, "resolved config");
        Ok(config)
    }
}

/// Initialize tracing. Logs always go to stderr so stdout stays parseable.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("MENTIONRANK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "mrank=debug,mentionrank_core=debug,info"
        } else {
            "mrank=info,mentionrank_core=info,warn"
        })
    });

    let format = env::var("MENTIONRANK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

fn open_input(path: &Path) -> io::Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    Ok(Box::new(BufReader::new(fs::File::open(path)?)))
}

fn read_graph(path: &Path) -> Result<MentionGraph, Failure> {
    let input = open_input(path)
        .map_err(|e| anyhow::anyhow!("failed to open {}: {e}", path.display()))
        .tag(ErrorCode::InputReadError)?;

    MentionGraph::try_from_records(TweetReader::new(input)).map_err(|err: ReadError| Failure {
        code: err.error_code(),
        error: err.into(),
    })
}

fn run(cli: &Cli, mode: OutputMode) -> Result<(), Failure> {
    let config = cli.rank_config()?;
    config.validate()?;

    let graph = read_graph(&cli.input)?;
    info!(
        records = graph.ingest.records,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "mention graph built"
    );

    let report = rank_graph(&graph, &config)?;
    let stats = cli.stats.then(|| GraphStats::from_graph(&graph));

    let result = RankOutput {
        config,
        ingest: graph.ingest,
        stats,
        report,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::write_rank_output(mode, &result, &mut out).tag(ErrorCode::InternalUnexpected)?;
    out.flush().tag(ErrorCode::InternalUnexpected)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let mode = output::resolve_output_mode(cli.format, cli.json);

    match run(&cli, mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            tracing::error!(code = %failure.code, "{:#}", failure.error);
            let err = CliError::from(&failure);
            let stderr = io::stderr();
            let _ = output::write_error(mode, &err, &mut stderr.lock());
            ExitCode::FAILURE
        }
    }
}
