// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! flowgauged - The flowgauge daemon.
//!
//! Periodically fetches a repository's issues, computes flow metrics for
//! each configured project board and publishes the snapshot to the SQLite
//! store, a Prometheus textfile, an HTTP `/metrics` endpoint and/or stdout.
//!
//! Usage:
//!   flowgauged --config <path> [--once] [--fixture <path>] [--print]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

mod config;
mod env;
mod error;
mod runner;
mod serve;
mod sink;

use config::{Config, DEFAULT_CONFIG_PATH};
use error::{Error, Result};
use fg_github::{FixtureSource, GithubClient, IssueSource};
use runner::Runner;
use serve::{ServeSink, SharedSnapshot};
use sink::{JsonSink, SnapshotSink, SqliteSink, TextfileSink};

/// Lock filename for single instance guarantee.
const LOCK_NAME: &str = "flowgauged.lock";

/// flowgauged: flow metrics for GitHub project boards
#[derive(Parser, Debug)]
#[command(name = "flowgauged", version)]
#[command(about = "Computes lead and cycle time metrics for GitHub project boards")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Run a single pass and exit
    #[arg(long)]
    once: bool,

    /// Read issues from a JSON fixture instead of the GitHub API
    #[arg(long, value_name = "PATH")]
    fixture: Option<PathBuf>,

    /// Print each snapshot as JSON to stdout
    #[arg(long)]
    print: bool,

    /// Directory for the lock file and relative database paths
    #[arg(long, value_name = "PATH")]
    state_dir: Option<PathBuf>,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.debug, args.log_file.as_deref());

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when a `--once` pass did not complete cleanly.
async fn run(args: Args) -> Result<bool> {
    let config = Config::load(&args.config)?;
    let boards = config.board_set()?;

    let state_dir = env::resolve_state_dir(args.state_dir.as_deref());
    fs::create_dir_all(&state_dir)?;
    let lock_path = state_dir.join(LOCK_NAME);
    let _lock = acquire_lock(&lock_path)?;

    tracing::info!(
        "flowgauged starting, repository={}/{}, boards={}, state_dir={}",
        config.repository.owner,
        config.repository.name,
        boards.len(),
        state_dir.display()
    );

    let mut sinks = build_sinks(&config, &state_dir, args.print)?;
    let server = match config.listen_addr() {
        Some(addr) if !args.once => {
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .map_err(|source| Error::Bind { addr, source })?;
            let latest = SharedSnapshot::default();
            sinks.push(Box::new(ServeSink::new(latest.clone())));
            Some(tokio::spawn(serve::serve(
                listener,
                latest,
                std::future::pending::<()>(),
            )))
        }
        _ => None,
    };

    let result = match &args.fixture {
        Some(path) => {
            let source = FixtureSource::new(path)
                .with_repository(&config.repository.owner, &config.repository.name);
            drive(Runner::new(source, boards, sinks), &config, args.once).await
        }
        None => {
            let token = env::github_token().ok_or(fg_github::Error::MissingToken)?;
            let client = GithubClient::new(config.client_config(token))?;
            drive(Runner::new(client, boards, sinks), &config, args.once).await
        }
    };

    if let Some(server) = server {
        server.abort();
    }
    result
}

async fn drive<S: IssueSource>(mut runner: Runner<S>, config: &Config, once: bool) -> Result<bool> {
    if once {
        let pass = runner.run_pass().await?;
        return Ok(pass.is_clean());
    }

    let interval = config.update_interval();
    tracing::info!("running every {}s", interval.as_secs());
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };
    runner.run_loop(interval, shutdown).await;
    tracing::info!("flowgauged stopped");
    Ok(true)
}

fn build_sinks(
    config: &Config,
    state_dir: &Path,
    print: bool,
) -> Result<Vec<Box<dyn SnapshotSink + Send>>> {
    let mut sinks: Vec<Box<dyn SnapshotSink + Send>> = Vec::new();
    if let Some(path) = config.database_path(state_dir) {
        tracing::info!("writing snapshots to {}", path.display());
        sinks.push(Box::new(SqliteSink::open(&path)?));
    }
    if let Some(path) = config.exporter.as_ref().and_then(|e| e.textfile.as_ref()) {
        tracing::info!("writing textfile to {}", path.display());
        sinks.push(Box::new(TextfileSink::new(path)));
    }
    if print {
        sinks.push(Box::new(JsonSink::stdout()));
    }
    if sinks.is_empty() {
        tracing::warn!("no sinks configured; snapshots will only be logged");
    }
    Ok(sinks)
}

fn setup_logging(debug: bool, log_path: Option<&Path>) {
    use tracing_subscriber::EnvFilter;

    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(env::vars::RUST_LOG).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // Try to open log file, fall back to stderr
    let file = log_path.and_then(|path| {
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });
    if let Some(file) = file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn acquire_lock(lock_path: &Path) -> Result<fs::File> {
    use fs2::FileExt;

    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(lock_path)?;
    file.try_lock_exclusive()
        .map_err(|_| Error::AlreadyRunning(lock_path.to_path_buf()))?;
    Ok(file)
}
