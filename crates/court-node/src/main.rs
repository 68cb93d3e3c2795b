//! # Court Node
//!
//! Replays a JSON-lines operation log against a fresh court and prints the
//! final accounts, periods and pool totals as JSON on stdout. Logs go to
//! stderr.
//!
//! ```text
//! court-node --script ops.jsonl
//! AC_TIE_POLICY=dispute court-node --script ops.jsonl --json-logs
//! ```
//!
//! Configuration comes from `AC_*` environment variables
//! (see `CourtConfig::from_env`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ac_05_court_service::CourtConfig;
use court_node::{parse_script, ReplayRuntime};

/// Court Node: deterministic replay of court operations
#[derive(Parser, Debug)]
#[command(name = "court-node")]
#[command(about = "Replays staked-attestation operations and prints the resulting state")]
struct Args {
    /// JSON-lines operation log to replay
    #[arg(short, long)]
    script: PathBuf,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the report without indentation
    #[arg(long)]
    compact: bool,
}

fn init_tracing(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    let config = CourtConfig::from_env();
    config.validate().context("Invalid court configuration")?;
    info!(
        window_secs = config.periods.attestation_window_secs,
        slash_percentage = config.resolution.slash_percentage,
        tie_policy = ?config.resolution.tie_policy,
        rewards_rate_bps = config.reservoir.rewards_rate_bps,
        "Court configuration loaded"
    );

    let source = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let script = parse_script(&source);
    info!(path = %args.script.display(), operations = script.len(), "Replaying script");

    let report = ReplayRuntime::new(config).run(script).await;

    let output = if args.compact {
        serde_json::to_string(&report)
    } else {
        serde_json::to_string_pretty(&report)
    }
    .context("Failed to serialize replay report")?;
    println!("{output}");

    Ok(())
}
