//! `abacus-conformance`: checks every registered method against the engine's contracts.
//!
//! Runs the conformance suite across:
//! - Registry round-trips and default methods
//! - Canned examples
//! - Trace well-formedness, verification and determinism
//! - Rejection of out-of-domain operands
//!
//! **Usage:**
//! ```text
//! abacus-conformance [--config <file.toml>] [--json]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;
use std::process;

use abacus::{EngineConfig, MethodRegistry};
use abacus_conformance::{run_all, Severity};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Run the Abacus conformance suite.
#[derive(Parser)]
#[command(
    name = "abacus-conformance",
    about = "Check every registered arithmetic method against the engine's contracts"
)]
struct Args {
    /// Engine configuration file (TOML) used to build the registry.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    let registry = MethodRegistry::standard(&config).context("Invalid engine configuration")?;
    let report = run_all(&registry);

    if args.json {
        let text = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{text}");
    } else {
        println!("Abacus Conformance Report");
        println!("=========================");
        println!();

        for result in &report.results {
            println!("[{}] {}: {}", result.severity.label(), result.validator, result.message);
            for detail in &result.details {
                println!("       {detail}");
            }
        }

        println!();
        println!(
            "Summary: {} passed, {} warnings, {} failed",
            report.count(Severity::Pass),
            report.count(Severity::Warning),
            report.failure_count()
        );
    }

    let failed = report.failure_count();
    if failed > 0 {
        eprintln!("Conformance FAILED: {failed} check(s) did not pass.");
        process::exit(1);
    }

    if !args.json {
        println!("Conformance PASSED.");
    }
    Ok(())
}
