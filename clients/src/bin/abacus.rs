//! `abacus`: runs a named arithmetic method and prints its step-by-step trace.
//!
//! **Usage:**
//! ```text
//! abacus list [operation]
//! abacus run <operation> <method> <num1> <num2> [--json]
//! abacus example <operation> <method> [--json]
//! abacus sum <values>... [--json]
//! abacus poly <root> <coefficients>... [--json]
//! ```
//!
//! Global flags: `--config <file.toml>` loads an engine configuration and
//! `-v`/`-vv` raise the log level (overridden by `RUST_LOG`).
//!
//! Exits non-zero when the operands fail the method's validation.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::{Path, PathBuf};

use abacus::methods::addition::KahanSummation;
use abacus::methods::division::SyntheticDivision;
use abacus::{
    ArithmeticMethod, CalculationResult, EngineConfig, MethodRegistry, Operation, StepValue,
    Tolerance,
};
use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Explainable arithmetic: run a named method and see every step.
#[derive(Parser)]
#[command(name = "abacus", version, about = "Run arithmetic methods step by step")]
struct Cli {
    /// Engine configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered methods in display order.
    List {
        /// Restrict the listing to one operation.
        operation: Option<Operation>,
    },
    /// Validate and run a method on two operands.
    #[command(allow_negative_numbers = true)]
    Run {
        /// addition, subtraction, multiplication or division.
        operation: Operation,
        /// Method id; unknown ids fall back to the operation's default.
        method: String,
        /// First operand.
        num1: f64,
        /// Second operand.
        num2: f64,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run a method on its own canned example.
    Example {
        /// addition, subtraction, multiplication or division.
        operation: Operation,
        /// Method id.
        method: String,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Compensated (Kahan) sum of many values, next to the naive sum.
    #[command(allow_negative_numbers = true)]
    Sum {
        /// Values to add.
        #[arg(required = true)]
        values: Vec<f64>,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Divide a polynomial by (x - root) with synthetic division.
    #[command(allow_negative_numbers = true)]
    Poly {
        /// Root r of the divisor (x - r).
        root: f64,
        /// Coefficients, highest degree first.
        #[arg(required = true)]
        coefficients: Vec<f64>,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let registry = MethodRegistry::standard(&config).context("Invalid engine configuration")?;

    match cli.command {
        Command::List { operation } => list(&registry, operation),
        Command::Run {
            operation,
            method,
            num1,
            num2,
            json,
        } => {
            let method = registry.get_or_default(operation, &method)?;
            let check = method.validate(num1, num2);
            if !check.valid {
                bail!("{operation}/{}: {}", method.id(), check.message);
            }
            emit(&method.calculate(num1, num2), json)?;
        }
        Command::Example {
            operation,
            method,
            json,
        } => {
            let method = registry.get(operation, &method)?;
            let example = method.example();
            if !json {
                println!("Example: {}", example.description);
            }
            emit(&method.calculate(example.num1, example.num2), json)?;
        }
        Command::Sum { values, json } => {
            let epsilon = config
                .tolerance
                .epsilon_for("kahan", config.tolerance.default_epsilon);
            let result = KahanSummation::new(Tolerance::Absolute(epsilon)).calculate_multiple(&values);
            emit(&result, json)?;
            if !json {
                let naive: f64 = values.iter().sum();
                println!("Naive sum:      {naive}");
                if let Some(sum) = result.answer() {
                    println!("Difference:     {:e}", sum - naive);
                }
            }
        }
        Command::Poly {
            root,
            coefficients,
            json,
        } => emit(&SyntheticDivision.divide_polynomial(&coefficients, root), json)?,
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded engine configuration");
    Ok(config)
}

fn list(registry: &MethodRegistry, operation: Option<Operation>) {
    let operations = operation.map_or(Operation::ALL.to_vec(), |op| vec![op]);
    for operation in operations {
        println!("{operation} (default: {})", registry.default_method(operation));
        for meta in registry.list_methods(operation) {
            println!(
                "  {:<18} {:<28} {:<10} {:<12} {}",
                meta.id,
                meta.name,
                meta.category.as_str(),
                meta.difficulty.as_str(),
                meta.time_complexity
            );
        }
    }
}

fn emit(result: &CalculationResult, json: bool) -> Result<()> {
    if json {
        let text =
            serde_json::to_string_pretty(result).context("Failed to serialize the result")?;
        println!("{text}");
    } else {
        print_trace(result);
    }
    Ok(())
}

fn print_trace(result: &CalculationResult) {
    println!("{} ({}, {})", result.method_name, result.num1, result.num2);
    println!();
    for step in &result.steps {
        println!("{:>3}. [{}] {}", step.step_number, step.kind.as_str(), step.title);
        for line in [&step.description, &step.calculation, &step.explanation] {
            if !line.is_empty() {
                println!("       {line}");
            }
        }
        if step.result != StepValue::Empty {
            println!("       => {}", step.result);
        }
    }
    println!();

    match result.remainder {
        Some(remainder) => println!("Answer:         {} r {remainder}", result.final_answer),
        None => println!("Answer:         {}", result.final_answer),
    }
    match (&result.verification.expected, result.verification.correct) {
        (Some(expected), Some(true)) => println!("Verified:       yes (expected {expected})"),
        (Some(expected), _) => println!("Verified:       NO (expected {expected})"),
        (None, _) => println!("Verified:       not checked"),
    }
    println!("Complexity:     {}", result.time_complexity);
    if !result.recommended_use.is_empty() {
        println!("Best for:       {}", result.recommended_use);
    }
    if !result.alternative.is_empty() {
        println!("Alternative:    {}", result.alternative);
    }
}
