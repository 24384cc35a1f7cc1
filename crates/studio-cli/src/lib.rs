//! # studio-cli: Quote Preview from the Command Line
//!
//! Reads one `QuoteInput` as JSON, prices it with `studio-core`, and writes
//! the `QuoteResult` as JSON.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   --input FILE / stdin          quote.toml + STUDIO_* env               │
//! │          │                                │                             │
//! │          ▼                                ▼                             │
//! │     QuoteInput (JSON)              QuoteConfig ──► QuotePolicy          │
//! │          │                                │                             │
//! │          └──────────► QuoteEngine ◄───────┘                             │
//! │                            │                                            │
//! │                            ▼                                            │
//! │        stdout: QuoteResult JSON   (or {quote, slots} with --slots)      │
//! │        stderr: logs + error message, exit code per CliError             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```bash
//! echo '{"startTime":"2026-03-14T10:00:00","endTime":"2026-03-14T12:00:00","initialHeadcount":2}' \
//!     | studio-quote --pretty
//!
//! studio-quote --input request.json --config ./quote.toml --slots
//! ```

pub mod config;
pub mod error;

use std::io::Read;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use studio_core::{QuoteEngine, QuoteInput, QuoteResult, TimeSlot};

pub use config::QuoteConfig;
pub use error::{CliError, CliResult};

pub const USAGE: &str = "\
Studio Quote - price a studio reservation

Usage: studio-quote [OPTIONS]

Options:
  -i, --input <PATH>    Read the quote request from PATH (default: stdin)
  -c, --config <PATH>   Config file (default: platform config dir, quote.toml)
  -s, --slots           Also print the billed slot sequence
  -p, --pretty          Pretty-print the JSON output
  -h, --help            Show this help message";

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub input: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub slots: bool,
    pub pretty: bool,
    pub help: bool,
}

/// Parses the arguments that follow the program name.
pub fn parse_args(args: &[String]) -> CliResult<CliArgs> {
    let mut parsed = CliArgs::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" | "-i" => {
                parsed.input = Some(PathBuf::from(flag_value(args, i)?));
                i += 1;
            }
            "--config" | "-c" => {
                parsed.config = Some(PathBuf::from(flag_value(args, i)?));
                i += 1;
            }
            "--slots" | "-s" => parsed.slots = true,
            "--pretty" | "-p" => parsed.pretty = true,
            "--help" | "-h" => parsed.help = true,
            other => {
                return Err(CliError::Usage(format!(
                    "unknown argument '{}'\n\n{}",
                    other, USAGE
                )))
            }
        }
        i += 1;
    }

    Ok(parsed)
}

fn flag_value(args: &[String], i: usize) -> CliResult<&str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("{} requires a value\n\n{}", args[i], USAGE)))
}

// =============================================================================
// Logging
// =============================================================================

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so stdout carries nothing but the JSON result.
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,studio=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Running
// =============================================================================

#[derive(Debug, Serialize)]
struct QuoteWithSlots {
    quote: QuoteResult,
    slots: Vec<TimeSlot>,
}

/// Runs one invocation and returns what should go to stdout.
pub fn run(args: &CliArgs) -> CliResult<String> {
    if args.help {
        return Ok(USAGE.to_string());
    }

    let config = QuoteConfig::load(args.config.clone())?;
    let engine = QuoteEngine::new(config.to_policy()?)?;

    let request = match &args.input {
        Some(path) => {
            debug!(?path, "Reading quote request");
            std::fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    render(&engine, &request, args.slots, args.pretty)
}

/// Prices one JSON request and serializes the outcome.
pub fn render(engine: &QuoteEngine, request: &str, slots: bool, pretty: bool) -> CliResult<String> {
    let input: QuoteInput = serde_json::from_str(request)?;
    let quote = engine.compute_quote(&input)?;

    info!(
        lines = quote.details.len(),
        total = %quote.total,
        "Quote computed"
    );

    if slots {
        let output = QuoteWithSlots {
            slots: engine.slots(&input)?,
            quote,
        };
        to_json(&output, pretty)
    } else {
        to_json(&quote, pretty)
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> CliResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
