//! Purpose: Developer-only benchmark runner for chwire column codecs.
//! Exports: None (binary entry point only).
//! Role: Parses CLI flags, installs tracing, and hands off to the bench harness.
//! Invariants: Results go to stdout (JSON) and stderr (table); logs go to stderr only.
//! Invariants: Exit codes come from `to_exit_code` so failures are scriptable.
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chwire::core::error::{Error, to_exit_code};

mod bench;

use bench::{BenchArgs, BenchFormat};

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(()) => 0,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<(), Error> {
    let cli = BenchCli::parse();
    let rows = if cli.rows.is_empty() {
        vec![50_000]
    } else {
        cli.rows
    };
    bench::run_bench(
        BenchArgs {
            rows,
            iterations: cli.iterations,
            format: BenchFormat::parse(&cli.format)?,
        },
        env!("CARGO_PKG_VERSION"),
    )
}

#[derive(Parser)]
#[command(
    name = "chwire-bench",
    version,
    about = "Developer-only column codec benchmark runner",
    long_about = None
)]
struct BenchCli {
    #[arg(long = "rows", help = "Repeatable rows per column (default: 50000)")]
    rows: Vec<usize>,
    #[arg(long, default_value_t = 100, help = "Encode/decode iterations per scenario")]
    iterations: u64,
    #[arg(long, default_value = "both", help = "Output format: json|table|both")]
    format: String,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn emit_error(err: &Error) {
    eprintln!("chwire-bench: {err}");
}
