use clap::{Parser, Subcommand};
use cogbench::bench::{self, CogOpener, Location, DEFAULT_ITERATIONS};
use cogbench::io::{HttpOptions, DEFAULT_READ_AHEAD};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::Level;

/// Time how long it takes to open a Cloud Optimized GeoTIFF and read its metadata
#[derive(Parser, Debug)]
#[command(name = "cogbench", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log to stderr, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Timeout of a single HTTP request in milliseconds
    #[arg(long, default_value_t = 30_000, global = true)]
    timeout_ms: u64,

    /// Minimum bytes fetched per HTTP range request
    #[arg(long, default_value_t = DEFAULT_READ_AHEAD, global = true)]
    read_ahead: usize,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a local file once
    Single { path: PathBuf },
    /// Open a local file repeatedly
    Benchmark {
        path: PathBuf,
        #[arg(default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,
    },
    /// Open a remote file once
    Url { url: String },
    /// Open a remote file repeatedly
    #[command(name = "benchmark_url")]
    BenchmarkUrl {
        url: String,
        #[arg(default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout, fall back to stderr if that is closed
            if e.print().is_err() {
                eprintln!("{e}");
            }
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Logging
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let options = HttpOptions {
        timeout: Duration::from_millis(cli.timeout_ms),
        read_ahead: cli.read_ahead,
    };

    match cli.command {
        Command::Single { path } => print_json(&bench::open_info(
            &CogOpener::local(),
            &Location::Path(path),
        )),
        Command::Benchmark { path, iterations } => print_json(&bench::run_benchmark(
            &CogOpener::local(),
            &Location::Path(path),
            iterations,
        )),
        Command::Url { url } => match CogOpener::remote(options) {
            Ok(opener) => print_json(&bench::open_info(&opener, &Location::Url(url))),
            Err(e) => fail(e),
        },
        Command::BenchmarkUrl { url, iterations } => match CogOpener::remote(options) {
            Ok(opener) => print_json(&bench::run_benchmark(
                &opener,
                &Location::Url(url),
                iterations,
            )),
            Err(e) => fail(e),
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn fail<E: std::fmt::Display>(e: E) -> ExitCode {
    eprintln!("error: {e}");
    ExitCode::FAILURE
}
