//! Claude Code Stop Hook - unfinished work detector
//!
//! Reads the stop event from stdin, inspects the recent transcript and blocks
//! the stop (exit 2 plus a JSON reason) when the work looks unfinished.
//! Every failure path exits 0 so a broken hook never traps the session.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::io::{self, Read};
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cc_keep_working::hook::{self, EXIT_ALLOW};
use cc_keep_working::Settings;

const LOG_ENV: &str = "CC_KEEP_WORKING_LOG";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Default, Parser)]
#[command(name = "cc-keep-working", version, about)]
struct Cli {
    /// Settings file (default: <config dir>/cc-keep-working/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of recent turns to analyze
    #[arg(short, long)]
    window: Option<usize>,

    /// Only read the last N non-blank transcript lines
    #[arg(long)]
    tail_lines: Option<usize>,

    /// Log filter for stderr diagnostics (e.g. "debug")
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let (cli, cli_error) = parse_cli(std::env::args_os());

    let loaded = Settings::load(cli.config.as_deref());
    init_logging(&cli, loaded.as_ref().ok());

    if let Some(e) = cli_error {
        let kept = cli
            .config
            .as_ref()
            .map(|path| format!(" except --config {}", path.display()))
            .unwrap_or_default();
        tracing::warn!("invalid arguments, ignoring all flags{kept}: {e}");
    }
    let mut settings = loaded.unwrap_or_else(|e| {
        tracing::warn!("{e}; using defaults");
        Settings::default()
    });
    if let Some(window) = cli.window {
        settings.window_size = window;
    }
    if cli.tail_lines.is_some() {
        settings.tail_lines = cli.tail_lines;
    }

    match panic::catch_unwind(|| run(&settings)) {
        Ok(Ok(code)) => ExitCode::from(code),
        Ok(Err(e)) => {
            tracing::error!("Hook error: {e:#}");
            ExitCode::from(EXIT_ALLOW)
        }
        Err(_) => {
            tracing::error!("Unexpected panic in stop hook; allowing stop");
            ExitCode::from(EXIT_ALLOW)
        }
    }
}

/// Parse the command line. A clap error must not exit 2 (the host reads that
/// as a block), so on error every flag is dropped except a recoverable
/// `--config`.
fn parse_cli<I, T>(args: I) -> (Cli, Option<clap::Error>)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    match Cli::try_parse_from(&args) {
        Ok(cli) => (cli, None),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let cli = Cli {
                config: config_arg(&args),
                ..Cli::default()
            };
            (cli, Some(e))
        }
    }
}

/// Last `--config PATH`, `--config=PATH` or `-c PATH` on the command line.
fn config_arg(args: &[OsString]) -> Option<PathBuf> {
    let mut found = None;
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let Some(arg) = arg.to_str() else { continue };
        if arg == "--config" || arg == "-c" {
            found = iter.next().map(PathBuf::from);
        } else if let Some(path) = arg.strip_prefix("--config=") {
            found = Some(PathBuf::from(path));
        }
    }
    found
}

fn run(settings: &Settings) -> anyhow::Result<u8> {
    // Read input from stdin
    let mut input_str = String::new();
    io::stdin()
        .read_to_string(&mut input_str)
        .context("failed to read hook input")?;

    let decision = match hook::handle_stop(&input_str, settings) {
        Ok(decision) => decision,
        Err(e) => {
            tracing::warn!("Error parsing JSON: {e}");
            return Ok(EXIT_ALLOW);
        }
    };

    let mut stdout = io::stdout().lock();
    hook::emit(&decision, &mut stdout).context("failed to write hook output")
}

fn init_logging(cli: &Cli, settings: Option<&Settings>) {
    let level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var(LOG_ENV).ok())
        .or_else(|| settings.and_then(|s| s.log_level.clone()))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    // stdout carries the verdict; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
