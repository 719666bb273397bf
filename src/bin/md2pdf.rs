//! CLI binary for md2pdf.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use md2pdf::{
    convert, default_output_path, ConversionConfig, ConversionOutput, ConversionProgressCallback,
    ProgressCallback, Stage,
};
use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (plain text when stdout is not a terminal) ─────────

fn paint(code: &str, s: &str) -> String {
    if io::stdout().is_terminal() {
        format!("\x1b[{code}m{s}\x1b[0m")
    } else {
        s.to_string()
    }
}
fn green(s: &str) -> String {
    paint("32", s)
}
fn bold(s: &str) -> String {
    paint("1", s)
}
fn cyan(s: &str) -> String {
    paint("36", s)
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Spinner on stderr showing the current pipeline stage.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("md2pdf");
        bar.set_message("Starting…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }

    fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_stage(&self, stage: Stage) {
        self.bar.set_message(format!("{stage}…"));
    }

    fn on_conversion_complete(&self, _output: &ConversionOutput) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Write README.pdf next to README.md
  md2pdf README.md

  # Choose the output path
  md2pdf notes.md ~/Desktop/notes.pdf

  # Use a specific browser binary
  md2pdf --browser /opt/google/chrome/chrome report.md

  # Give up if the browser hangs
  md2pdf --timeout 60 report.md

  # Machine-readable summary
  md2pdf --json report.md

BROWSERS (first match wins):
  macOS   /Applications/Google Chrome.app, Chromium.app, Microsoft Edge.app
  Linux   /usr/bin/google-chrome[-stable], chromium[-browser], /snap/bin/chromium,
          /usr/bin/microsoft-edge[-stable]
  Windows not searched; use --browser

ENVIRONMENT VARIABLES:
  MD2PDF_BROWSER   Browser executable (same as --browser)
  MD2PDF_TIMEOUT   Browser timeout in seconds (same as --timeout)
  RUST_LOG         Log filter, e.g. RUST_LOG=md2pdf=debug
"#;

/// Convert Markdown to PDF using an installed Chrome, Chromium or Edge.
#[derive(Parser, Debug)]
#[command(
    name = "md2pdf",
    version,
    about = "Convert Markdown to PDF using an installed Chrome, Chromium or Edge",
    long_about = "Convert a Markdown file (GitHub-Flavored: tables, task lists, fenced code) to PDF. \
The document is rendered to styled HTML and printed by a locally installed Chromium-family \
browser in headless mode; no browser runtime is bundled.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown file to convert.
    input: PathBuf,

    /// Output PDF path. Default: the input path with `.md` replaced by `.pdf`.
    output: Option<PathBuf>,

    /// Browser executable to use instead of searching the known install paths.
    #[arg(long, env = "MD2PDF_BROWSER")]
    browser: Option<PathBuf>,

    /// Kill the browser if it has not finished after this many seconds.
    #[arg(long, env = "MD2PDF_TIMEOUT", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Extra argument passed to the browser (repeatable).
    #[arg(long = "browser-arg", value_name = "ARG", allow_hyphen_values = true)]
    browser_args: Vec<String>,

    /// Print a JSON summary (ConversionOutput) to stdout instead of messages.
    #[arg(long, env = "MD2PDF_JSON")]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "MD2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2PDF_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Bare `md2pdf`, or `-h`/`--help` anywhere, is a request for usage, not an error.
    if wants_help(std::env::args_os().skip(1)) {
        let _ = Cli::command().print_help();
        println!();
        return ExitCode::SUCCESS;
    }

    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner provides all the feedback that matters; keep library logs
    // out of its way unless asked for.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && io::stderr().is_terminal();
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress = if show_progress && !cli.verbose {
        Some(CliProgressCallback::new())
    } else {
        None
    };

    let result = run(&cli, progress.clone()).await;

    if let Some(ref p) = progress {
        p.clear();
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// True when the arguments (program name excluded) are empty or contain a
/// help flag before any `--` separator.
fn wants_help<I>(args: I) -> bool
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter().peekable();
    if args.peek().is_none() {
        return true;
    }
    args.take_while(|a| a != "--").any(|a| a == "--help" || a == "-h")
}

async fn run(cli: &Cli, progress: Option<Arc<CliProgressCallback>>) -> Result<()> {
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));

    let config = build_config(cli, progress.map(|p| p as ProgressCallback))?;

    if !cli.quiet && !cli.json {
        println!(
            "{} Converting {} → {}",
            cyan("◆"),
            cli.input.display(),
            output_path.display()
        );
    }

    let output = convert(&cli.input, &output_path, &config).await?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if !cli.quiet {
        print_summary(&output.output, output.stats.total_duration_ms);
    }

    Ok(())
}

fn print_summary(path: &Path, total_ms: u64) {
    println!(
        "{} PDF saved to {}  ({}ms)",
        green("✔"),
        bold(&path.display().to_string()),
        total_ms
    );
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder();

    if let Some(ref browser) = cli.browser {
        builder = builder.browser(browser);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.timeout_secs(secs);
    }
    for arg in &cli.browser_args {
        builder = builder.extra_browser_arg(arg);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
