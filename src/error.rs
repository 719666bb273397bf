//! Error types for the md2pdf library.
//!
//! Every failure in the pipeline is fatal: there is no partial PDF and no
//! retry. [`Md2PdfError`] carries enough context (paths, exit code, captured
//! browser stderr) for the CLI to print a single useful line.
//!
//! Failing to remove the intermediate HTML file is deliberately absent from
//! this enum. Cleanup is best-effort and never replaces the primary result.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the md2pdf library.
#[derive(Debug, Error)]
pub enum Md2PdfError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input Markdown file was not found at the given path.
    #[error("Input file not found: '{path}'")]
    InputNotFound { path: PathBuf },

    /// The file exists but could not be read as UTF-8 text.
    #[error("Failed to read '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Browser errors ────────────────────────────────────────────────────
    /// None of the candidate browser paths exist.
    #[error(
        "Chrome not found: no Chrome, Chromium or Edge browser at any of the {} known install paths; \
install Google Chrome (https://www.google.com/chrome/) or Chromium, or pass --browser <PATH>.",
        .searched.len()
    )]
    BrowserNotFound { searched: Vec<PathBuf> },

    /// The browser process could not be spawned at all.
    #[error("Failed to launch browser '{browser}': {source}")]
    BrowserLaunch {
        browser: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The browser ran but exited non-zero or produced no PDF.
    #[error(
        "Browser failed to produce a PDF (exit code {}): {stderr}",
        .code.map(|c| c.to_string()).unwrap_or_else(|| "none".into())
    )]
    BrowserExit { code: Option<i32>, stderr: String },

    /// The browser did not exit within the configured timeout.
    #[error("Browser did not finish within {secs}s and was killed")]
    BrowserTimeout { secs: u64 },

    // ── Rendering errors ──────────────────────────────────────────────────
    /// comrak failed to format the parsed document.
    #[error("Markdown rendering failed: {0}")]
    MarkdownRender(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// The per-conversion temporary directory or HTML file could not be written.
    #[error("Failed to prepare temporary HTML file: {source}")]
    TempFileFailed {
        #[source]
        source: std::io::Error,
    },

    /// Could not prepare the output location.
    #[error("Failed to prepare output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
