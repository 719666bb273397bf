//! # md2pdf
//!
//! Convert Markdown documents to PDF with the Chrome, Chromium or Edge that
//! is already installed, instead of bundling a browser runtime.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown
//!  │
//!  ├─ 1. Locate   first existing browser from a fixed candidate list
//!  ├─ 2. Render   GFM → HTML fragment (comrak)
//!  ├─ 3. Images   relative <img src> → absolute file:// URLs
//!  ├─ 4. Wrap     fragment + GitHub-style CSS → standalone document
//!  └─ 5. Print    temp file → headless --print-to-pdf → verify → clean up
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2pdf::{convert, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let output = convert("notes.md", "notes.pdf", &ConversionConfig::default()).await?;
//!     println!("wrote {}", output.output.display());
//!     Ok(())
//! }
//! ```
//!
//! Only the HTML, no browser needed:
//!
//! ```rust
//! use md2pdf::{markdown_to_html, wrap_html, MarkdownOptions};
//!
//! let fragment = markdown_to_html("# Hello", &MarkdownOptions::default()).unwrap();
//! let document = wrap_html(&fragment);
//! assert!(document.starts_with("<!DOCTYPE html>"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2pdf` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! ## Known limitations
//!
//! - Browser install paths are only known for macOS and Linux; elsewhere pass
//!   an explicit path via [`ConversionConfigBuilder::browser`].
//! - Without [`ConversionConfigBuilder::timeout_secs`] a hung browser hangs
//!   the conversion.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{default_output_path, ConversionConfig, ConversionConfigBuilder, MarkdownOptions};
pub use convert::{convert, convert_sync, markdown_to_html, wrap_html};
pub use error::Md2PdfError;
pub use output::{ConversionOutput, ConversionStats};
pub use pipeline::browser::{find_browser, BrowserLocator};
pub use pipeline::images::resolve_image_paths;
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback, Stage};
