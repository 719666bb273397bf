//! Result types returned by a successful conversion.

use serde::Serialize;
use std::path::PathBuf;

/// Summary of a finished conversion.
///
/// The PDF itself lives on disk at [`ConversionOutput::output`]; this struct
/// only describes where things went and how long each stage took.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutput {
    /// The Markdown file that was converted.
    pub input: PathBuf,
    /// Absolute path of the written PDF.
    pub output: PathBuf,
    /// The browser executable that printed the PDF.
    pub browser: PathBuf,
    pub stats: ConversionStats,
}

/// Sizes and timings for one conversion.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionStats {
    /// Size of the Markdown source in bytes.
    pub markdown_bytes: usize,
    /// Size of the complete HTML document handed to the browser.
    pub html_bytes: usize,
    /// Size of the produced PDF.
    pub pdf_bytes: u64,
    /// Markdown → HTML document, including image resolution.
    pub render_duration_ms: u64,
    /// Browser launch until exit.
    pub print_duration_ms: u64,
    pub total_duration_ms: u64,
}
