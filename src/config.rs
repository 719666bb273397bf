//! Configuration types for Markdown-to-PDF conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The defaults reproduce the plain
//! `md2pdf input.md` behaviour: browser discovered from the host's install
//! paths, images resolved against the input file's directory, no timeout.
//!
//! [`MarkdownOptions`] is the smaller option object taken by
//! [`crate::markdown_to_html`] for callers that only want the HTML stage.

use crate::error::Md2PdfError;
use crate::progress::ProgressCallback;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Configuration for a Markdown-to-PDF conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use md2pdf::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .browser("/usr/bin/chromium")
///     .timeout_secs(120)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Default)]
pub struct ConversionConfig {
    /// Explicit browser executable. Default: None (probe the host's candidate paths).
    ///
    /// When set, this path is the only candidate. It is still checked for
    /// existence, so a wrong path fails with [`Md2PdfError::BrowserNotFound`].
    pub browser: Option<PathBuf>,

    /// Directory relative image references are resolved against.
    /// Default: None (the input file's directory).
    pub base_path: Option<PathBuf>,

    /// Upper bound on the browser run in seconds. Default: None (wait forever).
    pub timeout_secs: Option<u64>,

    /// Extra command-line arguments appended after the fixed print flags.
    pub extra_browser_args: Vec<String>,

    /// Optional stage-event callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("browser", &self.browser)
            .field("base_path", &self.base_path)
            .field("timeout_secs", &self.timeout_secs)
            .field("extra_browser_args", &self.extra_browser_args)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn browser(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.browser = Some(path.into());
        self
    }

    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.base_path = Some(path.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = Some(secs);
        self
    }

    pub fn extra_browser_arg(mut self, arg: impl Into<String>) -> Self {
        self.config.extra_browser_args.push(arg.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Md2PdfError> {
        if self.config.timeout_secs == Some(0) {
            return Err(Md2PdfError::InvalidConfig(
                "Timeout must be at least 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Options for [`crate::markdown_to_html`].
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Directory relative image references are resolved against.
    pub base_path: PathBuf,
}

impl Default for MarkdownOptions {
    /// Uses the process's current working directory, or `.` if it cannot be read.
    fn default() -> Self {
        Self {
            base_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl MarkdownOptions {
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

/// Derive the PDF path for an input when none is given.
///
/// A trailing `.md` (any case) is replaced by `.pdf`; anything else simply
/// gets `.pdf` appended, so `file.txt` becomes `file.txt.pdf`.
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    match input.to_str() {
        Some(s) => {
            let stem = match s.len().checked_sub(3) {
                Some(cut) if s.is_char_boundary(cut) && s[cut..].eq_ignore_ascii_case(".md") => &s[..cut],
                _ => s,
            };
            PathBuf::from(format!("{stem}.pdf"))
        }
        None => {
            // Not UTF-8: no suffix matching, append only.
            let mut os: OsString = input.as_os_str().to_owned();
            os.push(".pdf");
            PathBuf::from(os)
        }
    }
}
