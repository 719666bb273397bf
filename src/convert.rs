//! Conversion entry points.
//!
//! [`convert`] runs the whole pipeline strictly in order: validate input,
//! find a browser, render HTML, print, verify. The two HTML stages are also
//! exposed on their own ([`markdown_to_html`], [`wrap_html`]) for callers who
//! want the document without a browser.

use crate::config::{ConversionConfig, MarkdownOptions};
use crate::error::Md2PdfError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::browser::BrowserLocator;
use crate::pipeline::{images, markdown, print};
use crate::progress::Stage;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

pub use crate::pipeline::document::wrap_html;

/// Convert a Markdown file to a PDF at `output`.
///
/// # Arguments
/// * `input`  — path to the Markdown source; must exist
/// * `output` — destination PDF; parent directories are created, an existing
///   file is replaced
/// * `config` — conversion configuration
///
/// # Errors
/// Every failure is fatal and nothing is retried:
/// - [`Md2PdfError::InputNotFound`] before any other work
/// - [`Md2PdfError::BrowserNotFound`] before anything is written
/// - [`Md2PdfError::BrowserLaunch`] / [`Md2PdfError::BrowserExit`] from the print step
///
/// # Example
/// ```rust,no_run
/// use md2pdf::{convert, ConversionConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let output = convert("README.md", "README.pdf", &ConversionConfig::default()).await?;
/// eprintln!("{} bytes via {}", output.stats.pdf_bytes, output.browser.display());
/// # Ok(())
/// # }
/// ```
pub async fn convert(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2PdfError> {
    let total_start = Instant::now();
    let input = input.as_ref();
    info!("Starting conversion: {}", input.display());

    // ── Step 1: Validate input ───────────────────────────────────────────
    if !tokio::fs::try_exists(input).await.unwrap_or(false) {
        return Err(Md2PdfError::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    // ── Step 2: Locate browser ───────────────────────────────────────────
    let browser = locate_browser(config)?;

    // ── Step 3: Prepare output location ──────────────────────────────────
    let output = prepare_output(output.as_ref()).await?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(input, &output);
    }

    // ── Step 4: Markdown → HTML document ─────────────────────────────────
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage(Stage::Render);
    }
    let render_start = Instant::now();
    let source = read_input(input).await?;
    let base_path = match config.base_path {
        Some(ref base) => base.clone(),
        None => input_directory(input),
    };
    let fragment = markdown_to_html(&source, &MarkdownOptions::with_base_path(base_path))?;
    let html = wrap_html(&fragment);
    let render_duration_ms = render_start.elapsed().as_millis() as u64;
    debug!("Rendered {} bytes of HTML in {}ms", html.len(), render_duration_ms);

    // ── Step 5: Print ────────────────────────────────────────────────────
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage(Stage::Print);
    }
    let print_start = Instant::now();
    print::print_document(&browser, &html, &output, config).await?;
    let print_duration_ms = print_start.elapsed().as_millis() as u64;

    let pdf_bytes = tokio::fs::metadata(&output)
        .await
        .map(|m| m.len())
        .unwrap_or(0);

    let result = ConversionOutput {
        input: input.to_path_buf(),
        output,
        browser,
        stats: ConversionStats {
            markdown_bytes: source.len(),
            html_bytes: html.len(),
            pdf_bytes,
            render_duration_ms,
            print_duration_ms,
            total_duration_ms: total_start.elapsed().as_millis() as u64,
        },
    };

    info!(
        "Conversion complete: {} ({} bytes, {}ms total)",
        result.output.display(),
        pdf_bytes,
        result.stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(&result);
    }

    Ok(result)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2PdfError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Md2PdfError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(input, output, config))
}

/// Render Markdown to an HTML fragment with local images resolved.
///
/// Relative `<img>` sources that exist under `options.base_path` become
/// absolute `file://` URLs; everything else is left as comrak produced it.
pub fn markdown_to_html(source: &str, options: &MarkdownOptions) -> Result<String, Md2PdfError> {
    let fragment = markdown::render_fragment(source)?;
    Ok(images::resolve_image_paths(&fragment, &options.base_path))
}

fn locate_browser(config: &ConversionConfig) -> Result<PathBuf, Md2PdfError> {
    let locator = match config.browser {
        Some(ref path) => BrowserLocator::with_candidates([path.clone()]),
        None => BrowserLocator::for_host(),
    };
    locator.locate().ok_or_else(|| Md2PdfError::BrowserNotFound {
        searched: locator.candidates().to_vec(),
    })
}

async fn read_input(input: &Path) -> Result<String, Md2PdfError> {
    tokio::fs::read_to_string(input).await.map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            Md2PdfError::InputNotFound {
                path: input.to_path_buf(),
            }
        } else {
            Md2PdfError::InputReadFailed {
                path: input.to_path_buf(),
                source,
            }
        }
    })
}

/// The directory containing `input`, `.` for a bare file name.
fn input_directory(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Make `output` absolute and ensure its parent directory exists.
async fn prepare_output(output: &Path) -> Result<PathBuf, Md2PdfError> {
    let path = std::path::absolute(output).map_err(|source| Md2PdfError::OutputWriteFailed {
        path: output.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| Md2PdfError::OutputWriteFailed {
                path: path.clone(),
                source,
            })?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn input_directory_of_bare_name_is_cwd() {
        assert_eq!(input_directory(Path::new("doc.md")), PathBuf::from("."));
        assert_eq!(input_directory(Path::new("a/b/doc.md")), PathBuf::from("a/b"));
    }

    #[test]
    fn markdown_to_html_resolves_local_images() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("img.png"), b"png").unwrap();
        let html = markdown_to_html(
            "# Title\n\n![alt](img.png)",
            &MarkdownOptions::with_base_path(dir.path()),
        )
        .unwrap();
        assert!(html.contains("<h1>Title</h1>"), "got: {html}");
        assert!(html.contains("src=\"file://"), "got: {html}");
        assert!(!html.contains("src=\"img.png\""), "got: {html}");
    }

    #[test]
    fn locate_browser_with_missing_override_reports_searched_path() {
        let config = ConversionConfig::builder()
            .browser("/definitely/not/a/browser")
            .build()
            .unwrap();
        match locate_browser(&config) {
            Err(Md2PdfError::BrowserNotFound { searched }) => {
                assert_eq!(searched, vec![PathBuf::from("/definitely/not/a/browser")]);
            }
            other => panic!("expected BrowserNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn prepare_output_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested/deeper/doc.pdf");
        let prepared = prepare_output(&out).await.unwrap();
        assert!(prepared.is_absolute());
        assert!(dir.path().join("nested/deeper").is_dir());
    }

    #[tokio::test]
    async fn missing_input_fails_before_browser_lookup() {
        let dir = TempDir::new().unwrap();
        let config = ConversionConfig::builder()
            .browser("/definitely/not/a/browser")
            .build()
            .unwrap();
        let err = convert(dir.path().join("missing.md"), dir.path().join("out.pdf"), &config)
            .await
            .unwrap_err();
        assert!(matches!(err, Md2PdfError::InputNotFound { .. }), "got: {err:?}");
    }
}
