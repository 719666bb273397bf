//! PDF printing: run a headless browser over the HTML document.
//!
//! The browser is an opaque black box. We hand it a `file://` URL and a
//! destination via `--print-to-pdf`, wait for it to exit, and then check the
//! two things that together mean success: exit status zero AND a file at the
//! destination. Chrome can exit 0 after only printing warnings, and it can
//! exit non-zero after writing a partial file, so neither check is enough on
//! its own.
//!
//! ## Temporary files
//!
//! Each call gets its own freshly created directory under the system temp
//! dir, so concurrent conversions never collide. The HTML file is removed
//! once the browser has exited, whatever the outcome; a failure to remove it
//! is logged and otherwise ignored.

use crate::config::ConversionConfig;
use crate::error::Md2PdfError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};
use url::Url;

/// Flags passed on every invocation, before `--print-to-pdf` and the source URL.
pub const FIXED_FLAGS: &[&str] = &[
    "--headless=new",
    "--disable-gpu",
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--allow-file-access-from-files",
    "--no-pdf-header-footer",
];

const TEMP_PREFIX: &str = "md2pdf-";
const DOCUMENT_NAME: &str = "document.html";

/// Write `document` to a fresh temp directory and print it to `output`.
pub async fn print_document(
    browser: &Path,
    document: &str,
    output: &Path,
    config: &ConversionConfig,
) -> Result<(), Md2PdfError> {
    let temp_dir = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempdir()
        .map_err(|source| Md2PdfError::TempFileFailed { source })?;
    let html_path = temp_dir.path().join(DOCUMENT_NAME);

    tokio::fs::write(&html_path, document)
        .await
        .map_err(|source| Md2PdfError::TempFileFailed { source })?;
    debug!("Wrote intermediate HTML to {}", html_path.display());

    let result = print_to_pdf(browser, &html_path, output, config).await;

    if let Err(e) = tokio::fs::remove_file(&html_path).await {
        debug!("Ignoring cleanup failure for {}: {}", html_path.display(), e);
    }
    // Dropping the TempDir removes the (now empty) directory, also best-effort.
    drop(temp_dir);

    result
}

/// Run `browser` to print the local HTML file at `html_path` into `output`.
pub async fn print_to_pdf(
    browser: &Path,
    html_path: &Path,
    output: &Path,
    config: &ConversionConfig,
) -> Result<(), Md2PdfError> {
    let source_url = Url::from_file_path(html_path).map_err(|_| {
        Md2PdfError::Internal(format!("Not an absolute path: {}", html_path.display()))
    })?;

    remove_stale_output(output).await?;

    let args = browser_args(&source_url, output, &config.extra_browser_args);
    debug!("Launching {} {:?}", browser.display(), args);

    let child = Command::new(browser)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| Md2PdfError::BrowserLaunch {
            browser: browser.to_path_buf(),
            source,
        })?;

    let waited = match config.timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), child.wait_with_output())
            .await
            .map_err(|_| Md2PdfError::BrowserTimeout { secs })?,
        None => child.wait_with_output().await,
    };
    let finished = waited.map_err(|e| Md2PdfError::Internal(format!("Failed to wait for browser: {}", e)))?;

    let stderr = String::from_utf8_lossy(&finished.stderr).trim().to_string();
    let produced = tokio::fs::try_exists(output).await.unwrap_or(false);

    if !finished.status.success() || !produced {
        return Err(Md2PdfError::BrowserExit {
            code: finished.status.code(),
            stderr: if stderr.is_empty() {
                format!("no PDF written to {}", output.display())
            } else {
                stderr
            },
        });
    }

    if !stderr.is_empty() {
        debug!("Browser stderr: {}", stderr);
    }
    info!("Browser wrote {}", output.display());
    Ok(())
}

/// The full argument list for one print run.
pub fn browser_args(source: &Url, output: &Path, extra: &[String]) -> Vec<OsString> {
    let mut args: Vec<OsString> = FIXED_FLAGS.iter().map(OsString::from).collect();

    let mut print_to = OsString::from("--print-to-pdf=");
    print_to.push(output.as_os_str());
    args.push(print_to);

    args.extend(extra.iter().map(OsString::from));
    args.push(OsString::from(source.as_str()));
    args
}

/// Delete a leftover file at `output` so the existence check after the run
/// can only be satisfied by this run's PDF.
async fn remove_stale_output(output: &Path) -> Result<(), Md2PdfError> {
    match tokio::fs::remove_file(output).await {
        Ok(()) => {
            debug!("Removed previous {}", output.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(Md2PdfError::OutputWriteFailed {
            path: PathBuf::from(output),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn args_contain_every_fixed_flag() {
        let url = Url::parse("file:///tmp/md2pdf-x/document.html").unwrap();
        let args = as_strings(&browser_args(&url, Path::new("/out/doc.pdf"), &[]));
        for flag in FIXED_FLAGS {
            assert!(args.iter().any(|a| a == flag), "missing {flag}: {args:?}");
        }
        assert!(args.contains(&"--print-to-pdf=/out/doc.pdf".to_string()));
        assert_eq!(args.last().unwrap(), "file:///tmp/md2pdf-x/document.html");
        assert_eq!(args.len(), FIXED_FLAGS.len() + 2);
    }

    #[test]
    fn extra_args_come_before_source_url() {
        let url = Url::parse("file:///tmp/a.html").unwrap();
        let extra = vec!["--lang=de".to_string()];
        let args = as_strings(&browser_args(&url, Path::new("/o.pdf"), &extra));
        let n = args.len();
        assert_eq!(args[n - 2], "--lang=de");
        assert_eq!(args[n - 1], "file:///tmp/a.html");
    }

    #[tokio::test]
    async fn missing_executable_is_a_launch_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let html = dir.path().join("in.html");
        std::fs::write(&html, "<p>x</p>").unwrap();
        let err = print_to_pdf(
            &dir.path().join("no-such-browser"),
            &html,
            &dir.path().join("out.pdf"),
            &ConversionConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Md2PdfError::BrowserLaunch { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn stale_output_is_removed_before_launch() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("old.pdf");
        std::fs::write(&out, b"%PDF old").unwrap();
        remove_stale_output(&out).await.unwrap();
        assert!(!out.exists());
        // Absent file is fine too.
        remove_stale_output(&out).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_executable_file_is_a_launch_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let browser = dir.path().join("chrome");
        std::fs::write(&browser, b"not a program").unwrap();
        let err = print_document(
            &browser,
            "<!DOCTYPE html>",
            &dir.path().join("out.pdf"),
            &ConversionConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Md2PdfError::BrowserLaunch { .. }), "got: {err:?}");
    }
}
