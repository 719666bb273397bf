//! Shared test utilities for integration tests.
//!
//! Provides a scratch document directory and the path to the fake browser
//! script used to exercise the print step without a real Chrome, and a test
//! log subscriber.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use url::Url;

/// Route library logs to the test harness; `RUST_LOG=md2pdf=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Minimal bytes that are enough for `exists()` checks on an image.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Creates a directory holding `doc.md` with `markdown` and a sibling `img.png`.
pub fn create_doc_dir(markdown: &str) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    std::fs::write(dir.path().join("doc.md"), markdown).expect("write doc.md");
    std::fs::write(dir.path().join("img.png"), PNG_BYTES).expect("write img.png");
    dir
}

/// Path to the fake browser script, made executable.
#[cfg(unix)]
pub fn fake_browser() -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    init_tracing();

    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fake-browser.sh");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("make fake browser executable");
    path
}

/// The temporary HTML path the fake browser recorded in its fake PDF.
pub fn recorded_source(pdf: &Path) -> PathBuf {
    let contents = std::fs::read_to_string(pdf).expect("read fake pdf");
    let url = contents
        .lines()
        .find_map(|l| l.strip_prefix("source "))
        .expect("fake pdf has a source line");
    Url::parse(url)
        .expect("source is a URL")
        .to_file_path()
        .expect("source is a file URL")
}

/// The argument line the fake browser recorded.
pub fn recorded_args(pdf: &Path) -> String {
    let contents = std::fs::read_to_string(pdf).expect("read fake pdf");
    contents
        .lines()
        .find_map(|l| l.strip_prefix("args "))
        .expect("fake pdf has an args line")
        .to_string()
}

/// Extract the `file://` source from a `... for file:///...` stderr message.
pub fn source_in_stderr(stderr: &str) -> PathBuf {
    let start = stderr.find("file://").expect("stderr names the source");
    let url = stderr[start..].split_whitespace().next().expect("url token");
    Url::parse(url).expect("url").to_file_path().expect("file url")
}
