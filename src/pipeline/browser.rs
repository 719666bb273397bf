//! Browser discovery: find an installed Chromium-family executable.
//!
//! Candidates are probed in a fixed priority order (Google Chrome, then
//! Chromium, then Microsoft Edge) and the first path that exists as a file
//! wins. Nothing is cached: every conversion probes again.
//!
//! Only macOS and Linux install locations are known. On any other host the
//! candidate list is empty and discovery always fails unless the caller
//! supplies an explicit path.

use std::path::{Path, PathBuf};
use tracing::debug;

#[cfg(target_os = "macos")]
const HOST_CANDIDATES: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
];

#[cfg(all(unix, not(target_os = "macos")))]
const HOST_CANDIDATES: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
    "/usr/bin/microsoft-edge",
    "/usr/bin/microsoft-edge-stable",
];

// TODO: Windows install paths (Program Files, LocalAppData) once print flags are verified there.
#[cfg(not(unix))]
const HOST_CANDIDATES: &[&str] = &[];

/// An ordered list of paths probed for a browser executable.
#[derive(Debug, Clone)]
pub struct BrowserLocator {
    candidates: Vec<PathBuf>,
}

impl BrowserLocator {
    /// The built-in candidate list for the host OS.
    pub fn for_host() -> Self {
        Self::with_candidates(HOST_CANDIDATES.iter().map(PathBuf::from))
    }

    /// A locator over caller-supplied paths, probed in iteration order.
    pub fn with_candidates<I, P>(candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Return the first candidate that exists as a file, or `None`.
    pub fn locate(&self) -> Option<PathBuf> {
        for candidate in &self.candidates {
            if is_file(candidate) {
                debug!("Found browser: {}", candidate.display());
                return Some(candidate.clone());
            }
            debug!("No browser at {}", candidate.display());
        }
        None
    }
}

/// Find a browser at the host's known install paths.
pub fn find_browser() -> Option<PathBuf> {
    BrowserLocator::for_host().locate()
}

fn is_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn first_existing_candidate_wins() {
        let dir = TempDir::new().unwrap();
        let chromium = dir.path().join("chromium");
        let edge = dir.path().join("microsoft-edge");
        std::fs::write(&chromium, b"").unwrap();
        std::fs::write(&edge, b"").unwrap();

        let locator = BrowserLocator::with_candidates([
            dir.path().join("google-chrome"),
            chromium.clone(),
            edge,
        ]);
        assert_eq!(locator.locate(), Some(chromium));
    }

    #[test]
    fn none_when_nothing_exists() {
        let dir = TempDir::new().unwrap();
        let locator = BrowserLocator::with_candidates([dir.path().join("a"), dir.path().join("b")]);
        assert_eq!(locator.locate(), None);
    }

    #[test]
    fn directories_are_not_browsers() {
        let dir = TempDir::new().unwrap();
        let locator = BrowserLocator::with_candidates([dir.path()]);
        assert_eq!(locator.locate(), None);
    }

    #[test]
    fn empty_locator_finds_nothing() {
        let locator = BrowserLocator::with_candidates(Vec::<PathBuf>::new());
        assert!(locator.candidates().is_empty());
        assert_eq!(locator.locate(), None);
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn host_candidates_prefer_chrome_over_chromium_over_edge() {
        let locator = BrowserLocator::for_host();
        let names: Vec<String> = locator
            .candidates()
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        let chrome = names.iter().position(|n| n.contains("google-chrome")).unwrap();
        let chromium = names.iter().position(|n| n.contains("chromium")).unwrap();
        let edge = names.iter().position(|n| n.contains("microsoft-edge")).unwrap();
        assert!(chrome < chromium && chromium < edge, "got: {names:?}");
    }
}
