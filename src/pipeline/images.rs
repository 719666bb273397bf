//! Image path resolution: point relative `<img src>` values at local files.
//!
//! The browser loads the document from a temporary directory, so a relative
//! `src="diagram.png"` would resolve against the wrong place. This pass
//! rewrites each relative reference that exists on disk, relative to the
//! source document's directory, into an absolute `file://` URL.
//!
//! ## Limits
//!
//! This is a text transform over comrak's output, not an HTML parser. It
//! matches one shape: `<img ... src="..." ...>` on a single tag with a
//! double-quoted `src`. Single-quoted or unquoted attributes, `>` inside
//! attribute values and anything else that does not fit the shape are left
//! exactly as they were.
//!
//! Remote (`http://`, `https://`) and `data:` sources are never touched and
//! never fetched. A relative path that does not exist is also left alone:
//! one broken image should not abort the whole document.

use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::{Captures, Regex};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use url::Url;

static RE_IMG_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img([^>]*\s)src="([^"]+)"([^>]*)>"#).unwrap());

const EXTERNAL_PREFIXES: &[&str] = &["http://", "https://", "data:"];

/// Rewrite relative `<img src>` values in `html` against `base_dir`.
///
/// Every other byte of the input, including the other attributes of a
/// rewritten tag, is preserved.
pub fn resolve_image_paths(html: &str, base_dir: &Path) -> String {
    let base_dir = match std::path::absolute(base_dir) {
        Ok(dir) => dir,
        Err(e) => {
            warn!("Cannot resolve image base directory {}: {}", base_dir.display(), e);
            return html.to_string();
        }
    };

    RE_IMG_SRC
        .replace_all(html, |caps: &Captures<'_>| match resolve_src(&caps[2], &base_dir) {
            Some(url) => format!("<img{}src=\"{}\"{}>", &caps[1], url, &caps[3]),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn is_external(src: &str) -> bool {
    EXTERNAL_PREFIXES.iter().any(|prefix| src.starts_with(prefix))
}

/// Map one `src` value to a `file://` URL, or `None` to leave it as is.
fn resolve_src(src: &str, base_dir: &Path) -> Option<String> {
    if is_external(src) {
        return None;
    }

    let decoded = match percent_decode_str(src).decode_utf8() {
        Ok(decoded) => decoded,
        Err(_) => {
            warn!("Image source is not valid UTF-8 after percent-decoding, leaving as is: {src}");
            return None;
        }
    };

    let resolved = normalize(&base_dir.join(decoded.as_ref()));
    if !resolved.exists() {
        warn!("Image not found, leaving reference unchanged: {}", resolved.display());
        return None;
    }

    let url = Url::from_file_path(&resolved).ok()?;
    debug!("Resolved image {} -> {}", src, url);
    Some(url.into())
}

/// Lexically collapse `.` and `..` in an absolute path without touching the
/// filesystem (symlinks are kept as written).
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
