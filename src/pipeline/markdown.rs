//! Markdown → HTML fragment via comrak.
//!
//! The grammar is entirely comrak's. This module only picks the
//! GitHub-Flavored extensions and hands back the body markup. Options are
//! built fresh for every call, so concurrent conversions never share parser
//! state.

use crate::error::Md2PdfError;
use comrak::{format_html, parse_document, Arena, Options};

/// GFM options: tables, task lists, strikethrough and autolinks on; single
/// newlines stay soft (no `<br>`); raw HTML in the source is passed through.
fn gfm_options() -> Options<'static> {
    let mut options = Options::default();

    options.extension.table = true;
    options.extension.tasklist = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;

    options.render.hardbreaks = false;
    options.render.unsafe_ = true;

    options
}

/// Render Markdown source to an HTML fragment.
pub fn render_fragment(markdown: &str) -> Result<String, Md2PdfError> {
    let options = gfm_options();
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &options);

    let mut html = Vec::with_capacity(markdown.len() * 2);
    format_html(root, &options, &mut html).map_err(|e| Md2PdfError::MarkdownRender(e.to_string()))?;

    String::from_utf8(html).map_err(|e| Md2PdfError::MarkdownRender(e.to_string()))
}
