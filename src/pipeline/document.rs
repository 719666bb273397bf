//! Wrap an HTML fragment into a complete, styled HTML document.
//!
//! The stylesheet is compiled into the binary and is the same for every
//! conversion.

/// GitHub-inspired print stylesheet.
pub const STYLESHEET: &str = include_str!("github.css");

/// Embed `body` verbatim in a standalone UTF-8 HTML document.
pub fn wrap_html(body: &str) -> String {
    let mut doc = String::with_capacity(body.len() + STYLESHEET.len() + 128);
    doc.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<style>\n");
    doc.push_str(STYLESHEET);
    doc.push_str("</style>\n</head>\n<body>\n");
    doc.push_str(body);
    doc.push_str("\n</body>\n</html>\n");
    doc
}
