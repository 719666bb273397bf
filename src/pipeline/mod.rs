//! Pipeline stages for Markdown-to-PDF conversion.
//!
//! Each submodule implements exactly one step, so each can be tested on its
//! own and the HTML stages can be used without a browser installed.
//!
//! ## Data Flow
//!
//! ```text
//! markdown ──▶ images ──▶ document ──▶ print
//! (comrak)    (file://)   (+ CSS)      (headless browser)
//!                                        ▲
//!                              browser ──┘
//! ```
//!
//! 1. [`browser`]  — probe the fixed candidate paths for Chrome, Chromium or Edge
//! 2. [`markdown`] — GFM Markdown to an HTML fragment
//! 3. [`images`]   — rewrite relative `<img src>` values to absolute `file://` URLs
//! 4. [`document`] — wrap the fragment in a standalone styled document
//! 5. [`print`]    — temp file, headless `--print-to-pdf`, exit + output checks, cleanup

pub mod browser;
pub mod document;
pub mod images;
pub mod markdown;
pub mod print;
