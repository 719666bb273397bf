//! Progress-callback trait for conversion stage events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to be told
//! when the conversion starts, when each stage begins and when the PDF is
//! written. The CLI uses it to drive a spinner; library callers can forward
//! the events wherever they like.
//!
//! # Example
//!
//! ```rust
//! use md2pdf::{ConversionConfig, ConversionProgressCallback, Stage};
//! use std::sync::Arc;
//!
//! struct PrintStages;
//!
//! impl ConversionProgressCallback for PrintStages {
//!     fn on_stage(&self, stage: Stage) {
//!         eprintln!("-> {stage}");
//!     }
//! }
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(Arc::new(PrintStages) as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::output::ConversionOutput;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// A pipeline stage reported through [`ConversionProgressCallback::on_stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Markdown → HTML fragment → full document, written to a temp file.
    Render,
    /// Headless browser printing the document to PDF.
    Print,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Render => f.write_str("Rendering HTML"),
            Stage::Print => f.write_str("Printing PDF"),
        }
    }
}

/// Called by the conversion pipeline as it moves through its stages.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Implementations must be `Send + Sync` because the
/// config that holds them may be shared with spawned tasks.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once, after the input has been validated and a browser found.
    fn on_conversion_start(&self, input: &Path, output: &Path) {
        let _ = (input, output);
    }

    /// Called when a stage begins.
    fn on_stage(&self, stage: Stage) {
        let _ = stage;
    }

    /// Called once after the PDF has been verified on disk.
    fn on_conversion_complete(&self, output: &ConversionOutput) {
        let _ = output;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::ConversionStats;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingCallback {
        events: Mutex<Vec<String>>,
    }

    impl ConversionProgressCallback for RecordingCallback {
        fn on_conversion_start(&self, input: &Path, _output: &Path) {
            self.events.lock().unwrap().push(format!("start {}", input.display()));
        }

        fn on_stage(&self, stage: Stage) {
            self.events.lock().unwrap().push(stage.to_string());
        }

        fn on_conversion_complete(&self, output: &ConversionOutput) {
            self.events.lock().unwrap().push(format!("done {}", output.stats.pdf_bytes));
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_conversion_start(Path::new("a.md"), Path::new("a.pdf"));
        cb.on_stage(Stage::Render);
        cb.on_stage(Stage::Print);
    }

    #[test]
    fn recording_callback_receives_events_in_order() {
        let cb = RecordingCallback::default();
        cb.on_conversion_start(Path::new("doc.md"), Path::new("doc.pdf"));
        cb.on_stage(Stage::Render);
        cb.on_stage(Stage::Print);
        cb.on_conversion_complete(&ConversionOutput {
            input: PathBuf::from("doc.md"),
            output: PathBuf::from("doc.pdf"),
            browser: PathBuf::from("/usr/bin/chromium"),
            stats: ConversionStats {
                pdf_bytes: 1234,
                ..Default::default()
            },
        });

        let events = cb.events.lock().unwrap();
        assert_eq!(
            *events,
            vec!["start doc.md", "Rendering HTML", "Printing PDF", "done 1234"]
        );
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_stage(Stage::Print);
    }
}
