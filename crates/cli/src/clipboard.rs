use std::io::Write;

use thiserror::Error;
use tracing::{debug, warn};

pub const COPY_AREA_START: &str = "----- copy area start -----";
pub const COPY_AREA_END: &str = "----- copy area end -----";

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable. cause: {0}")]
    Unavailable(#[from] arboard::Error),
}

pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard, opened on first use.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<arboard::Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        let clipboard = self.clipboard.insert(clipboard);

        clipboard.set_text(text)?;
        debug!("Copied to clipboard. length: {}", text.len());

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// The text was written to the copy area instead.
    Fallback,
}

/// Copies the text, or when that fails, reports the failure and writes the text between copy area markers.
pub fn copy_or_fallback(
    sink: &mut dyn ClipboardSink,
    text: &str,
    out: &mut dyn Write,
) -> std::io::Result<CopyOutcome> {
    match sink.copy(text) {
        Ok(()) => Ok(CopyOutcome::Copied),
        Err(error) => {
            warn!("Unable to copy to clipboard, use the copy area instead. cause: {}", error);
            writeln!(out, "{}", COPY_AREA_START)?;
            writeln!(out, "{}", text)?;
            writeln!(out, "{}", COPY_AREA_END)?;
            Ok(CopyOutcome::Fallback)
        }
    }
}
