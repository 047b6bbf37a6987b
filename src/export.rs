//! Copy and download actions for encoded entries

use std::path::PathBuf;

pub const COPY_SUCCEEDED: &str = "Copied to clipboard!";
pub const COPY_FAILED: &str = "Failed to copy. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Failed to save {}: {reason}", .path.display())]
    Write { path: PathBuf, reason: String },
}

/// Anything that can take text for the user to paste elsewhere
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ExportError>;
}

/// The desktop clipboard.
///
/// The arboard handle is opened on first use and kept alive, since some
/// platforms drop clipboard contents when the owning handle goes away.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ExportError> {
        let mut clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(|e| ExportError::Clipboard(e.to_string()))?,
        };

        let result = clipboard
            .set_text(text.to_owned())
            .map_err(|e| ExportError::Clipboard(e.to_string()));
        self.inner = Some(clipboard);
        result
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.inner.is_some())
            .finish()
    }
}

/// Copy the whole data URI and return the notice to show the user
pub fn copy_payload(clipboard: &mut impl Clipboard, payload: &str) -> &'static str {
    match clipboard.set_text(payload) {
        Ok(()) => {
            tracing::info!("Copied {} chars to clipboard", payload.len());
            COPY_SUCCEEDED
        }
        Err(e) => {
            tracing::error!("Failed to copy text: {}", e);
            COPY_FAILED
        }
    }
}

/// Name for the downloaded text file: everything before the first `.`, plus `.txt`
pub fn download_file_name(original: &str) -> String {
    let stem = original.split('.').next().unwrap_or(original);
    format!("{}.txt", stem)
}

/// Write the literal data URI as the entire content of `path`
pub async fn write_artifact(path: PathBuf, payload: String) -> Result<PathBuf, ExportError> {
    match tokio::fs::write(&path, payload.as_bytes()).await {
        Ok(()) => {
            tracing::info!("Saved {}", path.display());
            Ok(path)
        }
        Err(e) => Err(ExportError::Write {
            reason: e.to_string(),
            path,
        }),
    }
}
