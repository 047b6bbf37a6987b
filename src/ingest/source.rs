//! Metadata capture for user-supplied files

use std::path::PathBuf;

use super::IngestError;

/// A file offered for conversion, with the metadata read at submission time.
///
/// The path stands in for the file payload; bytes are only read by the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Where the payload lives on disk
    pub path: PathBuf,
    /// File name only (e.g., "logo.png")
    pub name: String,
    pub size_bytes: u64,
    /// MIME type guessed from the extension, empty if unknown
    pub mime_type: String,
}

impl SourceFile {
    /// Read name, size and MIME type for a path.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, IngestError> {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let metadata = std::fs::metadata(&path).map_err(|e| IngestError::Unreadable {
            name: name.clone(),
            reason: e.to_string(),
        })?;

        if !metadata.is_file() {
            return Err(IngestError::Unreadable {
                name,
                reason: "not a regular file".to_string(),
            });
        }

        let mime_type = mime_guess::from_path(&path)
            .first_raw()
            .unwrap_or_default()
            .to_string();

        Ok(SourceFile {
            path,
            name,
            size_bytes: metadata.len(),
            mime_type,
        })
    }
}
