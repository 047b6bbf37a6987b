//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the ingestion pipeline and the UI layer.

use std::path::{Path, PathBuf};

use iced::widget::{image, svg};

use crate::ingest::SourceFile;

/// Identifier assigned to an entry when its file is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

/// Conversion progress of an entry. Moves from `Pending` to `Ready` once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Ready,
}

/// Handle used to draw a preview of the original file.
///
/// Dropping the handle releases the preview.
#[derive(Debug, Clone)]
pub enum PreviewHandle {
    Raster(image::Handle),
    Vector(svg::Handle),
}

impl PreviewHandle {
    /// Create a preview for a file; SVGs get a vector handle
    pub fn for_file(path: &Path, mime_type: &str) -> Self {
        if mime_type == "image/svg+xml" {
            PreviewHandle::Vector(svg::Handle::from_path(path))
        } else {
            PreviewHandle::Raster(image::Handle::from_path(path))
        }
    }
}

/// Represents a single accepted file
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub id: EntryId,
    /// Path to the original file
    pub source: PathBuf,
    /// Filename only (e.g., "logo.png")
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub preview: PreviewHandle,
    encoded_payload: String,
    status: Status,
}

impl UploadedImage {
    /// Create a pending entry for an accepted file
    pub fn pending(id: EntryId, file: SourceFile) -> Self {
        let preview = PreviewHandle::for_file(&file.path, &file.mime_type);
        Self {
            id,
            source: file.path,
            name: file.name,
            size_bytes: file.size_bytes,
            mime_type: file.mime_type,
            preview,
            encoded_payload: String::new(),
            status: Status::Pending,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// The data URI, once the entry is ready
    pub fn encoded_payload(&self) -> Option<&str> {
        match self.status {
            Status::Ready => Some(&self.encoded_payload),
            Status::Pending => None,
        }
    }

    /// Store the data URI and mark the entry ready.
    ///
    /// Returns false if the entry was already ready or the payload is empty.
    pub(crate) fn mark_ready(&mut self, payload: String) -> bool {
        if self.status == Status::Ready || payload.is_empty() {
            return false;
        }
        self.encoded_payload = payload;
        self.status = Status::Ready;
        true
    }

    /// "Size: 12.34 KB | Type: image/png"
    pub fn meta_label(&self) -> String {
        format!(
            "Size: {:.2} KB | Type: {}",
            self.size_bytes as f64 / 1024.0,
            self.mime_type
        )
    }
}
