//! File ingestion pipeline
//!
//! This module handles:
//! - Capturing file metadata from paths (source.rs)
//! - The type/size acceptance policy (policy.rs)
//! - Data URI encoding on a bounded worker (encode.rs)

pub mod encode;
pub mod policy;
pub mod source;

pub use encode::{EncodeJob, EncodeOutcome, EncodeResult, Encoder, Generation};
pub use source::SourceFile;

/// Reasons a file never becomes (or never finishes becoming) an entry.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("Invalid file type: {name}. Only JPG, PNG, GIF, BMP, SVG are allowed.")]
    InvalidType { name: String, mime_type: String },

    #[error("File too large: {name}. Maximum size is 5MB.")]
    TooLarge { name: String, size_bytes: u64 },

    #[error("Failed to read {name}: {reason}")]
    Unreadable { name: String, reason: String },
}

impl IngestError {
    /// Name of the file this error refers to
    pub fn file_name(&self) -> &str {
        match self {
            IngestError::InvalidType { name, .. }
            | IngestError::TooLarge { name, .. }
            | IngestError::Unreadable { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_file() {
        let err = IngestError::InvalidType {
            name: "notes.txt".to_string(),
            mime_type: "text/plain".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid file type: notes.txt. Only JPG, PNG, GIF, BMP, SVG are allowed."
        );
        assert_eq!(err.file_name(), "notes.txt");

        let err = IngestError::TooLarge {
            name: "huge.png".to_string(),
            size_bytes: 6 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "File too large: huge.png. Maximum size is 5MB.");
    }
}
