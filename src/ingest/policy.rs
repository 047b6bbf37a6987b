//! Acceptance policy for submitted files

use super::{IngestError, SourceFile};

/// Largest accepted file (5 MiB)
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// MIME types accepted for conversion
pub const ALLOWED_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/svg+xml",
];

/// Extensions advertised to the file picker, matching `ALLOWED_MIME_TYPES`
pub const PICKER_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "svg"];

/// Check a file against the allow-set and the size limit.
///
/// The type check runs first, so a file failing both only reports the type.
pub fn validate(file: &SourceFile) -> Result<(), IngestError> {
    if !ALLOWED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(IngestError::InvalidType {
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
        });
    }

    if file.size_bytes > MAX_FILE_SIZE {
        return Err(IngestError::TooLarge {
            name: file.name.clone(),
            size_bytes: file.size_bytes,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(name: &str, mime_type: &str, size_bytes: u64) -> SourceFile {
        SourceFile {
            path: PathBuf::from(name),
            name: name.to_string(),
            size_bytes,
            mime_type: mime_type.to_string(),
        }
    }

    #[test]
    fn test_accepts_every_allowed_type() {
        for mime in ALLOWED_MIME_TYPES {
            assert!(validate(&file("a", mime, 10)).is_ok(), "{mime} rejected");
        }
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(validate(&file("edge.png", "image/png", MAX_FILE_SIZE)).is_ok());

        let err = validate(&file("over.png", "image/png", MAX_FILE_SIZE + 1)).unwrap_err();
        assert_eq!(
            err,
            IngestError::TooLarge {
                name: "over.png".to_string(),
                size_bytes: MAX_FILE_SIZE + 1,
            }
        );
    }

    #[test]
    fn test_type_checked_before_size() {
        let err = validate(&file("big.webp", "image/webp", MAX_FILE_SIZE * 2)).unwrap_err();
        assert!(matches!(err, IngestError::InvalidType { .. }));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = validate(&file("mystery", "", 1)).unwrap_err();
        assert_eq!(err.file_name(), "mystery");
    }
}
