//! Data URI encoding
//!
//! Encodes run as background tasks. A semaphore bounds how many files are
//! read at once, and a shared generation counter lets a clear abandon work
//! that has not started yet.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as Base64;
use base64::Engine as _;
use tokio::sync::Semaphore;

use super::IngestError;
use crate::state::data::EntryId;

/// Default number of files encoded at the same time
pub const DEFAULT_MAX_CONCURRENT_ENCODES: usize = 4;

/// Build `data:<mime>;base64,<payload>` with the RFC 4648 standard alphabet
pub fn to_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, Base64.encode(bytes))
}

/// Submission generation shared between the gallery and the encoder.
///
/// Every clear advances it; work tagged with an older value is discarded.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Move to the next generation and return it
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// One accepted file waiting to be encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeJob {
    pub id: EntryId,
    pub generation: u64,
    pub name: String,
    pub path: PathBuf,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeResult {
    /// Full data URI for the file
    Encoded(String),
    Failed(IngestError),
    /// The gallery was cleared before the job started
    Cancelled,
}

/// Completion of an `EncodeJob`, routed back to its entry by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOutcome {
    pub id: EntryId,
    pub generation: u64,
    pub result: EncodeResult,
}

/// Bounded background encoder. Cheap to clone; clones share permits.
#[derive(Debug, Clone)]
pub struct Encoder {
    permits: Arc<Semaphore>,
    generation: Generation,
}

impl Encoder {
    /// Create an encoder running at most `max_concurrent` jobs (at least one)
    pub fn new(max_concurrent: usize, generation: Generation) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            generation,
        }
    }

    /// Read and encode one file.
    ///
    /// Raw bytes are dropped as soon as the data URI exists; only the
    /// encoded string leaves this function.
    pub async fn encode(self, job: EncodeJob) -> EncodeOutcome {
        let EncodeJob {
            id,
            generation,
            name,
            path,
            mime_type,
        } = job;

        let outcome = |result: EncodeResult| EncodeOutcome {
            id,
            generation,
            result,
        };

        let _permit = match self.permits.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => return outcome(EncodeResult::Cancelled),
        };

        if generation != self.generation.current() {
            tracing::debug!("Skipping encode of {} from cleared generation {}", name, generation);
            return outcome(EncodeResult::Cancelled);
        }

        // Spawn blocking because reading and encoding a few MB is CPU/IO bound
        let task = tokio::task::spawn_blocking(move || {
            let bytes = std::fs::read(&path)?;
            Ok::<_, std::io::Error>(to_data_uri(&mime_type, &bytes))
        })
        .await;

        let result = match task {
            Ok(Ok(data_uri)) => {
                tracing::info!("Encoded {} ({} chars)", name, data_uri.len());
                EncodeResult::Encoded(data_uri)
            }
            Ok(Err(e)) => EncodeResult::Failed(IngestError::Unreadable {
                name,
                reason: e.to_string(),
            }),
            Err(e) => EncodeResult::Failed(IngestError::Unreadable {
                name,
                reason: format!("encode task failed: {}", e),
            }),
        };

        outcome(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    impl Encoder {
        fn available_permits(&self) -> usize {
            self.permits.available_permits()
        }
    }

    fn job(id: u64, generation: u64, path: PathBuf, mime_type: &str) -> EncodeJob {
        EncodeJob {
            id: EntryId(id),
            generation,
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path,
            mime_type: mime_type.to_string(),
        }
    }

    #[test]
    fn test_rfc4648_vectors() {
        assert_eq!(to_data_uri("image/png", b""), "data:image/png;base64,");
        assert_eq!(to_data_uri("image/png", b"f"), "data:image/png;base64,Zg==");
        assert_eq!(to_data_uri("image/png", b"fo"), "data:image/png;base64,Zm8=");
        assert_eq!(to_data_uri("image/png", b"foobar"), "data:image/png;base64,Zm9vYmFy");
    }

    #[test]
    fn test_body_decodes_to_input() {
        let input: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let uri = to_data_uri("image/gif", &input);

        let body = uri.strip_prefix("data:image/gif;base64,").unwrap();
        assert!(!body.contains('\n'));
        assert_eq!(Base64.decode(body).unwrap(), input);
    }

    #[test]
    fn test_generation_advances() {
        let generation = Generation::default();
        let shared = generation.clone();
        assert_eq!(generation.current(), 0);
        assert_eq!(shared.advance(), 1);
        assert_eq!(generation.current(), 1);
    }

    #[tokio::test]
    async fn test_encode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.bmp");
        std::fs::write(&path, b"BM\x00\x01").unwrap();

        let encoder = Encoder::new(2, Generation::default());
        let outcome = encoder.clone().encode(job(7, 0, path, "image/bmp")).await;

        assert_eq!(outcome.id, EntryId(7));
        assert_eq!(
            outcome.result,
            EncodeResult::Encoded("data:image/bmp;base64,Qk0AAQ==".to_string())
        );
        assert_eq!(encoder.available_permits(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let encoder = Encoder::new(1, Generation::default());
        let outcome = encoder
            .encode(job(1, 0, PathBuf::from("/nonexistent/gone.png"), "image/png"))
            .await;

        assert!(matches!(
            outcome.result,
            EncodeResult::Failed(IngestError::Unreadable { ref name, .. }) if name == "gone.png"
        ));
    }

    #[tokio::test]
    async fn test_stale_generation_is_cancelled() {
        let generation = Generation::default();
        let encoder = Encoder::new(1, generation.clone());
        generation.advance();

        // Path does not exist; a cancelled job never touches it
        let outcome = encoder
            .encode(job(1, 0, PathBuf::from("/nonexistent/a.png"), "image/png"))
            .await;
        assert_eq!(outcome.result, EncodeResult::Cancelled);
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        std::fs::write(&path, b"png").unwrap();

        let encoder = Encoder::new(0, Generation::default());
        assert_eq!(encoder.available_permits(), 1);

        let held = encoder.permits.clone().acquire_owned().await.unwrap();
        let mut handle = tokio::spawn(encoder.clone().encode(job(1, 0, path, "image/png")));

        let waited = tokio::time::timeout(Duration::from_millis(50), &mut handle).await;
        assert!(waited.is_err(), "encode ran without a permit");

        drop(held);
        let outcome = handle.await.unwrap();
        assert!(matches!(outcome.result, EncodeResult::Encoded(_)));
    }
}
