use super::data::{EntryId, UploadedImage};
use crate::ingest::{policy, EncodeJob, EncodeOutcome, EncodeResult, Generation, IngestError, SourceFile};

/// The Gallery owns every accepted entry and the visible error slot.
///
/// It is mutated only from the UI update loop. Encodes run elsewhere and
/// report back through `complete`, matched by entry id and generation.
#[derive(Debug, Default)]
pub struct Gallery {
    entries: Vec<UploadedImage>,
    /// Last rejection of the current batch; each new one overwrites it
    error: Option<IngestError>,
    generation: Generation,
    next_id: u64,
}

impl Gallery {
    /// Create an empty gallery sharing `generation` with the encoder
    pub fn new(generation: Generation) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    /// Classify a batch of candidate files and queue the accepted ones.
    ///
    /// The error slot is cleared first. Each rejection overwrites it, so
    /// only the last one of the batch stays visible. Accepted entries are
    /// appended together after the whole batch is classified, in
    /// submission order. Returns one encode job per accepted entry.
    pub fn submit<I>(&mut self, candidates: I) -> Vec<EncodeJob>
    where
        I: IntoIterator<Item = Result<SourceFile, IngestError>>,
    {
        self.error = None;
        let generation = self.generation.current();

        let mut accepted = Vec::new();
        for candidate in candidates {
            let file = match candidate.and_then(|file| policy::validate(&file).map(|_| file)) {
                Ok(file) => file,
                Err(err) => {
                    tracing::warn!("Rejected {}: {}", err.file_name(), err);
                    self.error = Some(err);
                    continue;
                }
            };

            let id = EntryId(self.next_id);
            self.next_id += 1;
            accepted.push(UploadedImage::pending(id, file));
        }

        let jobs: Vec<EncodeJob> = accepted
            .iter()
            .map(|entry| EncodeJob {
                id: entry.id,
                generation,
                name: entry.name.clone(),
                path: entry.source.clone(),
                mime_type: entry.mime_type.clone(),
            })
            .collect();

        if !accepted.is_empty() {
            tracing::info!("Accepted {} file(s)", accepted.len());
        }
        self.entries.extend(accepted);

        jobs
    }

    /// Apply a finished encode to its entry.
    ///
    /// Returns true if an entry became ready. Completions from a cleared
    /// generation are ignored. A failed read leaves the entry pending and
    /// is only logged.
    pub fn complete(&mut self, outcome: EncodeOutcome) -> bool {
        if outcome.generation != self.generation.current() {
            tracing::debug!(
                "Ignoring completion for {:?} from cleared generation {}",
                outcome.id,
                outcome.generation
            );
            return false;
        }

        match outcome.result {
            EncodeResult::Encoded(payload) => self
                .entries
                .iter_mut()
                .find(|entry| entry.id == outcome.id)
                .map_or(false, |entry| entry.mark_ready(payload)),
            EncodeResult::Failed(err) => {
                tracing::warn!("Encode failed for {:?}: {}", outcome.id, err);
                false
            }
            EncodeResult::Cancelled => false,
        }
    }

    /// Drop every entry and the error and abandon in-flight encodes.
    ///
    /// Preview handles are released with their entries.
    pub fn clear_all(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        self.error = None;
        let generation = self.generation.advance();
        tracing::info!("Cleared {} entries (generation {})", dropped, generation);
    }

    pub fn entries(&self) -> &[UploadedImage] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&UploadedImage> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// The message for the error slot, if any
    pub fn last_error(&self) -> Option<&IngestError> {
        self.error.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
