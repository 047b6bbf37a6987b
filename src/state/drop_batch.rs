//! Collects files from one drag-and-drop gesture
//!
//! The window reports every dropped file as its own event. Paths are
//! buffered here until the drop settles and then handed over as one batch.

use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct DropBatch {
    paths: Vec<PathBuf>,
}

impl DropBatch {
    /// Buffer a dropped path.
    ///
    /// Returns true for the first path of a new drop, when the caller
    /// should schedule the settle timer.
    pub fn push(&mut self, path: PathBuf) -> bool {
        let first_of_drop = self.paths.is_empty();
        self.paths.push(path);
        first_of_drop
    }

    /// Take every buffered path, in drop order, leaving the buffer empty
    pub fn take(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::SourceFile;
    use crate::state::gallery::Gallery;
    use std::fs;

    #[test]
    fn test_only_first_path_starts_timer() {
        let mut batch = DropBatch::default();
        assert!(batch.push(PathBuf::from("a.png")));
        assert!(!batch.push(PathBuf::from("b.png")));

        assert_eq!(batch.take(), [PathBuf::from("a.png"), PathBuf::from("b.png")]);
        assert!(batch.take().is_empty());

        // Next drop starts a new timer
        assert!(batch.push(PathBuf::from("c.png")));
    }

    #[test]
    fn test_drop_is_submitted_as_one_batch() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.png");
        let notes = dir.path().join("notes.txt");
        let second = dir.path().join("second.gif");
        for path in [&first, &notes, &second] {
            fs::write(path, b"data").unwrap();
        }

        let mut gallery = Gallery::default();
        gallery.submit(vec![SourceFile::from_path(dir.path().join("old.webp"))]);
        assert!(gallery.last_error().is_some());

        let mut batch = DropBatch::default();
        assert!(batch.push(first));
        assert!(!batch.push(notes));
        assert!(!batch.push(second));

        let jobs = gallery.submit(batch.take().into_iter().map(SourceFile::from_path));

        assert_eq!(jobs.len(), 2);
        let names: Vec<_> = gallery.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["first.png", "second.gif"]);
        // Error slot was reset for this drop and only holds its own rejection
        assert_eq!(gallery.last_error().unwrap().file_name(), "notes.txt");
    }
}
