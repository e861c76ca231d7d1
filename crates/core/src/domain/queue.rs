// Script Queue Domain Model

use super::error::{DomainError, Result};
use std::path::{Path, PathBuf};

/// Ordered set of pending script paths.
///
/// Insertion order is kept; a path already present is not added again.
/// Not synchronized: the owner serializes access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptQueue {
    entries: Vec<PathBuf>,
}

impl ScriptQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` unless already queued. Returns true if it was added.
    pub fn add(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        self.entries.push(path);
        true
    }

    /// Remove the entry at `index`, shifting later entries down.
    pub fn remove_at(&mut self, index: usize) -> Result<PathBuf> {
        if index >= self.entries.len() {
            return Err(DomainError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.entries.get(index).map(PathBuf::as_path)
    }

    pub fn all(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|p| p == path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_twice_keeps_one_entry() {
        let mut queue = ScriptQueue::new();
        assert!(queue.add("/tmp/job.py"));
        assert!(!queue.add("/tmp/job.py"));

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.get(0), Some(Path::new("/tmp/job.py")));
    }

    #[test]
    fn test_insertion_order_and_positional_removal() {
        let mut queue = ScriptQueue::new();
        queue.add("a.sh");
        queue.add("b.py");
        queue.add("c.bat");

        let removed = queue.remove_at(1).unwrap();

        assert_eq!(removed, PathBuf::from("b.py"));
        assert_eq!(queue.all(), &[PathBuf::from("a.sh"), PathBuf::from("c.bat")]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut queue = ScriptQueue::new();
        queue.add("a.sh");

        let err = queue.remove_at(5).unwrap_err();
        assert_eq!(err, DomainError::IndexOutOfRange { index: 5, len: 1 });
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_removed_path_can_be_added_again() {
        let mut queue = ScriptQueue::new();
        queue.add("a.sh");
        queue.remove_at(0).unwrap();

        assert!(queue.is_empty());
        assert!(queue.add("a.sh"));
    }
}
