//! Collection store for user-submitted file descriptors.
//!
//! # Overview
//!
//! The collection is the ordered set of files the user has selected for
//! analysis. It holds metadata only (name and size) and never touches the
//! filesystem itself. Identity within the collection is positional: two
//! descriptors may share a name, and pairs reported by the analyzer refer
//! back to collection indices.
//!
//! # Example
//!
//! ```
//! use dupelens::collection::{Collection, FileDescriptor};
//!
//! let mut collection = Collection::new();
//! collection.add(vec![
//!     FileDescriptor::new("report.pdf", 12_288),
//!     FileDescriptor::new("report_v2.pdf", 13_312),
//! ]);
//!
//! assert_eq!(collection.len(), 2);
//! collection.remove_at(0);
//! assert_eq!(collection.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Metadata for a submitted file.
///
/// No file content is read; the descriptor carries exactly what the
/// similarity analyzer and the UI need. Immutable once added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// File name as submitted (not necessarily unique)
    pub name: String,
    /// File size in bytes
    pub size_bytes: u64,
}

impl FileDescriptor {
    /// Create a new descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Name length in Unicode scalar values, the unit the similarity
    /// score is computed over.
    #[must_use]
    pub fn name_len(&self) -> usize {
        self.name.chars().count()
    }
}

/// Ordered sequence of file descriptors selected by the user.
///
/// Insertion order is preserved and duplicates by name are permitted.
/// The collection is the single owner of the sequence; other components
/// receive snapshots, never mutable access.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    files: Vec<FileDescriptor>,
}

impl Collection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch of descriptors, preserving the batch order.
    ///
    /// No deduplication is performed; submitting the same file twice
    /// yields two entries.
    pub fn add(&mut self, files: Vec<FileDescriptor>) {
        log::debug!("Adding {} files to collection", files.len());
        self.files.extend(files);
    }

    /// Remove the descriptor at `index`, shifting later entries down.
    ///
    /// Out-of-range indices are a silent no-op. Returns whether an entry
    /// was actually removed, so the caller can invalidate any analysis
    /// result tied to the previous contents.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.files.len() {
            log::debug!(
                "remove_at({}) ignored: collection has {} entries",
                index,
                self.files.len()
            );
            return false;
        }
        let removed = self.files.remove(index);
        log::debug!("Removed {:?} at index {}", removed.name, index);
        true
    }

    /// Remove all descriptors.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Current number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Borrow the descriptors in insertion order.
    #[must_use]
    pub fn files(&self) -> &[FileDescriptor] {
        &self.files
    }

    /// Clone the current contents for an analysis run.
    #[must_use]
    pub fn snapshot(&self) -> Vec<FileDescriptor> {
        self.files.clone()
    }

    /// Get the descriptor at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FileDescriptor> {
        self.files.get(index)
    }
}
