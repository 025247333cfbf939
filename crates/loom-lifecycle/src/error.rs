//! Error types for the staging lifecycle

use crate::item::{ArchiveId, StagingId};

/// Lifecycle operation errors
///
/// All variants are recoverable. `OrphanedArchive` in particular is an
/// integrity signal, not a fatal condition: the failed restore leaves
/// every other item untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    /// Staging item not found
    #[error("staging item not found: {0}")]
    ItemNotFound(StagingId),

    /// Archived snapshot not found
    #[error("archived item not found: {0}")]
    ArchiveNotFound(ArchiveId),

    /// Snapshot back-reference does not resolve to a staging item
    #[error("archived item {archive} references missing staging item {missing}")]
    OrphanedArchive {
        /// The snapshot whose back-reference is broken
        archive: ArchiveId,
        /// The staging id that no longer resolves
        missing: StagingId,
    },

    /// Item already carries the explicit archive mark
    #[error("staging item already archived: {0}")]
    AlreadyArchived(StagingId),

    /// Id already present
    #[error("duplicate id: {0}")]
    DuplicateId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LifecycleError::OrphanedArchive {
            archive: ArchiveId::new("a1"),
            missing: StagingId::new("s1"),
        };
        assert!(err.to_string().contains("a1"));
        assert!(err.to_string().contains("missing staging item s1"));
    }
}
