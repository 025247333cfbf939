//! The lifecycle manager
//!
//! Owns the live staging records and their archived snapshots. There is no
//! background sweeper: consumers re-evaluate state on each read, and
//! [`LifecycleManager::sweep`] exists for callers that want age-expired
//! items materialized as snapshots.

use crate::error::LifecycleError;
use crate::item::{ArchiveId, ArchivedItem, StagingId, StagingItem, StagingKind};
use crate::state::LifecycleState;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use loom_graph::{AssetId, Node, NodeData, NodeType, Position};

/// Result of promoting a staged item onto the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct PromotedStaging {
    /// The node to add to the graph
    pub node: Node,
    /// The durable asset backing it, when one exists
    pub asset_id: Option<AssetId>,
}

/// Computes and transitions the lifecycle state of staged items
#[derive(Debug, Clone, Default)]
pub struct LifecycleManager {
    items: IndexMap<StagingId, StagingItem>,
    archives: IndexMap<ArchiveId, ArchivedItem>,
}

impl LifecycleManager {
    /// Create an empty manager
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a staging item
    ///
    /// # Errors
    /// `LifecycleError::DuplicateId` if the id is taken.
    pub fn ingest(&mut self, item: StagingItem) -> Result<StagingId, LifecycleError> {
        if self.items.contains_key(&item.id) {
            return Err(LifecycleError::DuplicateId(item.id.to_string()));
        }
        let id = item.id.clone();
        tracing::debug!(item = %id, "staging item ingested");
        self.items.insert(id.clone(), item);
        Ok(id)
    }

    /// Load a persisted snapshot record
    ///
    /// Used when hydrating from the storage collaborator; the snapshot's
    /// back-reference is taken as-is and only checked at restore time.
    pub fn insert_archived(&mut self, item: ArchivedItem) -> Result<ArchiveId, LifecycleError> {
        if self.archives.contains_key(&item.id) {
            return Err(LifecycleError::DuplicateId(item.id.to_string()));
        }
        let id = item.id.clone();
        self.archives.insert(id.clone(), item);
        Ok(id)
    }

    /// Look up a staging item
    #[inline]
    #[must_use]
    pub fn get(&self, id: &StagingId) -> Option<&StagingItem> {
        self.items.get(id)
    }

    /// Look up an archived snapshot
    #[inline]
    #[must_use]
    pub fn get_archived(&self, id: &ArchiveId) -> Option<&ArchivedItem> {
        self.archives.get(id)
    }

    /// All items with their state as observed at `now`
    ///
    /// State is computed on this read; nothing is written back.
    #[must_use]
    pub fn list(&self, now: DateTime<Utc>) -> Vec<(&StagingItem, LifecycleState)> {
        self.items
            .values()
            .map(|item| (item, item.state_at(now)))
            .collect()
    }

    /// Items still in the default view at `now` (not archived)
    #[must_use]
    pub fn active(&self, now: DateTime<Utc>) -> Vec<(&StagingItem, LifecycleState)> {
        self.list(now)
            .into_iter()
            .filter(|(_, state)| *state != LifecycleState::Archived)
            .collect()
    }

    /// Archived snapshots, in archive order
    pub fn archived(&self) -> impl Iterator<Item = &ArchivedItem> {
        self.archives.values()
    }

    /// Explicitly archive an item: copy-then-mark
    ///
    /// A snapshot is created first, then the source record is marked
    /// archived. The source is not deleted; its id is the snapshot's
    /// back-reference.
    ///
    /// # Errors
    /// `ItemNotFound` for an unknown id, `AlreadyArchived` when the mark
    /// is already set.
    pub fn archive(
        &mut self,
        id: &StagingId,
        now: DateTime<Utc>,
    ) -> Result<ArchiveId, LifecycleError> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| LifecycleError::ItemNotFound(id.clone()))?;
        if item.lifecycle_state == LifecycleState::Archived {
            return Err(LifecycleError::AlreadyArchived(id.clone()));
        }

        let snapshot = ArchivedItem::snapshot_of(item, now);
        let archive_id = snapshot.id.clone();
        item.lifecycle_state = LifecycleState::Archived;
        item.archived_at = Some(now);
        self.archives.insert(archive_id.clone(), snapshot);

        tracing::info!(item = %id, archive = %archive_id, "staging item archived");
        Ok(archive_id)
    }

    /// Restore an archived snapshot back to a fresh item
    ///
    /// Deletes the snapshot and flips the source record to fresh, clearing
    /// `archived_at` and resetting the interaction timestamp so the item
    /// re-ages from `now`.
    ///
    /// # Errors
    /// `ArchiveNotFound` for an unknown snapshot; `OrphanedArchive` when
    /// the back-reference no longer resolves — the snapshot and every
    /// other item are left untouched.
    pub fn restore(
        &mut self,
        archive_id: &ArchiveId,
        now: DateTime<Utc>,
    ) -> Result<StagingId, LifecycleError> {
        let snapshot = self
            .archives
            .get(archive_id)
            .ok_or_else(|| LifecycleError::ArchiveNotFound(archive_id.clone()))?;
        let staging_id = snapshot.original_staging_id.clone();

        let Some(item) = self.items.get_mut(&staging_id) else {
            return Err(LifecycleError::OrphanedArchive {
                archive: archive_id.clone(),
                missing: staging_id,
            });
        };

        item.lifecycle_state = LifecycleState::Fresh;
        item.archived_at = None;
        item.restored_at = Some(now);
        self.archives.shift_remove(archive_id);

        tracing::info!(item = %staging_id, archive = %archive_id, "staging item restored");
        Ok(staging_id)
    }

    /// Materialize snapshots for items aged past the archive threshold
    ///
    /// Items already carrying the explicit mark are skipped, so a second
    /// sweep at the same instant is a no-op.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> Vec<ArchiveId> {
        let due: Vec<StagingId> = self
            .items
            .values()
            .filter(|item| {
                item.lifecycle_state != LifecycleState::Archived
                    && item.state_at(now) == LifecycleState::Archived
            })
            .map(|item| item.id.clone())
            .collect();

        let mut archived = Vec::with_capacity(due.len());
        for id in due {
            // Cannot fail: the item exists and is not yet marked.
            if let Ok(archive_id) = self.archive(&id, now) {
                archived.push(archive_id);
            }
        }
        if !archived.is_empty() {
            tracing::info!(count = archived.len(), "age sweep archived items");
        }
        archived
    }

    /// Delete a staging item permanently, cascading its snapshots
    ///
    /// # Errors
    /// `ItemNotFound` for an unknown id.
    pub fn delete(&mut self, id: &StagingId) -> Result<StagingItem, LifecycleError> {
        let item = self
            .items
            .shift_remove(id)
            .ok_or_else(|| LifecycleError::ItemNotFound(id.clone()))?;
        self.archives
            .retain(|_, snapshot| &snapshot.original_staging_id != id);
        Ok(item)
    }

    /// Delete an archived snapshot permanently
    ///
    /// # Errors
    /// `ArchiveNotFound` for an unknown id.
    pub fn purge_archive(&mut self, id: &ArchiveId) -> Result<ArchivedItem, LifecycleError> {
        self.archives
            .shift_remove(id)
            .ok_or_else(|| LifecycleError::ArchiveNotFound(id.clone()))
    }

    /// Promote a staged item into a canvas node
    ///
    /// Terminal for the staging record: it is removed (snapshots cascade)
    /// and returned as a node ready for the graph, typed by its content
    /// kind.
    ///
    /// # Errors
    /// `ItemNotFound` for an unknown id.
    pub fn promote(
        &mut self,
        id: &StagingId,
        position: Position,
    ) -> Result<PromotedStaging, LifecycleError> {
        let item = self.delete(id)?;
        let label = item
            .metadata
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or(item.content.as_str())
            .chars()
            .take(80)
            .collect::<String>();

        let (type_tag, data) = match item.kind {
            StagingKind::Text => (
                NodeType::Note,
                NodeData::labeled(label).with_content(item.content.clone()),
            ),
            StagingKind::Link => (
                NodeType::Link,
                NodeData::labeled(label).with_url(item.content.clone()),
            ),
            StagingKind::File => {
                let type_tag = if item.asset_id.is_some() {
                    NodeType::Media
                } else {
                    NodeType::Document
                };
                (type_tag, NodeData::labeled(label).with_content(item.content.clone()))
            }
        };

        let node = Node::new(type_tag, position, data);
        tracing::info!(item = %id, node = %node.id, "staging item promoted");
        Ok(PromotedStaging {
            node,
            asset_id: item.asset_id,
        })
    }

    /// Number of staging items
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are staged
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
