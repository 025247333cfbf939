//! Staged and archived content records
//!
//! Plain serde records: the persistence collaborator owns their storage,
//! this crate owns their invariants.

use crate::state::LifecycleState;
use chrono::{DateTime, Utc};
use loom_graph::AssetId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ulid::Ulid;

/// Unique staging item identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StagingId(String);

impl StagingId {
    /// Generate a fresh id
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Wrap an existing id string
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StagingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StagingId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for StagingId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Unique archived snapshot identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchiveId(String);

impl ArchiveId {
    /// Generate a fresh id
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Wrap an existing id string
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArchiveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ArchiveId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ArchiveId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Content type of a staged item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StagingKind {
    /// Pasted or typed text
    Text,
    /// A captured URL
    Link,
    /// An uploaded file, referenced through a vault asset
    File,
}

/// An un-categorized content entity awaiting promotion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagingItem {
    /// Unique id
    pub id: StagingId,
    /// Content type
    pub kind: StagingKind,
    /// Primary content (text body or URL)
    pub content: String,
    /// Durable asset backing a file item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<AssetId>,
    /// Free-form metadata
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Ingestion time
    pub created_at: DateTime<Utc>,
    /// Stored lifecycle mark; `Archived` here is the explicit override,
    /// everything else is recomputed from age on read
    pub lifecycle_state: LifecycleState,
    /// When the explicit archive happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    /// Interaction reset from the most recent restore
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restored_at: Option<DateTime<Utc>>,
}

impl StagingItem {
    /// Create a fresh item ingested at `created_at`
    #[must_use]
    pub fn new(kind: StagingKind, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: StagingId::generate(),
            kind,
            content: content.into(),
            asset_id: None,
            metadata: HashMap::new(),
            created_at,
            lifecycle_state: LifecycleState::Fresh,
            archived_at: None,
            restored_at: None,
        }
    }

    /// With an explicit id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = StagingId::new(id);
        self
    }

    /// With a backing vault asset
    #[inline]
    #[must_use]
    pub fn with_asset(mut self, asset_id: AssetId) -> Self {
        self.asset_id = Some(asset_id);
        self
    }

    /// With a metadata entry
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// The timestamp aging is measured from
    ///
    /// A restore resets it, so restored items re-age from the restore.
    #[inline]
    #[must_use]
    pub fn interaction_time(&self) -> DateTime<Utc> {
        self.restored_at.unwrap_or(self.created_at)
    }

    /// Lifecycle state as observed at `now`
    ///
    /// The explicit archive mark always wins; otherwise the state is
    /// age-derived from [`Self::interaction_time`]. Evaluated on read,
    /// never by a background timer.
    #[must_use]
    pub fn state_at(&self, now: DateTime<Utc>) -> LifecycleState {
        if self.lifecycle_state == LifecycleState::Archived {
            return LifecycleState::Archived;
        }
        LifecycleState::from_age(now - self.interaction_time())
    }
}

/// Snapshot of a staging item taken at archive time
///
/// `original_staging_id` is a non-owning lookup key: restore resolves it
/// back to the live staging record, and fails cleanly when it cannot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedItem {
    /// Unique snapshot id
    pub id: ArchiveId,
    /// Back-reference to the source staging item
    pub original_staging_id: StagingId,
    /// Snapshotted content type
    pub kind: StagingKind,
    /// Snapshotted content
    pub content: String,
    /// Snapshotted metadata
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Original ingestion time
    pub created_at: DateTime<Utc>,
    /// When the snapshot was taken
    pub archived_at: DateTime<Utc>,
}

impl ArchivedItem {
    /// Snapshot `item` as of `now`
    #[must_use]
    pub fn snapshot_of(item: &StagingItem, now: DateTime<Utc>) -> Self {
        Self {
            id: ArchiveId::generate(),
            original_staging_id: item.id.clone(),
            kind: item.kind,
            content: item.content.clone(),
            metadata: item.metadata.clone(),
            created_at: item.created_at,
            archived_at: now,
        }
    }
}
