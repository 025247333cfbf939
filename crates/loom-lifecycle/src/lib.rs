//! Loom Lifecycle - Staged Content Aging
//!
//! The state machine governing how staged items age out of the default
//! view:
//! - `fresh → aging` after 7 days, `aging → archived` after 30 days,
//!   both computed lazily on read (there is no background scheduler)
//! - Explicit archive at any time; copy-then-mark so the back-reference
//!   needed for restore survives
//! - Explicit restore, which resets the interaction timestamp so the item
//!   re-ages from the restore instant
//! - Promotion of a staged item into a durable asset and a canvas node
//!
//! The aging signal and the explicit archive mark are orthogonal: the mark
//! always wins, and everything else is purely age-derived from the most
//! recent interaction.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod item;
pub mod manager;
pub mod state;

pub use error::LifecycleError;
pub use item::{ArchiveId, ArchivedItem, StagingId, StagingItem, StagingKind};
pub use manager::{LifecycleManager, PromotedStaging};
pub use state::{allowed_transitions, LifecycleState, AGING_AFTER_DAYS, ARCHIVE_AFTER_DAYS};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
