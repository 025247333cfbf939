//! Lifecycle states and transitions

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Days before a fresh item starts aging
pub const AGING_AFTER_DAYS: i64 = 7;

/// Days before an aging item is archive-eligible
pub const ARCHIVE_AFTER_DAYS: i64 = 30;

/// Fresh/aging/archived classification of a staged item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Recently touched, shown in the default view
    #[default]
    Fresh,
    /// Older than 7 days, de-emphasized
    Aging,
    /// Older than 30 days or explicitly archived
    Archived,
}

impl LifecycleState {
    /// Stable lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Aging => "aging",
            Self::Archived => "archived",
        }
    }

    /// Age-derived state for an item last touched `age` ago
    #[must_use]
    pub fn from_age(age: Duration) -> Self {
        if age > Duration::days(ARCHIVE_AFTER_DAYS) {
            Self::Archived
        } else if age > Duration::days(AGING_AFTER_DAYS) {
            Self::Aging
        } else {
            Self::Fresh
        }
    }
}

/// Legal transitions out of a state
///
/// `fresh → aging → archived` by age, `fresh/aging → archived` by explicit
/// action, `archived → fresh` by explicit restore only.
#[must_use]
pub fn allowed_transitions(from: LifecycleState) -> Vec<LifecycleState> {
    use LifecycleState::{Aging, Archived, Fresh};
    match from {
        Fresh => vec![Aging, Archived],
        Aging => vec![Archived],
        Archived => vec![Fresh],
    }
}
