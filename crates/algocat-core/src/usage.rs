//! # Usage Counters
//!
//! Mutation contract for the only runtime-mutable fields of a record.
//!
//! The store never applies these events. Counter ownership belongs to an
//! external analytics service, which must apply them atomically on its side.
//! This module only fixes what one event does to one counter set:
//! - Exactly one counter moves per event
//! - Increments saturate at `u64::MAX`

use serde::{Deserialize, Serialize};

/// A single usage event reported by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UsageEvent {
    Like,
    Dislike,
    Share,
    Attempt,
    Complete,
}

/// Engagement counters carried at the top level of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCounters {
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
    #[serde(default)]
    pub share_count: u64,
}

impl UsageCounters {
    /// Return the counters after applying `event`.
    ///
    /// Completion events leave engagement counters unchanged.
    #[must_use]
    pub const fn apply(self, event: UsageEvent) -> Self {
        match event {
            UsageEvent::Like => Self {
                likes: self.likes.saturating_add(1),
                ..self
            },
            UsageEvent::Dislike => Self {
                dislikes: self.dislikes.saturating_add(1),
                ..self
            },
            UsageEvent::Share => Self {
                share_count: self.share_count.saturating_add(1),
                ..self
            },
            UsageEvent::Attempt | UsageEvent::Complete => self,
        }
    }
}

/// `userCompletionGraphData`: how many learners attempted and completed a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompletionGraph {
    #[serde(default)]
    pub attempted: u64,
    #[serde(default)]
    pub completed: u64,
}

impl CompletionGraph {
    #[must_use]
    pub const fn apply(self, event: UsageEvent) -> Self {
        match event {
            UsageEvent::Attempt => Self {
                attempted: self.attempted.saturating_add(1),
                ..self
            },
            UsageEvent::Complete => Self {
                completed: self.completed.saturating_add(1),
                ..self
            },
            UsageEvent::Like | UsageEvent::Dislike | UsageEvent::Share => self,
        }
    }

    /// Completion rate in thousandths, capped at 1000. Zero attempts gives 0.
    #[must_use]
    pub fn completion_permille(&self) -> u64 {
        if self.attempted == 0 {
            return 0;
        }
        (self.completed.saturating_mul(1000) / self.attempted).min(1000)
    }
}

// =============================================================================
// TESTS
// =============================================================================
