//! Pending-intent FIFO and target validation.
//!
//! Intents an agent cannot act on yet wait here.  Each tick at most one
//! entry is promoted: the head moves into the active slot when the agent is
//! idle, or when the head could legally pre-empt the active intent under the
//! commitment lock rule.
//!
//! Validation runs first: an active intent whose target agent has
//! despawned is cleared (the recoverable `InvalidTarget` case), and queued
//! entries with dead targets or older than `max_age_ticks` are discarded.

use std::collections::VecDeque;

use arb_core::{AgentDirectory, Tick};

use crate::{CommitmentConfig, CommitmentState, Intent, IntentError, IntentResult, commit};

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueConfig {
    /// Maximum pending entries per agent.  Pushing onto a full queue drops
    /// the oldest entry.
    pub max_len: usize,
    /// Entries queued longer than this are discarded unpromoted.
    pub max_age_ticks: u64,
    /// Enqueue candidates the commitment gate rejected instead of dropping
    /// them.
    pub enqueue_rejected: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self { max_len: 8, max_age_ticks: 600, enqueue_rejected: false }
    }
}

// ── QueuedIntent ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueuedIntent {
    pub intent:      Intent,
    pub queued_tick: Tick,
}

// ── IntentQueue ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntentQueue {
    entries: VecDeque<QueuedIntent>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity) }
    }

    /// Append `intent`.  Returns the entry evicted to respect `max_len`, if any.
    pub fn push(&mut self, intent: Intent, now: Tick, config: &QueueConfig) -> Option<QueuedIntent> {
        if config.max_len == 0 {
            return Some(QueuedIntent { intent, queued_tick: now });
        }
        let evicted = if self.entries.len() >= config.max_len {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(QueuedIntent { intent, queued_tick: now });
        evicted
    }

    pub fn front(&self) -> Option<&QueuedIntent> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedIntent> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop entries that are too old or whose target is gone.  Returns how
    /// many were dropped.
    pub fn discard_unusable<D: AgentDirectory + ?Sized>(
        &mut self,
        now:       Tick,
        config:    &QueueConfig,
        directory: &D,
    ) -> usize {
        let before = self.entries.len();
        self.entries.retain(|q| {
            now.since(q.queued_tick) <= config.max_age_ticks
                && q.intent.is_valid
                && q.intent.target_agent.is_none_or(|t| directory.contains(t))
        });
        before - self.entries.len()
    }

    /// Promote the head into `active` if the agent is idle or the head may
    /// legally pre-empt.  At most one entry moves per call.
    pub fn promote(
        &mut self,
        active: &mut Intent,
        state:  &mut CommitmentState,
        config: &CommitmentConfig,
        now:    Tick,
    ) -> bool {
        let Some(head) = self.entries.front() else {
            return false;
        };
        if !state.permits(active, head.intent.priority, now) {
            return false;
        }
        let Some(head) = self.entries.pop_front() else {
            return false;
        };
        commit(active, state, head.intent, config, now);
        true
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

/// Clear `intent` if its target agent no longer exists.
///
/// The error only names the condition: the intent has already been cleared
/// when it is returned, and callers are expected to swallow it.
pub fn validate_target<D: AgentDirectory + ?Sized>(
    intent:    &mut Intent,
    directory: &D,
) -> IntentResult<()> {
    if !intent.is_valid {
        return Ok(());
    }
    match intent.target_agent {
        Some(target) if !directory.contains(target) => {
            intent.clear();
            Err(IntentError::InvalidTarget(target))
        }
        _ => Ok(()),
    }
}
