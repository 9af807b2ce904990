//! Commitment lock / cooldown gate.
//!
//! # Why a gate
//!
//! Without it, two interrupts of similar priority arriving on alternate ticks
//! flip the agent's intent every tick and nothing ever gets executed.  Once an
//! intent is accepted the agent is *locked* to it for `lock_duration` ticks:
//!
//! ```text
//! accept candidate  ⇔  active is invalid or idle
//!                   ∨  now >= lock_until_tick
//!                   ∨  candidate.priority > active.priority
//! ```
//!
//! After the lock, a further `cooldown_duration` window applies to *soft*
//! overrides (directive pre-emption): those need strictly higher priority
//! until `now >= cooldown_until_tick`.  Interrupts are not affected by the
//! cooldown.

use arb_core::{Priority, Tick};

use crate::Intent;

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommitmentConfig {
    /// Ticks during which only strictly higher priority may override.
    pub lock_duration: u64,
    /// Extra ticks after the lock during which soft overrides need strictly
    /// higher priority.
    pub cooldown_duration: u64,
}

impl Default for CommitmentConfig {
    fn default() -> Self {
        Self { lock_duration: 20, cooldown_duration: 10 }
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

/// Per-agent commitment windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommitmentState {
    pub lock_until_tick:     Tick,
    pub cooldown_until_tick: Tick,
    pub last_intent_tick:    Tick,
}

impl CommitmentState {
    #[inline]
    pub fn is_locked(&self, now: Tick) -> bool {
        now < self.lock_until_tick
    }

    #[inline]
    pub fn in_cooldown(&self, now: Tick) -> bool {
        now < self.cooldown_until_tick
    }

    /// Whether a candidate of `priority` may replace `active` at `now`.
    pub fn permits(&self, active: &Intent, priority: Priority, now: Tick) -> bool {
        !active.is_active() || !self.is_locked(now) || priority > active.priority
    }

    /// Like [`permits`](Self::permits) but also honours the cooldown window.
    pub fn permits_soft(&self, active: &Intent, priority: Priority, now: Tick) -> bool {
        !active.is_active() || !self.in_cooldown(now) || priority > active.priority
    }

    /// Start new lock and cooldown windows at `now`.
    pub fn restart(&mut self, config: &CommitmentConfig, now: Tick) {
        self.lock_until_tick = now + config.lock_duration;
        self.cooldown_until_tick = self.lock_until_tick + config.cooldown_duration;
        self.last_intent_tick = now;
    }
}

// ── Gate ──────────────────────────────────────────────────────────────────────

/// Outcome of offering a candidate to the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    Accepted,
    /// The candidate is handed back so the caller may enqueue it.
    Rejected(Intent),
}

impl GateDecision {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, GateDecision::Accepted)
    }
}

/// Install `candidate` in `active` unconditionally, stamping it with `now`
/// and restarting the commitment windows.
pub fn commit(
    active:        &mut Intent,
    state:         &mut CommitmentState,
    mut candidate: Intent,
    config:        &CommitmentConfig,
    now:           Tick,
) {
    candidate.set_tick = now;
    candidate.is_valid = true;
    *active = candidate;
    state.restart(config, now);
}

/// Offer `candidate` under the lock rule.
pub fn try_commit(
    active:    &mut Intent,
    state:     &mut CommitmentState,
    candidate: Intent,
    config:    &CommitmentConfig,
    now:       Tick,
) -> GateDecision {
    if state.permits(active, candidate.priority, now) {
        commit(active, state, candidate, config, now);
        GateDecision::Accepted
    } else {
        GateDecision::Rejected(candidate)
    }
}

/// Offer `candidate` under the lock *and* cooldown rule.
pub fn try_commit_soft(
    active:    &mut Intent,
    state:     &mut CommitmentState,
    candidate: Intent,
    config:    &CommitmentConfig,
    now:       Tick,
) -> GateDecision {
    if state.permits(active, candidate.priority, now)
        && state.permits_soft(active, candidate.priority, now)
    {
        commit(active, state, candidate, config, now);
        GateDecision::Accepted
    } else {
        GateDecision::Rejected(candidate)
    }
}
