//! Base interrupt handler: buffer → candidate intent → commitment gate.

use arb_core::{InterruptKind, Tick};
use arb_intent::{CommitmentConfig, CommitmentState, GateDecision, Intent, try_commit};
use tracing::trace;

use crate::{Interrupt, InterruptBuffer, InterruptError, InterruptResult, mode_for};

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterruptConfig {
    /// Processed entries older than this are dropped from the buffer.
    pub retention_ticks: u64,
    /// Initial capacity of each agent's buffer.
    pub buffer_capacity: usize,
}

impl Default for InterruptConfig {
    fn default() -> Self {
        Self { retention_ticks: 300, buffer_capacity: 8 }
    }
}

// ── Handler ───────────────────────────────────────────────────────────────────

/// What the base handler did with the interrupt it selected.
#[derive(Debug, Clone, PartialEq)]
pub struct Handled {
    pub kind:     InterruptKind,
    pub decision: GateDecision,
}

/// The candidate intent an interrupt turns into, stamped with `now`.
pub fn candidate_from(interrupt: &Interrupt, now: Tick) -> Intent {
    let mut intent = Intent::new(mode_for(interrupt.kind), interrupt.priority, now)
        .with_position(interrupt.target_position)
        .triggered_by(interrupt.kind);
    intent.target_agent = interrupt.target_agent;
    intent
}

/// Convert the highest-priority unprocessed interrupt and offer it to the
/// commitment gate.
///
/// The selected entry is marked processed whatever the gate decides; it is
/// marked consumed only if it was accepted.  Retention pruning runs on
/// every call, including the `NoEligibleInterrupt` case.
pub fn handle(
    buffer:     &mut InterruptBuffer,
    active:     &mut Intent,
    state:      &mut CommitmentState,
    config:     &InterruptConfig,
    commitment: &CommitmentConfig,
    now:        Tick,
) -> InterruptResult<Handled> {
    let outcome = select_and_gate(buffer, active, state, commitment, now);
    buffer.prune(now, config.retention_ticks);
    outcome
}

fn select_and_gate(
    buffer:     &mut InterruptBuffer,
    active:     &mut Intent,
    state:      &mut CommitmentState,
    commitment: &CommitmentConfig,
    now:        Tick,
) -> InterruptResult<Handled> {
    let index = buffer
        .highest_unprocessed(now)
        .ok_or(InterruptError::NoEligibleInterrupt)?;
    let entry = buffer.get_mut(index).ok_or(InterruptError::NoEligibleInterrupt)?;

    entry.mark_processed(now);
    let candidate = candidate_from(entry, now);
    let decision = try_commit(active, state, candidate, commitment, now);
    entry.consumed = decision.is_accepted();

    trace!(
        kind = entry.kind.as_str(),
        priority = entry.priority.as_str(),
        accepted = entry.consumed,
        "interrupt handled"
    );
    Ok(Handled { kind: entry.kind, decision })
}
