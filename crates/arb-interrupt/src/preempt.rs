//! Directive-aware override pass.
//!
//! Runs after the base handler, in three steps:
//!
//! 1. Write the standing order's boost into the utility options.
//! 2. Scan the buffer in insertion order for an unconsumed interrupt whose
//!    mapped behavior matches the standing order.  Such an interrupt is
//!    *backed*: its override priority is
//!    `interrupt.priority + order.effective_priority`, floored to a level
//!    and checked with the normal lock rule.  Entries the gate has already
//!    refused qualify too.  The first one that passes is converted.
//! 3. If nothing was converted, the order itself may pre-empt the active
//!    intent.  Pre-emption is a soft override and also honours the cooldown
//!    window.  An order whose target agent no longer exists never
//!    pre-empts; it keeps boosting until it expires or is cancelled.
//!
//! At most one conversion happens per agent per tick.  If the base handler
//! already committed this tick only step 1 runs.

use arb_core::{AgentDirectory, Behavior, InterruptKind, Priority, Tick};
use arb_directive::{ActiveOrder, apply_boost};
use arb_intent::{CommitmentConfig, CommitmentState, Intent, commit, try_commit_soft};
use arb_utility::UtilitySet;
use tracing::trace;

use crate::{InterruptBuffer, candidate_from, mode_for};

/// What the override pass installed, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preemption {
    /// A directive-backed interrupt became the active intent.
    Interrupt(InterruptKind),
    /// The standing order itself became the active intent.
    Directive(Behavior),
}

/// Priority a backed interrupt carries into the lock rule.
#[inline]
pub fn backed_priority(priority: Priority, order: &ActiveOrder) -> Priority {
    Priority::from_weight(priority.weight() + order.effective_priority.max(0.0))
}

#[allow(clippy::too_many_arguments)]
pub fn directive_pass<D: AgentDirectory + ?Sized>(
    buffer:              &mut InterruptBuffer,
    active:              &mut Intent,
    state:               &mut CommitmentState,
    options:             &mut UtilitySet,
    order:               Option<&ActiveOrder>,
    commitment:          &CommitmentConfig,
    directory:           &D,
    now:                 Tick,
    committed_this_tick: bool,
) -> Option<Preemption> {
    apply_boost(options, order);

    let order = order?;
    if committed_this_tick {
        return None;
    }

    if let Some(kind) = convert_backed(buffer, active, state, order, commitment, now) {
        return Some(Preemption::Interrupt(kind));
    }
    if order.target_agent.is_some_and(|t| !directory.contains(t)) {
        trace!(kind = order.kind.as_str(), "directive target gone; not installed");
        return None;
    }
    preempt_with_order(active, state, order, commitment, now)
}

fn convert_backed(
    buffer:     &mut InterruptBuffer,
    active:     &mut Intent,
    state:      &mut CommitmentState,
    order:      &ActiveOrder,
    commitment: &CommitmentConfig,
    now:        Tick,
) -> Option<InterruptKind> {
    let index = buffer.iter().position(|entry| {
        !entry.consumed
            && entry.timestamp <= now
            && mode_for(entry.kind) == order.kind
            && state.permits(active, backed_priority(entry.priority, order), now)
    })?;
    let entry = buffer.get_mut(index)?;

    let mut candidate = candidate_from(entry, now);
    candidate.priority = backed_priority(entry.priority, order);
    commit(active, state, candidate, commitment, now);

    if !entry.processed {
        entry.mark_processed(now);
    }
    entry.consumed = true;
    trace!(kind = entry.kind.as_str(), "backed interrupt converted");
    Some(entry.kind)
}

fn preempt_with_order(
    active:     &mut Intent,
    state:      &mut CommitmentState,
    order:      &ActiveOrder,
    commitment: &CommitmentConfig,
    now:        Tick,
) -> Option<Preemption> {
    let level = order.effective_level();
    if level == Priority::Background || (active.is_active() && active.mode == order.kind) {
        return None;
    }

    let mut candidate = Intent::new(order.kind, level, now).with_position(order.target_position);
    candidate.target_agent = order.target_agent;

    let decision = try_commit_soft(active, state, candidate, commitment, now);
    trace!(kind = order.kind.as_str(), accepted = decision.is_accepted(), "directive pre-emption");
    decision.is_accepted().then_some(Preemption::Directive(order.kind))
}
