//! Observer trait for progress reporting and data collection.

use arb_core::{AgentHandle, GoalId, Tick};
use arb_intent::Intent;
use arb_utility::StateTransition;

use crate::{IntentSource, TickOutcome};

/// Callbacks invoked by [`DecisionCore::tick`][crate::DecisionCore::tick].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Per-agent callbacks arrive in ascending
/// handle order, with or without the `parallel` feature.
///
/// # Example: intent log
///
/// ```rust,ignore
/// struct IntentLog(Vec<(Tick, AgentHandle, Behavior)>);
///
/// impl CoreObserver for IntentLog {
///     fn on_intent_changed(&mut self, tick: Tick, agent: AgentHandle, intent: &Intent, _: IntentSource) {
///         self.0.push((tick, agent, intent.mode));
///     }
/// }
/// ```
pub trait CoreObserver {
    /// Called at the start of each authoritative tick, before any agent is
    /// updated.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of every tick, including skipped ones.
    fn on_tick_end(&mut self, _tick: Tick, _outcome: &TickOutcome) {}

    /// The agent's active intent changed this tick.  `source` names the stage
    /// that installed it; cleared intents report [`IntentSource::Cleared`].
    fn on_intent_changed(
        &mut self,
        _tick:   Tick,
        _agent:  AgentHandle,
        _intent: &Intent,
        _source: IntentSource,
    ) {}

    /// The utility evaluator switched the agent's behavior state.
    fn on_state_changed(&mut self, _tick: Tick, _agent: AgentHandle, _transition: StateTransition) {}

    /// The planner authored a new plan.
    fn on_plan_authored(&mut self, _tick: Tick, _agent: AgentHandle, _goal: GoalId, _length: usize) {}
}

/// A [`CoreObserver`] that does nothing.
pub struct NoopObserver;

impl CoreObserver for NoopObserver {}
