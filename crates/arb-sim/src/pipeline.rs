//! The `DecisionCore` struct and its per-tick pipeline.

use arb_agent::{AgentArena, AgentRecord, AgentTemplate, Liveness};
use arb_core::{AgentHandle, Behavior, GoalId, InterruptKind, SimClock, SimMode, Tick};
use arb_directive::{Directive, propagate, standing_order};
use arb_intent::{GateDecision, Intent, IntentError, validate_target};
use arb_interrupt::{Interrupt, InterruptError, Preemption, directive_pass, handle};
use arb_planner::{ActionCatalog, PlanError, PlanTick};
use arb_utility::StateTransition;
use tracing::{debug, trace};

use crate::{CoreObserver, DecisionConfig, InterruptScript, SimError, SimResult};

// ── Tick reports ──────────────────────────────────────────────────────────────

/// Which stage installed an agent's new intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentSource {
    /// Base handler: highest-priority interrupt passed the gate.
    Interrupt(InterruptKind),
    /// Override pass: a directive-backed interrupt.
    BackedInterrupt(InterruptKind),
    /// Override pass: the standing order itself.
    Directive(Behavior),
    /// Promoted from the pending-intent queue.
    Queue,
    /// The intent was cleared (dead target).
    Cleared,
}

/// Result of one [`DecisionCore::tick`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock is in a non-authoritative mode; nothing ran.
    Skipped(SimMode),
    Ran {
        agents:         usize,
        intent_changes: usize,
        state_changes:  usize,
        plans_authored: usize,
    },
}

/// What one agent's update produced.  Built in the (possibly parallel)
/// update phase, consumed sequentially afterwards.
struct AgentReport {
    handle:         AgentHandle,
    intent:         Option<(Intent, IntentSource)>,
    transition:     Option<StateTransition>,
    authored:       Option<(GoalId, usize)>,
    plan_failure:   Option<PlanError>,
    invalid_target: Option<AgentHandle>,
}

/// Read-only inputs shared by every agent's update.
struct StageContext<'a> {
    config:    &'a DecisionConfig,
    catalog:   &'a ActionCatalog,
    directory: &'a Liveness,
    now:       Tick,
}

// ── DecisionCore ──────────────────────────────────────────────────────────────

/// The decision-arbitration core.
///
/// Each [`tick`](Self::tick) runs the per-agent pipeline in fixed stage
/// order:
///
/// 1. **Interrupt handler + commitment gate**: highest-priority unprocessed
///    interrupt → candidate intent → lock rule; retention pruning.
/// 2. **Directive-aware override pass**: boost options for the standing
///    order; convert a directive-backed interrupt, or let the order
///    pre-empt (lock + cooldown rule).
/// 3. **Validation and queueing**: clear intents with dead targets, discard
///    unusable queue entries, promote the queue head.
/// 4. **Planner**: insistence, confidence decay, replan when due.
/// 5. **Utility evaluator**: on cadence, switch behavior state.
/// 6. **Directive propagation**: prune finished directives, refresh
///    standing-order flags and boosts.
///
/// Producers write into agents' interrupt buffers and directive lists
/// between ticks through [`push_interrupt`](Self::push_interrupt) and
/// [`issue_directive`](Self::issue_directive).
///
/// Create via [`CoreBuilder`][crate::CoreBuilder].
pub struct DecisionCore {
    pub config:  DecisionConfig,
    pub clock:   SimClock,
    pub arena:   AgentArena,
    /// Static action catalog shared by every agent's planner.
    pub catalog: ActionCatalog,
}

impl DecisionCore {
    pub(crate) fn new(config: DecisionConfig, clock: SimClock, arena: AgentArena, catalog: ActionCatalog) -> Self {
        Self { config, clock, arena, catalog }
    }

    // ── Producer-facing API ───────────────────────────────────────────────

    pub fn push_interrupt(&mut self, agent: AgentHandle, interrupt: Interrupt) -> SimResult<()> {
        self.agent_mut(agent)?.interrupts.push(interrupt);
        Ok(())
    }

    pub fn issue_directive(&mut self, subordinate: AgentHandle, directive: Directive) -> SimResult<()> {
        self.agent_mut(subordinate)?.directives.issue(directive);
        Ok(())
    }

    /// Push every script entry due at or before the current tick.  Entries
    /// addressed to agents that no longer exist are dropped.  Returns how
    /// many were delivered.
    pub fn feed_script(&mut self, script: &mut InterruptScript) -> usize {
        let mut delivered = 0;
        for entry in script.drain_due(self.clock.current_tick) {
            match self.push_interrupt(entry.agent, entry.interrupt) {
                Ok(()) => delivered += 1,
                Err(e) => trace!(error = %e, "script entry dropped"),
            }
        }
        delivered
    }

    // ── Agent access ──────────────────────────────────────────────────────

    pub fn spawn(&mut self, template: &AgentTemplate) -> AgentHandle {
        self.arena.spawn(template)
    }

    pub fn despawn(&mut self, agent: AgentHandle) -> SimResult<AgentRecord> {
        self.arena.despawn(agent).ok_or(SimError::AgentNotFound(agent))
    }

    pub fn agent(&self, agent: AgentHandle) -> SimResult<&AgentRecord> {
        self.arena.get(agent).ok_or(SimError::AgentNotFound(agent))
    }

    /// Mutable access for execution systems: clearing the intent on
    /// completion, advancing plan progress, writing world-state facts.
    pub fn agent_mut(&mut self, agent: AgentHandle) -> SimResult<&mut AgentRecord> {
        self.arena.get_mut(agent).ok_or(SimError::AgentNotFound(agent))
    }

    /// Move the clock, e.g. when a replay system rewinds.
    pub fn seek(&mut self, tick: Tick, mode: SimMode) {
        self.clock.seek(tick, mode);
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run exactly `n` ticks from the current position.
    pub fn run_ticks<O: CoreObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.tick(observer);
        }
    }

    /// Process the current tick and advance the clock.
    ///
    /// In `Replaying` and `FastForward` modes nothing runs and the clock is
    /// left where it is; the replay system positions it with
    /// [`seek`](Self::seek).
    pub fn tick<O: CoreObserver>(&mut self, observer: &mut O) -> TickOutcome {
        let now = self.clock.current_tick;
        if !self.clock.mode.is_authoritative() {
            let outcome = TickOutcome::Skipped(self.clock.mode);
            observer.on_tick_end(now, &outcome);
            return outcome;
        }

        observer.on_tick_start(now);
        let reports = self.update_agents(now);
        let outcome = apply_reports(&reports, now, observer);
        observer.on_tick_end(now, &outcome);

        self.clock.advance();
        outcome
    }

    /// Run the pipeline for every live agent.
    ///
    /// With the `parallel` feature the updates run on Rayon's thread pool.
    /// Each update touches only its own record; liveness, configuration, and
    /// the catalog are shared read-only.  Reports come back in slot order
    /// either way.
    fn update_agents(&mut self, now: Tick) -> Vec<AgentReport> {
        let (directory, slots) = self.arena.split_mut();
        let ctx = StageContext { config: &self.config, catalog: &self.catalog, directory, now };

        #[cfg(not(feature = "parallel"))]
        {
            slots.iter_mut().flatten().map(|rec| update_agent(rec, &ctx)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            slots
                .par_iter_mut()
                .filter_map(Option::as_mut)
                .map(|rec| update_agent(rec, &ctx))
                .collect()
        }
    }
}

// ── Per-agent pipeline ────────────────────────────────────────────────────────

fn update_agent(rec: &mut AgentRecord, ctx: &StageContext<'_>) -> AgentReport {
    let cfg = ctx.config;
    let now = ctx.now;
    let before = rec.intent.clone();
    let mut source = None;

    // ── Interrupt handler + gate ──────────────────────────────────────────
    let committed = match handle(
        &mut rec.interrupts,
        &mut rec.intent,
        &mut rec.commitment,
        &cfg.interrupt,
        &cfg.commitment,
        now,
    ) {
        Ok(handled) => match handled.decision {
            GateDecision::Accepted => {
                source = Some(IntentSource::Interrupt(handled.kind));
                true
            }
            GateDecision::Rejected(candidate) => {
                if cfg.queue.enqueue_rejected {
                    rec.queue.push(candidate, now, &cfg.queue);
                }
                false
            }
        },
        Err(InterruptError::NoEligibleInterrupt) => false,
    };

    // ── Directive-aware override pass ─────────────────────────────────────
    let order = standing_order(&rec.directives, &rec.subordinate, now, &cfg.directive);
    match directive_pass(
        &mut rec.interrupts,
        &mut rec.intent,
        &mut rec.commitment,
        &mut rec.utility,
        order.as_ref(),
        &cfg.commitment,
        ctx.directory,
        now,
        committed,
    ) {
        Some(Preemption::Interrupt(kind)) => source = Some(IntentSource::BackedInterrupt(kind)),
        Some(Preemption::Directive(kind)) => source = Some(IntentSource::Directive(kind)),
        None => {}
    }

    // ── Validation + queue ────────────────────────────────────────────────
    let invalid_target = match validate_target(&mut rec.intent, ctx.directory) {
        Ok(()) => None,
        Err(IntentError::InvalidTarget(target)) => {
            source = Some(IntentSource::Cleared);
            Some(target)
        }
    };
    rec.queue.discard_unusable(now, &cfg.queue, ctx.directory);
    if rec.queue.promote(&mut rec.intent, &mut rec.commitment, &cfg.commitment, now) {
        source = Some(IntentSource::Queue);
    }

    // ── Planner ───────────────────────────────────────────────────────────
    let (authored, plan_failure) =
        match rec.planner.update(&mut rec.goals, &rec.world, ctx.catalog, &cfg.planner, now) {
            Ok(PlanTick::Authored { goal, length }) => (Some((goal, length)), None),
            Ok(PlanTick::Unchanged | PlanTick::Completed) => (None, None),
            Err(PlanError::NoGoals) => (None, None),
            Err(e @ PlanError::PlanningFailed { .. }) => (None, Some(e)),
        };

    // ── Utility evaluator ─────────────────────────────────────────────────
    let transition = rec.utility.evaluate(&mut rec.ai_state, rec.handle, now, cfg.seed, &cfg.utility);

    // ── Directive propagation ─────────────────────────────────────────────
    propagate(&mut rec.directives, &mut rec.subordinate, &mut rec.utility, now, &cfg.directive);

    let intent = (!rec.intent.same_decision(&before))
        .then(|| (rec.intent.clone(), source.unwrap_or(IntentSource::Queue)));

    AgentReport {
        handle: rec.handle,
        intent,
        transition,
        authored,
        plan_failure,
        invalid_target,
    }
}

/// Sequential apply phase: logging, observer callbacks, counters.  Reports
/// arrive in ascending slot order.
fn apply_reports<O: CoreObserver>(reports: &[AgentReport], now: Tick, observer: &mut O) -> TickOutcome {
    let mut intent_changes = 0;
    let mut state_changes = 0;
    let mut plans_authored = 0;

    for r in reports {
        if let Some(target) = r.invalid_target {
            debug!(agent = %r.handle, %target, "intent cleared: target gone");
        }
        if let Some((intent, source)) = &r.intent {
            intent_changes += 1;
            debug!(
                agent = %r.handle,
                mode = intent.mode.as_str(),
                priority = intent.priority.as_str(),
                valid = intent.is_valid,
                ?source,
                "intent changed"
            );
            observer.on_intent_changed(now, r.handle, intent, *source);
        }
        if let Some(t) = r.transition {
            state_changes += 1;
            debug!(agent = %r.handle, from = t.from.as_str(), to = t.to.as_str(), "state switched");
            observer.on_state_changed(now, r.handle, t);
        }
        if let Some((goal, length)) = r.authored {
            plans_authored += 1;
            trace!(agent = %r.handle, %goal, length, "plan authored");
            observer.on_plan_authored(now, r.handle, goal, length);
        }
        if let Some(e) = r.plan_failure {
            debug!(agent = %r.handle, error = %e, "planning failed");
        }
    }

    TickOutcome::Ran { agents: reports.len(), intent_changes, state_changes, plans_authored }
}
