//! Per-agent planner state machine and greedy forward search.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──▶ Planning ──▶ Executing ──▶ Replanning ──▶ Executing
//!   ▲          │             │
//!   └──────────┴─ failure ───┴── plan finished
//! ```
//!
//! A replan happens when any of these hold:
//!
//! * `needs_replan` is set (fresh agent, finished plan, external request);
//! * `now - plan_created_tick >= replan_interval`;
//! * the planner is executing and `plan_confidence < min_confidence`.
//!
//! A failed attempt also stamps `plan_created_tick`, so the next try waits
//! for the following replan window.
//!
//! # Search
//!
//! Greedy, no backtracking: from the current world state, repeatedly take the
//! applicable, not-yet-used action whose effects leave the most goal
//! conditions satisfied (ties: lower cost, then lower id), until the goal
//! holds or `max_plan_length` is reached.  Incomplete by construction; a
//! goal reachable only through a detour the heuristic never ranks first is
//! reported as [`PlanError::PlanningFailed`].

use std::cmp::Ordering;

use arb_core::{ActionId, Behavior, GoalId, Tick};

use crate::{ActionCatalog, Goal, InsistenceCurve, PlanError, PlanResult, WorldState, select_goal};

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    pub replan_interval:           u64,
    pub min_confidence:            f32,
    pub confidence_decay_per_tick: f32,
    pub max_plan_length:           usize,
    pub insistence:                InsistenceCurve,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            replan_interval:           50,
            min_confidence:            0.3,
            confidence_decay_per_tick: 0.005,
            max_plan_length:           8,
            insistence:                InsistenceCurve::default(),
        }
    }
}

// ── Plan types ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlannerPhase {
    #[default]
    Idle,
    Planning,
    Executing,
    Replanning,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannedAction {
    pub action:   ActionId,
    pub behavior: Behavior,
    pub cost:     f32,
}

/// What one [`AiPlanner::update`] call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlanTick {
    /// Nothing was due.
    Unchanged,
    /// A new plan was authored.
    Authored { goal: GoalId, length: usize },
    /// The last action was finished; a replan is due next tick.
    Completed,
}

// ── Search ────────────────────────────────────────────────────────────────────

/// Greedy forward search from `world` toward `goal`.
pub fn plan_greedy(
    world:   &WorldState,
    goal:    &Goal,
    catalog: &ActionCatalog,
    max_len: usize,
) -> PlanResult<Vec<PlannedAction>> {
    let failed = PlanError::PlanningFailed { goal: goal.id };
    let mut sim = world.clone();
    let mut plan: Vec<PlannedAction> = Vec::new();

    while !goal.is_satisfied(&sim) {
        if plan.len() >= max_len {
            return Err(failed);
        }
        let best = catalog
            .iter()
            .filter(|a| a.is_applicable(&sim) && plan.iter().all(|p| p.action != a.id))
            .map(|a| {
                let mut next = sim.clone();
                next.apply_all(&a.effects);
                (a, goal.progress(&next))
            })
            .max_by(|(a, sa), (b, sb)| {
                sa.cmp(sb)
                    .then(b.cost.partial_cmp(&a.cost).unwrap_or(Ordering::Equal))
                    .then(b.id.cmp(&a.id))
            });

        let Some((action, _)) = best else {
            return Err(failed);
        };
        sim.apply_all(&action.effects);
        plan.push(PlannedAction { action: action.id, behavior: action.behavior, cost: action.cost });
    }

    if plan.is_empty() {
        return Err(failed);
    }
    Ok(plan)
}

// ── AiPlanner ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiPlanner {
    pub current_goal:      Option<GoalId>,
    pub current_action:    Option<ActionId>,
    pub plan:              Vec<PlannedAction>,
    pub plan_length:       usize,
    pub plan_progress:     usize,
    pub plan_created_tick: Option<Tick>,
    pub plan_confidence:   f32,
    pub replan_interval:   u64,
    pub needs_replan:      bool,
    pub phase:             PlannerPhase,
}

impl Default for AiPlanner {
    fn default() -> Self {
        Self::new(PlannerConfig::default().replan_interval)
    }
}

impl AiPlanner {
    /// A fresh planner that plans on its first update.
    pub fn new(replan_interval: u64) -> Self {
        Self {
            current_goal:      None,
            current_action:    None,
            plan:              Vec::new(),
            plan_length:       0,
            plan_progress:     0,
            plan_created_tick: None,
            plan_confidence:   0.0,
            replan_interval,
            needs_replan:      true,
            phase:             PlannerPhase::Idle,
        }
    }

    pub fn is_executing(&self) -> bool {
        self.phase == PlannerPhase::Executing
    }

    /// The behavior of the action execution should be performing now.
    pub fn current_behavior(&self) -> Option<Behavior> {
        self.plan.get(self.plan_progress).map(|p| p.behavior)
    }

    /// Called by execution when the current action is done.
    pub fn advance(&mut self) {
        if self.plan_progress < self.plan_length {
            self.plan_progress += 1;
        }
        self.current_action = self.plan.get(self.plan_progress).map(|p| p.action);
    }

    pub fn should_replan(&self, now: Tick, config: &PlannerConfig) -> bool {
        if self.needs_replan {
            return true;
        }
        let due = self
            .plan_created_tick
            .is_none_or(|created| now.since(created) >= self.replan_interval);
        due || (self.is_executing() && self.plan_confidence < config.min_confidence)
    }

    /// One planner tick: bookkeeping for the running plan, insistence, and a
    /// replan if one is due.
    pub fn update(
        &mut self,
        goals:   &mut [Goal],
        world:   &WorldState,
        catalog: &ActionCatalog,
        config:  &PlannerConfig,
        now:     Tick,
    ) -> PlanResult<PlanTick> {
        if self.is_executing() {
            if self.plan_progress >= self.plan_length {
                self.finish();
                return Ok(PlanTick::Completed);
            }
            self.check_current_action(world, catalog, config);
        }

        let pursued = if self.is_executing() { self.current_goal } else { None };
        config.insistence.step(goals, pursued);

        if !self.should_replan(now, config) {
            return Ok(PlanTick::Unchanged);
        }
        self.replan(goals, world, catalog, config, now)
    }

    fn check_current_action(&mut self, world: &WorldState, catalog: &ActionCatalog, config: &PlannerConfig) {
        self.plan_confidence = (self.plan_confidence - config.confidence_decay_per_tick).max(0.0);
        let still_valid = self
            .current_action
            .and_then(|id| catalog.get(id))
            .is_some_and(|a| a.is_applicable(world));
        if !still_valid {
            self.plan_confidence = 0.0;
        }
    }

    fn replan(
        &mut self,
        goals:   &[Goal],
        world:   &WorldState,
        catalog: &ActionCatalog,
        config:  &PlannerConfig,
        now:     Tick,
    ) -> PlanResult<PlanTick> {
        self.phase = if self.is_executing() { PlannerPhase::Replanning } else { PlannerPhase::Planning };
        self.needs_replan = false;
        self.plan_created_tick = Some(now);

        let outcome = select_goal(goals, world)
            .ok_or(PlanError::NoGoals)
            .and_then(|goal| {
                self.current_goal = Some(goal.id);
                plan_greedy(world, goal, catalog, config.max_plan_length).map(|p| (goal.id, p))
            });

        match outcome {
            Ok((goal, plan)) => {
                self.plan_length = plan.len();
                self.plan_progress = 0;
                self.current_action = plan.first().map(|p| p.action);
                self.plan = plan;
                self.plan_confidence = 1.0;
                self.phase = PlannerPhase::Executing;
                Ok(PlanTick::Authored { goal, length: self.plan_length })
            }
            Err(e) => {
                if e == PlanError::NoGoals {
                    self.current_goal = None;
                }
                self.clear_plan();
                self.plan_confidence = 0.0;
                self.phase = PlannerPhase::Idle;
                Err(e)
            }
        }
    }

    fn finish(&mut self) {
        self.clear_plan();
        self.phase = PlannerPhase::Idle;
        self.needs_replan = true;
    }

    fn clear_plan(&mut self) {
        self.plan.clear();
        self.plan_length = 0;
        self.plan_progress = 0;
        self.current_action = None;
    }
}
