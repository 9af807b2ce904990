//! Goals, actions, and the static action catalog.

use arb_core::{ActionId, Behavior, GoalId};

use crate::{Condition, Effect, WorldState};

// ── Goal ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Goal {
    pub id:         GoalId,
    pub insistence: f32,
    /// All must hold for the goal to be satisfied.
    pub target:     Vec<Condition>,
}

impl Goal {
    pub fn new(id: GoalId, insistence: f32, target: Vec<Condition>) -> Self {
        Self { id, insistence, target }
    }

    #[inline]
    pub fn is_satisfied(&self, world: &WorldState) -> bool {
        world.satisfies_all(&self.target)
    }

    /// Number of target conditions `world` meets.
    pub fn progress(&self, world: &WorldState) -> usize {
        self.target.iter().filter(|c| world.satisfies(c)).count()
    }
}

/// How insistence moves each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InsistenceCurve {
    /// Added every tick to goals that are not being pursued.
    pub growth_per_tick:        f32,
    /// Ceiling for growth.
    pub max:                    f32,
    /// Subtracted every tick from the goal being pursued (floored at 0).
    pub pursued_decay_per_tick: f32,
}

impl Default for InsistenceCurve {
    fn default() -> Self {
        Self { growth_per_tick: 0.01, max: 1.0, pursued_decay_per_tick: 0.02 }
    }
}

impl InsistenceCurve {
    /// Advance every goal's insistence by one tick.
    pub fn step(&self, goals: &mut [Goal], pursued: Option<GoalId>) {
        for goal in goals {
            goal.insistence = if Some(goal.id) == pursued {
                (goal.insistence - self.pursued_decay_per_tick).max(0.0)
            } else if goal.insistence < self.max {
                (goal.insistence + self.growth_per_tick).min(self.max)
            } else {
                goal.insistence
            };
        }
    }
}

/// The unsatisfied goal with maximum insistence.  Ties go to the lowest id;
/// NaN insistence is never selected.
pub fn select_goal<'a>(goals: &'a [Goal], world: &WorldState) -> Option<&'a Goal> {
    goals
        .iter()
        .filter(|g| !g.insistence.is_nan() && !g.is_satisfied(world))
        .fold(None, |best: Option<&Goal>, g| match best {
            Some(b) if b.insistence > g.insistence => Some(b),
            Some(b) if b.insistence == g.insistence && b.id < g.id => Some(b),
            _ => Some(g),
        })
}

// ── Action ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub id:            ActionId,
    /// What execution systems do while this action is current.
    pub behavior:      Behavior,
    pub cost:          f32,
    pub preconditions: Vec<Condition>,
    pub effects:       Vec<Effect>,
}

impl Action {
    pub fn new(id: ActionId, behavior: Behavior, cost: f32) -> Self {
        Self { id, behavior, cost, preconditions: Vec::new(), effects: Vec::new() }
    }

    pub fn requires(mut self, condition: Condition) -> Self {
        self.preconditions.push(condition);
        self
    }

    pub fn causes(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[inline]
    pub fn is_applicable(&self, world: &WorldState) -> bool {
        world.satisfies_all(&self.preconditions)
    }
}

/// Static set of actions, kept sorted by id.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionCatalog {
    actions: Vec<Action>,
}

impl ActionCatalog {
    /// Build a catalog.  Later duplicates of an id are dropped.
    pub fn new(mut actions: Vec<Action>) -> Self {
        actions.sort_by_key(|a| a.id);
        actions.dedup_by_key(|a| a.id);
        Self { actions }
    }

    pub fn get(&self, id: ActionId) -> Option<&Action> {
        self.actions
            .binary_search_by_key(&id, |a| a.id)
            .ok()
            .and_then(|i| self.actions.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
