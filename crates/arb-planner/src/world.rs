//! Agent-local world state the planner reasons over.

use arb_core::FactId;

#[cfg(feature = "fx-hash")]
type FactMap = rustc_hash::FxHashMap<FactId, FactValue>;
#[cfg(not(feature = "fx-hash"))]
type FactMap = std::collections::HashMap<FactId, FactValue>;

// ── Facts ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FactValue {
    Bool(bool),
    Scalar(f32),
}

impl FactValue {
    /// Scalars are truthy when non-zero.
    #[inline]
    pub fn as_bool(self) -> bool {
        match self {
            FactValue::Bool(b) => b,
            FactValue::Scalar(v) => v != 0.0,
        }
    }

    #[inline]
    pub fn as_scalar(self) -> f32 {
        match self {
            FactValue::Bool(b) => f32::from(u8::from(b)),
            FactValue::Scalar(v) => v,
        }
    }
}

/// A test against one fact.  Missing facts read as `false` / `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    Is(FactId, bool),
    AtLeast(FactId, f32),
    AtMost(FactId, f32),
}

/// A change to one fact.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    Set(FactId, bool),
    SetScalar(FactId, f32),
    Add(FactId, f32),
}

// ── WorldState ────────────────────────────────────────────────────────────────

/// Boolean and scalar facts keyed by [`FactId`].
///
/// Only ever read by key, so hash-map iteration order never leaks into a
/// decision.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    facts: FactMap,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, fact: FactId) -> Option<FactValue> {
        self.facts.get(&fact).copied()
    }

    pub fn set(&mut self, fact: FactId, value: FactValue) {
        self.facts.insert(fact, value);
    }

    pub fn set_bool(&mut self, fact: FactId, value: bool) {
        self.set(fact, FactValue::Bool(value));
    }

    pub fn set_scalar(&mut self, fact: FactId, value: f32) {
        self.set(fact, FactValue::Scalar(value));
    }

    pub fn flag(&self, fact: FactId) -> bool {
        self.get(fact).is_some_and(FactValue::as_bool)
    }

    pub fn scalar(&self, fact: FactId) -> f32 {
        self.get(fact).map_or(0.0, FactValue::as_scalar)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn satisfies(&self, condition: &Condition) -> bool {
        match *condition {
            Condition::Is(f, want) => self.flag(f) == want,
            Condition::AtLeast(f, min) => self.scalar(f) >= min,
            Condition::AtMost(f, max) => self.scalar(f) <= max,
        }
    }

    pub fn satisfies_all(&self, conditions: &[Condition]) -> bool {
        conditions.iter().all(|c| self.satisfies(c))
    }

    pub fn apply(&mut self, effect: &Effect) {
        match *effect {
            Effect::Set(f, v) => self.set_bool(f, v),
            Effect::SetScalar(f, v) => self.set_scalar(f, v),
            Effect::Add(f, dv) => {
                let v = self.scalar(f) + dv;
                self.set_scalar(f, v);
            }
        }
    }

    pub fn apply_all(&mut self, effects: &[Effect]) {
        for e in effects {
            self.apply(e);
        }
    }
}
