//! Candidate options, their configuration, and the agent's behavior state.

use arb_core::{Behavior, Tick};

// ── UtilityConfig ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtilityConfig {
    /// Re-score an agent's options every N ticks.  `0` and `1` both mean
    /// every tick.
    pub evaluation_interval: u64,

    /// Weight per component index.  Components past the end of this list
    /// are weighted `1.0`.
    pub weights: Vec<f32>,

    /// Half-width of the seeded jitter added to every final score.  Breaks
    /// ties between otherwise identical agents without wall-clock input.
    pub noise_amplitude: f32,
}

impl Default for UtilityConfig {
    fn default() -> Self {
        Self {
            evaluation_interval: 10,
            weights:             Vec::new(),
            noise_amplitude:     0.01,
        }
    }
}

impl UtilityConfig {
    #[inline]
    pub fn weight(&self, component: usize) -> f32 {
        self.weights.get(component).copied().unwrap_or(1.0)
    }

    /// Σ componentᵢ · weightᵢ.
    pub fn weighted_sum(&self, components: &[f32]) -> f32 {
        components
            .iter()
            .enumerate()
            .map(|(i, c)| c * self.weight(i))
            .sum()
    }
}

// ── UtilityOption ─────────────────────────────────────────────────────────────

/// One scored candidate behavior.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtilityOption {
    pub id: Behavior,

    /// Raw consideration scores, written by gameplay systems.
    pub component_scores: Vec<f32>,

    /// Bonus from standing orders.  Owned by directive propagation.
    pub directive_score: f32,

    pub final_score:    f32,
    pub evaluated_tick: Tick,
}

impl UtilityOption {
    pub fn new(id: Behavior, component_scores: Vec<f32>) -> Self {
        Self {
            id,
            component_scores,
            directive_score: 0.0,
            final_score:     0.0,
            evaluated_tick:  Tick::ZERO,
        }
    }
}

// ── AiState ───────────────────────────────────────────────────────────────────

/// The behavior currently selected by utility evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiState {
    pub current_state:      Behavior,
    pub previous_state:     Behavior,
    pub state_entered_tick: Tick,
    pub state_utility:      f32,
}

/// A behavior switch made by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateTransition {
    pub from:    Behavior,
    pub to:      Behavior,
    pub utility: f32,
}
