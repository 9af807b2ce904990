//! The per-agent option set and its evaluation pass.

use arb_core::{AgentHandle, Behavior, DecisionRng, Tick};

use crate::{AiState, StateTransition, UtilityConfig, UtilityOption};

/// An agent's scored options plus the evaluation cadence bookkeeping.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtilitySet {
    pub options: Vec<UtilityOption>,

    /// `None` until the first evaluation, which then runs immediately.
    pub last_evaluated_tick: Option<Tick>,
}

impl UtilitySet {
    pub fn new(options: Vec<UtilityOption>) -> Self {
        Self { options, last_evaluated_tick: None }
    }

    pub fn option(&self, id: Behavior) -> Option<&UtilityOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn option_mut(&mut self, id: Behavior) -> Option<&mut UtilityOption> {
        self.options.iter_mut().find(|o| o.id == id)
    }

    /// Whether the cadence allows an evaluation at `now`.
    pub fn is_due(&self, now: Tick, config: &UtilityConfig) -> bool {
        match self.last_evaluated_tick {
            None       => true,
            Some(last) => now.since(last) >= config.evaluation_interval.max(1),
        }
    }

    /// Re-score every option and switch `state` to the best one.
    ///
    /// Scores are `weighted_sum + directive_score + jitter`, the jitter drawn
    /// from a [`DecisionRng`] at `(run_seed, agent, now, option_index)`.
    /// The highest score wins; ties go to the lowest option id, and NaN
    /// scores never win.  Returns the transition if the selected behavior
    /// changed, `None` otherwise (including when the cadence is not due or
    /// there are no options).
    pub fn evaluate(
        &mut self,
        state:    &mut AiState,
        agent:    AgentHandle,
        now:      Tick,
        run_seed: u64,
        config:   &UtilityConfig,
    ) -> Option<StateTransition> {
        if !self.is_due(now, config) || self.options.is_empty() {
            return None;
        }
        self.last_evaluated_tick = Some(now);

        for (index, option) in self.options.iter_mut().enumerate() {
            let jitter = DecisionRng::new(run_seed, agent, now, index as u64)
                .jitter(config.noise_amplitude);
            option.final_score =
                config.weighted_sum(&option.component_scores) + option.directive_score + jitter;
            option.evaluated_tick = now;
        }

        let winner = best_option(&self.options)?;
        if winner.id == state.current_state {
            state.state_utility = winner.final_score;
            return None;
        }

        let transition = StateTransition {
            from:    state.current_state,
            to:      winner.id,
            utility: winner.final_score,
        };
        state.previous_state = state.current_state;
        state.current_state = winner.id;
        state.state_entered_tick = now;
        state.state_utility = winner.final_score;
        Some(transition)
    }
}

/// Highest `final_score`, ties to the lowest id, NaN excluded.
fn best_option(options: &[UtilityOption]) -> Option<&UtilityOption> {
    let mut best: Option<&UtilityOption> = None;
    for option in options.iter().filter(|o| !o.final_score.is_nan()) {
        best = match best {
            None => Some(option),
            Some(b) if option.final_score > b.final_score => Some(option),
            Some(b) if option.final_score == b.final_score && option.id < b.id => Some(option),
            keep => keep,
        };
    }
    best
}
