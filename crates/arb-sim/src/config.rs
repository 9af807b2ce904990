//! Aggregate decision-core configuration.

use arb_agent::AgentTemplate;
use arb_directive::DirectiveConfig;
use arb_intent::{CommitmentConfig, QueueConfig};
use arb_interrupt::InterruptConfig;
use arb_planner::PlannerConfig;
use arb_utility::UtilityConfig;

use crate::{SimError, SimResult};

/// Every tunable of the decision core.  Immutable while the core runs and
/// passed by reference into each stage.
///
/// | Field        | Default                                                    |
/// |--------------|------------------------------------------------------------|
/// | `seed`       | `0`                                                        |
/// | `interrupt`  | retention 300 ticks, buffer capacity 8                     |
/// | `commitment` | lock 20 ticks, cooldown 10 ticks                           |
/// | `queue`      | 8 entries, 600 ticks max age, rejected candidates dropped  |
/// | `planner`    | replan every 50 ticks, min confidence 0.3, decay 0.005/tick, 8 actions max |
/// | `utility`    | every 10 ticks, unit weights, noise ±0.01                  |
/// | `directive`  | no age decay                                               |
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionConfig {
    /// Master seed for the utility perturbation.
    pub seed:       u64,
    pub interrupt:  InterruptConfig,
    pub commitment: CommitmentConfig,
    pub queue:      QueueConfig,
    pub planner:    PlannerConfig,
    pub utility:    UtilityConfig,
    pub directive:  DirectiveConfig,
}

impl DecisionConfig {
    /// Reject values no stage can work with.
    pub fn validate(&self) -> SimResult<()> {
        let bad = |msg: &str| Err(SimError::Config(msg.to_string()));

        if self.planner.replan_interval == 0 {
            return bad("planner.replan_interval must be > 0");
        }
        if !(0.0..=1.0).contains(&self.planner.min_confidence) {
            return bad("planner.min_confidence must be within [0, 1]");
        }
        if !(self.planner.confidence_decay_per_tick >= 0.0) {
            return bad("planner.confidence_decay_per_tick must be >= 0");
        }
        let curve = &self.planner.insistence;
        if !(curve.growth_per_tick >= 0.0 && curve.pursued_decay_per_tick >= 0.0 && curve.max >= 0.0) {
            return bad("planner.insistence values must be >= 0");
        }
        if self.utility.weights.iter().any(|w| !w.is_finite()) {
            return bad("utility.weights must be finite");
        }
        if !(self.utility.noise_amplitude >= 0.0) || self.utility.noise_amplitude.is_infinite() {
            return bad("utility.noise_amplitude must be finite and >= 0");
        }
        Ok(())
    }

    /// An [`AgentTemplate`] whose capacity hints and replan interval follow
    /// this configuration.
    pub fn template(&self) -> AgentTemplate {
        AgentTemplate {
            interrupt_capacity: self.interrupt.buffer_capacity,
            queue_capacity:     self.queue.max_len,
            replan_interval:    self.planner.replan_interval,
            ..AgentTemplate::default()
        }
    }
}

/// Reject templates whose values no stage can work with.
pub fn validate_template(template: &AgentTemplate) -> SimResult<()> {
    let compliance = template.subordinate.compliance;
    if !(0.0..=1.0).contains(&compliance) {
        return Err(SimError::Config(format!("compliance {compliance} outside [0, 1]")));
    }
    if template.replan_interval == 0 {
        return Err(SimError::Config("template replan_interval must be > 0".to_string()));
    }
    Ok(())
}
