//! Per-agent decision state.

use arb_core::{AgentHandle, Behavior};
use arb_directive::{DirectiveList, Subordinate};
use arb_intent::{CommitmentState, Intent, IntentQueue};
use arb_interrupt::InterruptBuffer;
use arb_planner::{AiPlanner, Goal, WorldState};
use arb_utility::{AiState, UtilityOption, UtilitySet};

// ── AgentTemplate ─────────────────────────────────────────────────────────────

/// Initial values for a freshly spawned agent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentTemplate {
    /// Utility options, one per behavior the agent may switch to.
    pub options:     Vec<UtilityOption>,
    pub goals:       Vec<Goal>,
    pub world:       WorldState,
    pub subordinate: Subordinate,

    pub interrupt_capacity: usize,
    pub queue_capacity:     usize,
    pub replan_interval:    u64,
}

impl Default for AgentTemplate {
    /// Every non-idle behavior as an unscored option, no goals, no
    /// commander.
    fn default() -> Self {
        Self {
            options: Behavior::ALL
                .iter()
                .filter(|b| !b.is_idle())
                .map(|&b| UtilityOption::new(b, Vec::new()))
                .collect(),
            goals:              Vec::new(),
            world:              WorldState::new(),
            subordinate:        Subordinate::default(),
            interrupt_capacity: 8,
            queue_capacity:     8,
            replan_interval:    50,
        }
    }
}

// ── AgentRecord ───────────────────────────────────────────────────────────────

/// Everything the decision core owns for one agent.
///
/// Only the owning agent's update writes to a record, except for the two
/// producer-facing inboxes: `interrupts` (appended by stimulus producers) and
/// `directives` (appended by commanders), both between ticks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentRecord {
    pub handle: AgentHandle,

    pub interrupts: InterruptBuffer,
    pub intent:     Intent,
    pub commitment: CommitmentState,
    pub queue:      IntentQueue,

    pub planner: AiPlanner,
    pub goals:   Vec<Goal>,
    pub world:   WorldState,

    pub utility:  UtilitySet,
    pub ai_state: AiState,

    pub subordinate: Subordinate,
    pub directives:  DirectiveList,
}

impl AgentRecord {
    pub fn new(handle: AgentHandle, template: &AgentTemplate) -> Self {
        Self {
            handle,
            interrupts:  InterruptBuffer::with_capacity(template.interrupt_capacity),
            intent:      Intent::none(),
            commitment:  CommitmentState::default(),
            queue:       IntentQueue::with_capacity(template.queue_capacity),
            planner:     AiPlanner::new(template.replan_interval),
            goals:       template.goals.clone(),
            world:       template.world.clone(),
            utility:     UtilitySet::new(template.options.clone()),
            ai_state:    AiState::default(),
            subordinate: template.subordinate,
            directives:  DirectiveList::new(),
        }
    }
}
