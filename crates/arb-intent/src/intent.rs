//! The committed intent: the one behavior an agent is pursuing right now.

use arb_core::{AgentHandle, Behavior, InterruptKind, Position, Priority, Tick};

/// The single committed behavior mode + target for one agent.
///
/// Written only by the decision core; read by execution systems, which are
/// also responsible for calling [`Intent::clear`] once the behavior
/// completes.  While `is_valid` is `false` the agent has no committed
/// behavior and execution must treat it as idle, whatever the other fields
/// still hold.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intent {
    pub mode:            Behavior,
    pub target_agent:    Option<AgentHandle>,
    pub target_position: Position,
    pub priority:        Priority,

    /// The interrupt kind this intent was derived from.  `None` for intents
    /// that came from a directive or were enqueued directly.
    pub triggering_interrupt_type: Option<InterruptKind>,

    /// Tick at which the intent was installed in the active slot.
    pub set_tick: Tick,
    pub is_valid: bool,
}

impl Default for Intent {
    fn default() -> Self {
        Self::none()
    }
}

impl Intent {
    /// The "no committed behavior" value every agent starts with.
    pub fn none() -> Self {
        Self {
            mode:                      Behavior::Idle,
            target_agent:              None,
            target_position:           Position::ORIGIN,
            priority:                  Priority::Background,
            triggering_interrupt_type: None,
            set_tick:                  Tick::ZERO,
            is_valid:                  false,
        }
    }

    /// A fresh, valid intent.  `set_tick` is restamped when it is committed.
    pub fn new(mode: Behavior, priority: Priority, now: Tick) -> Self {
        Self {
            mode,
            priority,
            set_tick: now,
            is_valid: true,
            ..Self::none()
        }
    }

    pub fn with_target(mut self, target: AgentHandle) -> Self {
        self.target_agent = Some(target);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.target_position = position;
        self
    }

    pub fn triggered_by(mut self, kind: InterruptKind) -> Self {
        self.triggering_interrupt_type = Some(kind);
        self
    }

    /// `true` if both intents commit the agent to the same thing: same
    /// validity, mode, targets and priority.  Any two invalid intents are
    /// the same decision; `set_tick` is ignored.
    pub fn same_decision(&self, other: &Intent) -> bool {
        if !self.is_valid && !other.is_valid {
            return true;
        }
        self.is_valid == other.is_valid
            && self.mode == other.mode
            && self.target_agent == other.target_agent
            && self.target_position == other.target_position
            && self.priority == other.priority
    }

    /// `true` if the agent is committed to something other than idling.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_valid && !self.mode.is_idle()
    }

    /// Drop the commitment.  Fields other than `is_valid` are left for
    /// diagnostics.
    #[inline]
    pub fn clear(&mut self) {
        self.is_valid = false;
    }
}
