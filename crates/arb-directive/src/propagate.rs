//! Directive → utility propagation.
//!
//! Each tick, for every subordinate:
//!
//! 1. Prune finished directives from its list.
//! 2. Pick the standing order: the active directive with the highest
//!    `issued_tick`.
//! 3. Effective priority = `priority × compliance`, optionally halved every
//!    `decay_half_life_ticks` since issue.
//! 4. Write it as `directive_score` on the option whose id equals the
//!    directive's type; every other option's `directive_score` returns to 0.
//!
//! [`standing_order`] is pure and is also used by the directive-aware
//! override pass so both stages see the same effective priority.

use arb_core::{AgentHandle, Behavior, Position, Priority, Tick};
use arb_utility::UtilitySet;

use crate::{DirectiveList, Subordinate};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectiveConfig {
    /// Ticks for a directive's effective priority to halve.  `0` disables
    /// decay.
    pub decay_half_life_ticks: u64,
}

/// The resolved standing order for one subordinate at one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveOrder {
    pub kind:               Behavior,
    pub priority:           Priority,
    pub effective_priority: f32,
    pub issued_tick:        Tick,
    pub target_agent:       Option<AgentHandle>,
    pub target_position:    Position,
}

impl ActiveOrder {
    /// The effective priority rounded down to a priority level, for
    /// comparison against intents.
    #[inline]
    pub fn effective_level(&self) -> Priority {
        Priority::from_weight(self.effective_priority)
    }
}

/// Result of one propagation pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Propagation {
    pub pruned: usize,
    pub order:  Option<ActiveOrder>,
}

/// Resolve the standing order without mutating anything.
pub fn standing_order(
    list:        &DirectiveList,
    subordinate: &Subordinate,
    now:         Tick,
    config:      &DirectiveConfig,
) -> Option<ActiveOrder> {
    let directive = list.active(now)?;
    let mut effective = subordinate.felt_priority(directive);
    if config.decay_half_life_ticks > 0 {
        let age = now.since(directive.issued_tick) as f32;
        effective *= 0.5_f32.powf(age / config.decay_half_life_ticks as f32);
    }
    Some(ActiveOrder {
        kind:               directive.kind,
        priority:           directive.priority,
        effective_priority: effective,
        issued_tick:        directive.issued_tick,
        target_agent:       directive.target_agent,
        target_position:    directive.target_position,
    })
}

/// Write the order's boost into the matching option and reset the rest.
pub fn apply_boost(options: &mut UtilitySet, order: Option<&ActiveOrder>) {
    for option in &mut options.options {
        option.directive_score = match order {
            Some(o) if o.kind == option.id => o.effective_priority,
            _ => 0.0,
        };
    }
}

/// Full per-tick propagation for one subordinate.
pub fn propagate(
    list:        &mut DirectiveList,
    subordinate: &mut Subordinate,
    options:     &mut UtilitySet,
    now:         Tick,
    config:      &DirectiveConfig,
) -> Propagation {
    let pruned = list.prune(now);
    let order = standing_order(list, subordinate, now, config);

    subordinate.has_standing_orders = order.is_some();
    if let Some(o) = &order {
        let newer = subordinate
            .last_order_received_tick
            .is_none_or(|last| o.issued_tick > last);
        if newer {
            subordinate.last_order_received_tick = Some(o.issued_tick);
        }
    }
    apply_boost(options, order.as_ref());

    Propagation { pruned, order }
}
