//! Fixed interrupt-kind → behavior mapping.
//!
//! Changing an entry here changes replays; bump
//! [`InterruptKind::CATALOG_VERSION`] with it.

use arb_core::{Behavior, InterruptKind};

/// The behavior an agent adopts in response to `kind`.
#[inline]
pub const fn mode_for(kind: InterruptKind) -> Behavior {
    match kind {
        InterruptKind::UnderAttack     => Behavior::Attack,
        InterruptKind::EnemySpotted    => Behavior::Defend,
        InterruptKind::AllyUnderAttack => Behavior::Assist,
        InterruptKind::LowHealth       => Behavior::Flee,
        InterruptKind::NoiseHeard      => Behavior::Investigate,
        InterruptKind::OrderReceived   => Behavior::Regroup,
        InterruptKind::MoraleBroken    => Behavior::Flee,
        InterruptKind::ResourceSpotted => Behavior::Gather,
        InterruptKind::TargetLost      => Behavior::Patrol,
    }
}
