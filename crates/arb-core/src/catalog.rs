//! Shared vocabularies: priorities, behaviors, and the interrupt catalog.
//!
//! These enums cross the boundary between the decision core and the systems
//! around it (perception/combat/comms producers upstream, execution systems
//! downstream), so their discriminants are fixed.  New variants are appended
//! only, and [`InterruptKind::CATALOG_VERSION`] is bumped when that happens.

use std::fmt;
use std::str::FromStr;

use crate::ArbError;

// ── Priority ──────────────────────────────────────────────────────────────────

/// Urgency of an interrupt, intent, or directive.  Higher wins.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Priority {
    #[default]
    Background = 0,
    Low        = 1,
    Medium     = 2,
    High       = 3,
    Critical   = 4,
}

impl Priority {
    pub const ALL: [Priority; 5] = [
        Priority::Background,
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Numeric weight used when priorities are mixed with continuous scores.
    #[inline]
    pub fn weight(self) -> f32 {
        f32::from(self.value())
    }

    /// Round a continuous effective priority down to the nearest level.
    ///
    /// NaN and negative inputs map to `Background`; anything above
    /// `Critical` saturates.
    pub fn from_weight(weight: f32) -> Priority {
        if weight.is_nan() || weight < 1.0 {
            return Priority::Background;
        }
        match weight as u32 {
            1 => Priority::Low,
            2 => Priority::Medium,
            3 => Priority::High,
            _ => Priority::Critical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Background => "background",
            Priority::Low        => "low",
            Priority::Medium     => "medium",
            Priority::High       => "high",
            Priority::Critical   => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ArbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ArbError::Parse(format!("unknown priority {s:?}")))
    }
}

// ── Behavior ──────────────────────────────────────────────────────────────────

/// A behavior an agent can be committed to.
///
/// Used as the intent mode, as the id of a utility option, and as the type
/// of a directive, so "the option matching the directive" is plain equality.
/// Declaration order is the tie-break order (lower wins).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Behavior {
    #[default]
    Idle        = 0,
    Attack      = 1,
    Defend      = 2,
    Flee        = 3,
    Investigate = 4,
    Assist      = 5,
    Regroup     = 6,
    Patrol      = 7,
    Gather      = 8,
    Rest        = 9,
}

impl Behavior {
    pub const ALL: [Behavior; 10] = [
        Behavior::Idle,
        Behavior::Attack,
        Behavior::Defend,
        Behavior::Flee,
        Behavior::Investigate,
        Behavior::Assist,
        Behavior::Regroup,
        Behavior::Patrol,
        Behavior::Gather,
        Behavior::Rest,
    ];

    #[inline]
    pub fn is_idle(self) -> bool {
        matches!(self, Behavior::Idle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Behavior::Idle        => "idle",
            Behavior::Attack      => "attack",
            Behavior::Defend      => "defend",
            Behavior::Flee        => "flee",
            Behavior::Investigate => "investigate",
            Behavior::Assist      => "assist",
            Behavior::Regroup     => "regroup",
            Behavior::Patrol      => "patrol",
            Behavior::Gather      => "gather",
            Behavior::Rest        => "rest",
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Behavior {
    type Err = ArbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Behavior::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ArbError::Parse(format!("unknown behavior {s:?}")))
    }
}

// ── InterruptKind ─────────────────────────────────────────────────────────────

/// The versioned catalog of stimuli producers may raise.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum InterruptKind {
    UnderAttack     = 0,
    EnemySpotted    = 1,
    AllyUnderAttack = 2,
    LowHealth       = 3,
    NoiseHeard      = 4,
    OrderReceived   = 5,
    MoraleBroken    = 6,
    ResourceSpotted = 7,
    TargetLost      = 8,
}

impl InterruptKind {
    /// Bumped whenever a variant is appended.
    pub const CATALOG_VERSION: u16 = 1;

    pub const ALL: [InterruptKind; 9] = [
        InterruptKind::UnderAttack,
        InterruptKind::EnemySpotted,
        InterruptKind::AllyUnderAttack,
        InterruptKind::LowHealth,
        InterruptKind::NoiseHeard,
        InterruptKind::OrderReceived,
        InterruptKind::MoraleBroken,
        InterruptKind::ResourceSpotted,
        InterruptKind::TargetLost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InterruptKind::UnderAttack     => "under_attack",
            InterruptKind::EnemySpotted    => "enemy_spotted",
            InterruptKind::AllyUnderAttack => "ally_under_attack",
            InterruptKind::LowHealth       => "low_health",
            InterruptKind::NoiseHeard      => "noise_heard",
            InterruptKind::OrderReceived   => "order_received",
            InterruptKind::MoraleBroken    => "morale_broken",
            InterruptKind::ResourceSpotted => "resource_spotted",
            InterruptKind::TargetLost      => "target_lost",
        }
    }
}

impl fmt::Display for InterruptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterruptKind {
    type Err = ArbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        InterruptKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ArbError::Parse(format!("unknown interrupt kind {s:?}")))
    }
}
