//! Strongly typed identifiers.
//!
//! Agents are addressed by a generational [`AgentHandle`]: the `index` picks
//! the arena slot and the `generation` distinguishes successive occupants of
//! that slot.  A handle kept past its agent's despawn therefore never aliases
//! the agent that later reuses the slot.
//!
//! Catalog identifiers (`GoalId`, `ActionId`, `FactId`) are plain `u16`
//! wrappers generated by `typed_id!`.  All IDs are `Copy + Ord + Hash`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identifier of a goal within one agent's goal set.
    pub struct GoalId(u16);
}

typed_id! {
    /// Identifier of an action in an archetype's action catalog.
    pub struct ActionId(u16);
}

typed_id! {
    /// Identifier of a world-state fact the planner reasons over.
    pub struct FactId(u16);
}

// ── AgentHandle ───────────────────────────────────────────────────────────────

/// Stable reference to an agent: arena slot index plus slot generation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentHandle {
    pub index:      u32,
    pub generation: u32,
}

impl AgentHandle {
    #[inline]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index as `usize`, for indexing arena vectors.
    #[inline(always)]
    pub fn slot(self) -> usize {
        self.index as usize
    }

    /// Pack into a single `u64` (`generation << 32 | index`).
    ///
    /// This is the agent identity fed into RNG seeding, so two occupants of
    /// the same slot draw from different streams.
    #[inline]
    pub fn to_bits(self) -> u64 {
        (u64::from(self.generation) << 32) | u64::from(self.index)
    }

    #[inline]
    pub fn from_bits(bits: u64) -> Self {
        Self {
            index:      (bits & 0xFFFF_FFFF) as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

impl fmt::Display for AgentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Agent({}v{})", self.index, self.generation)
    }
}

// ── AgentDirectory ────────────────────────────────────────────────────────────

/// Read-only "does this agent still exist?" lookup.
///
/// Implemented by the agent arena's liveness table; stages that must check a
/// target take `&impl AgentDirectory` so they can run while the arena's
/// per-agent records are mutably borrowed.  Any `Fn(AgentHandle) -> bool`
/// also qualifies, which keeps tests short.
pub trait AgentDirectory: Sync {
    fn contains(&self, agent: AgentHandle) -> bool;
}

impl<F> AgentDirectory for F
where
    F: Fn(AgentHandle) -> bool + Sync,
{
    #[inline]
    fn contains(&self, agent: AgentHandle) -> bool {
        self(agent)
    }
}
