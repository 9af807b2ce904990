//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  All commitment windows,
//! replan cadences, and retention windows are expressed in whole ticks so the
//! arithmetic is exact and replays are bit-identical.
//!
//! `SimClock` also carries the [`SimMode`]: the decision core only runs while
//! the clock is authoritative (`Live`).  During rewind or fast-forward
//! catch-up the interrupts being replayed were already turned into intents
//! the first time round, so re-deriving them would double-apply effects.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0.saturating_add(n))
    }

    /// Ticks elapsed from `earlier` to `self`, or 0 if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        self.offset(rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimMode ──────────────────────────────────────────────────────────────────

/// Whether the surrounding simulation is producing new history or replaying
/// old history.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimMode {
    /// Authoritative live (or recording) play.  The decision core runs.
    #[default]
    Live,
    /// Rewinding through recorded history.
    Replaying,
    /// Catching up to a target tick after a load or rewind.
    FastForward,
}

impl SimMode {
    /// `true` only for the mode in which decisions may be derived.
    #[inline]
    pub fn is_authoritative(self) -> bool {
        matches!(self, SimMode::Live)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SimMode::Live        => "live",
            SimMode::Replaying   => "replaying",
            SimMode::FastForward => "fast-forward",
        }
    }
}

impl fmt::Display for SimMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The single global clock the decision core reads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
    pub mode:         SimMode,
}

impl SimClock {
    pub fn new(start: Tick) -> Self {
        Self { current_tick: start, mode: SimMode::Live }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.offset(1);
    }

    /// Jump to `tick` under `mode`, e.g. when the host rewinds.
    pub fn seek(&mut self, tick: Tick, mode: SimMode) {
        self.current_tick = tick;
        self.mode = mode;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, self.mode)
    }
}
