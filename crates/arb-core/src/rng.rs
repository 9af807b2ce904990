//! Deterministic, replay-safe RNG.
//!
//! # Determinism strategy
//!
//! The decision core never holds long-lived RNG state.  Every random draw is
//! taken from a fresh `SmallRng` seeded from values that are themselves part
//! of the replayable simulation state:
//!
//!   seed = run_seed XOR agent_bits XOR tick XOR stream
//!
//! where `stream` is, for example, the index of a utility option.  The
//! combined value is scrambled by `SmallRng::seed_from_u64` before use, so
//! nearby inputs still produce uncorrelated streams.  Consequences:
//!
//! - Rewinding to tick `t` and re-running produces the same draws without
//!   checkpointing any RNG state.
//! - Agents never share RNG state, so the per-agent fan-out can run on any
//!   number of threads in any order.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentHandle, Tick};

/// Draws for one `(run, agent, tick, stream)` coordinate.
pub struct DecisionRng(SmallRng);

impl DecisionRng {
    /// Compose the seed for a coordinate.  Exposed for tests and diagnostics.
    #[inline]
    pub fn seed_for(run_seed: u64, agent: AgentHandle, tick: Tick, stream: u64) -> u64 {
        run_seed ^ agent.to_bits() ^ tick.0 ^ stream
    }

    pub fn new(run_seed: u64, agent: AgentHandle, tick: Tick, stream: u64) -> Self {
        DecisionRng(SmallRng::seed_from_u64(Self::seed_for(run_seed, agent, tick, stream)))
    }

    /// Symmetric jitter in `[-amplitude, amplitude)`.  Returns exactly `0.0`
    /// when `amplitude <= 0.0` without consuming a draw.
    #[inline]
    pub fn jitter(&mut self, amplitude: f32) -> f32 {
        if amplitude <= 0.0 {
            return 0.0;
        }
        let unit: f32 = self.0.r#gen();
        (unit * 2.0 - 1.0) * amplitude
    }
}
