//! `arb-core` — foundational types for the `arbiter` decision core.
//!
//! This crate is a dependency of every other `arb-*` crate.  It has no
//! `arb-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentHandle`, `AgentDirectory`, catalog ids          |
//! | [`catalog`]     | `Priority`, `Behavior`, `InterruptKind`               |
//! | [`position`]    | `Position`                                            |
//! | [`time`]        | `Tick`, `SimClock`, `SimMode`                         |
//! | [`rng`]         | `DecisionRng` (coordinate-seeded, replay-safe)        |
//! | [`error`]       | `ArbError`, `ArbResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod catalog;
pub mod error;
pub mod ids;
pub mod position;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use catalog::{Behavior, InterruptKind, Priority};
pub use error::{ArbError, ArbResult};
pub use ids::{ActionId, AgentDirectory, AgentHandle, FactId, GoalId};
pub use position::Position;
pub use rng::DecisionRng;
pub use time::{SimClock, SimMode, Tick};
