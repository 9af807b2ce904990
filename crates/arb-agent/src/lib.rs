//! `arb-agent` — agent storage for the arbiter decision core.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`record`]  | `AgentRecord` (all per-agent state), `AgentTemplate`         |
//! | [`arena`]   | `AgentArena` (generational slots), `Liveness`                |
//! | [`builder`] | `AgentArenaBuilder` (fluent construction)                    |
//!
//! Handles are `(index, generation)` pairs.  Despawning bumps the slot's
//! generation, so a handle held past its agent's lifetime is rejected by
//! [`Liveness`] (which implements `AgentDirectory`) rather than silently
//! addressing the slot's next occupant.

pub mod arena;
pub mod builder;
pub mod record;


pub use arena::{AgentArena, Liveness};
pub use builder::AgentArenaBuilder;
pub use record::{AgentRecord, AgentTemplate};
