//! `arb-planner` — goal-oriented action planning.
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`world`]   | `WorldState`, `FactValue`, `Condition`, `Effect`            |
//! | [`goal`]    | `Goal`, `InsistenceCurve`, `Action`, `ActionCatalog`        |
//! | [`planner`] | `AiPlanner`, `PlannerConfig`, `plan_greedy`                 |
//! | [`error`]   | `PlanError`, `PlanResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `serde`   | Adds `Serialize`/`Deserialize` to all public types.      |
//! | `fx-hash` | Uses `FxHashMap` for world-state facts.                  |

pub mod error;
pub mod goal;
pub mod planner;
pub mod world;

#[cfg(test)]
mod tests;

pub use error::{PlanError, PlanResult};
pub use goal::{Action, ActionCatalog, Goal, InsistenceCurve, select_goal};
pub use planner::{AiPlanner, PlanTick, PlannedAction, PlannerConfig, PlannerPhase, plan_greedy};
pub use world::{Condition, Effect, FactValue, WorldState};
