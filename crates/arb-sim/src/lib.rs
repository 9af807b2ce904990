//! `arb-sim` — the per-tick decision pipeline.
//!
//! # Tick pipeline
//!
//! ```text
//! tick(now):
//!   mode != Live          → Skipped(mode), nothing runs
//!   for each live agent (parallel with the `parallel` feature):
//!     ① interrupt handler + commitment gate
//!     ② directive-aware override pass
//!     ③ target validation, queue hygiene, queue promotion
//!     ④ planner (insistence, confidence, replan cadence)
//!     ⑤ utility evaluator (on cadence)
//!     ⑥ directive propagation
//!   apply reports in ascending handle order → tracing + CoreObserver
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`pipeline`] | `DecisionCore`, `TickOutcome`, `IntentSource`            |
//! | [`builder`]  | `CoreBuilder`                                            |
//! | [`config`]   | `DecisionConfig`, `validate_template`                    |
//! | [`observer`] | `CoreObserver`, `NoopObserver`                           |
//! | [`script`]   | `InterruptScript`, CSV loader                            |
//! | [`error`]    | `SimError`, `SimResult<T>`                               |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs per-agent updates on Rayon's thread pool.         |
//! | `fx-hash`  | FxHash for planner world-state lookup.                 |
//! | `serde`    | Serde derives on every configuration and state type.   |

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod pipeline;
pub mod script;

#[cfg(test)]
mod tests;

pub use builder::CoreBuilder;
pub use config::{DecisionConfig, validate_template};
pub use error::{SimError, SimResult};
pub use observer::{CoreObserver, NoopObserver};
pub use pipeline::{DecisionCore, IntentSource, TickOutcome};
pub use script::{InterruptScript, ScriptEntry, load_script_csv, load_script_reader};
