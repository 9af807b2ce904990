//! `arb-utility` — scored-option decision making.
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`option`]    | `UtilityOption`, `UtilityConfig`, `AiState`, `StateTransition` |
//! | [`evaluator`] | `UtilitySet` — per-agent options + cadence, `evaluate`      |
//!
//! Options are keyed by [`Behavior`](arb_core::Behavior), the same enum that
//! names intent modes and directive types.  Directive propagation writes
//! `directive_score` on the option whose id equals the directive's type;
//! evaluation folds it into `final_score`.

pub mod evaluator;
pub mod option;


pub use evaluator::UtilitySet;
pub use option::{AiState, StateTransition, UtilityConfig, UtilityOption};
