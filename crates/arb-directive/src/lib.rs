//! `arb-directive` — hierarchical orders from commanders to subordinates.
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`directive`] | `Directive`, `Subordinate`, `DirectiveList`                |
//! | [`propagate`] | `DirectiveConfig`, `ActiveOrder`, `standing_order`, `propagate` |
//!
//! Directive lists are owned per subordinate.  Commander systems append and
//! complete/cancel entries; the decision core resolves the standing order,
//! prunes finished entries, and turns the order into a utility bonus.
//! Cancelling a directive stops future boosts only: an intent it already
//! produced stays committed.

pub mod directive;
pub mod propagate;


pub use directive::{Directive, DirectiveList, Subordinate};
pub use propagate::{
    ActiveOrder, DirectiveConfig, Propagation, apply_boost, propagate, standing_order,
};
