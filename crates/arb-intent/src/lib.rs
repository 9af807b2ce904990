//! `arb-intent` — the committed intent and everything that guards it.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`intent`]     | `Intent` — one committed behavior + target per agent         |
//! | [`commitment`] | `CommitmentConfig`, `CommitmentState`, `try_commit`, `GateDecision` |
//! | [`queue`]      | `IntentQueue` (FIFO of pending intents), `validate_target`   |
//! | [`error`]      | `IntentError`, `IntentResult<T>`                             |
//!
//! # Lock rule
//!
//! ```text
//! accept ⇔ active invalid/idle ∨ now >= lock_until_tick ∨ candidate.priority > active.priority
//! ```
//!
//! Every path that writes the active slot (interrupt handler, directive
//! override pass, queue promotion) goes through [`commitment::commit`], so
//! the lock and cooldown windows are always restarted together.

pub mod commitment;
pub mod error;
pub mod intent;
pub mod queue;


pub use commitment::{
    CommitmentConfig, CommitmentState, GateDecision, commit, try_commit, try_commit_soft,
};
pub use error::{IntentError, IntentResult};
pub use intent::Intent;
pub use queue::{IntentQueue, QueueConfig, QueuedIntent, validate_target};
