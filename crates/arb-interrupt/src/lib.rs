//! `arb-interrupt` — from raw stimuli to a committed intent.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`buffer`]   | `Interrupt`, `InterruptBuffer` (per-agent, insertion order) |
//! | [`table`]    | `mode_for` — fixed `InterruptKind → Behavior` lookup     |
//! | [`handler`]  | `InterruptConfig`, base handler `handle`                 |
//! | [`preempt`]  | directive-aware override pass `directive_pass`           |
//! | [`error`]    | `InterruptError`, `InterruptResult<T>`                   |
//!
//! # Per-tick order
//!
//! ```text
//! handle()          highest unprocessed → candidate → try_commit → prune
//! directive_pass()  boost options → backed interrupt? → order pre-emption?
//! ```
//!
//! Both passes touch only the owning agent's buffer, intent, and
//! commitment state, so agents can be processed in parallel.

pub mod buffer;
pub mod error;
pub mod handler;
pub mod preempt;
pub mod table;


pub use buffer::{Interrupt, InterruptBuffer};
pub use error::{InterruptError, InterruptResult};
pub use handler::{Handled, InterruptConfig, candidate_from, handle};
pub use preempt::{Preemption, backed_priority, directive_pass};
pub use table::mode_for;
