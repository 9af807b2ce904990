//! Fluent builder for populating an `AgentArena` in one step.
//!
//! # Usage
//!
//! ```rust
//! use arb_agent::{AgentArenaBuilder, AgentTemplate};
//!
//! let (arena, handles) = AgentArenaBuilder::new()
//!     .spawn(3, AgentTemplate::default())
//!     .build();
//!
//! assert_eq!(arena.len(), 3);
//! assert_eq!(handles.len(), 3);
//! ```

use arb_core::AgentHandle;

use crate::{AgentArena, AgentTemplate};

/// Fluent builder for [`AgentArena`].
///
/// Groups are spawned in the order they were added, so handle indices are
/// contiguous per group.
#[derive(Debug, Clone, Default)]
pub struct AgentArenaBuilder {
    groups: Vec<(usize, AgentTemplate)>,
}

impl AgentArenaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` agents created from `template`.
    pub fn spawn(mut self, count: usize, template: AgentTemplate) -> Self {
        self.groups.push((count, template));
        self
    }

    pub fn agent_count(&self) -> usize {
        self.groups.iter().map(|(n, _)| n).sum()
    }

    /// Construct the arena.  Returns the handles in spawn order.
    pub fn build(self) -> (AgentArena, Vec<AgentHandle>) {
        let mut arena = AgentArena::with_capacity(self.agent_count());
        let mut handles = Vec::with_capacity(self.agent_count());
        for (count, template) in &self.groups {
            for _ in 0..*count {
                handles.push(arena.spawn(template));
            }
        }
        (arena, handles)
    }
}
