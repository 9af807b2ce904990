//! Generational agent arena.
//!
//! # Why two structs?
//!
//! The parallel update needs `&mut` access to every record and, at the same
//! time, shared read access to "which handles are still alive" so targets can
//! be validated.  Keeping liveness in its own [`Liveness`] table lets the arena
//! hand out both borrows at once:
//!
//! ```ignore
//! let (liveness, slots) = arena.split_mut();
//! slots.par_iter_mut().flatten().for_each(|rec| update(rec, liveness));
//! ```

use arb_core::{AgentDirectory, AgentHandle};

use crate::{AgentRecord, AgentTemplate};

// ── Liveness ──────────────────────────────────────────────────────────────────

/// Slot generations and the free list.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Liveness {
    generations: Vec<u32>,
    alive:       Vec<bool>,
    /// Free slots, reused lowest-first.
    free:        Vec<u32>,
}

impl Liveness {
    pub fn slot_count(&self) -> usize {
        self.generations.len()
    }

    pub fn live_count(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }

    fn allocate(&mut self) -> AgentHandle {
        if let Some(index) = self.free.pop() {
            let slot = index as usize;
            self.alive[slot] = true;
            return AgentHandle::new(index, self.generations[slot]);
        }
        let index = self.generations.len() as u32;
        self.generations.push(0);
        self.alive.push(true);
        AgentHandle::new(index, 0)
    }

    fn release(&mut self, handle: AgentHandle) -> bool {
        if !self.contains(handle) {
            return false;
        }
        let slot = handle.slot();
        self.alive[slot] = false;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        // Keep the free list sorted descending so `pop` yields the lowest slot.
        let pos = self.free.partition_point(|&f| f > handle.index);
        self.free.insert(pos, handle.index);
        true
    }
}

impl AgentDirectory for Liveness {
    #[inline]
    fn contains(&self, handle: AgentHandle) -> bool {
        let slot = handle.slot();
        self.alive.get(slot).copied().unwrap_or(false)
            && self.generations.get(slot) == Some(&handle.generation)
    }
}

// ── AgentArena ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentArena {
    liveness: Liveness,
    records:  Vec<Option<AgentRecord>>,
}

impl AgentArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            liveness: Liveness {
                generations: Vec::with_capacity(capacity),
                alive:       Vec::with_capacity(capacity),
                free:        Vec::new(),
            },
            records: Vec::with_capacity(capacity),
        }
    }

    /// Create an agent from `template`.  Freed slots are reused (lowest
    /// first) under a new generation.
    pub fn spawn(&mut self, template: &AgentTemplate) -> AgentHandle {
        let handle = self.liveness.allocate();
        let record = AgentRecord::new(handle, template);
        match self.records.get_mut(handle.slot()) {
            Some(slot) => *slot = Some(record),
            None => self.records.push(Some(record)),
        }
        handle
    }

    /// Remove an agent.  Returns its final state, or `None` if the handle
    /// was already stale.
    pub fn despawn(&mut self, handle: AgentHandle) -> Option<AgentRecord> {
        if !self.liveness.release(handle) {
            return None;
        }
        self.records.get_mut(handle.slot()).and_then(Option::take)
    }

    #[inline]
    pub fn contains(&self, handle: AgentHandle) -> bool {
        self.liveness.contains(handle)
    }

    pub fn get(&self, handle: AgentHandle) -> Option<&AgentRecord> {
        if !self.contains(handle) {
            return None;
        }
        self.records.get(handle.slot()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, handle: AgentHandle) -> Option<&mut AgentRecord> {
        if !self.contains(handle) {
            return None;
        }
        self.records.get_mut(handle.slot()).and_then(Option::as_mut)
    }

    pub fn len(&self) -> usize {
        self.liveness.live_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }

    /// Live agents in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = &AgentRecord> {
        self.records.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut AgentRecord> {
        self.records.iter_mut().flatten()
    }

    /// Live handles in ascending slot order.
    pub fn handles(&self) -> Vec<AgentHandle> {
        self.iter().map(|r| r.handle).collect()
    }

    /// Shared liveness plus exclusive access to every slot.  Empty slots are
    /// `None`.
    pub fn split_mut(&mut self) -> (&Liveness, &mut [Option<AgentRecord>]) {
        (&self.liveness, &mut self.records)
    }
}
