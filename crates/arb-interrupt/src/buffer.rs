//! Interrupts and the per-agent interrupt buffer.

use arb_core::{AgentHandle, InterruptKind, Position, Priority, Tick};

// ── Interrupt ─────────────────────────────────────────────────────────────────

/// A timestamped, prioritized stimulus raised by a producer system.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interrupt {
    pub kind:            InterruptKind,
    pub priority:        Priority,
    pub target_agent:    Option<AgentHandle>,
    pub target_position: Position,
    pub timestamp:       Tick,

    /// Set once the handler has looked at this entry.  Processed entries
    /// are never selected by the base handler again.
    pub processed:      bool,
    pub processed_tick: Option<Tick>,

    /// Set when this entry became the active intent.  A processed entry
    /// that was *not* consumed (the commitment gate refused it) may still
    /// be converted by the directive-aware pass.
    pub consumed: bool,
}

impl Interrupt {
    pub fn new(kind: InterruptKind, priority: Priority, timestamp: Tick) -> Self {
        Self {
            kind,
            priority,
            target_agent:    None,
            target_position: Position::ORIGIN,
            timestamp,
            processed:       false,
            processed_tick:  None,
            consumed:        false,
        }
    }

    pub fn with_target(mut self, target: AgentHandle) -> Self {
        self.target_agent = Some(target);
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.target_position = position;
        self
    }

    #[inline]
    pub(crate) fn mark_processed(&mut self, now: Tick) {
        self.processed = true;
        self.processed_tick = Some(now);
    }
}

// ── InterruptBuffer ───────────────────────────────────────────────────────────

/// Growable per-agent queue, scanned in insertion order.
///
/// Producers only ever [`push`](Self::push).  Everything else is done by
/// the handler stages during the owning agent's update.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterruptBuffer {
    entries: Vec<Interrupt>,
}

impl InterruptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, interrupt: Interrupt) {
        self.entries.push(interrupt);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interrupt> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Interrupt> {
        self.entries.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Interrupt> {
        self.entries.get_mut(index)
    }

    pub fn unprocessed_count(&self) -> usize {
        self.entries.iter().filter(|i| !i.processed).count()
    }

    /// Index of the highest-priority unprocessed entry that has arrived by
    /// `now`.  Ties go to the lowest index (first seen).
    pub fn highest_unprocessed(&self, now: Tick) -> Option<usize> {
        let mut best: Option<(usize, Priority)> = None;
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.processed || entry.timestamp > now {
                continue;
            }
            match best {
                Some((_, p)) if p >= entry.priority => {}
                _ => best = Some((i, entry.priority)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Remove entries processed more than `retention_ticks` ago.  Returns
    /// how many were removed.
    pub fn prune(&mut self, now: Tick, retention_ticks: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|i| match i.processed_tick {
            Some(at) if i.processed => now.since(at) <= retention_ticks,
            _ => true,
        });
        before - self.entries.len()
    }
}
