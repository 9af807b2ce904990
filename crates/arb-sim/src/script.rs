//! Interrupt input scripts.
//!
//! A script is a recorded or authored interrupt history, replayed into a
//! [`DecisionCore`][crate::DecisionCore] with
//! [`feed_script`][crate::DecisionCore::feed_script].  Feeding the same script
//! into two cores built from the same configuration yields identical state.
//!
//! # CSV format
//!
//! ```csv
//! tick,agent,kind,priority,target,x,y
//! 10,0,under_attack,high,7,12.5,-3
//! 12,0:1,noise_heard,low,,0,0
//! ```
//!
//! | Column     | Meaning                                                   |
//! |------------|-----------------------------------------------------------|
//! | `tick`     | Tick the interrupt is raised (its timestamp)              |
//! | `agent`    | Receiving agent: `index` or `index:generation`            |
//! | `kind`     | Interrupt kind, snake case (`under_attack`, …)            |
//! | `priority` | `background`, `low`, `medium`, `high`, `critical`         |
//! | `target`   | Optional target agent, same syntax as `agent`             |
//! | `x`, `y`   | Target position                                           |

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use arb_core::{AgentHandle, InterruptKind, Position, Priority, Tick};
use arb_interrupt::Interrupt;

use crate::{SimError, SimResult};

// ── InterruptScript ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptEntry {
    pub agent:     AgentHandle,
    pub interrupt: Interrupt,
}

/// Script entries keyed by tick (`BTreeMap<Tick, Vec<ScriptEntry>>`).
/// Entries for the same tick keep file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterruptScript {
    by_tick: BTreeMap<Tick, Vec<ScriptEntry>>,
}

impl InterruptScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, agent: AgentHandle, interrupt: Interrupt) {
        self.by_tick
            .entry(interrupt.timestamp)
            .or_default()
            .push(ScriptEntry { agent, interrupt });
    }

    pub fn len(&self) -> usize {
        self.by_tick.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tick.is_empty()
    }

    /// Tick of the earliest remaining entry.
    pub fn next_tick(&self) -> Option<Tick> {
        self.by_tick.keys().next().copied()
    }

    /// Remove and return every entry with tick `<= now`, in tick order.
    pub fn drain_due(&mut self, now: Tick) -> Vec<ScriptEntry> {
        let later = self.by_tick.split_off(&now.offset(1));
        let due = std::mem::replace(&mut self.by_tick, later);
        due.into_values().flatten().collect()
    }
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ScriptRecord {
    tick:     u64,
    agent:    String,
    kind:     String,
    priority: String,
    target:   Option<String>,
    x:        f32,
    y:        f32,
}

// ── Public API ────────────────────────────────────────────────────────────────

pub fn load_script_csv(path: &Path) -> SimResult<InterruptScript> {
    let file = std::fs::File::open(path)?;
    load_script_reader(file)
}

/// Like [`load_script_csv`] but accepts any `Read` source.
pub fn load_script_reader<R: Read>(reader: R) -> SimResult<InterruptScript> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut script = InterruptScript::new();

    for (row, result) in csv_reader.deserialize::<ScriptRecord>().enumerate() {
        let rec = result.map_err(|e| SimError::Parse(e.to_string()))?;
        let at = |e: String| SimError::Parse(format!("row {}: {e}", row + 1));

        let agent = parse_handle(&rec.agent).map_err(at)?;
        let kind: InterruptKind = rec.kind.trim().parse::<InterruptKind>().map_err(|e| at(e.to_string()))?;
        let priority: Priority = rec.priority.trim().parse::<Priority>().map_err(|e| at(e.to_string()))?;

        let mut interrupt = Interrupt::new(kind, priority, Tick(rec.tick)).at(Position::new(rec.x, rec.y));
        if let Some(target) = rec.target.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            interrupt = interrupt.with_target(parse_handle(target).map_err(at)?);
        }
        script.push(agent, interrupt);
    }

    Ok(script)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `"7"` → slot 7, generation 0; `"7:2"` → slot 7, generation 2.
fn parse_handle(s: &str) -> Result<AgentHandle, String> {
    let s = s.trim();
    let (index, generation) = match s.split_once(':') {
        Some((i, g)) => (i, g),
        None => (s, "0"),
    };
    let index = index.parse::<u32>().map_err(|_| format!("invalid agent handle: {s:?}"))?;
    let generation = generation.parse::<u32>().map_err(|_| format!("invalid agent handle: {s:?}"))?;
    Ok(AgentHandle::new(index, generation))
}
