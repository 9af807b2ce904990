//! Directives and the per-subordinate directive store.

use arb_core::{AgentHandle, Behavior, Position, Priority, Tick};

// ── Directive ─────────────────────────────────────────────────────────────────

/// A standing order issued by a commander.
///
/// Commanders write these into their subordinates' [`DirectiveList`]s
/// upstream of the decision core; the core only reads them, and prunes the
/// ones that can no longer influence anything.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Directive {
    pub kind:     Behavior,
    pub priority: Priority,
    pub issuer:   Option<AgentHandle>,

    pub target_agent:    Option<AgentHandle>,
    pub target_position: Position,

    pub issued_tick: Tick,
    /// First tick at which the directive is no longer in force.  `None`
    /// means it stands until completed or cancelled.
    pub expiry_tick: Option<Tick>,

    pub is_completed: bool,
    pub is_cancelled: bool,
}

impl Directive {
    pub fn new(kind: Behavior, priority: Priority, issued_tick: Tick) -> Self {
        Self {
            kind,
            priority,
            issuer:          None,
            target_agent:    None,
            target_position: Position::ORIGIN,
            issued_tick,
            expiry_tick:     None,
            is_completed:    false,
            is_cancelled:    false,
        }
    }

    pub fn issued_by(mut self, commander: AgentHandle) -> Self {
        self.issuer = Some(commander);
        self
    }

    pub fn targeting(mut self, target: AgentHandle) -> Self {
        self.target_agent = Some(target);
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.target_position = position;
        self
    }

    pub fn expires_at(mut self, tick: Tick) -> Self {
        self.expiry_tick = Some(tick);
        self
    }

    #[inline]
    pub fn is_expired(&self, now: Tick) -> bool {
        self.expiry_tick.is_some_and(|e| now >= e)
    }

    /// `true` once the directive can never be in force again.
    #[inline]
    pub fn is_finished(&self, now: Tick) -> bool {
        self.is_completed || self.is_cancelled || self.is_expired(now)
    }

    /// In force at `now`: issued, not finished.
    #[inline]
    pub fn is_active(&self, now: Tick) -> bool {
        self.issued_tick <= now && !self.is_finished(now)
    }
}

// ── Subordinate ───────────────────────────────────────────────────────────────

/// How an agent relates to its commander's orders.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subordinate {
    pub commander: Option<AgentHandle>,

    /// Scales a directive's priority into its effective priority.  Values
    /// outside `[0, 1]` are clamped when used.
    pub compliance: f32,

    pub has_standing_orders:      bool,
    pub last_order_received_tick: Option<Tick>,
}

impl Default for Subordinate {
    fn default() -> Self {
        Self {
            commander:                None,
            compliance:               1.0,
            has_standing_orders:      false,
            last_order_received_tick: None,
        }
    }
}

impl Subordinate {
    pub fn under(commander: AgentHandle, compliance: f32) -> Self {
        Self { commander: Some(commander), compliance, ..Self::default() }
    }

    /// `directive.priority × compliance`, before any age decay.
    #[inline]
    pub fn felt_priority(&self, directive: &Directive) -> f32 {
        directive.priority.weight() * self.compliance.clamp(0.0, 1.0)
    }
}

// ── DirectiveList ─────────────────────────────────────────────────────────────

/// One subordinate's directives, in the order they were issued.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectiveList {
    directives: Vec<Directive>,
}

impl DirectiveList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.directives.iter()
    }

    /// Mutable access for the owning commander system (completion,
    /// cancellation).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Directive> {
        self.directives.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Cancel every directive of `kind`.  Returns how many were cancelled.
    pub fn cancel(&mut self, kind: Behavior) -> usize {
        let mut n = 0;
        for d in self.directives.iter_mut().filter(|d| d.kind == kind && !d.is_cancelled) {
            d.is_cancelled = true;
            n += 1;
        }
        n
    }

    /// The directive in force with the highest `issued_tick`.  Among equal
    /// ticks the one issued last wins.
    pub fn active(&self, now: Tick) -> Option<&Directive> {
        self.directives
            .iter()
            .filter(|d| d.is_active(now))
            .fold(None, |best: Option<&Directive>, d| match best {
                Some(b) if b.issued_tick > d.issued_tick => Some(b),
                _ => Some(d),
            })
    }

    /// Drop expired, cancelled, and completed directives.  Returns how many
    /// were removed.
    pub fn prune(&mut self, now: Tick) -> usize {
        let before = self.directives.len();
        self.directives.retain(|d| !d.is_finished(now));
        before - self.directives.len()
    }
}
