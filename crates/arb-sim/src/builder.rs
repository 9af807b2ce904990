//! Fluent builder for constructing a [`DecisionCore`].

use arb_agent::{AgentArenaBuilder, AgentTemplate};
use arb_core::{AgentHandle, SimClock, Tick};
use arb_planner::ActionCatalog;
use tracing::warn;

use crate::{DecisionConfig, DecisionCore, SimError, SimResult, validate_template};

/// Fluent builder for [`DecisionCore`].
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                          |
/// |----------------------|--------------------------------------------------|
/// | `.config(c)`         | `DecisionConfig::default()`, with one warning    |
/// | `.catalog(c)`        | Empty catalog (every plan attempt fails)         |
/// | `.agents(n, t)`      | No agents                                        |
/// | `.start_tick(t)`     | `Tick(0)`                                        |
///
/// # Example
///
/// ```rust,ignore
/// let config = DecisionConfig { seed: 42, ..DecisionConfig::default() };
/// let (mut core, handles) = CoreBuilder::new()
///     .agents(100, config.template())
///     .config(config)
///     .build()?;
/// core.run_ticks(10, &mut NoopObserver);
/// ```
#[derive(Default)]
pub struct CoreBuilder {
    config:     Option<DecisionConfig>,
    catalog:    ActionCatalog,
    agents:     AgentArenaBuilder,
    templates:  Vec<AgentTemplate>,
    start_tick: Tick,
}

impl CoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: DecisionConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn catalog(mut self, catalog: ActionCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Add `count` agents created from `template`.  Groups are spawned in the
    /// order they were added.
    pub fn agents(mut self, count: usize, template: AgentTemplate) -> Self {
        self.templates.push(template.clone());
        self.agents = self.agents.spawn(count, template);
        self
    }

    pub fn start_tick(mut self, tick: Tick) -> Self {
        self.start_tick = tick;
        self
    }

    /// Validate inputs and return a ready-to-run core plus the spawned
    /// handles in spawn order.
    pub fn build(self) -> SimResult<(DecisionCore, Vec<AgentHandle>)> {
        let config = match resolve(self.config) {
            Ok(c) => c,
            Err(SimError::ConfigMissing) => {
                warn!("no decision configuration supplied; using defaults");
                DecisionConfig::default()
            }
            Err(e) => return Err(e),
        };
        for template in &self.templates {
            validate_template(template)?;
        }

        let (arena, handles) = self.agents.build();
        let core = DecisionCore::new(config, SimClock::new(self.start_tick), arena, self.catalog);
        Ok((core, handles))
    }
}

fn resolve(config: Option<DecisionConfig>) -> SimResult<DecisionConfig> {
    let config = config.ok_or(SimError::ConfigMissing)?;
    config.validate()?;
    Ok(config)
}
