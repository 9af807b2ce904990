//! skirmish — a small end-to-end run of the arbiter decision core.
//!
//! One squad leader, two subordinates, and three hostiles.  Stimuli arrive
//! from an embedded interrupt script; the leader issues a standing order
//! half-way through.  Every intent change is printed as it happens, then the
//! clock is switched to replay mode to show that nothing is re-derived.
//!
//! Set `RUST_LOG=arb_sim=debug` to see the pipeline's own tracing.

use std::io::Cursor;

use anyhow::Result;
use tracing::info;

use arb_agent::AgentTemplate;
use arb_core::{ActionId, AgentHandle, Behavior, FactId, GoalId, Priority, SimMode, Tick};
use arb_directive::{Directive, Subordinate};
use arb_intent::Intent;
use arb_planner::{Action, ActionCatalog, Condition, Effect, Goal};
use arb_sim::{CoreBuilder, CoreObserver, DecisionConfig, IntentSource, TickOutcome, load_script_reader};
use arb_utility::{StateTransition, UtilityOption};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:        u64 = 42;
const SIM_TICKS:   u64 = 60;
const ORDER_TICK:  u64 = 30;
const LEADER:      AgentHandle = AgentHandle::new(0, 0);

// Facts the planner reasons over.
const HAS_SUPPLIES: FactId = FactId(0);
const AT_RALLY:     FactId = FactId(1);

// ── Interrupt script ──────────────────────────────────────────────────────────

// Slots: 0 leader, 1–2 squad, 3–5 hostiles.
const SCRIPT_CSV: &str = "\
tick,agent,kind,priority,target,x,y\n\
2,1,noise_heard,low,,14,3\n\
5,1,enemy_spotted,medium,3,20,4\n\
8,2,resource_spotted,low,,6,-2\n\
10,1,under_attack,high,3,20,4\n\
12,3,under_attack,high,1,18,4\n\
18,2,ally_under_attack,medium,1,20,4\n\
24,1,low_health,critical,,18,4\n\
31,2,enemy_spotted,medium,4,25,0\n\
33,1,target_lost,low,,0,0\n\
40,4,morale_broken,high,,30,1\n\
";

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Narrator {
    intent_changes: usize,
    state_changes:  usize,
    plans:          usize,
    skipped:        usize,
}

impl CoreObserver for Narrator {
    fn on_tick_end(&mut self, _tick: Tick, outcome: &TickOutcome) {
        if matches!(outcome, TickOutcome::Skipped(_)) {
            self.skipped += 1;
        }
    }

    fn on_intent_changed(&mut self, tick: Tick, agent: AgentHandle, intent: &Intent, source: IntentSource) {
        self.intent_changes += 1;
        let target = intent.target_agent.map_or_else(|| "-".to_string(), |t| t.to_string());
        println!(
            "{tick:>5}  {agent:<8} {:<11} {:<9} target {target:<8} via {source:?}",
            if intent.is_valid { intent.mode.as_str() } else { "(cleared)" },
            intent.priority.as_str(),
        );
    }

    fn on_state_changed(&mut self, _tick: Tick, _agent: AgentHandle, _transition: StateTransition) {
        self.state_changes += 1;
    }

    fn on_plan_authored(&mut self, _tick: Tick, _agent: AgentHandle, _goal: GoalId, _length: usize) {
        self.plans += 1;
    }
}

// ── Archetypes ────────────────────────────────────────────────────────────────

fn catalog() -> ActionCatalog {
    ActionCatalog::new(vec![
        Action::new(ActionId(0), Behavior::Gather, 2.0).causes(Effect::Set(HAS_SUPPLIES, true)),
        Action::new(ActionId(1), Behavior::Regroup, 1.0)
            .requires(Condition::Is(HAS_SUPPLIES, true))
            .causes(Effect::Set(AT_RALLY, true)),
    ])
}

fn soldier(config: &DecisionConfig, commander: Option<AgentHandle>) -> AgentTemplate {
    AgentTemplate {
        options: vec![
            UtilityOption::new(Behavior::Patrol, vec![0.4, 0.2]),
            UtilityOption::new(Behavior::Defend, vec![0.3, 0.3]),
            UtilityOption::new(Behavior::Gather, vec![0.2, 0.1]),
            UtilityOption::new(Behavior::Regroup, vec![0.1, 0.1]),
        ],
        goals: vec![Goal::new(GoalId(0), 0.4, vec![Condition::Is(AT_RALLY, true)])],
        subordinate: commander.map_or_else(Subordinate::default, |c| Subordinate::under(c, 0.9)),
        ..config.template()
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("=== skirmish — arbiter decision core ===");
    println!("Seed: {SEED}  |  Ticks: {SIM_TICKS}");
    println!();

    let config = DecisionConfig { seed: SEED, ..DecisionConfig::default() };
    let (mut core, handles) = CoreBuilder::new()
        .agents(1, soldier(&config, None))
        .agents(2, soldier(&config, Some(LEADER)))
        .agents(3, soldier(&config, None))
        .catalog(catalog())
        .config(config)
        .build()?;
    info!(agents = handles.len(), "core built");

    let mut script = load_script_reader(Cursor::new(SCRIPT_CSV))?;
    println!("Loaded {} scripted interrupts", script.len());
    println!();
    println!(" tick  agent    mode        priority");

    let mut narrator = Narrator::default();
    for _ in 0..SIM_TICKS {
        if core.clock.current_tick == Tick(ORDER_TICK) {
            for &soldier in &handles[1..3] {
                let order = Directive::new(Behavior::Defend, Priority::High, Tick(ORDER_TICK))
                    .issued_by(LEADER)
                    .expires_at(Tick(ORDER_TICK + 20));
                core.issue_directive(soldier, order)?;
            }
            info!(tick = ORDER_TICK, "leader orders the squad to hold");
        }
        core.feed_script(&mut script);
        core.tick(&mut narrator);
    }

    // A replay system rewinding the clock: ticks are skipped, nothing changes.
    let before = core.arena.clone();
    core.seek(Tick(10), SimMode::Replaying);
    core.run_ticks(5, &mut narrator);
    anyhow::ensure!(core.arena == before, "replay ticks must not touch decision state");

    println!();
    println!("Intent changes : {}", narrator.intent_changes);
    println!("State switches : {}", narrator.state_changes);
    println!("Plans authored : {}", narrator.plans);
    println!("Replay skipped : {}", narrator.skipped);
    println!();
    for &h in &handles {
        let rec = core.agent(h)?;
        println!(
            "{h:<8} intent {:<11} state {:<10} orders {}",
            if rec.intent.is_valid { rec.intent.mode.as_str() } else { "(none)" },
            rec.ai_state.current_state.as_str(),
            rec.subordinate.has_standing_orders,
        );
    }

    Ok(())
}
