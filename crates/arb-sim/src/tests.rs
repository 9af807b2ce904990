//! Integration tests for arb-sim.

use arb_agent::AgentTemplate;
use arb_core::{ActionId, AgentHandle, Behavior, FactId, GoalId, InterruptKind, Priority, SimMode, Tick};
use arb_directive::Directive;
use arb_intent::Intent;
use arb_interrupt::Interrupt;
use arb_planner::{Action, ActionCatalog, Condition, Effect, Goal};

use crate::{
    CoreBuilder, CoreObserver, DecisionConfig, DecisionCore, IntentSource, InterruptScript,
    NoopObserver, SimError, TickOutcome, load_script_reader,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config() -> DecisionConfig {
    DecisionConfig { seed: 42, ..DecisionConfig::default() }
}

fn core_at(n: usize, start: u64) -> (DecisionCore, Vec<AgentHandle>) {
    let config = test_config();
    CoreBuilder::new()
        .agents(n, config.template())
        .config(config)
        .start_tick(Tick(start))
        .build()
        .unwrap()
}

fn int(kind: InterruptKind, priority: Priority, tick: u64) -> Interrupt {
    Interrupt::new(kind, priority, Tick(tick))
}

fn intent_of(core: &DecisionCore, h: AgentHandle) -> Intent {
    core.agent(h).unwrap().intent.clone()
}

/// Records every intent change as `(tick, agent, mode, source)`.
#[derive(Default)]
struct IntentLog {
    changes:  Vec<(Tick, AgentHandle, Behavior, IntentSource)>,
    plans:    usize,
    ends:     usize,
}

impl CoreObserver for IntentLog {
    fn on_tick_end(&mut self, _tick: Tick, _outcome: &TickOutcome) {
        self.ends += 1;
    }

    fn on_intent_changed(&mut self, tick: Tick, agent: AgentHandle, intent: &Intent, source: IntentSource) {
        self.changes.push((tick, agent, intent.mode, source));
    }

    fn on_plan_authored(&mut self, _tick: Tick, _agent: AgentHandle, _goal: GoalId, _length: usize) {
        self.plans += 1;
    }
}

// ── CoreBuilder validation ────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let (core, handles) = CoreBuilder::new().agents(2, AgentTemplate::default()).build().unwrap();
        assert_eq!(core.config, DecisionConfig::default());
        assert_eq!(handles.len(), 2);
        assert_eq!(core.clock.current_tick, Tick(0));
    }

    #[test]
    fn zero_replan_interval_is_rejected() {
        let mut config = test_config();
        config.planner.replan_interval = 0;
        let result = CoreBuilder::new().config(config).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn nan_weight_is_rejected() {
        let mut config = test_config();
        config.utility.weights = vec![1.0, f32::NAN];
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_compliance_is_rejected() {
        let mut template = AgentTemplate::default();
        template.subordinate.compliance = 1.5;
        let result = CoreBuilder::new().config(test_config()).agents(1, template).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn template_follows_config() {
        let mut config = test_config();
        config.planner.replan_interval = 7;
        let t = config.template();
        assert_eq!(t.replan_interval, 7);
        assert_eq!(t.interrupt_capacity, 8);
    }
}

// ── Interrupt → intent scenarios ──────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn under_attack_commits_attack_on_e7() {
        let (mut core, h) = core_at(8, 10);
        let e7 = h[7];
        core.push_interrupt(h[0], int(InterruptKind::UnderAttack, Priority::High, 10).with_target(e7))
            .unwrap();

        let outcome = core.tick(&mut NoopObserver);
        assert!(matches!(outcome, TickOutcome::Ran { agents: 8, intent_changes: 1, .. }));

        let intent = intent_of(&core, h[0]);
        assert_eq!(intent.mode, Behavior::Attack);
        assert_eq!(intent.target_agent, Some(e7));
        assert_eq!(intent.priority, Priority::High);
        assert_eq!(intent.set_tick, Tick(10));
        assert!(intent.is_valid);
        assert!(core.agent(h[0]).unwrap().interrupts.get(0).unwrap().processed);
        assert_eq!(core.clock.current_tick, Tick(11));
    }

    #[test]
    fn lock_holds_until_strictly_higher_priority() {
        let (mut core, h) = core_at(1, 5);
        let a = h[0];
        core.push_interrupt(a, int(InterruptKind::NoiseHeard, Priority::Medium, 5)).unwrap();
        core.push_interrupt(a, int(InterruptKind::EnemySpotted, Priority::Medium, 10)).unwrap();
        core.push_interrupt(a, int(InterruptKind::LowHealth, Priority::Critical, 12)).unwrap();

        core.run_ticks(6, &mut NoopObserver); // ticks 5..=10
        let intent = intent_of(&core, a);
        assert_eq!(intent.mode, Behavior::Investigate);
        assert_eq!(intent.set_tick, Tick(5));
        assert_eq!(core.agent(a).unwrap().commitment.lock_until_tick, Tick(25));

        core.run_ticks(2, &mut NoopObserver); // ticks 11, 12
        let intent = intent_of(&core, a);
        assert_eq!(intent.mode, Behavior::Flee);
        assert_eq!(intent.priority, Priority::Critical);
        assert_eq!(core.agent(a).unwrap().commitment.lock_until_tick, Tick(32));
    }

    #[test]
    fn dead_target_clears_intent() {
        let (mut core, h) = core_at(2, 0);
        core.push_interrupt(h[0], int(InterruptKind::UnderAttack, Priority::High, 0).with_target(h[1]))
            .unwrap();
        core.tick(&mut NoopObserver);
        assert!(intent_of(&core, h[0]).is_valid);

        core.despawn(h[1]).unwrap();
        let mut log = IntentLog::default();
        core.tick(&mut log);

        assert!(!intent_of(&core, h[0]).is_valid);
        assert_eq!(log.changes, vec![(Tick(1), h[0], Behavior::Attack, IntentSource::Cleared)]);
    }

    #[test]
    fn rejected_candidate_is_promoted_from_queue() {
        let mut config = test_config();
        config.queue.enqueue_rejected = true;
        let (mut core, h) = CoreBuilder::new()
            .agents(1, config.template())
            .config(config)
            .build()
            .unwrap();
        core.push_interrupt(h[0], int(InterruptKind::UnderAttack, Priority::High, 0)).unwrap();
        core.push_interrupt(h[0], int(InterruptKind::NoiseHeard, Priority::Medium, 1)).unwrap();

        let mut log = IntentLog::default();
        core.run_ticks(20, &mut log); // ticks 0..=19
        assert_eq!(intent_of(&core, h[0]).mode, Behavior::Attack);
        assert_eq!(core.agent(h[0]).unwrap().queue.len(), 1);

        core.tick(&mut log); // tick 20: lock expired
        let intent = intent_of(&core, h[0]);
        assert_eq!(intent.mode, Behavior::Investigate);
        assert_eq!(intent.set_tick, Tick(20));
        assert_eq!(log.changes.last(), Some(&(Tick(20), h[0], Behavior::Investigate, IntentSource::Queue)));
    }

    #[test]
    fn stale_handle_is_reported() {
        let (mut core, h) = core_at(1, 0);
        core.despawn(h[0]).unwrap();
        let err = core.push_interrupt(h[0], int(InterruptKind::NoiseHeard, Priority::Low, 0));
        assert!(matches!(err, Err(SimError::AgentNotFound(a)) if a == h[0]));
        assert!(core.issue_directive(h[0], Directive::new(Behavior::Defend, Priority::High, Tick(0))).is_err());
    }
}

// ── Replay modes ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod mode_tests {
    use super::*;

    #[test]
    fn non_authoritative_modes_skip_everything() {
        let (mut core, h) = core_at(1, 0);
        core.push_interrupt(h[0], int(InterruptKind::UnderAttack, Priority::High, 0)).unwrap();

        for mode in [SimMode::Replaying, SimMode::FastForward] {
            core.seek(Tick(3), mode);
            let mut log = IntentLog::default();
            assert_eq!(core.tick(&mut log), TickOutcome::Skipped(mode));
            assert_eq!(log.ends, 1);
            assert_eq!(core.clock.current_tick, Tick(3));
        }
        assert!(!intent_of(&core, h[0]).is_valid);
        assert_eq!(core.agent(h[0]).unwrap().interrupts.unprocessed_count(), 1);

        core.seek(Tick(3), SimMode::Live);
        core.tick(&mut NoopObserver);
        assert_eq!(intent_of(&core, h[0]).mode, Behavior::Attack);
    }
}

// ── Directives ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod directive_tests {
    use super::*;

    #[test]
    fn standing_order_preempts_and_boosts() {
        let (mut core, h) = core_at(2, 0);
        let order = Directive::new(Behavior::Defend, Priority::High, Tick(0)).issued_by(h[1]);
        core.issue_directive(h[0], order).unwrap();

        let mut log = IntentLog::default();
        core.tick(&mut log);

        let rec = core.agent(h[0]).unwrap();
        assert_eq!(rec.intent.mode, Behavior::Defend);
        assert_eq!(rec.intent.priority, Priority::High);
        assert!(rec.subordinate.has_standing_orders);
        assert_eq!(rec.utility.option(Behavior::Defend).unwrap().directive_score, 3.0);
        assert_eq!(rec.ai_state.current_state, Behavior::Defend);
        assert_eq!(log.changes, vec![(Tick(0), h[0], Behavior::Defend, IntentSource::Directive(Behavior::Defend))]);
    }

    #[test]
    fn order_with_dead_target_settles_after_one_clear() {
        let (mut core, h) = core_at(2, 0);
        let order = Directive::new(Behavior::Attack, Priority::High, Tick(0)).targeting(h[1]);
        core.issue_directive(h[0], order).unwrap();

        let mut log = IntentLog::default();
        core.tick(&mut log);
        assert_eq!(intent_of(&core, h[0]).target_agent, Some(h[1]));

        core.despawn(h[1]).unwrap();
        let mut outcomes = Vec::new();
        for _ in 0..5 {
            outcomes.push(core.tick(&mut log));
        }

        assert_eq!(log.changes, vec![
            (Tick(0), h[0], Behavior::Attack, IntentSource::Directive(Behavior::Attack)),
            (Tick(1), h[0], Behavior::Attack, IntentSource::Cleared),
        ]);
        assert!(outcomes[1..].iter().all(|o| matches!(o, TickOutcome::Ran { intent_changes: 0, .. })));

        let rec = core.agent(h[0]).unwrap();
        assert!(!rec.intent.is_valid);
        assert_eq!(rec.commitment.lock_until_tick, Tick(20), "lock not restarted");
        assert!(rec.subordinate.has_standing_orders, "order still stands");
    }

    #[test]
    fn expired_order_stops_boosting() {
        let (mut core, h) = core_at(1, 0);
        let order = Directive::new(Behavior::Gather, Priority::Medium, Tick(0)).expires_at(Tick(2));
        core.issue_directive(h[0], order).unwrap();
        core.run_ticks(2, &mut NoopObserver);
        assert!(core.agent(h[0]).unwrap().subordinate.has_standing_orders);

        core.tick(&mut NoopObserver);
        let rec = core.agent(h[0]).unwrap();
        assert!(!rec.subordinate.has_standing_orders);
        assert!(rec.directives.is_empty());
        assert_eq!(rec.utility.option(Behavior::Gather).unwrap().directive_score, 0.0);
        assert_eq!(rec.intent.mode, Behavior::Gather, "intents never time out on their own");
    }
}

// ── Planner integration ───────────────────────────────────────────────────────

#[cfg(test)]
mod planner_tests {
    use super::*;

    #[test]
    fn plans_are_authored_on_cadence() {
        let mut config = test_config();
        config.planner.replan_interval = 5;
        let catalog = ActionCatalog::new(vec![
            Action::new(ActionId(0), Behavior::Gather, 1.0).causes(Effect::Set(FactId(0), true)),
        ]);
        let template = arb_agent::AgentTemplate {
            goals: vec![Goal::new(GoalId(0), 0.5, vec![Condition::Is(FactId(0), true)])],
            ..config.template()
        };
        let (mut core, h) = CoreBuilder::new()
            .agents(1, template)
            .catalog(catalog)
            .config(config)
            .build()
            .unwrap();

        let mut log = IntentLog::default();
        let first = core.tick(&mut log);
        assert!(matches!(first, TickOutcome::Ran { plans_authored: 1, .. }));
        assert_eq!(core.agent(h[0]).unwrap().planner.current_behavior(), Some(Behavior::Gather));

        core.run_ticks(5, &mut log); // ticks 1..=5
        assert_eq!(log.plans, 2);
    }
}

// ── Scripts ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod script_tests {
    use super::*;

    const SCRIPT: &str = "\
tick,agent,kind,priority,target,x,y
3,0,noise_heard,low,,1.5,2
1,1,under_attack,high,0,0,0
1,0:0,enemy_spotted,medium,1:0,4,4
";

    #[test]
    fn loads_and_drains_in_tick_order() {
        let mut script = load_script_reader(SCRIPT.as_bytes()).unwrap();
        assert_eq!(script.len(), 3);
        assert_eq!(script.next_tick(), Some(Tick(1)));

        let due = script.drain_due(Tick(2));
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].interrupt.kind, InterruptKind::UnderAttack);
        assert_eq!(due[1].interrupt.target_agent, Some(AgentHandle::new(1, 0)));
        assert_eq!(script.len(), 1);
        assert_eq!(script.drain_due(Tick(3))[0].interrupt.target_agent, None);
        assert!(script.is_empty());
    }

    #[test]
    fn bad_rows_name_the_row() {
        let bad = "tick,agent,kind,priority,target,x,y\n0,0,sneezed,low,,0,0\n";
        match load_script_reader(bad.as_bytes()) {
            Err(SimError::Parse(msg)) => assert!(msg.starts_with("row 1"), "{msg}"),
            other => panic!("expected parse error, got {other:?}"),
        }
        let bad_handle = "tick,agent,kind,priority,target,x,y\n0,x:1,noise_heard,low,,0,0\n";
        assert!(load_script_reader(bad_handle.as_bytes()).is_err());
    }

    #[test]
    fn feed_drops_entries_for_dead_agents() {
        let (mut core, h) = core_at(2, 1);
        core.despawn(h[1]).unwrap();
        let mut script = load_script_reader(SCRIPT.as_bytes()).unwrap();
        assert_eq!(core.feed_script(&mut script), 1);
        assert_eq!(core.agent(h[0]).unwrap().interrupts.len(), 1);
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism_tests {
    use proptest::prelude::*;

    use super::*;

    fn run(script: &InterruptScript, agents: usize) -> (DecisionCore, Vec<TickOutcome>) {
        let (mut core, h) = core_at(agents, 0);
        core.issue_directive(h[0], Directive::new(Behavior::Defend, Priority::Medium, Tick(4)))
            .unwrap();
        let mut script = script.clone();
        let mut outcomes = Vec::new();
        for _ in 0..40 {
            core.feed_script(&mut script);
            outcomes.push(core.tick(&mut NoopObserver));
        }
        (core, outcomes)
    }

    fn any_script(agents: u32) -> impl Strategy<Value = InterruptScript> {
        prop::collection::vec(
            (
                0u64..40,
                0..agents,
                prop::sample::select(InterruptKind::ALL.to_vec()),
                prop::sample::select(Priority::ALL.to_vec()),
                prop::option::of(0..agents),
            ),
            0..60,
        )
        .prop_map(|rows| {
            let mut s = InterruptScript::new();
            for (tick, agent, kind, priority, target) in rows {
                let mut i = Interrupt::new(kind, priority, Tick(tick));
                if let Some(t) = target {
                    i = i.with_target(AgentHandle::new(t, 0));
                }
                s.push(AgentHandle::new(agent, 0), i);
            }
            s
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Through every stage that writes the intent (handler, override
        /// pass, queue promotion), nothing of equal or lower priority
        /// replaces a locked intent.
        #[test]
        fn lock_holds_through_pipeline(script in any_script(3)) {
            let mut config = test_config();
            config.queue.enqueue_rejected = true;
            let (mut core, h) = CoreBuilder::new()
                .agents(3, config.template())
                .config(config)
                .build()
                .unwrap();
            let mut script = script;

            for _ in 0..60 {
                let now = core.clock.current_tick;
                let before: Vec<_> = h
                    .iter()
                    .map(|&a| {
                        let rec = core.agent(a).unwrap();
                        (rec.intent.clone(), rec.commitment.lock_until_tick)
                    })
                    .collect();

                core.feed_script(&mut script);
                core.tick(&mut NoopObserver);

                for (&a, (old, lock_until)) in h.iter().zip(before) {
                    let new = intent_of(&core, a);
                    let replaced = new.is_valid && new.set_tick == now && !new.same_decision(&old);
                    if replaced && old.is_active() && now < lock_until {
                        prop_assert!(
                            new.priority > old.priority,
                            "{a} at {now}: {:?} replaced {:?} under lock", new, old
                        );
                    }
                }
            }
        }

        /// Two runs over the same input history end in identical state.
        #[test]
        fn identical_inputs_identical_state(script in any_script(6)) {
            let (a, out_a) = run(&script, 6);
            let (b, out_b) = run(&script, 6);
            prop_assert_eq!(out_a, out_b);
            prop_assert!(a.arena == b.arena);
        }
    }
}
