//! Unit tests for arb-planner.

use arb_core::{ActionId, Behavior, FactId, GoalId, Tick};

use crate::{
    Action, ActionCatalog, AiPlanner, Condition, Effect, Goal, InsistenceCurve, PlanError,
    PlanTick, PlannerConfig, PlannerPhase, WorldState, plan_greedy, select_goal,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const HAS_AXE: FactId = FactId(0);
const WOOD:    FactId = FactId(1);
const FED:     FactId = FactId(2);

const GET_AXE:   ActionId = ActionId(0);
const CHOP:      ActionId = ActionId(1);
const CHOP_HAND: ActionId = ActionId(2);
const EAT:       ActionId = ActionId(3);

fn catalog() -> ActionCatalog {
    ActionCatalog::new(vec![
        Action::new(GET_AXE, Behavior::Gather, 1.0).causes(Effect::Set(HAS_AXE, true)),
        Action::new(CHOP, Behavior::Gather, 1.0)
            .requires(Condition::Is(HAS_AXE, true))
            .causes(Effect::Add(WOOD, 5.0)),
        Action::new(CHOP_HAND, Behavior::Gather, 4.0).causes(Effect::Add(WOOD, 5.0)),
        Action::new(EAT, Behavior::Rest, 1.0)
            .requires(Condition::AtLeast(WOOD, 5.0))
            .causes(Effect::Set(FED, true)),
    ])
}

fn wood_goal() -> Goal {
    Goal::new(GoalId(0), 0.5, vec![Condition::AtLeast(WOOD, 5.0)])
}

fn cfg() -> PlannerConfig {
    PlannerConfig {
        insistence: InsistenceCurve { growth_per_tick: 0.0, max: 1.0, pursued_decay_per_tick: 0.0 },
        ..PlannerConfig::default()
    }
}

fn ids(plan: &[crate::PlannedAction]) -> Vec<ActionId> {
    plan.iter().map(|p| p.action).collect()
}

#[cfg(test)]
mod world_tests {
    use super::*;

    #[test]
    fn missing_facts_read_false_and_zero() {
        let w = WorldState::new();
        assert!(!w.flag(HAS_AXE));
        assert_eq!(w.scalar(WOOD), 0.0);
        assert!(w.satisfies(&Condition::Is(HAS_AXE, false)));
        assert!(w.satisfies(&Condition::AtMost(WOOD, 0.0)));
    }

    #[test]
    fn effects_apply() {
        let mut w = WorldState::new();
        w.apply_all(&[Effect::Add(WOOD, 2.0), Effect::Add(WOOD, 3.0), Effect::Set(FED, true)]);
        assert_eq!(w.scalar(WOOD), 5.0);
        assert!(w.flag(FED));
        assert_eq!(w.scalar(FED), 1.0);
    }
}

#[cfg(test)]
mod goal_tests {
    use super::*;

    #[test]
    fn max_insistence_ties_to_lowest_id() {
        let goals = vec![
            Goal::new(GoalId(3), 0.8, vec![Condition::Is(FED, true)]),
            Goal::new(GoalId(1), 0.8, vec![Condition::Is(FED, true)]),
            Goal::new(GoalId(0), 0.2, vec![Condition::Is(FED, true)]),
        ];
        assert_eq!(select_goal(&goals, &WorldState::new()).unwrap().id, GoalId(1));
    }

    #[test]
    fn satisfied_goals_are_skipped() {
        let mut w = WorldState::new();
        w.set_bool(FED, true);
        let goals = vec![
            Goal::new(GoalId(0), 0.9, vec![Condition::Is(FED, true)]),
            Goal::new(GoalId(1), 0.1, vec![Condition::AtLeast(WOOD, 1.0)]),
        ];
        assert_eq!(select_goal(&goals, &w).unwrap().id, GoalId(1));
    }

    #[test]
    fn insistence_grows_unless_pursued() {
        let curve = InsistenceCurve { growth_per_tick: 0.25, max: 1.0, pursued_decay_per_tick: 0.5 };
        let mut goals = vec![wood_goal(), Goal::new(GoalId(1), 0.9, vec![])];
        curve.step(&mut goals, Some(GoalId(0)));
        assert_eq!(goals[0].insistence, 0.0);
        assert_eq!(goals[1].insistence, 1.0, "capped at max");
        curve.step(&mut goals, None);
        assert_eq!(goals[0].insistence, 0.25);
        assert_eq!(goals[1].insistence, 1.0);
    }

    #[test]
    fn catalog_sorts_and_dedups() {
        let c = ActionCatalog::new(vec![
            Action::new(ActionId(5), Behavior::Rest, 1.0),
            Action::new(ActionId(2), Behavior::Patrol, 1.0),
            Action::new(ActionId(5), Behavior::Flee, 1.0),
        ]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.get(ActionId(5)).unwrap().behavior, Behavior::Rest);
        assert!(c.get(ActionId(9)).is_none());
    }
}

#[cfg(test)]
mod search_tests {
    use super::*;

    #[test]
    fn most_progress_then_lowest_cost() {
        let plan = plan_greedy(&WorldState::new(), &wood_goal(), &catalog(), 8).unwrap();
        // CHOP needs the axe first; of the immediately useful actions only
        // CHOP_HAND reaches the goal in one step.
        assert_eq!(ids(&plan), vec![CHOP_HAND]);

        let mut w = WorldState::new();
        w.set_bool(HAS_AXE, true);
        let plan = plan_greedy(&w, &wood_goal(), &catalog(), 8).unwrap();
        assert_eq!(ids(&plan), vec![CHOP]);
    }

    #[test]
    fn chains_through_enabling_actions() {
        let fed = Goal::new(GoalId(1), 0.5, vec![Condition::Is(FED, true)]);
        let plan = plan_greedy(&WorldState::new(), &fed, &catalog(), 8).unwrap();
        assert_eq!(ids(&plan), vec![GET_AXE, CHOP, EAT]);
    }

    #[test]
    fn length_cap_fails_planning() {
        let fed = Goal::new(GoalId(1), 0.5, vec![Condition::Is(FED, true)]);
        assert_eq!(
            plan_greedy(&WorldState::new(), &fed, &catalog(), 2),
            Err(PlanError::PlanningFailed { goal: GoalId(1) })
        );
    }

    #[test]
    fn unreachable_goal_fails() {
        let g = Goal::new(GoalId(4), 0.5, vec![Condition::AtLeast(FactId(9), 1.0)]);
        let empty = ActionCatalog::default();
        assert_eq!(
            plan_greedy(&WorldState::new(), &g, &empty, 8),
            Err(PlanError::PlanningFailed { goal: GoalId(4) })
        );
    }
}

#[cfg(test)]
mod planner_tests {
    use super::*;

    fn planned_at(tick: u64) -> (AiPlanner, Vec<Goal>, WorldState) {
        let mut p = AiPlanner::new(50);
        let mut goals = vec![wood_goal()];
        let w = WorldState::new();
        let out = p.update(&mut goals, &w, &catalog(), &cfg(), Tick(tick)).unwrap();
        assert_eq!(out, PlanTick::Authored { goal: GoalId(0), length: 1 });
        (p, goals, w)
    }

    #[test]
    fn first_update_authors_a_plan() {
        let (p, _, _) = planned_at(0);
        assert_eq!(p.phase, PlannerPhase::Executing);
        assert_eq!(p.plan_confidence, 1.0);
        assert_eq!(p.current_action, Some(CHOP_HAND));
        assert_eq!(p.current_behavior(), Some(Behavior::Gather));
        assert!(!p.needs_replan);
    }

    #[test]
    fn replans_on_interval() {
        let (mut p, mut goals, w) = planned_at(0);
        let out = p.update(&mut goals, &w, &catalog(), &cfg(), Tick(49)).unwrap();
        assert_eq!(out, PlanTick::Unchanged);
        let out = p.update(&mut goals, &w, &catalog(), &cfg(), Tick(50)).unwrap();
        assert!(matches!(out, PlanTick::Authored { .. }));
        assert_eq!(p.plan_created_tick, Some(Tick(50)));
    }

    #[test]
    fn low_confidence_replans_next_tick() {
        let (mut p, mut goals, w) = planned_at(0);
        p.plan_confidence = 0.2;
        let out = p.update(&mut goals, &w, &catalog(), &cfg(), Tick(11)).unwrap();
        assert!(matches!(out, PlanTick::Authored { .. }));
        assert_eq!(p.plan_confidence, 1.0);
    }

    #[test]
    fn confidence_decays_while_executing() {
        let (mut p, mut goals, w) = planned_at(0);
        p.update(&mut goals, &w, &catalog(), &cfg(), Tick(1)).unwrap();
        assert!((p.plan_confidence - 0.995).abs() < 1e-6);
    }

    #[test]
    fn broken_precondition_zeroes_confidence() {
        let mut p = AiPlanner::new(50);
        let mut goals = vec![wood_goal()];
        let mut w = WorldState::new();
        w.set_bool(HAS_AXE, true);
        p.update(&mut goals, &w, &catalog(), &cfg(), Tick(0)).unwrap();
        assert_eq!(p.current_action, Some(CHOP));

        w.set_bool(HAS_AXE, false);
        let out = p.update(&mut goals, &w, &catalog(), &cfg(), Tick(1)).unwrap();
        assert_eq!(out, PlanTick::Authored { goal: GoalId(0), length: 1 });
        assert_eq!(p.current_action, Some(CHOP_HAND));
    }

    #[test]
    fn completion_returns_to_idle() {
        let (mut p, mut goals, w) = planned_at(0);
        p.advance();
        assert_eq!(p.current_action, None);
        let out = p.update(&mut goals, &w, &catalog(), &cfg(), Tick(2)).unwrap();
        assert_eq!(out, PlanTick::Completed);
        assert_eq!(p.phase, PlannerPhase::Idle);
        assert!(p.needs_replan);
        assert!(p.plan.is_empty());
    }

    #[test]
    fn failure_waits_for_next_window() {
        let mut p = AiPlanner::new(50);
        let mut goals = vec![Goal::new(GoalId(7), 0.5, vec![Condition::AtLeast(FactId(9), 1.0)])];
        let w = WorldState::new();
        let c = catalog();

        let err = p.update(&mut goals, &w, &c, &cfg(), Tick(0)).unwrap_err();
        assert_eq!(err, PlanError::PlanningFailed { goal: GoalId(7) });
        assert_eq!(p.plan_confidence, 0.0);
        assert_eq!(p.phase, PlannerPhase::Idle);

        assert_eq!(p.update(&mut goals, &w, &c, &cfg(), Tick(1)), Ok(PlanTick::Unchanged));
        assert!(p.update(&mut goals, &w, &c, &cfg(), Tick(50)).is_err());
    }

    #[test]
    fn no_goals_is_reported() {
        let mut p = AiPlanner::default();
        let err = p.update(&mut [], &WorldState::new(), &catalog(), &cfg(), Tick(0)).unwrap_err();
        assert_eq!(err, PlanError::NoGoals);
        assert_eq!(p.current_goal, None);
    }
}
