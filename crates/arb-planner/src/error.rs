use arb_core::GoalId;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    /// The agent has no goal left to pursue.
    #[error("no unsatisfied goal to plan for")]
    NoGoals,

    /// Greedy search found no action sequence reaching the goal.
    /// `plan_confidence` has been set to 0; the planner retries at the next
    /// replan window.
    #[error("planning failed for {goal}")]
    PlanningFailed { goal: GoalId },
}

pub type PlanResult<T> = Result<T, PlanError>;
