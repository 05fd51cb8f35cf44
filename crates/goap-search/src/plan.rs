//! Plan output data.
//!
//! A plan is dumb data: an ordered list of steps plus a status flag.
//! Execution belongs to external consumers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use goap_core::WorldState;

/// One step of a returned plan: the action taken, the cumulative cost once
/// it has been applied, and the resulting state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanStep {
    pub action: String,
    pub g: f64,
    pub state: WorldState,
}

/// How a `calculate` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlanStatus {
    /// A goal-satisfying sequence was found (possibly empty, when the start
    /// already satisfied the goal).
    Found,
    /// The open set drained without reaching the goal.
    NoPlan,
    /// An expansion or time budget was reached before the search finished.
    BudgetExhausted,
}

/// The result of a `calculate` call.
///
/// `steps` is empty for `NoPlan` and `BudgetExhausted`; partial plans are
/// never returned. The expansion count is exposed for external debugging
/// consumers that collect search statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanOutcome {
    pub status: PlanStatus,
    pub steps: Vec<PlanStep>,
    pub expansions: usize,
}

impl PlanOutcome {
    pub(crate) fn new(status: PlanStatus, steps: Vec<PlanStep>, expansions: usize) -> Self {
        Self {
            status,
            steps,
            expansions,
        }
    }

    pub fn is_found(&self) -> bool {
        self.status == PlanStatus::Found
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total plan cost: the cumulative cost at the final step, 0 for the
    /// empty plan.
    pub fn total_cost(&self) -> f64 {
        self.steps.last().map(|s| s.g).unwrap_or(0.0)
    }

    pub fn action_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.action.as_str()).collect()
    }
}
