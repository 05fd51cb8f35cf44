//! Pluggable estimators of remaining plan cost.
//!
//! Every provider is a pure function of `(state, goal, context)`; the
//! context is precomputed once per `calculate` call.

use core::str::FromStr;

use goap_core::{Action, Mask, WorldState};
use thiserror::Error;

use crate::rpg::RelaxedPlanGraph;

/// Heuristic selection, by name at planner configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// Always 0. Turns A* into uniform-cost search; always admissible.
    Zero,
    /// Count of unsatisfied goal keys. Cheap, and inadmissible whenever a
    /// single action fixes several goal keys or costs vary widely.
    Mismatch,
    /// Mismatch divided by the most goal keys any single catalog action can
    /// fix. Admissible under uniform costs; `scale_by_min_cost` multiplies
    /// by the minimum catalog cost to keep admissibility when costs vary.
    DomainAware { scale_by_min_cost: bool },
    /// Sum of first-appearance layer indices in the relaxed planning graph
    /// built from the start state. Cost-agnostic raw layer counts.
    RpgAdd,
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::Zero
    }
}

/// Raised when a heuristic wire name does not match any provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown heuristic `{0}`")]
pub struct UnknownHeuristic(pub String);

impl FromStr for Heuristic {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero" => Ok(Heuristic::Zero),
            "mismatch" => Ok(Heuristic::Mismatch),
            "domain_aware" => Ok(Heuristic::DomainAware {
                scale_by_min_cost: false,
            }),
            "rpg_add" => Ok(Heuristic::RpgAdd),
            other => Err(UnknownHeuristic(other.to_string())),
        }
    }
}

/// Per-call precomputation a provider may need.
#[derive(Debug)]
pub(crate) enum HeuristicContext {
    None,
    DomainAware { max_fixes: usize, min_cost: f64 },
    Rpg(RelaxedPlanGraph),
}

impl Heuristic {
    pub(crate) fn build_context(
        &self,
        start: &WorldState,
        goal: &Mask,
        actions: &[Action],
    ) -> HeuristicContext {
        match self {
            Heuristic::Zero | Heuristic::Mismatch => HeuristicContext::None,
            Heuristic::DomainAware { .. } => {
                let mut max_fixes = 0usize;
                let mut min_cost = f64::INFINITY;
                for action in actions {
                    let fixes = goal
                        .required()
                        .filter(|(key, value)| action.effect.get(key) == Some(value))
                        .count();
                    max_fixes = max_fixes.max(fixes);
                    min_cost = min_cost.min(action.cost);
                }
                if !min_cost.is_finite() {
                    min_cost = 1.0;
                }
                HeuristicContext::DomainAware { max_fixes, min_cost }
            }
            Heuristic::RpgAdd => HeuristicContext::Rpg(RelaxedPlanGraph::build(start, actions)),
        }
    }

    /// Estimate the remaining cost from `state` to `goal`. Non-negative;
    /// `+inf` when the relaxed graph proves a goal value unreachable.
    pub(crate) fn estimate(
        &self,
        state: &WorldState,
        goal: &Mask,
        ctx: &HeuristicContext,
    ) -> f64 {
        match (self, ctx) {
            (Heuristic::Zero, _) => 0.0,
            (Heuristic::Mismatch, _) => state.mismatch(goal) as f64,
            (
                Heuristic::DomainAware { scale_by_min_cost },
                HeuristicContext::DomainAware { max_fixes, min_cost },
            ) => {
                let steps = state.mismatch(goal).div_ceil((*max_fixes).max(1));
                if *scale_by_min_cost {
                    steps as f64 * min_cost
                } else {
                    steps as f64
                }
            }
            (Heuristic::RpgAdd, HeuristicContext::Rpg(rpg)) => {
                let mut total = 0.0;
                for (key, value) in goal.required() {
                    if state.get(key) == Some(value) {
                        continue;
                    }
                    match rpg.first_level(key, value) {
                        Some(level) => total += level as f64,
                        None => return f64::INFINITY,
                    }
                }
                total
            }
            // Unreachable through the planner, which always builds the
            // matching context.
            _ => 0.0,
        }
    }
}
