//! Aggregation of named planners into a single best-plan query.

use std::collections::BTreeMap;

use tracing::debug;

use crate::plan::PlanOutcome;
use crate::planner::Planner;
use crate::PlanError;

/// The winning bucket of a `World::calculate` call.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldPlan {
    pub planner: String,
    pub outcome: PlanOutcome,
}

/// An ordered collection of named planners.
///
/// `calculate` runs every planner in ascending name order and keeps the
/// cheapest found plan; on equal total cost the earliest name wins, so the
/// result is deterministic.
#[derive(Debug, Clone, Default)]
pub struct World {
    planners: BTreeMap<String, Planner>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_planner(&mut self, name: impl Into<String>, planner: Planner) {
        self.planners.insert(name.into(), planner);
    }

    pub fn get(&self, name: &str) -> Option<&Planner> {
        self.planners.get(name)
    }

    pub fn len(&self) -> usize {
        self.planners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planners.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.planners.keys().map(String::as_str)
    }

    /// Run every planner and return the minimum-cost found plan, if any.
    ///
    /// Validation errors from any planner abort the whole query.
    pub fn calculate(&self) -> Result<Option<WorldPlan>, PlanError> {
        let mut best: Option<WorldPlan> = None;
        for (name, planner) in self.planners.iter() {
            let outcome = planner.calculate()?;
            if !outcome.is_found() {
                continue;
            }
            let better = match best.as_ref() {
                None => true,
                Some(current) => outcome.total_cost() < current.outcome.total_cost(),
            };
            if better {
                debug!(planner = %name, cost = outcome.total_cost(), "new best plan");
                best = Some(WorldPlan {
                    planner: name.clone(),
                    outcome,
                });
            }
        }
        Ok(best)
    }
}
