//! Forward A* search over symbolic world states.

use std::collections::{BTreeSet, HashMap};
use std::time::{Duration, Instant};

use goap_core::{Catalog, Mask, WorldState};
use tracing::{debug, trace};

use crate::heuristic::Heuristic;
use crate::open::{OpenEntry, OpenHeap};
use crate::plan::{PlanOutcome, PlanStatus, PlanStep};
use crate::PlanError;

/// Search budgets, checked at the top of each pop-and-expand iteration.
/// `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlannerConfig {
    pub max_expansions: Option<usize>,
    pub time_budget: Option<Duration>,
}

/// Synthetic action name carried by the start node.
const START_ACTION: &str = "start";

/// Arena-owned search node. Parent links are arena ids, never references.
#[derive(Debug, Clone)]
struct Node {
    state: WorldState,
    g: f64,
    h: f64,
    f: f64,
    parent: Option<usize>,
    action: String,
}

/// A single-goal planner over a fixed universe of state keys.
///
/// All search data (arena, open, closed) is owned by the `calculate` call
/// and released on return; repeated calls on the same configuration are
/// independent and deterministic.
#[derive(Debug, Clone)]
pub struct Planner {
    universe: BTreeSet<String>,
    start: WorldState,
    goal: Mask,
    catalog: Catalog,
    heuristic: Heuristic,
    config: PlannerConfig,
}

impl Planner {
    /// Create a planner over the enumerated universe of state keys.
    pub fn new<I, K>(universe: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            universe: universe.into_iter().map(Into::into).collect(),
            start: WorldState::new(),
            goal: Mask::new(),
            catalog: Catalog::new(),
            heuristic: Heuristic::default(),
            config: PlannerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> PlannerConfig {
        self.config
    }

    pub fn universe(&self) -> impl Iterator<Item = &str> {
        self.universe.iter().map(String::as_str)
    }

    /// Set the start state. Keys unspecified here are treated as unknown:
    /// they satisfy no requirement until some effect writes them.
    pub fn set_start_state(&mut self, state: WorldState) -> Result<(), PlanError> {
        if let Some(key) = state.keys().find(|k| !self.universe.contains(*k)) {
            return Err(PlanError::UnknownKey {
                key: key.to_string(),
            });
        }
        self.start = state;
        Ok(())
    }

    /// Set the goal mask. Wildcard entries are ignored by the search.
    pub fn set_goal_state(&mut self, goal: Mask) -> Result<(), PlanError> {
        if let Some(key) = goal.keys().find(|k| !self.universe.contains(*k)) {
            return Err(PlanError::UnknownKey {
                key: key.to_string(),
            });
        }
        self.goal = goal;
        Ok(())
    }

    /// Snapshot the caller's catalog. The caller's tables are copied and
    /// never observed again, so later mutations cannot corrupt a search.
    pub fn set_action_list(&mut self, catalog: &Catalog) {
        self.catalog = catalog.clone();
    }

    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.heuristic = heuristic;
    }

    /// Run A* from the configured start to the configured goal.
    ///
    /// Validation failures surface as errors before any search; an
    /// infeasible or over-budget search is a status on the outcome.
    pub fn calculate(&self) -> Result<PlanOutcome, PlanError> {
        let started = Instant::now();
        let actions = self.catalog.validate()?;

        debug!(
            actions = actions.len(),
            heuristic = ?self.heuristic,
            "calculate"
        );

        if self.start.satisfies(&self.goal) {
            return Ok(PlanOutcome::new(PlanStatus::Found, Vec::new(), 0));
        }

        let ctx = self.heuristic.build_context(&self.start, &self.goal, &actions);

        let mut arena: Vec<Node> = Vec::new();
        let mut open = OpenHeap::new();
        let mut closed: HashMap<String, usize> = HashMap::new();

        let h0 = self.heuristic.estimate(&self.start, &self.goal, &ctx);
        let start_key = self.start.canonical_key();
        arena.push(Node {
            state: self.start.clone(),
            g: 0.0,
            h: h0,
            f: h0,
            parent: None,
            action: START_ACTION.to_string(),
        });
        open.push(OpenEntry {
            f: h0,
            g: 0.0,
            action: START_ACTION.to_string(),
            key: start_key,
            node: 0,
        });

        let mut expansions: usize = 0;

        loop {
            if open.is_empty() {
                debug!(expansions, "open set drained, no plan");
                return Ok(PlanOutcome::new(PlanStatus::NoPlan, Vec::new(), expansions));
            }
            if let Some(max) = self.config.max_expansions {
                if expansions >= max {
                    debug!(expansions, "expansion budget exhausted");
                    return Ok(PlanOutcome::new(
                        PlanStatus::BudgetExhausted,
                        Vec::new(),
                        expansions,
                    ));
                }
            }
            if let Some(budget) = self.config.time_budget {
                if started.elapsed() >= budget {
                    debug!(expansions, "time budget exhausted");
                    return Ok(PlanOutcome::new(
                        PlanStatus::BudgetExhausted,
                        Vec::new(),
                        expansions,
                    ));
                }
            }

            let Some(entry) = open.pop() else {
                return Ok(PlanOutcome::new(PlanStatus::NoPlan, Vec::new(), expansions));
            };
            expansions += 1;

            let node_id = entry.node;
            let (node_state, node_g) = {
                let node = &arena[node_id];
                (node.state.clone(), node.g)
            };

            if node_state.satisfies(&self.goal) {
                let steps = reconstruct(&arena, node_id);
                debug!(expansions, steps = steps.len(), "plan found");
                return Ok(PlanOutcome::new(PlanStatus::Found, steps, expansions));
            }

            closed.insert(entry.key, node_id);

            for action in &actions {
                if !node_state.satisfies(&action.precondition) {
                    continue;
                }
                let succ = node_state.apply(&action.effect);
                if succ == node_state {
                    // No-op application; the successor would loop forever.
                    continue;
                }
                let succ_key = succ.canonical_key();
                let tentative_g = node_g + action.cost;

                if let Some(&closed_id) = closed.get(&succ_key) {
                    if arena[closed_id].g <= tentative_g {
                        continue;
                    }
                    // Strictly cheaper path to an expanded state: reopen.
                    closed.remove(&succ_key);
                    let node = &mut arena[closed_id];
                    node.g = tentative_g;
                    node.f = tentative_g + node.h;
                    node.parent = Some(node_id);
                    node.action = action.name.clone();
                    trace!(action = %action.name, g = tentative_g, "reopen");
                    open.push(OpenEntry {
                        f: node.f,
                        g: node.g,
                        action: action.name.clone(),
                        key: succ_key,
                        node: closed_id,
                    });
                    continue;
                }

                if let Some((open_g, open_id)) = open.get(&succ_key).map(|e| (e.g, e.node)) {
                    if open_g <= tentative_g {
                        continue;
                    }
                    let node = &mut arena[open_id];
                    node.g = tentative_g;
                    node.f = tentative_g + node.h;
                    node.parent = Some(node_id);
                    node.action = action.name.clone();
                    let f = node.f;
                    open.update(&succ_key, f, tentative_g, &action.name);
                    continue;
                }

                let h = self.heuristic.estimate(&succ, &self.goal, &ctx);
                let id = arena.len();
                arena.push(Node {
                    state: succ,
                    g: tentative_g,
                    h,
                    f: tentative_g + h,
                    parent: Some(node_id),
                    action: action.name.clone(),
                });
                open.push(OpenEntry {
                    f: tentative_g + h,
                    g: tentative_g,
                    action: action.name.clone(),
                    key: succ_key,
                    node: id,
                });
            }
        }
    }
}

/// Walk parent ids from the goal node back to the start and emit the steps
/// in execution order, start excluded.
fn reconstruct(arena: &[Node], goal_id: usize) -> Vec<PlanStep> {
    let mut steps = Vec::new();
    let mut current = goal_id;
    while let Some(parent) = arena[current].parent {
        let node = &arena[current];
        steps.push(PlanStep {
            action: node.action.clone(),
            g: node.g,
            state: node.state.clone(),
        });
        current = parent;
    }
    steps.reverse();
    steps
}
