//! Relaxed Planning Graph construction and queries.
//!
//! Layers are built from the start state by repeatedly applying every
//! applicable action at once, last writer winning per key among the
//! layer's actions in name order. The graph records the first layer at
//! which each `(key, value)` pair appears; the `rpg_add` heuristic sums
//! those indices over unmet goal entries.

use std::collections::BTreeMap;

use goap_core::{Action, Value, WorldState};

/// Hard cap on fact layers. Construction normally stops at the fixed point
/// or when no action applies.
pub const MAX_LAYERS: usize = 50;

#[derive(Debug, Clone)]
pub struct RelaxedPlanGraph {
    fact_layers: Vec<WorldState>,
    action_layers: Vec<Vec<String>>,
    first_levels: BTreeMap<(String, Value), usize>,
}

impl RelaxedPlanGraph {
    /// Build the graph from a start state and a name-sorted action list.
    pub fn build(start: &WorldState, actions: &[Action]) -> Self {
        let mut first_levels = BTreeMap::new();
        for (key, value) in start.iter() {
            first_levels.insert((key.to_string(), value.clone()), 0);
        }

        let mut fact_layers = vec![start.clone()];
        let mut action_layers: Vec<Vec<String>> = Vec::new();

        while fact_layers.len() < MAX_LAYERS {
            let Some(prev) = fact_layers.last() else {
                break;
            };

            let applicable: Vec<&Action> = actions
                .iter()
                .filter(|a| prev.satisfies(&a.precondition))
                .collect();
            if applicable.is_empty() {
                break;
            }

            let mut next = prev.clone();
            for action in &applicable {
                next = next.apply(&action.effect);
            }
            if next == *prev {
                // Fixed point: nothing new can ever appear.
                break;
            }

            let level = fact_layers.len();
            for (key, value) in next.iter() {
                first_levels
                    .entry((key.to_string(), value.clone()))
                    .or_insert(level);
            }
            action_layers.push(applicable.iter().map(|a| a.name.clone()).collect());
            fact_layers.push(next);
        }

        Self {
            fact_layers,
            action_layers,
            first_levels,
        }
    }

    /// Smallest layer index at which `key` holds `value`, if it ever does.
    pub fn first_level(&self, key: &str, value: &Value) -> Option<usize> {
        self.first_levels
            .get(&(key.to_string(), value.clone()))
            .copied()
    }

    pub fn fact_layers(&self) -> &[WorldState] {
        &self.fact_layers
    }

    /// Actions applicable at each level, in name order.
    pub fn action_layers(&self) -> &[Vec<String>] {
        &self.action_layers
    }

    pub fn layer_count(&self) -> usize {
        self.fact_layers.len()
    }
}
