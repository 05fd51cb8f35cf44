//! Accumulation and validation of named planning actions.
//!
//! A catalog is built incrementally: conditions first, then effects and
//! costs, each merged last-write-wins per key. Nothing is searched until
//! `validate` produces an immutable, name-sorted snapshot.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::state::{Effect, Mask};
use crate::value::{MaskValue, Value};

/// A named, validated `(precondition, effect, cost)` triple.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Action {
    pub name: String,
    pub precondition: Mask,
    pub effect: Effect,
    pub cost: f64,
}

/// Builder and owner of the action tables.
///
/// In strict mode effect values are restricted to booleans; otherwise any
/// concrete scalar is accepted.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Catalog {
    strict: bool,
    conditions: BTreeMap<String, Mask>,
    effects: BTreeMap<String, Effect>,
    costs: BTreeMap<String, f64>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog whose effects may only write booleans.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn conditions(&self) -> &BTreeMap<String, Mask> {
        &self.conditions
    }

    pub fn effects(&self) -> &BTreeMap<String, Effect> {
        &self.effects
    }

    pub fn costs(&self) -> &BTreeMap<String, f64> {
        &self.costs
    }

    /// Merge `mask` into the action's precondition, creating the action
    /// entry if absent. Last write wins per key.
    pub fn add_condition(&mut self, name: impl Into<String>, mask: Mask) {
        self.conditions.entry(name.into()).or_default().merge(&mask);
    }

    /// Merge a concrete effect into the action.
    ///
    /// The input is a mask so that wildcard entries can be rejected at the
    /// boundary rather than silently dropped.
    pub fn add_effect(&mut self, name: &str, effect: Mask) -> Result<(), CatalogError> {
        if !self.conditions.contains_key(name) {
            return Err(CatalogError::NoMatchingCondition {
                action: name.to_string(),
            });
        }

        let mut concrete = Effect::new();
        for (key, mv) in effect.iter() {
            let value = match mv {
                MaskValue::Any => {
                    return Err(CatalogError::InvalidEffectValue {
                        action: name.to_string(),
                        key: key.to_string(),
                    })
                }
                MaskValue::Exact(v) => v,
            };
            if self.strict && !matches!(value, Value::Bool(_)) {
                return Err(CatalogError::InvalidEffectType {
                    action: name.to_string(),
                    key: key.to_string(),
                    ty: value.type_name(),
                });
            }
            concrete.set(key, value.clone());
        }

        self.effects
            .entry(name.to_string())
            .or_default()
            .merge(&concrete);
        Ok(())
    }

    /// Overwrite the action's cost. Costs must be finite and > 0.
    pub fn set_cost(&mut self, name: &str, cost: f64) -> Result<(), CatalogError> {
        if !self.conditions.contains_key(name) {
            return Err(CatalogError::NoMatchingCondition {
                action: name.to_string(),
            });
        }
        if !cost.is_finite() || cost <= 0.0 {
            return Err(CatalogError::InvalidCost {
                action: name.to_string(),
                cost,
            });
        }
        self.costs.insert(name.to_string(), cost);
        Ok(())
    }

    /// Check every conditioned action for a usable effect and cost, and
    /// return a deep-copied snapshot sorted ascending by action name.
    pub fn validate(&self) -> Result<Vec<Action>, CatalogError> {
        let mut actions = Vec::with_capacity(self.conditions.len());
        for (name, precondition) in self.conditions.iter() {
            let effect = match self.effects.get(name) {
                Some(effect) if !effect.is_empty() => effect.clone(),
                _ => {
                    return Err(CatalogError::MissingEffect {
                        action: name.clone(),
                    })
                }
            };
            let cost = *self.costs.get(name).ok_or_else(|| CatalogError::MissingCost {
                action: name.clone(),
            })?;
            if !cost.is_finite() || cost <= 0.0 {
                return Err(CatalogError::InvalidCost {
                    action: name.clone(),
                    cost,
                });
            }
            actions.push(Action {
                name: name.clone(),
                precondition: precondition.clone(),
                effect,
                cost,
            });
        }
        Ok(actions)
    }
}
