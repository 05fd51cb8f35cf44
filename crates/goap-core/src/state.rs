//! World states, condition masks, and effects over symbolic keys.
//!
//! All three containers are ordered maps so that iteration order, and with
//! it canonical keys and merge results, is deterministic.

use std::collections::BTreeMap;
use std::fmt::Write as _;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::{MaskValue, Value};

/// A complete concrete key→value mapping of the world.
///
/// States never hold wildcards; a key the caller left unspecified is simply
/// absent, which fails `satisfies` and counts in `mismatch` for any mask
/// entry that requires it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldState {
    entries: BTreeMap<String, Value>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Byte-stable serialization used for hashing and set membership.
    ///
    /// Entries ascend by key, each rendered as `key=value` with the
    /// canonical value encoding, joined by `;`. Injective over states with
    /// the same key set.
    pub fn canonical_key(&self) -> String {
        let mut out = String::with_capacity(self.entries.len() * 12);
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push(';');
            }
            let _ = write!(out, "{key}={value}");
        }
        out
    }

    /// True iff every non-wildcard mask entry is present and equal.
    pub fn satisfies(&self, mask: &Mask) -> bool {
        mask.iter().all(|(key, mv)| match mv {
            MaskValue::Any => true,
            MaskValue::Exact(v) => self.entries.get(key) == Some(v),
        })
    }

    /// Count of non-wildcard mask entries this state fails to meet.
    ///
    /// Keys required by the mask but absent from the state count as
    /// mismatches; state keys the mask ignores do not.
    pub fn mismatch(&self, mask: &Mask) -> usize {
        mask.iter()
            .filter(|(key, mv)| match mv {
                MaskValue::Any => false,
                MaskValue::Exact(v) => self.entries.get(*key) != Some(v),
            })
            .count()
    }

    /// New state with every effect key overwritten; other keys unchanged.
    pub fn apply(&self, effect: &Effect) -> WorldState {
        let mut next = self.clone();
        for (key, value) in effect.iter() {
            next.entries.insert(key.to_string(), value.clone());
        }
        next
    }
}

impl FromIterator<(String, Value)> for WorldState {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A key→value-or-wildcard mapping used for preconditions and goals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mask {
    entries: BTreeMap<String, MaskValue>,
}

impl Mask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `key` to hold exactly `value`.
    pub fn require(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries
            .insert(key.into(), MaskValue::Exact(value.into()));
    }

    /// Accept any value at `key`.
    pub fn any(&mut self, key: impl Into<String>) {
        self.entries.insert(key.into(), MaskValue::Any);
    }

    pub fn get(&self, key: &str) -> Option<&MaskValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MaskValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Non-wildcard entries only.
    pub fn required(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .filter_map(|(k, mv)| mv.exact().map(|v| (k.as_str(), v)))
    }

    /// Merge `other` into `self`, last write winning per key.
    pub fn merge(&mut self, other: &Mask) {
        for (key, mv) in other.entries.iter() {
            self.entries.insert(key.clone(), mv.clone());
        }
    }
}

impl FromIterator<(String, MaskValue)> for Mask {
    fn from_iter<I: IntoIterator<Item = (String, MaskValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A concrete key→value assignment applied to a state by an action.
///
/// Effects never hold wildcards; the catalog builder rejects them before
/// one can be constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Effect {
    entries: BTreeMap<String, Value>,
}

impl Effect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `other` into `self`, last write winning per key.
    pub fn merge(&mut self, other: &Effect) {
        for (key, value) in other.entries.iter() {
            self.entries.insert(key.clone(), value.clone());
        }
    }
}

impl FromIterator<(String, Value)> for Effect {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(pairs: &[(&str, Value)]) -> WorldState {
        let mut s = WorldState::new();
        for (k, v) in pairs {
            s.set(*k, v.clone());
        }
        s
    }

    #[test]
    fn canonical_key_sorts_and_encodes() {
        let s = state(&[
            ("hungry", Value::Bool(true)),
            ("food", Value::Int(2)),
            ("at", Value::from("camp")),
        ]);
        assert_eq!(s.canonical_key(), "at=camp;food=2;hungry=1");
    }

    #[test]
    fn canonical_key_matches_clone() {
        let s = state(&[("a", Value::Bool(false)), ("b", Value::Int(-3))]);
        assert_eq!(s.canonical_key(), s.clone().canonical_key());
        assert_eq!(s.canonical_key(), "a=0;b=-3");
    }

    #[test]
    fn satisfies_ignores_wildcards() {
        let s = state(&[("a", Value::Bool(true)), ("b", Value::Int(1))]);

        let mut mask = Mask::new();
        mask.require("a", true);
        mask.any("b");
        assert!(s.satisfies(&mask));

        mask.require("b", 2);
        assert!(!s.satisfies(&mask));
    }

    #[test]
    fn satisfies_fails_on_missing_key() {
        let s = state(&[("a", Value::Bool(true))]);
        let mut mask = Mask::new();
        mask.require("missing", true);
        assert!(!s.satisfies(&mask));
    }

    #[test]
    fn mismatch_counts_unmet_and_missing() {
        let s = state(&[("a", Value::Bool(true)), ("b", Value::Int(1))]);

        let mut mask = Mask::new();
        mask.require("a", false); // unequal
        mask.require("b", 1); // met
        mask.require("c", true); // missing
        mask.any("d"); // wildcard, ignored
        assert_eq!(s.mismatch(&mask), 2);
    }

    #[test]
    fn apply_overwrites_and_extends() {
        let s = state(&[("a", Value::Bool(false)), ("b", Value::Int(1))]);
        let mut eff = Effect::new();
        eff.set("a", true);
        eff.set("c", "new");

        let next = s.apply(&eff);
        assert_eq!(next.get("a"), Some(&Value::Bool(true)));
        assert_eq!(next.get("b"), Some(&Value::Int(1)));
        assert_eq!(next.get("c"), Some(&Value::from("new")));
        // Original untouched.
        assert_eq!(s.get("a"), Some(&Value::Bool(false)));
        assert!(!s.contains_key("c"));
    }

    #[test]
    fn apply_canonical_key_is_deterministic() {
        let a = state(&[("x", Value::Int(1)), ("y", Value::Int(2))]);
        let b = a.clone();
        let mut eff = Effect::new();
        eff.set("y", 9);
        assert_eq!(a.apply(&eff).canonical_key(), b.apply(&eff).canonical_key());
    }

    #[test]
    fn merge_is_last_write_wins() {
        let mut base = Mask::new();
        base.require("a", 1);
        base.any("b");

        let mut over = Mask::new();
        over.require("b", 2);

        base.merge(&over);
        assert_eq!(base.get("b"), Some(&MaskValue::Exact(Value::Int(2))));
        assert_eq!(base.get("a"), Some(&MaskValue::Exact(Value::Int(1))));
    }
}
