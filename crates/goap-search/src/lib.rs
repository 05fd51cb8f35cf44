//! Deterministic A* planning over symbolic GOAP states.
//!
//! Given a start state, a goal mask, and a validated action catalog, the
//! planner produces a minimum-cost ordered action sequence or reports that
//! none exists. Identical inputs always produce byte-identical plans.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

mod open;

pub mod heuristic;
pub mod plan;
pub mod planner;
pub mod rpg;
pub mod world;

pub use heuristic::{Heuristic, UnknownHeuristic};
pub use plan::{PlanOutcome, PlanStatus, PlanStep};
pub use planner::{Planner, PlannerConfig};
pub use rpg::RelaxedPlanGraph;
pub use world::{World, WorldPlan};

use goap_core::CatalogError;
use thiserror::Error;

/// Errors raised before any search occurs.
///
/// Infeasibility and budget exhaustion are not errors; they are reported as
/// [`PlanStatus`] values on the returned outcome.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// A state or goal used a key outside the planner's declared universe.
    #[error("unknown state key `{key}`")]
    UnknownKey { key: String },

    /// The action catalog failed validation.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type Result<T> = std::result::Result<T, PlanError>;
