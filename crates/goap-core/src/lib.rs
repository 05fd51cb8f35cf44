//! Symbolic world-state primitives and action catalogs for GOAP planning.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod state;
pub mod value;

pub use catalog::{Action, Catalog};
pub use error::CatalogError;
pub use state::{Effect, Mask, WorldState};
pub use value::{MaskValue, Value};
