use thiserror::Error;

/// Failures raised while building or validating an action catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// An effect or cost was attached to an action with no precondition.
    #[error("action `{action}` has no condition to attach to")]
    NoMatchingCondition { action: String },

    /// An effect entry was a wildcard; effects must be concrete.
    #[error("action `{action}` effect for key `{key}` is a wildcard")]
    InvalidEffectValue { action: String, key: String },

    /// An effect value's type is outside the catalog's permitted scalars.
    #[error("action `{action}` effect for key `{key}` has unsupported type `{ty}`")]
    InvalidEffectType {
        action: String,
        key: String,
        ty: &'static str,
    },

    /// A cost was non-finite or not strictly positive.
    #[error("action `{action}` has invalid cost {cost}")]
    InvalidCost { action: String, cost: f64 },

    /// An action reached validation with a condition but no effect.
    #[error("action `{action}` has no effect")]
    MissingEffect { action: String },

    /// An action reached validation with a condition but no cost.
    #[error("action `{action}` has no cost")]
    MissingCost { action: String },
}
