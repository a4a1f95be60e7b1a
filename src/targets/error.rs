use thiserror::Error;

/// Reasons a target specification is rejected by strict validation.
///
/// None of these are raised by the raking engine itself, which tolerates
/// every one of them; they only surface when strict mode is enabled.
#[derive(Debug, Error, PartialEq)]
pub enum TargetError {
    #[error("target weights are empty")]
    Empty,

    #[error("dimension '{0}' has no target categories")]
    EmptyDimension(String),

    #[error("proportion for {dimension}={category} is {value}, expected a value in [0, 1]")]
    ProportionOutOfRange { dimension: String, category: String, value: f64 },

    #[error("your weights for {dimension} must sum to 1.0 (got {sum})")]
    ProportionSum { dimension: String, sum: f64 },

    #[error("dimension '{0}' is not present on any response")]
    UnknownDimension(String),

    #[error("category {dimension}={category} has a target but no responses")]
    UnobservedCategory { dimension: String, category: String },

    #[error("responses hold {dimension}={category}, which has no target")]
    UnmappedCategory { dimension: String, category: String },
}
