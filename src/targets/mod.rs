mod error;
mod targets;
mod validate;

pub use error::TargetError;
pub use targets::TargetWeights;
