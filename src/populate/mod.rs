//! Synthetic survey responses for demos and testing.

mod generate;
mod profile;

pub use generate::generate;
pub use profile::{CandidateBias, PollProfile};
