use serde::{Deserialize, Serialize};

/// Diagnostics from one raking run.
///
/// `iterations` is the index of the pass on which the largest weight change
/// fell below tolerance, so a run converging on its second pass reports 1.
/// A run that never converges reports `max_iterations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpfReport {
    pub iterations: usize,
    /// Largest single-record weight change in the last completed pass.
    pub final_change: f64,
    /// L1 distance between current and target totals after each pass.
    pub l1_errors: Vec<f64>,
}

impl IpfReport {
    /// Number of passes actually performed.
    #[inline] pub fn passes(&self) -> usize { self.l1_errors.len() }

    /// Final L1 error, if any pass ran.
    #[inline] pub fn final_l1_error(&self) -> Option<f64> { self.l1_errors.last().copied() }

    #[inline]
    pub fn into_tuple(self) -> (usize, f64, Vec<f64>) {
        (self.iterations, self.final_change, self.l1_errors)
    }
}
