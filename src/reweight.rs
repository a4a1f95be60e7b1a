//! End-to-end reweighting of one poll against a storage collaborator.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{IpfConfig, IpfReport, ResponseSet, ResponseStore, TargetWeights};

/// A reweighting request as submitted by API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpfRequest {
    #[serde(default)]
    pub poll: String,
    #[serde(default)]
    pub target_weights: TargetWeights,
}

impl IpfRequest {
    pub fn new(poll: impl Into<String>, target_weights: TargetWeights) -> Self {
        Self { poll: poll.into(), target_weights }
    }

    /// Parse a request from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("[reweight::IpfRequest] Failed to parse request")
    }

    /// Reject requests missing either field.
    pub fn check(&self) -> Result<()> {
        ensure!(!self.poll.is_empty() && !self.target_weights.is_empty(),
            "Both 'target_weights' and 'poll' must be provided.");
        Ok(())
    }
}

/// Rake every stored response of `poll` towards `targets` and persist the
/// new weights in a single bulk update.
///
/// A poll without responses is a no-op: nothing is written and the default
/// report is returned. Storage failures are returned as-is with context;
/// weights computed in memory are discarded if the final write fails.
pub fn run_ipf<S>(store: &mut S, poll: &str, targets: &TargetWeights, config: &IpfConfig) -> Result<IpfReport>
where
    S: ResponseStore + ?Sized,
{
    let records = store.responses(poll)
        .with_context(|| format!("[reweight::run_ipf] Failed to load responses for '{poll}'"))?;
    if records.is_empty() {
        info!("[reweight::run_ipf] no responses for '{poll}', nothing to do");
        return Ok(IpfReport::default());
    }

    if config.strict {
        targets.validate(&records)
            .with_context(|| format!("[reweight::run_ipf] Rejected targets for '{poll}'"))?;
    }

    let mut responses = ResponseSet::new(poll, records);
    info!(
        "[reweight::run_ipf] raking {} responses for '{poll}' over {} dimensions",
        responses.len(), targets.len(),
    );
    let report = responses.rake(targets, config.tolerance, config.max_iterations);

    store.update_weights(responses.records())
        .with_context(|| format!("[reweight::run_ipf] Failed to persist weights for '{poll}'"))?;

    info!(
        "[reweight::run_ipf] '{poll}' done: iterations={} final_change={:.3e}",
        report.iterations, report.final_change,
    );
    Ok(report)
}
