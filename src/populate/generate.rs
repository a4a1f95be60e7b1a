use anyhow::{Context, Result, ensure};
use rand::{distr::{weighted::WeightedIndex, Distribution}, Rng};

use crate::survey::SurveyRecord;
use super::PollProfile;

/// Draw `count` unit-weight responses for `profile`, numbering ids from
/// `first_id`.
///
/// Each dimension is sampled independently from its marginal; the chosen
/// candidate then follows the profile's bias for the sampled categories.
pub fn generate<R: Rng + ?Sized>(profile: &PollProfile, count: usize, first_id: u64, rng: &mut R) -> Result<Vec<SurveyRecord>> {
    ensure!(!profile.candidates.is_empty(), "[populate::generate] profile '{}' has no candidates", profile.poll);

    let samplers = profile.marginals.iter()
        .map(|(dimension, pairs)| {
            let dist = WeightedIndex::new(pairs.iter().map(|(_, p)| *p))
                .with_context(|| format!("[populate::generate] Invalid distribution for '{dimension}'"))?;
            Ok((dimension.as_str(), pairs, dist))
        })
        .collect::<Result<Vec<_>>>()?;

    (0..count)
        .map(|i| -> Result<SurveyRecord> {
            let mut record = SurveyRecord::new(first_id + i as u64, profile.poll.as_str(), "");
            for (dimension, pairs, dist) in &samplers {
                record = record.with(*dimension, pairs[dist.sample(rng)].0.as_str());
            }

            let odds = profile.bias.odds(&record);
            ensure!(odds.len() == profile.candidates.len(),
                "[populate::generate] bias odds ({}) must match candidates ({})",
                odds.len(), profile.candidates.len());
            let pick = WeightedIndex::new(odds)
                .context("[populate::generate] Invalid candidate odds")?
                .sample(rng);
            record.candidate = profile.candidates[pick].clone();
            Ok(record)
        })
        .collect()
}
