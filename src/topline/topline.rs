use anyhow::{ensure, Result};
use indexmap::IndexMap;

use crate::survey::SurveyRecord;
use super::Filter;

/// Weighted vote totals per candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topline {
    totals: IndexMap<String, f64>, // candidate -> weight, first-seen order
}

impl Topline {
    /// Sum weights per candidate over the records passing `filter`.
    pub fn compute(records: &[SurveyRecord], filter: &Filter) -> Self {
        let mut totals = IndexMap::new();
        for record in records.iter().filter(|record| filter.matches(record)) {
            *totals.entry(record.candidate.clone()).or_insert(0.0) += record.weight;
        }
        Self { totals }
    }

    /// Like [`Topline::compute`], but with one subgroup's vote replaced by a
    /// hypothetical split: `candidate` receives `share` (in [0, 1]) of the
    /// subgroup's weight and the other candidates divide the rest in
    /// proportion to their actual subgroup weight.
    ///
    /// If no rival of `candidate` appears in the subgroup, the remainder is
    /// split evenly between the rivals present in the filtered results. With
    /// no rivals at all there is nobody to credit: the remainder is dropped
    /// and [`Topline::total_weight`] shrinks by `(1 - share)` of the
    /// subgroup's weight.
    pub fn with_override(
        records: &[SurveyRecord],
        filter: &Filter,
        subgroup: (&str, &str),
        candidate: &str,
        share: f64,
    ) -> Result<Self> {
        ensure!((0.0..=1.0).contains(&share),
            "[topline::with_override] share must be in [0, 1], got {share}");

        let (dimension, category) = subgroup;
        let (inside, _): (Vec<&SurveyRecord>, Vec<&SurveyRecord>) = records.iter()
            .filter(|record| filter.matches(record))
            .partition(|record| record.category(dimension) == Some(category));

        let mut topline = Self::compute(records, filter);

        let mut raw = IndexMap::<String, f64>::new();
        for record in &inside {
            *raw.entry(record.candidate.clone()).or_insert(0.0) += record.weight;
        }
        let subgroup_weight = raw.values().sum::<f64>();
        let others_weight = subgroup_weight - raw.get(candidate).copied().unwrap_or(0.0);

        // Remove the subgroup's actual votes, then add the hypothetical ones.
        for (name, weight) in &raw {
            if let Some(total) = topline.totals.get_mut(name) { *total -= weight }
        }
        *topline.totals.entry(candidate.to_string()).or_insert(0.0) += share * subgroup_weight;

        let remainder = (1.0 - share) * subgroup_weight;
        if others_weight > 0.0 {
            for (name, weight) in raw.iter().filter(|(name, _)| name.as_str() != candidate) {
                *topline.totals.entry(name.clone()).or_insert(0.0) += remainder * weight / others_weight;
            }
        } else {
            let rivals = topline.totals.keys()
                .filter(|name| name.as_str() != candidate)
                .cloned()
                .collect::<Vec<_>>();
            for name in &rivals {
                topline.totals[name] += remainder / rivals.len() as f64;
            }
        }

        Ok(topline)
    }

    /// Weighted total for each candidate.
    #[inline] pub fn totals(&self) -> &IndexMap<String, f64> { &self.totals }

    /// Sum of all candidates' totals.
    pub fn total_weight(&self) -> f64 { self.totals.values().sum() }

    /// Percentage of the total weight per candidate (0 when there is none).
    pub fn shares(&self) -> IndexMap<String, f64> {
        let total = self.total_weight();
        self.totals.iter()
            .map(|(candidate, weight)| {
                let share = if total > 0.0 { weight / total * 100.0 } else { 0.0 };
                (candidate.clone(), share)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn records() -> Vec<SurveyRecord> {
        vec![
            SurveyRecord::new(1, "P", "Candidate A").with("age", "18-29").with_weight(2.0),
            SurveyRecord::new(2, "P", "Candidate B").with("age", "18-29").with_weight(2.0),
            SurveyRecord::new(3, "P", "Candidate B").with("age", "65+").with_weight(1.0),
            SurveyRecord::new(4, "P", "Candidate B").with("age", "65+").with_weight(3.0),
        ]
    }

    #[test]
    fn weighted_shares() {
        let topline = Topline::compute(&records(), &Filter::all());
        assert_eq!(topline.totals()["Candidate A"], 2.0);
        assert_eq!(topline.totals()["Candidate B"], 6.0);
        assert_eq!(topline.shares()["Candidate A"], 25.0);
        assert_eq!(topline.shares()["Candidate B"], 75.0);
    }

    #[test]
    fn filtered_out_everything_gives_zero_shares() {
        let filter = Filter::all().allow("age", ["30-44"]);
        let topline = Topline::compute(&records(), &filter);
        assert_eq!(topline.total_weight(), 0.0);
        assert!(topline.shares().is_empty());
    }

    #[test]
    fn override_moves_subgroup_vote() {
        // 18-29 has weight 4, split 2/2; force A to 75% of it.
        let topline = Topline::with_override(&records(), &Filter::all(), ("age", "18-29"), "Candidate A", 0.75).unwrap();
        assert!((topline.totals()["Candidate A"] - 3.0).abs() < EPS);
        assert!((topline.totals()["Candidate B"] - 5.0).abs() < EPS);
        assert!((topline.total_weight() - 8.0).abs() < EPS);
    }

    #[test]
    fn override_hands_subgroup_to_absent_candidate() {
        // Only B voted in 65+ (weight 4); A takes half of it.
        let topline = Topline::with_override(&records(), &Filter::all(), ("age", "65+"), "Candidate A", 0.5).unwrap();
        assert!((topline.totals()["Candidate A"] - 4.0).abs() < EPS);
        assert!((topline.totals()["Candidate B"] - 4.0).abs() < EPS);
    }

    #[test]
    fn override_without_rivals_in_subgroup() {
        // B alone in 65+ keeps a quarter; A was absent there but still gets the rest.
        let topline = Topline::with_override(&records(), &Filter::all(), ("age", "65+"), "Candidate B", 0.25).unwrap();
        assert!((topline.totals()["Candidate A"] - 5.0).abs() < EPS);
        assert!((topline.totals()["Candidate B"] - 3.0).abs() < EPS);
        assert!(Topline::with_override(&records(), &Filter::all(), ("age", "65+"), "Candidate A", 1.5).is_err());
    }

    #[test]
    fn override_without_any_rival_drops_remainder() {
        let records = vec![
            SurveyRecord::new(1, "P", "Candidate A").with("age", "18-29").with_weight(2.0),
            SurveyRecord::new(2, "P", "Candidate A").with("age", "65+").with_weight(2.0),
        ];
        let topline = Topline::with_override(&records, &Filter::all(), ("age", "18-29"), "Candidate A", 0.25).unwrap();
        assert_eq!(topline.totals().len(), 1);
        assert!((topline.totals()["Candidate A"] - 2.5).abs() < EPS);
        assert!((topline.total_weight() - 2.5).abs() < EPS);
    }
}
