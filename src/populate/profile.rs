use indexmap::IndexMap;

use crate::{survey::{Dimension, SurveyRecord}, targets::TargetWeights};

/// Candidate preference odds keyed on one demographic dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateBias {
    pub dimension: String,
    /// Odds per candidate for specific categories of `dimension`.
    pub by_category: IndexMap<String, Vec<f64>>,
    /// Odds for every other category.
    pub fallback: Vec<f64>,
}

impl CandidateBias {
    /// No preference: equal odds for `candidates` candidates.
    pub fn uniform(candidates: usize) -> Self {
        Self {
            dimension: String::new(),
            by_category: IndexMap::new(),
            fallback: vec![1.0; candidates],
        }
    }

    /// Odds that apply to `record`.
    pub fn odds(&self, record: &SurveyRecord) -> &[f64] {
        record.category(&self.dimension)
            .and_then(|category| self.by_category.get(category))
            .unwrap_or(&self.fallback)
    }
}

/// How responses to one poll are distributed.
#[derive(Debug, Clone, PartialEq)]
pub struct PollProfile {
    pub poll: String,
    pub candidates: Vec<String>,
    /// Independent sampling distribution per dimension: (category, probability).
    pub marginals: IndexMap<String, Vec<(String, f64)>>,
    pub bias: CandidateBias,
}

const AGES: [&str; 4] = ["18-29", "30-44", "45-64", "65+"];
const GENDERS: [&str; 2] = ["Male", "Female"];
const RACES: [&str; 4] = ["White", "Black", "Hispanic", "Asian"];
const INCOMES: [&str; 3] = ["<50k", "50-100k", ">100k"];
const URBANITIES: [&str; 3] = ["rural", "urban", "suburban"];
const EDUCATIONS: [&str; 2] = ["college degree", "no college degree"];

fn categories(dimension: Dimension) -> &'static [&'static str] {
    match dimension {
        Dimension::Age => &AGES,
        Dimension::Gender => &GENDERS,
        Dimension::Race => &RACES,
        Dimension::Income => &INCOMES,
        Dimension::Urbanity => &URBANITIES,
        Dimension::Education => &EDUCATIONS,
    }
}

/// Pair each standard dimension's categories with the given probabilities,
/// listed in `Dimension::ALL` order.
fn standard_marginals(probabilities: [&[f64]; 6]) -> IndexMap<String, Vec<(String, f64)>> {
    Dimension::ALL.iter().zip(probabilities)
        .map(|(dimension, probs)| {
            let pairs = categories(*dimension).iter()
                .zip(probs)
                .map(|(category, &p)| (category.to_string(), p))
                .collect();
            (dimension.to_str().to_string(), pairs)
        })
        .collect()
}

fn two_candidates() -> Vec<String> {
    vec!["Candidate A".into(), "Candidate B".into()]
}

impl PollProfile {
    pub fn ohio() -> Self {
        Self {
            poll: "Ohio Senate Primary".into(),
            candidates: two_candidates(),
            marginals: standard_marginals([
                &[0.5, 0.3, 0.15, 0.05],
                &[0.4, 0.6],
                &[0.7, 0.1, 0.15, 0.05],
                &[0.2, 0.5, 0.3],
                &[0.3, 0.5, 0.2],
                &[0.6, 0.4],
            ]),
            bias: CandidateBias {
                dimension: "age".into(),
                by_category: IndexMap::from([
                    ("18-29".to_string(), vec![70.0, 30.0]),
                    ("30-44".to_string(), vec![50.0, 50.0]),
                    ("45-64".to_string(), vec![30.0, 70.0]),
                ]),
                fallback: vec![20.0, 80.0],
            },
        }
    }

    pub fn florida() -> Self {
        Self {
            poll: "Florida Senate Primary".into(),
            candidates: two_candidates(),
            marginals: standard_marginals([
                &[0.3, 0.4, 0.2, 0.1],
                &[0.45, 0.55],
                &[0.5, 0.2, 0.25, 0.05],
                &[0.3, 0.4, 0.3],
                &[0.2, 0.6, 0.2],
                &[0.55, 0.45],
            ]),
            bias: CandidateBias {
                dimension: "gender".into(),
                by_category: IndexMap::from([("Female".to_string(), vec![20.0, 80.0])]),
                fallback: vec![30.0, 70.0],
            },
        }
    }

    pub fn new_hampshire() -> Self {
        Self {
            poll: "New Hampshire Senate Primary".into(),
            candidates: two_candidates(),
            marginals: standard_marginals([
                &[0.2, 0.35, 0.3, 0.15],
                &[0.5, 0.5],
                &[0.8, 0.05, 0.1, 0.05],
                &[0.15, 0.5, 0.35],
                &[0.4, 0.4, 0.2],
                &[0.65, 0.35],
            ]),
            bias: CandidateBias {
                dimension: "education".into(),
                by_category: IndexMap::from([("college degree".to_string(), vec![60.0, 40.0])]),
                fallback: vec![25.0, 75.0],
            },
        }
    }

    /// The bundled demo polls.
    pub fn builtin() -> Vec<Self> {
        vec![Self::ohio(), Self::florida(), Self::new_hampshire()]
    }

    /// Look up a bundled profile by poll name.
    pub fn find(poll: &str) -> Option<Self> {
        Self::builtin().into_iter().find(|profile| profile.poll == poll)
    }

    /// Population targets the demo polls are reweighted towards.
    pub fn default_targets(&self) -> TargetWeights {
        let probabilities: [&[f64]; 6] = match self.poll.as_str() {
            "Florida Senate Primary" => [
                &[0.3, 0.25, 0.25, 0.2],
                &[0.45, 0.55],
                &[0.55, 0.15, 0.2, 0.1],
                &[0.3, 0.4, 0.3],
                &[0.25, 0.5, 0.25],
                &[0.6, 0.4],
            ],
            "New Hampshire Senate Primary" => [
                &[0.2, 0.3, 0.3, 0.2],
                &[0.5, 0.5],
                &[0.6, 0.1, 0.2, 0.1],
                &[0.35, 0.35, 0.3],
                &[0.4, 0.4, 0.2],
                &[0.55, 0.45],
            ],
            _ => [
                &[0.25, 0.25, 0.25, 0.25],
                &[0.5, 0.5],
                &[0.5, 0.2, 0.2, 0.1],
                &[0.33, 0.33, 0.34],
                &[0.33, 0.33, 0.34],
                &[0.5, 0.5],
            ],
        };

        standard_marginals(probabilities).into_iter()
            .fold(TargetWeights::new(), |targets, (dimension, pairs)| targets.with(dimension, pairs))
    }
}
