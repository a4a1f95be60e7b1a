use std::collections::{BTreeMap, BTreeSet};

use crate::survey::SurveyRecord;

/// Per-dimension allow-lists. A record passes when, for every filtered
/// dimension, it holds one of the allowed categories. Dimensions without an
/// allow-list are unrestricted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    allowed: BTreeMap<String, BTreeSet<String>>,
}

impl Filter {
    /// A filter that accepts every record.
    pub fn all() -> Self { Self::default() }

    /// Restrict `dimension` to `categories`.
    pub fn allow<I, C>(mut self, dimension: impl Into<String>, categories: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.allowed.insert(dimension.into(), categories.into_iter().map(Into::into).collect());
        self
    }

    /// Parse `dimension=cat1,cat2` clauses.
    pub fn parse_clause(self, clause: &str) -> Option<Self> {
        let (dimension, categories) = clause.split_once('=')?;
        let dimension = dimension.trim();
        if dimension.is_empty() { return None }
        Some(self.allow(dimension, categories.split(',').map(str::trim).filter(|c| !c.is_empty())))
    }

    #[inline] pub fn is_empty(&self) -> bool { self.allowed.is_empty() }

    pub fn matches(&self, record: &SurveyRecord) -> bool {
        self.allowed.iter().all(|(dimension, categories)| {
            record.category(dimension).is_some_and(|category| categories.contains(category))
        })
    }
}
