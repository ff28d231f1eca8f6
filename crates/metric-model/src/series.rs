//! Cleaned tabular data.

use std::collections::BTreeSet;

use crate::observation::Observation;

/// Observations that survived cleaning, in store order.
///
/// Grouping by category is implicit: rows of one category keep their
/// relative order, which is what entry numbering is derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedSeries {
    pub observations: Vec<Observation>,
}

impl CleanedSeries {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    /// Sorted, de-duplicated category names.
    pub fn categories(&self) -> Vec<String> {
        self.observations
            .iter()
            .map(|obs| obs.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl FromIterator<Observation> for CleanedSeries {
    fn from_iter<T: IntoIterator<Item = Observation>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
