use crate::bank::Dimension;
use crate::core::ScoreTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_TOP_N: usize = 3;

/// Static suggestions attached to one dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionContent {
    pub learning: Vec<String>,
    pub careers: Vec<String>,
}

/// Source of learning/career suggestions, keyed by dimension name.
pub trait ContentLookup {
    fn content_for(&self, dimension: &Dimension) -> Option<&DimensionContent>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentLibrary {
    entries: BTreeMap<String, DimensionContent>,
}

impl ContentLibrary {
    pub fn new(entries: BTreeMap<String, DimensionContent>) -> Self {
        Self { entries }
    }

    pub fn insert(&mut self, dimension: impl Into<String>, content: DimensionContent) {
        self.entries.insert(dimension.into(), content);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ContentLookup for ContentLibrary {
    fn content_for(&self, dimension: &Dimension) -> Option<&DimensionContent> {
        self.entries.get(dimension.as_str())
    }
}

impl ContentLookup for BTreeMap<String, DimensionContent> {
    fn content_for(&self, dimension: &Dimension) -> Option<&DimensionContent> {
        self.get(dimension.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strength {
    pub rank: usize,
    pub dimension: Dimension,
    pub score: f64,
    pub learning: Vec<String>,
    pub careers: Vec<String>,
}

/// The `n` best dimensions joined with their suggestions. A dimension the
/// lookup does not know gets empty suggestion lists.
pub fn select_strengths<L>(table: &ScoreTable, n: usize, lookup: &L) -> Vec<Strength>
where
    L: ContentLookup + ?Sized,
{
    table
        .top(n)
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let content = lookup.content_for(&entry.dimension);
            if content.is_none() {
                tracing::debug!(dimension = %entry.dimension, "no suggestions for dimension");
            }
            let content = content.cloned().unwrap_or_default();
            Strength {
                rank: idx + 1,
                dimension: entry.dimension.clone(),
                score: entry.score,
                learning: content.learning,
                careers: content.careers,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::tests::def;
    use crate::bank::QuestionBank;
    use crate::core::{Responses, ScoringEngine};
    use pretty_assertions::assert_eq;

    fn three_dimension_table() -> ScoreTable {
        let bank = QuestionBank::from_definitions([
            def("s1", "Low", &[]),
            def("s2", "High", &[]),
            def("s3", "Mid", &[]),
        ])
        .unwrap();
        let responses: Responses = [("s1", 1), ("s2", 5), ("s3", 3)].into_iter().collect();
        ScoringEngine::new(&bank).score(&responses).unwrap()
    }

    fn library() -> ContentLibrary {
        let mut library = ContentLibrary::default();
        library.insert(
            "High",
            DimensionContent {
                learning: vec!["Robotics club".to_string()],
                careers: vec!["Engineer".to_string()],
            },
        );
        library
    }

    #[test]
    fn selects_top_n_in_rank_order() {
        let table = three_dimension_table();
        let strengths = select_strengths(&table, 2, &library());

        let summary: Vec<(usize, &str)> = strengths
            .iter()
            .map(|s| (s.rank, s.dimension.as_str()))
            .collect();
        assert_eq!(summary, vec![(1, "High"), (2, "Mid")]);
        assert_eq!(strengths[0].careers, vec!["Engineer".to_string()]);
    }

    #[test]
    fn missing_content_is_a_gap_not_an_error() {
        let table = three_dimension_table();
        let strengths = select_strengths(&table, 3, &ContentLibrary::default());
        assert_eq!(strengths.len(), 3);
        assert!(strengths
            .iter()
            .all(|s| s.learning.is_empty() && s.careers.is_empty()));
    }

    #[test]
    fn n_is_clamped_to_available_dimensions() {
        let table = three_dimension_table();
        assert!(select_strengths(&table, 0, &library()).is_empty());
        assert_eq!(select_strengths(&table, 10, &library()).len(), 3);
    }

    #[test]
    fn plain_maps_work_as_lookups() {
        let table = three_dimension_table();
        let mut map = BTreeMap::new();
        map.insert(
            "Mid".to_string(),
            DimensionContent {
                learning: vec!["Debate".to_string()],
                careers: Vec::new(),
            },
        );
        let strengths = select_strengths(&table, 2, &map);
        assert_eq!(strengths[1].learning, vec!["Debate".to_string()]);
    }
}
