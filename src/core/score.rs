use crate::bank::{Dimension, QuestionBank, Statement, WEIGHT_SCALE};
use crate::core::Rating;
use indexmap::IndexMap;
use serde::Serialize;

/// Per-dimension accumulators, kept in weight units (1/10000) so that
/// summation is exact and independent of statement order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub raw: u64,
    pub max_possible: u64,
    pub contributors: usize,
}

impl Tally {
    fn add(&mut self, rating: Rating, weight_units: u32) {
        let units = u64::from(weight_units);
        self.raw += u64::from(rating.value()) * units;
        self.max_possible += u64::from(Rating::MAX.value()) * units;
        self.contributors += 1;
    }

    /// `raw / max_possible * 5`, or `None` when nothing contributed.
    pub fn normalized(&self) -> Option<f64> {
        if self.max_possible == 0 {
            return None;
        }
        let scaled = self.raw * u64::from(Rating::MAX.value());
        Some(scaled as f64 / self.max_possible as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub score: f64,
    pub raw: f64,
    pub max_possible: f64,
    pub contributors: usize,
}

/// Sums every rated statement into the bank's dimensions. The result holds
/// one entry per canonical dimension, in canonical order.
pub fn tally<'a, I>(bank: &QuestionBank, ratings: I) -> IndexMap<Dimension, Tally>
where
    I: IntoIterator<Item = (&'a Statement, Rating)>,
{
    let mut tallies: IndexMap<Dimension, Tally> = bank
        .dimensions()
        .iter()
        .map(|dim| (dim.clone(), Tally::default()))
        .collect();

    for (statement, rating) in ratings {
        for (dimension, weight) in statement.contributions() {
            if let Some(entry) = tallies.get_mut(dimension) {
                entry.add(rating, weight.units());
            }
        }
    }

    tallies
}

/// Normalises and orders dimensions by score, highest first. The sort is
/// stable, so equal scores keep canonical dimension order.
pub fn rank(tallies: &IndexMap<Dimension, Tally>) -> Vec<DimensionScore> {
    let scale = f64::from(WEIGHT_SCALE);
    let mut ranked: Vec<DimensionScore> = tallies
        .iter()
        .filter_map(|(dimension, tally)| {
            let score = tally.normalized()?;
            Some(DimensionScore {
                dimension: dimension.clone(),
                score,
                raw: tally.raw as f64 / scale,
                max_possible: tally.max_possible as f64 / scale,
                contributors: tally.contributors,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::tests::{def, two_statement_bank};
    use pretty_assertions::assert_eq;

    fn rating(value: i64) -> Rating {
        Rating::new(value).unwrap()
    }

    #[test]
    fn tally_covers_every_dimension_even_without_ratings() {
        let bank = two_statement_bank();
        let tallies = tally(&bank, std::iter::empty());
        assert_eq!(tallies.len(), 2);
        assert!(tallies.values().all(|t| *t == Tally::default()));
        assert!(rank(&tallies).is_empty());
    }

    #[test]
    fn weighted_accumulation_matches_worked_example() {
        let bank = two_statement_bank();
        let s1 = bank.statement("s1").unwrap();
        let s2 = bank.statement("s2").unwrap();
        let tallies = tally(&bank, [(s1, rating(4)), (s2, rating(2))]);

        assert_eq!(
            tallies["A"],
            Tally {
                raw: 40_000,
                max_possible: 50_000,
                contributors: 1,
            }
        );
        assert_eq!(
            tallies["B"],
            Tally {
                raw: 40_000,
                max_possible: 75_000,
                contributors: 2,
            }
        );

        let ranked = rank(&tallies);
        assert_eq!(ranked[0].dimension.as_str(), "A");
        assert_eq!(ranked[0].score, 4.0);
        assert_eq!(ranked[1].raw, 4.0);
        assert_eq!(ranked[1].max_possible, 7.5);
        assert!((ranked[1].score - 8.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn ties_keep_canonical_order() {
        let bank = two_statement_bank();
        let s1 = bank.statement("s1").unwrap();
        let s2 = bank.statement("s2").unwrap();
        let tallies = tally(&bank, [(s2, rating(5)), (s1, rating(5))]);

        let ranked = rank(&tallies);
        let order: Vec<&str> = ranked.iter().map(|entry| entry.dimension.as_str()).collect();
        assert_eq!(order, vec!["A", "B"]);
    }

    #[test]
    fn ties_follow_first_appearance_not_name() {
        let bank = QuestionBank::from_definitions([
            def("s1", "Zeta", &[("Alpha", 0.4)]),
            def("s2", "Alpha", &[]),
            def("s3", "Mid", &[]),
        ])
        .unwrap();
        let rated = bank.all_statements().map(|statement| (statement, rating(4)));

        let ranked = rank(&tally(&bank, rated));
        let order: Vec<&str> = ranked.iter().map(|entry| entry.dimension.as_str()).collect();
        assert_eq!(order, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn normalized_is_none_without_contributors() {
        assert_eq!(Tally::default().normalized(), None);
    }
}
