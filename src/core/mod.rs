pub mod report;
pub mod score;
pub mod strengths;

use crate::bank::{Dimension, QuestionBank, Statement};
use crate::error::{RangeViolation, ScoringError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

pub use score::{DimensionScore, Tally};

/// A validated Likert rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: Rating = Rating(1);
    pub const NEUTRAL: Rating = Rating(3);
    pub const MAX: Rating = Rating(5);

    pub fn new(value: i64) -> Option<Self> {
        if (i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One respondent's answers, keyed by statement id. Values are kept as
/// supplied; the engine decides what is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Responses {
    entries: IndexMap<String, i64>,
}

impl Responses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a rating, returning any earlier answer for the same statement.
    pub fn insert(&mut self, statement: impl Into<String>, rating: i64) -> Option<i64> {
        self.entries.insert(statement.into(), rating)
    }

    pub fn remove(&mut self, statement: &str) -> Option<i64> {
        self.entries.shift_remove(statement)
    }

    pub fn get(&self, statement: &str) -> Option<i64> {
        self.entries.get(statement).copied()
    }

    pub fn contains(&self, statement: &str) -> bool {
        self.entries.contains_key(statement)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.entries.iter().map(|(id, rating)| (id.as_str(), *rating))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for Responses {
    fn from_iter<T: IntoIterator<Item = (S, i64)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(id, rating)| (id.into(), rating))
                .collect(),
        }
    }
}

/// Ranked per-dimension results of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreTable {
    entries: Vec<DimensionScore>,
    answered: usize,
    defaulted: usize,
    preview: bool,
}

impl ScoreTable {
    /// Dimensions by descending score, ties in canonical order.
    pub fn ranked(&self) -> &[DimensionScore] {
        &self.entries
    }

    pub fn get(&self, dimension: &str) -> Option<&DimensionScore> {
        self.entries
            .iter()
            .find(|entry| entry.dimension.as_str() == dimension)
    }

    pub fn score(&self, dimension: &str) -> Option<f64> {
        self.get(dimension).map(|entry| entry.score)
    }

    pub fn top(&self, n: usize) -> &[DimensionScore] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn answered(&self) -> usize {
        self.answered
    }

    /// Statements filled with the neutral rating. Always zero outside preview.
    pub fn defaulted(&self) -> usize {
        self.defaulted
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }
}

/// Pure aggregation of a response set against one bank. Holds no state of
/// its own beyond the borrowed bank, so one engine can serve any number of
/// sessions.
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine<'bank> {
    bank: &'bank QuestionBank,
}

impl<'bank> ScoringEngine<'bank> {
    pub fn new(bank: &'bank QuestionBank) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &'bank QuestionBank {
        self.bank
    }

    /// Scores a complete response set. Any unanswered statement is an error.
    pub fn score(&self, responses: &Responses) -> Result<ScoreTable, ScoringError> {
        let ratings = self.validate(responses)?;

        let missing: Vec<String> = self
            .bank
            .all_statements()
            .filter(|statement| !ratings.contains_key(statement.id()))
            .map(|statement| statement.id().to_string())
            .collect();
        if !missing.is_empty() {
            tracing::debug!(missing = missing.len(), "rejected incomplete response set");
            return Err(ScoringError::IncompleteResponse { missing });
        }

        let rated = self
            .bank
            .all_statements()
            .filter_map(|statement| Some((statement, *ratings.get(statement.id())?)));
        Ok(self.build_table(rated, ratings.len(), 0, false))
    }

    /// Demo scoring for UI previews: unanswered statements count as
    /// [`Rating::NEUTRAL`]. Never use this for a respondent's real result.
    pub fn preview(&self, responses: &Responses) -> Result<ScoreTable, ScoringError> {
        let ratings = self.validate(responses)?;
        let defaulted = self.bank.len() - ratings.len();

        let rated = self.bank.all_statements().map(|statement| {
            let rating = ratings
                .get(statement.id())
                .copied()
                .unwrap_or(Rating::NEUTRAL);
            (statement, rating)
        });
        Ok(self.build_table(rated, ratings.len(), defaulted, true))
    }

    /// Statement ids in `responses` that still need an answer, in authored order.
    pub fn missing(&self, responses: &Responses) -> Vec<&'bank str> {
        self.bank
            .all_statements()
            .filter(|statement| !responses.contains(statement.id()))
            .map(Statement::id)
            .collect()
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &'bank Dimension> + 'bank {
        self.bank.dimensions().iter()
    }

    fn validate<'r>(
        &self,
        responses: &'r Responses,
    ) -> Result<HashMap<&'r str, Rating>, ScoringError> {
        let unknown: BTreeSet<&str> = responses
            .iter()
            .map(|(id, _)| id)
            .filter(|id| !self.bank.contains(id))
            .collect();
        if !unknown.is_empty() {
            tracing::warn!(count = unknown.len(), "response set names unknown statements");
            return Err(ScoringError::UnknownStatement {
                ids: unknown.into_iter().map(str::to_string).collect(),
            });
        }

        let mut ratings = HashMap::with_capacity(responses.len());
        let mut violations = Vec::new();
        for (id, value) in responses.iter() {
            match Rating::new(value) {
                Some(rating) => {
                    ratings.insert(id, rating);
                }
                None => violations.push(RangeViolation {
                    statement: id.to_string(),
                    rating: value,
                }),
            }
        }
        if !violations.is_empty() {
            return Err(ScoringError::RatingRange {
                entries: violations,
            });
        }

        Ok(ratings)
    }

    fn build_table<'s, I>(
        &self,
        rated: I,
        answered: usize,
        defaulted: usize,
        preview: bool,
    ) -> ScoreTable
    where
        I: IntoIterator<Item = (&'s Statement, Rating)>,
    {
        let tallies = score::tally(self.bank, rated);
        let entries = score::rank(&tallies);
        tracing::debug!(
            answered,
            defaulted,
            preview,
            dimensions = entries.len(),
            "scored response set"
        );

        ScoreTable {
            entries,
            answered,
            defaulted,
            preview,
        }
    }
}
