pub mod catalog;
pub mod file;

use crate::error::BankError;
use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

/// Fixed-point resolution of statement weights: one unit is 1/10000.
pub const WEIGHT_SCALE: u32 = 10_000;

static STATEMENT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid statement id regex"));

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dimension(String);

impl Dimension {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Dimension {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A statement's contribution to one dimension, in 1/10000 units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Weight(u32);

impl Weight {
    pub const FULL: Weight = Weight(WEIGHT_SCALE);

    pub fn units(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / f64::from(WEIGHT_SCALE)
    }

    fn parse(id: &str, dimension: &str, value: f64) -> Result<Self, BankError> {
        if !value.is_finite() || value <= 0.0 || value > 1.0 {
            return Err(BankError::WeightOutOfRange {
                id: id.to_string(),
                dimension: dimension.to_string(),
                weight: value,
            });
        }

        let scaled = (value * f64::from(WEIGHT_SCALE)).round();
        if (scaled / f64::from(WEIGHT_SCALE) - value).abs() > 1e-9 {
            return Err(BankError::WeightTooPrecise {
                id: id.to_string(),
                dimension: dimension.to_string(),
                weight: value,
            });
        }

        Ok(Self(scaled as u32))
    }
}

/// Authoring form of a statement, as written in the built-in catalog or a
/// bank file. Turned into a [`Statement`] by [`QuestionBank::from_definitions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementDef {
    pub id: String,
    pub text: String,
    pub primary: String,
    #[serde(default)]
    pub secondary: IndexMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    id: String,
    text: String,
    primary: Dimension,
    secondary: Vec<(Dimension, Weight)>,
}

impl Statement {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn primary(&self) -> &Dimension {
        &self.primary
    }

    pub fn secondary(&self) -> &[(Dimension, Weight)] {
        &self.secondary
    }

    /// Every dimension this statement feeds, primary first at full weight.
    pub fn contributions(&self) -> impl Iterator<Item = (&Dimension, Weight)> + '_ {
        std::iter::once((&self.primary, Weight::FULL))
            .chain(self.secondary.iter().map(|(dim, weight)| (dim, *weight)))
    }
}

/// Immutable catalog of statements. Construction validates every statement;
/// once built, a bank is never mutated.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    statements: IndexMap<String, Statement>,
    dimensions: IndexSet<Dimension>,
}

impl QuestionBank {
    /// The built-in battery, validated on first use.
    pub fn builtin() -> &'static QuestionBank {
        &catalog::BUILTIN
    }

    pub fn from_definitions<I>(definitions: I) -> Result<Self, BankError>
    where
        I: IntoIterator<Item = StatementDef>,
    {
        let mut statements = IndexMap::new();
        let mut texts: HashMap<String, String> = HashMap::new();
        let mut dimensions = IndexSet::new();

        for def in definitions {
            let statement = validate_definition(def)?;

            if statements.contains_key(&statement.id) {
                return Err(BankError::DuplicateId { id: statement.id });
            }
            let text_key = statement.text.trim().to_lowercase();
            if let Some(first) = texts.get(&text_key) {
                return Err(BankError::DuplicateText {
                    id: statement.id,
                    first: first.clone(),
                });
            }
            texts.insert(text_key, statement.id.clone());

            for (dimension, _) in statement.contributions() {
                if !dimensions.contains(dimension) {
                    dimensions.insert(dimension.clone());
                }
            }
            statements.insert(statement.id.clone(), statement);
        }

        if statements.is_empty() {
            return Err(BankError::Empty);
        }

        Ok(Self {
            statements,
            dimensions,
        })
    }

    /// Statements in authored order.
    pub fn all_statements(&self) -> impl ExactSizeIterator<Item = &Statement> + Clone + '_ {
        self.statements.values()
    }

    pub fn statement(&self, id: &str) -> Option<&Statement> {
        self.statements.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.statements.contains_key(id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.statements.get_index_of(id)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Canonical dimension set, in order of first appearance.
    pub fn dimensions(&self) -> &IndexSet<Dimension> {
        &self.dimensions
    }

    /// A presentation order for one session. The bank itself is untouched.
    pub fn shuffled_order<R>(&self, rng: &mut R) -> Vec<&Statement>
    where
        R: Rng + ?Sized,
    {
        let mut order: Vec<&Statement> = self.statements.values().collect();
        order.shuffle(rng);
        order
    }
}

fn validate_definition(def: StatementDef) -> Result<Statement, BankError> {
    let id = def.id.trim().to_string();
    if !STATEMENT_ID_RE.is_match(&id) {
        return Err(BankError::InvalidId { id });
    }

    let text = def.text.trim().to_string();
    if text.is_empty() {
        return Err(BankError::BlankText { id });
    }

    let primary = def.primary.trim();
    if primary.is_empty() {
        return Err(BankError::BlankDimension { id });
    }

    let mut secondary: Vec<(Dimension, Weight)> = Vec::with_capacity(def.secondary.len());
    for (name, value) in &def.secondary {
        let name = name.trim();
        if name.is_empty() {
            return Err(BankError::BlankDimension { id });
        }
        if name == primary {
            return Err(BankError::SecondaryIsPrimary {
                id,
                dimension: name.to_string(),
            });
        }
        if secondary.iter().any(|(dim, _)| dim.as_str() == name) {
            return Err(BankError::DuplicateSecondary {
                id,
                dimension: name.to_string(),
            });
        }
        let weight = Weight::parse(&id, name, *value)?;
        secondary.push((Dimension::new(name), weight));
    }

    Ok(Statement {
        id,
        text,
        primary: Dimension::new(primary),
        secondary,
    })
}
