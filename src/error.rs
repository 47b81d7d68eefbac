use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Authoring mistakes in a question bank. Fatal: a bank that fails
/// validation is never handed to the scoring engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    #[error("question bank has no statements")]
    Empty,
    #[error("statement id `{id}` is not a kebab-case slug")]
    InvalidId { id: String },
    #[error("statement id `{id}` appears more than once")]
    DuplicateId { id: String },
    #[error("statement `{id}` repeats the text of `{first}`")]
    DuplicateText { id: String, first: String },
    #[error("statement `{id}` has blank text")]
    BlankText { id: String },
    #[error("statement `{id}` references a blank dimension name")]
    BlankDimension { id: String },
    #[error("statement `{id}` lists its primary dimension `{dimension}` as a secondary")]
    SecondaryIsPrimary { id: String, dimension: String },
    #[error("statement `{id}` lists secondary dimension `{dimension}` twice")]
    DuplicateSecondary { id: String, dimension: String },
    #[error("statement `{id}` has weight {weight} for `{dimension}`; expected 0 < weight <= 1")]
    WeightOutOfRange {
        id: String,
        dimension: String,
        weight: f64,
    },
    #[error(
        "statement `{id}` has weight {weight} for `{dimension}`; weights are limited to 4 decimal places"
    )]
    WeightTooPrecise {
        id: String,
        dimension: String,
        weight: f64,
    },
}

/// A rejected response entry: the statement id and the value supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeViolation {
    pub statement: String,
    pub rating: i64,
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.statement, self.rating)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error(
        "incomplete response set: {} statement(s) unanswered: {}",
        .missing.len(),
        .missing.join(", ")
    )]
    IncompleteResponse { missing: Vec<String> },
    #[error("response set names statement(s) not in the question bank: {}", .ids.join(", "))]
    UnknownStatement { ids: Vec<String> },
    #[error("rating(s) outside 1..=5: {}", join_violations(.entries))]
    RatingRange { entries: Vec<RangeViolation> },
}

impl ScoringError {
    /// Stable machine-readable name of the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::IncompleteResponse { .. } => "incomplete_response",
            Self::UnknownStatement { .. } => "unknown_statement",
            Self::RatingRange { .. } => "rating_range",
        }
    }

    /// Statement ids the caller has to fix before resubmitting.
    pub fn offending_statements(&self) -> Vec<&str> {
        match self {
            Self::IncompleteResponse { missing } => missing.iter().map(String::as_str).collect(),
            Self::UnknownStatement { ids } => ids.iter().map(String::as_str).collect(),
            Self::RatingRange { entries } => {
                entries.iter().map(|entry| entry.statement.as_str()).collect()
            }
        }
    }
}

fn join_violations(entries: &[RangeViolation]) -> String {
    entries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum ResponseFileError {
    #[error("failed reading responses file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed parsing responses file {} as TOML", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed parsing responses file {} as JSON", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "responses file {} mixes a `responses` table with top-level ratings; use one layout",
        .path.display()
    )]
    MixedLayout { path: PathBuf },
    #[error("statement `{id}` in {} has non-integer rating `{value}`", .path.display())]
    NotAnInteger {
        path: PathBuf,
        id: String,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_error_names_every_missing_statement() {
        let err = ScoringError::IncompleteResponse {
            missing: vec!["nature-1".to_string(), "logic-2".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("2 statement(s)"));
        assert!(message.contains("nature-1, logic-2"));
        assert_eq!(err.offending_statements(), vec!["nature-1", "logic-2"]);
        assert_eq!(err.kind(), "incomplete_response");
    }

    #[test]
    fn range_error_lists_values() {
        let err = ScoringError::RatingRange {
            entries: vec![
                RangeViolation {
                    statement: "arts-1".to_string(),
                    rating: 0,
                },
                RangeViolation {
                    statement: "arts-2".to_string(),
                    rating: 9,
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "rating(s) outside 1..=5: arts-1=0, arts-2=9"
        );
    }
}
