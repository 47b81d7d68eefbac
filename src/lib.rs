//! Scoring engine for Likert self-assessment questionnaires.
//!
//! A [`QuestionBank`] maps each statement to one primary dimension and
//! optional weighted secondary dimensions. [`ScoringEngine::score`] turns a
//! complete [`Responses`] set into a [`ScoreTable`] of normalised 1..=5
//! scores, ranked highest first; [`select_strengths`] joins the top entries
//! with static learning and career suggestions.

pub mod bank;
pub mod config;
pub mod core;
pub mod error;
pub mod responses;
pub mod session;
pub mod telemetry;

pub use bank::{Dimension, QuestionBank, Statement, StatementDef, Weight};
pub use core::strengths::{
    ContentLibrary, ContentLookup, DimensionContent, Strength, select_strengths,
};
pub use core::{DimensionScore, Rating, Responses, ScoreTable, ScoringEngine};
pub use error::{BankError, RangeViolation, ResponseFileError, ScoringError};
pub use session::{Progress, QuizSession};
