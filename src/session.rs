use crate::bank::{QuestionBank, Statement};
use crate::core::{Rating, Responses, ScoreTable, ScoringEngine};
use crate::error::{RangeViolation, ScoringError};
use rand::Rng;

/// One respondent's attempt: a presentation order and the answers given so
/// far. Every session owns its own buffers; starting another session or
/// restarting this one never touches anyone else's answers.
#[derive(Debug, Clone)]
pub struct QuizSession<'bank> {
    engine: ScoringEngine<'bank>,
    order: Vec<&'bank Statement>,
    responses: Responses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

impl<'bank> QuizSession<'bank> {
    pub fn new<R>(bank: &'bank QuestionBank, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            engine: ScoringEngine::new(bank),
            order: bank.shuffled_order(rng),
            responses: Responses::new(),
        }
    }

    /// A session that presents statements in authored order.
    pub fn in_authored_order(bank: &'bank QuestionBank) -> Self {
        Self {
            engine: ScoringEngine::new(bank),
            order: bank.all_statements().collect(),
            responses: Responses::new(),
        }
    }

    pub fn order(&self) -> &[&'bank Statement] {
        &self.order
    }

    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    /// Stores an answer, replacing any earlier one for the same statement.
    /// Unknown statements and out-of-range ratings are rejected here so the
    /// buffer only ever holds answers the engine will accept.
    pub fn record(
        &mut self,
        statement: &str,
        rating: i64,
    ) -> Result<Option<Rating>, ScoringError> {
        if !self.engine.bank().contains(statement) {
            return Err(ScoringError::UnknownStatement {
                ids: vec![statement.to_string()],
            });
        }
        if Rating::new(rating).is_none() {
            return Err(ScoringError::RatingRange {
                entries: vec![RangeViolation {
                    statement: statement.to_string(),
                    rating,
                }],
            });
        }

        let previous = self.responses.insert(statement, rating);
        Ok(previous.and_then(Rating::new))
    }

    pub fn clear(&mut self, statement: &str) -> Option<Rating> {
        self.responses.remove(statement).and_then(Rating::new)
    }

    pub fn answer(&self, statement: &str) -> Option<Rating> {
        self.responses.get(statement).and_then(Rating::new)
    }

    pub fn answered(&self) -> usize {
        self.responses.len()
    }

    /// Unanswered statements, in this session's presentation order.
    pub fn missing(&self) -> Vec<&'bank Statement> {
        self.order
            .iter()
            .copied()
            .filter(|statement| !self.responses.contains(statement.id()))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.responses.len() == self.order.len()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            answered: self.answered(),
            total: self.order.len(),
        }
    }

    /// The respondent's real result. Fails until every statement is answered.
    pub fn submit(&self) -> Result<ScoreTable, ScoringError> {
        self.engine.score(&self.responses)
    }

    /// Neutral-filled result for showing a provisional profile mid-quiz.
    pub fn preview(&self) -> Result<ScoreTable, ScoringError> {
        self.engine.preview(&self.responses)
    }

    /// Drops every answer and draws a fresh presentation order.
    pub fn restart<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.responses.clear();
        self.order = self.engine.bank().shuffled_order(rng);
        tracing::debug!(statements = self.order.len(), "session restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::tests::two_statement_bank;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sessions_do_not_share_answers() {
        let bank = QuestionBank::builtin();
        let mut rng = StdRng::seed_from_u64(1);
        let mut first = QuizSession::new(bank, &mut rng);
        let second = QuizSession::new(bank, &mut rng);

        first.record("nature-1", 5).unwrap();
        assert_eq!(first.answer("nature-1"), Some(Rating::MAX));
        assert_eq!(second.answer("nature-1"), None);
        assert_eq!(second.answered(), 0);
    }

    #[test]
    fn record_validates_at_the_boundary() {
        let bank = two_statement_bank();
        let mut session = QuizSession::in_authored_order(&bank);

        assert!(matches!(
            session.record("nope", 3),
            Err(ScoringError::UnknownStatement { .. })
        ));
        assert!(matches!(
            session.record("s1", 6),
            Err(ScoringError::RatingRange { .. })
        ));
        assert!(session.responses().is_empty());

        assert_eq!(session.record("s1", 2).unwrap(), None);
        assert_eq!(session.record("s1", 4).unwrap(), Some(Rating::new(2).unwrap()));
        assert_eq!(session.progress(), Progress { answered: 1, total: 2 });
    }

    #[test]
    fn submit_requires_every_answer() {
        let bank = two_statement_bank();
        let mut session = QuizSession::in_authored_order(&bank);
        session.record("s1", 4).unwrap();

        let missing: Vec<&str> = session.missing().into_iter().map(Statement::id).collect();
        assert_eq!(missing, vec!["s2"]);
        assert!(!session.is_complete());
        assert_eq!(
            session.submit().unwrap_err(),
            ScoringError::IncompleteResponse {
                missing: vec!["s2".to_string()],
            }
        );
        assert!(session.preview().unwrap().is_preview());

        session.record("s2", 2).unwrap();
        assert!(session.is_complete());
        let table = session.submit().unwrap();
        assert_eq!(table.score("A"), Some(4.0));
    }

    #[test]
    fn presentation_order_does_not_change_the_result() {
        let bank = QuestionBank::builtin();
        let mut a = QuizSession::new(bank, &mut StdRng::seed_from_u64(3));
        let mut b = QuizSession::new(bank, &mut StdRng::seed_from_u64(99));
        assert_ne!(
            a.order().iter().map(|s| s.id()).collect::<Vec<_>>(),
            b.order().iter().map(|s| s.id()).collect::<Vec<_>>()
        );

        for statement in a.order().to_vec() {
            let rating = (statement.text().len() % 5) as i64 + 1;
            a.record(statement.id(), rating).unwrap();
        }
        for statement in b.order().to_vec() {
            let rating = (statement.text().len() % 5) as i64 + 1;
            b.record(statement.id(), rating).unwrap();
        }
        assert_eq!(a.submit().unwrap(), b.submit().unwrap());
    }

    #[test]
    fn restart_clears_answers_and_reshuffles() {
        let bank = QuestionBank::builtin();
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = QuizSession::new(bank, &mut rng);
        session.record("arts-1", 4).unwrap();

        session.restart(&mut rng);
        assert!(session.responses().is_empty());
        assert_eq!(session.order().len(), bank.len());
        assert_eq!(session.clear("arts-1"), None);
    }
}
