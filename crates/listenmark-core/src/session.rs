//! Per-session quiz state machine.
//!
//! `Unanswered -> Editing -> Submitted`, and back to `Unanswered` on reset.
//! Once submitted, answers are frozen until [`QuizSession::reset`].

use serde::Serialize;

use crate::answers::{AnswerSet, SelectionChange};
use crate::bank::QuestionBank;
use crate::error::SessionError;
use crate::evaluator::{evaluate, ScoreResult};
use crate::model::{OptionLetter, QuestionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Unanswered,
    Editing,
    Submitted,
}

/// One run through a question bank.
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: QuestionBank,
    answers: AnswerSet,
    state: SessionState,
    result: Option<ScoreResult>,
}

impl QuizSession {
    /// Start an unanswered session over `bank`.
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            answers: AnswerSet::new(),
            state: SessionState::Unanswered,
            result: None,
        }
    }

    /// The bank being answered.
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Answers recorded so far.
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The frozen result, present only after [`submit`](Self::submit).
    pub fn result(&self) -> Option<&ScoreResult> {
        self.result.as_ref()
    }

    /// Record a free-text answer.
    pub fn set_text(&mut self, id: &str, value: &str) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.expect_kind(id, QuestionKind::FreeText)?;
        self.answers.set_text(id, value);
        self.state = SessionState::Editing;
        Ok(())
    }

    /// Toggle one option of a multi-select question.
    ///
    /// A fourth selection comes back as [`SelectionChange::Rejected`] and
    /// leaves the answers unchanged.
    pub fn toggle_option(
        &mut self,
        id: &str,
        letter: OptionLetter,
    ) -> Result<SelectionChange, SessionError> {
        self.ensure_editable()?;
        self.expect_kind(id, QuestionKind::MultiSelectTrio)?;
        let has_option = self.bank.get(id).is_some_and(|q| q.has_option(letter));
        if !has_option {
            return Err(SessionError::OptionOutOfRange {
                id: id.to_string(),
                letter: letter.as_char(),
            });
        }
        let change = self.answers.toggle_option(id, letter);
        if change == SelectionChange::Rejected {
            tracing::debug!("{id}: selection limit reached, ignoring {letter}");
        } else {
            self.state = SessionState::Editing;
        }
        Ok(change)
    }

    /// Evaluate the current answers and lock the session.
    pub fn submit(&mut self) -> Result<&ScoreResult, SessionError> {
        if self.state == SessionState::Submitted {
            return Err(SessionError::AlreadySubmitted);
        }
        let result = evaluate(self.bank.questions(), &self.answers);
        self.state = SessionState::Submitted;
        let frozen: &ScoreResult = self.result.insert(result);
        Ok(frozen)
    }

    /// Drop all answers and any result.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.result = None;
        self.state = SessionState::Unanswered;
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Submitted => Err(SessionError::Locked),
            SessionState::Unanswered | SessionState::Editing => Ok(()),
        }
    }

    fn expect_kind(&self, id: &str, expected: QuestionKind) -> Result<(), SessionError> {
        let question = self
            .bank
            .get(id)
            .ok_or_else(|| SessionError::UnknownQuestion(id.to_string()))?;
        if question.kind() != expected {
            return Err(SessionError::KindMismatch {
                id: id.to_string(),
                expected: match expected {
                    QuestionKind::FreeText => "free-text",
                    QuestionKind::MultiSelectTrio => "multi-select",
                },
            });
        }
        Ok(())
    }
}
