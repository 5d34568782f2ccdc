//! Error types for question banks and quiz sessions.
//!
//! Evaluation itself never fails. These errors cover building a bank from
//! external data and driving a [`QuizSession`](crate::session::QuizSession)
//! through invalid transitions.

use thiserror::Error;

/// A question bank that violates one of its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    /// A question has no accepted answers.
    #[error("question {0}: accepted answers must not be empty")]
    NoAcceptedAnswers(String),

    /// A multi-select trio does not list exactly three distinct letters.
    #[error("question {id}: expected 3 distinct correct letters, found {found}")]
    TrioAnswerCount { id: String, found: usize },

    /// A correct letter points past the end of the option list.
    #[error("question {id}: letter {letter} is outside the {options} available options")]
    OptionOutOfRange {
        id: String,
        letter: char,
        options: usize,
    },

    /// A string could not be read as an option letter.
    #[error("invalid option letter: {0:?}")]
    InvalidLetter(String),

    /// A question's display numbers do not fit in `u32`.
    #[error("question {id}: display numbers run past the largest question number, starting at {number}")]
    NumberOverflow { id: String, number: u32 },

    /// Two questions share the same id.
    #[error("duplicate question id: {0}")]
    DuplicateId(String),
}

/// Invalid operations on a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session was submitted; answers are frozen until reset.
    #[error("answers are locked after submission")]
    Locked,

    /// `submit` was called on a session that is already submitted.
    #[error("session has already been submitted")]
    AlreadySubmitted,

    /// No question with this id exists in the bank.
    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    /// The answer type does not match the question type.
    #[error("question {id} expects a {expected} answer")]
    KindMismatch { id: String, expected: &'static str },

    /// The selected letter has no corresponding option.
    #[error("question {id} has no option {letter}")]
    OptionOutOfRange { id: String, letter: char },
}

impl SessionError {
    /// Returns `true` if the error stems from the session being submitted.
    ///
    /// Rendering layers use this to tell "inputs are disabled" apart from
    /// bad input.
    pub fn is_locked(&self) -> bool {
        matches!(self, SessionError::Locked | SessionError::AlreadySubmitted)
    }
}
