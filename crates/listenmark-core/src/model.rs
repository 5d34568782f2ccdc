//! Core data model types for listenmark.
//!
//! Questions carry their answer key as a tagged variant so that the
//! evaluator can match on the question type exhaustively.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::BankError;

/// Number of correct letters in a multi-select trio, and its score weight.
pub const TRIO_SIZE: usize = 3;

/// The kind of a question, without its answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    FreeText,
    MultiSelectTrio,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::FreeText => write!(f, "free_text"),
            QuestionKind::MultiSelectTrio => write!(f, "multi_select_trio"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "free_text" | "text" => Ok(QuestionKind::FreeText),
            "multi_select_trio" | "trio" | "multiple_choice_trio" => {
                Ok(QuestionKind::MultiSelectTrio)
            }
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// An option label (`A`, `B`, `C`, …) derived from the option's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OptionLetter(pub(crate) u8);

impl OptionLetter {
    /// Letter for a zero-based option index, if it fits in `A..=Z`.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < 26).then(|| OptionLetter(index as u8))
    }

    /// Zero-based option index.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Uppercase letter, `A` for the first option.
    pub fn as_char(self) -> char {
        (b'A' + self.0) as char
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for OptionLetter {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                Ok(OptionLetter(c.to_ascii_uppercase() as u8 - b'A'))
            }
            _ => Err(BankError::InvalidLetter(s.to_string())),
        }
    }
}

impl TryFrom<String> for OptionLetter {
    type Error = BankError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OptionLetter> for String {
    fn from(letter: OptionLetter) -> Self {
        letter.to_string()
    }
}

/// What counts as a correct answer, per question type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerKey {
    /// Any of the accepted literals, compared after trimming and lowercasing.
    FreeText { accepted: Vec<String> },
    /// Exactly three correct letters out of `options`.
    MultiSelectTrio {
        options: Vec<String>,
        correct: [OptionLetter; TRIO_SIZE],
    },
}

/// A single immutable quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub(crate) id: String,
    pub(crate) number: u32,
    pub(crate) prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) instruction: Option<String>,
    #[serde(flatten)]
    pub(crate) key: AnswerKey,
}

impl Question {
    /// Build a free-text question. Fails when `accepted` is empty.
    pub fn free_text(
        id: impl Into<String>,
        number: u32,
        prompt: impl Into<String>,
        accepted: Vec<String>,
    ) -> Result<Self, BankError> {
        let question = Question {
            id: id.into(),
            number,
            prompt: prompt.into(),
            instruction: None,
            key: AnswerKey::FreeText { accepted },
        };
        question.check()?;
        Ok(question)
    }

    /// Build a multi-select trio from its options and correct letters.
    pub fn multi_select_trio(
        id: impl Into<String>,
        number: u32,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct: &[OptionLetter],
    ) -> Result<Self, BankError> {
        let id = id.into();
        let distinct: BTreeSet<OptionLetter> = correct.iter().copied().collect();
        let correct: [OptionLetter; TRIO_SIZE] = distinct
            .iter()
            .copied()
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|_| BankError::TrioAnswerCount {
                id: id.clone(),
                found: distinct.len(),
            })?;
        let question = Question {
            id,
            number,
            prompt: prompt.into(),
            instruction: None,
            key: AnswerKey::MultiSelectTrio { options, correct },
        };
        question.check()?;
        Ok(question)
    }

    /// Attach a display instruction.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    /// Verify the answer-key invariants and that every display number fits.
    pub fn check(&self) -> Result<(), BankError> {
        if self.number.checked_add(self.weight() - 1).is_none() {
            return Err(BankError::NumberOverflow {
                id: self.id.clone(),
                number: self.number,
            });
        }
        match &self.key {
            AnswerKey::FreeText { accepted } => {
                if accepted.is_empty() {
                    return Err(BankError::NoAcceptedAnswers(self.id.clone()));
                }
            }
            AnswerKey::MultiSelectTrio { options, correct } => {
                let distinct: BTreeSet<_> = correct.iter().collect();
                if distinct.len() != TRIO_SIZE {
                    return Err(BankError::TrioAnswerCount {
                        id: self.id.clone(),
                        found: distinct.len(),
                    });
                }
                if let Some(letter) = correct.iter().find(|l| l.index() >= options.len()) {
                    return Err(BankError::OptionOutOfRange {
                        id: self.id.clone(),
                        letter: letter.as_char(),
                        options: options.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Unique id within the bank, e.g. `q21` or `q28-30`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// First display number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Question text as shown to the learner.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Answer-format instruction, e.g. a word limit.
    pub fn instruction(&self) -> Option<&str> {
        self.instruction.as_deref()
    }

    /// The answer key.
    pub fn key(&self) -> &AnswerKey {
        &self.key
    }

    /// Question type, derived from the answer key.
    pub fn kind(&self) -> QuestionKind {
        match self.key {
            AnswerKey::FreeText { .. } => QuestionKind::FreeText,
            AnswerKey::MultiSelectTrio { .. } => QuestionKind::MultiSelectTrio,
        }
    }

    /// Option texts; empty for free-text questions.
    pub fn options(&self) -> &[String] {
        match &self.key {
            AnswerKey::FreeText { .. } => &[],
            AnswerKey::MultiSelectTrio { options, .. } => options,
        }
    }

    /// Options paired with their letters.
    pub fn lettered_options(&self) -> impl Iterator<Item = (OptionLetter, &str)> {
        self.options()
            .iter()
            .enumerate()
            .filter_map(|(i, text)| OptionLetter::from_index(i).map(|l| (l, text.as_str())))
    }

    /// Accepted answers as display strings (literals or letters).
    pub fn accepted_answers(&self) -> Vec<String> {
        match &self.key {
            AnswerKey::FreeText { accepted } => accepted.clone(),
            AnswerKey::MultiSelectTrio { correct, .. } => {
                correct.iter().map(|l| l.to_string()).collect()
            }
        }
    }

    /// Scored slots this question contributes to the total weight.
    pub fn weight(&self) -> u32 {
        match self.key {
            AnswerKey::FreeText { .. } => 1,
            AnswerKey::MultiSelectTrio { .. } => TRIO_SIZE as u32,
        }
    }

    /// Display numbers covered, e.g. `28..=30` for a trio numbered 28.
    pub fn numbers(&self) -> RangeInclusive<u32> {
        self.number..=self.number.saturating_add(self.weight() - 1)
    }

    /// Whether `letter` names one of this question's options.
    pub fn has_option(&self, letter: OptionLetter) -> bool {
        letter.index() < self.options().len()
    }
}
