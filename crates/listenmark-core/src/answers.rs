//! User answers collected during one quiz session.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::{OptionLetter, TRIO_SIZE};

/// Most letters a multi-select answer may hold at once.
pub const MAX_SELECTIONS: usize = TRIO_SIZE;

/// A single submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Selection(BTreeSet<OptionLetter>),
}

/// Outcome of toggling a multi-select option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
    /// The answer already holds [`MAX_SELECTIONS`] letters; nothing changed.
    Rejected,
}

/// Mapping from question id to the user's answer.
///
/// Missing entries read as empty text or an empty selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    entries: BTreeMap<String, Answer>,
}

impl AnswerSet {
    /// An empty answer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a free-text answer, replacing whatever was there.
    pub fn set_text(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(id.into(), Answer::Text(value.into()));
    }

    /// Select `letter` if unselected, deselect it otherwise.
    ///
    /// Selecting a fourth letter is rejected. A text answer stored under the
    /// same id is discarded.
    pub fn toggle_option(&mut self, id: &str, letter: OptionLetter) -> SelectionChange {
        let mut selected = self.selection(id);
        let change = if selected.remove(&letter) {
            SelectionChange::Removed
        } else if selected.len() < MAX_SELECTIONS {
            selected.insert(letter);
            SelectionChange::Added
        } else {
            return SelectionChange::Rejected;
        };
        self.entries
            .insert(id.to_string(), Answer::Selection(selected));
        change
    }

    /// The raw answer stored for `id`.
    pub fn get(&self, id: &str) -> Option<&Answer> {
        self.entries.get(id)
    }

    /// The text answer for `id`, or `""` when absent or not text.
    pub fn text(&self, id: &str) -> &str {
        match self.entries.get(id) {
            Some(Answer::Text(value)) => value,
            _ => "",
        }
    }

    /// The selected letters for `id`, empty when absent or not a selection.
    pub fn selection(&self, id: &str) -> BTreeSet<OptionLetter> {
        match self.entries.get(id) {
            Some(Answer::Selection(selected)) => selected.clone(),
            _ => BTreeSet::new(),
        }
    }

    /// Drop every answer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of questions with a stored answer.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no answer has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Answers in question id order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Answer)> {
        self.entries.iter()
    }
}
