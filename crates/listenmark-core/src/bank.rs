//! The question bank: an ordered, read-only list of questions plus the
//! display metadata used to section them.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::error::BankError;
use crate::model::{AnswerKey, OptionLetter, Question, QuestionKind, TRIO_SIZE};

/// A titled group of questions, selected by display number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub instruction: String,
    pub first: u32,
    pub last: u32,
}

impl Section {
    /// Create a section covering display numbers `first..=last`.
    pub fn new(
        title: impl Into<String>,
        instruction: impl Into<String>,
        first: u32,
        last: u32,
    ) -> Self {
        Self {
            title: title.into(),
            instruction: instruction.into(),
            first,
            last,
        }
    }

    /// Display numbers covered by this section.
    pub fn range(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }
}

/// An ordered collection of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    id: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_url: Option<String>,
    sections: Vec<Section>,
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Assemble a bank, checking every question and rejecting duplicate ids.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, BankError> {
        let mut seen = HashSet::new();
        for question in &questions {
            question.check()?;
            if !seen.insert(question.id()) {
                return Err(BankError::DuplicateId(question.id().to_string()));
            }
        }
        Ok(Self {
            id: id.into(),
            title: title.into(),
            audio_url: None,
            sections: Vec::new(),
            questions,
        })
    }

    /// Attach the recording the questions are based on.
    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }

    /// Replace the display sections.
    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    /// Stable identifier, e.g. `shopping-habits`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Link to the listening recording, if any.
    pub fn audio_url(&self) -> Option<&str> {
        self.audio_url.as_deref()
    }

    /// Display sections in order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// All questions in display order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions (not scored slots).
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns `true` if the bank holds no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question by id.
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Questions whose display number lies in `range`.
    pub fn in_range(&self, range: RangeInclusive<u32>) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |q| range.contains(&q.number()))
    }

    /// Questions of one type, in display order.
    pub fn of_kind(&self, kind: QuestionKind) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.kind() == kind)
    }

    /// Questions shown under `section`.
    pub fn section_questions<'a>(
        &'a self,
        section: &'a Section,
    ) -> impl Iterator<Item = &'a Question> {
        self.in_range(section.range())
    }

    /// Number of scored slots: one per free-text question, three per trio.
    pub fn total_weight(&self) -> u32 {
        self.questions.iter().map(Question::weight).sum()
    }

    /// IELTS Listening Section 3, "Shopping Habits", questions 21–30.
    pub fn shopping_habits() -> Self {
        const SENTENCE: &str = "Write NO MORE THAN THREE WORDS AND/OR A NUMBER";
        const BLANK: &str = "ONE WORD AND/OR A NUMBER";

        let questions = vec![
            text(
                "q21",
                21,
                "The woman being interviewed is now working in the bank. Her occupation is .",
                &["cashier"],
                SENTENCE,
            ),
            text(
                "q22",
                22,
                "The woman usually spends about when she goes shopping.",
                &["50 pounds", "£50", "fifty pounds"],
                SENTENCE,
            ),
            text(
                "q23",
                23,
                "The woman often goes to because she finds them convenient.",
                &["big department stores", "department stores"],
                SENTENCE,
            ),
            text(
                "q24",
                24,
                "According to the woman, is/are her most difficult thing(s) to buy.",
                &["jeans"],
                SENTENCE,
            ),
            text(
                "q25",
                25,
                "50% of the people being interviewed spend a month.",
                &["45 pounds", "£45", "forty-five pounds"],
                BLANK,
            ),
            text(
                "q26",
                26,
                "15% of the people being interviewed spend a month.",
                &["75 pounds", "£75", "seventy-five pounds"],
                BLANK,
            ),
            text(
                "q27",
                27,
                "35% of the people being interviewed spend a month.",
                &["20 pounds", "£20", "twenty pounds"],
                BLANK,
            ),
            Question {
                id: "q28-30".into(),
                number: 28,
                prompt: "Most of the people being interviewed think that _________ is/are most difficult to buy. (Choose THREE)".into(),
                instruction: Some("Mark THREE letters that represent the correct answer.".into()),
                key: AnswerKey::MultiSelectTrio {
                    options: [
                        "Books",
                        "Study materials",
                        "Foods",
                        "Trousers",
                        "Shoes",
                        "Sportswear",
                    ]
                    .map(String::from)
                    .to_vec(),
                    correct: trio_letters(3),
                },
            },
        ];

        Self {
            id: "shopping-habits".into(),
            title: "SECTION 3: Shopping Habits (Questions 21-30)".into(),
            audio_url: Some("https://tinyurl.com/ieltslist3".into()),
            sections: vec![
                Section::new(
                    "Questions 21-24",
                    "Complete the sentences below. Write NO MORE THAN THREE WORDS AND/OR A NUMBER for each answer.",
                    21,
                    24,
                ),
                Section::new(
                    "Questions 25-27",
                    "Fill in the blanks with ONE WORD AND/OR A NUMBER for each answer.",
                    25,
                    27,
                ),
                Section::new(
                    "Questions 28-30",
                    "Mark THREE letters that represent the correct answer.",
                    28,
                    30,
                ),
            ],
            questions,
        }
    }
}

fn text(id: &str, number: u32, prompt: &str, accepted: &[&str], instruction: &str) -> Question {
    Question {
        id: id.into(),
        number,
        prompt: prompt.into(),
        instruction: Some(instruction.into()),
        key: AnswerKey::FreeText {
            accepted: accepted.iter().map(|s| s.to_string()).collect(),
        },
    }
}

/// Three consecutive letters starting at option index `first`.
fn trio_letters(first: u8) -> [OptionLetter; TRIO_SIZE] {
    [OptionLetter(first), OptionLetter(first + 1), OptionLetter(first + 2)]
}
