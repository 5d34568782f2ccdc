//! Answer scoring.
//!
//! [`evaluate`] is a pure function of the questions and an answer snapshot.
//! It never fails: missing answers score as incorrect or zero.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answers::AnswerSet;
use crate::model::{AnswerKey, Question, QuestionKind, TRIO_SIZE};

/// Scores are reported out of this many points.
pub const SCORE_SCALE: f64 = 10.0;

/// Per-question evaluation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
    /// A multi-select trio with fewer than three correct letters, including
    /// none at all.
    Partial,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "Correct"),
            Verdict::Incorrect => write!(f, "Incorrect"),
            Verdict::Partial => write!(f, "Partial"),
        }
    }
}

/// How one question scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOutcome {
    pub id: String,
    pub kind: QuestionKind,
    pub verdict: Verdict,
    /// Raw points earned.
    pub points: u32,
    /// Points available (the question's weight).
    pub max_points: u32,
}

/// The result of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Outcomes in question order.
    pub outcomes: Vec<QuestionOutcome>,
    /// Sum of points over all questions.
    pub raw_score: u32,
    /// Sum of question weights.
    pub total_weight: u32,
    /// `raw_score` scaled to [`SCORE_SCALE`], unrounded.
    pub score: f64,
}

impl ScoreResult {
    /// Verdict for question `id`, if it was evaluated.
    pub fn verdict(&self, id: &str) -> Option<Verdict> {
        self.outcome(id).map(|o| o.verdict)
    }

    /// Full outcome for question `id`.
    pub fn outcome(&self, id: &str) -> Option<&QuestionOutcome> {
        self.outcomes.iter().find(|o| o.id == id)
    }

    /// Verdicts keyed by question id.
    pub fn verdicts(&self) -> BTreeMap<&str, Verdict> {
        self.outcomes
            .iter()
            .map(|o| (o.id.as_str(), o.verdict))
            .collect()
    }

    /// Score rounded to one decimal place for display, e.g. `"5.0"`.
    pub fn display_score(&self) -> String {
        format!("{:.1}", self.score)
    }
}

/// Normalize free-text input for comparison: trim, then lowercase.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Score `answers` against `questions`.
pub fn evaluate(questions: &[Question], answers: &AnswerSet) -> ScoreResult {
    let outcomes: Vec<QuestionOutcome> = questions
        .iter()
        .map(|q| score_question(q, answers))
        .collect();

    let raw_score: u32 = outcomes.iter().map(|o| o.points).sum();
    let total_weight: u32 = outcomes.iter().map(|o| o.max_points).sum();
    let score = if total_weight == 0 {
        0.0
    } else {
        f64::from(raw_score) * SCORE_SCALE / f64::from(total_weight)
    };

    tracing::debug!(
        raw_score,
        total_weight,
        "evaluated {} questions, score {score:.1}",
        outcomes.len()
    );

    ScoreResult {
        outcomes,
        raw_score,
        total_weight,
        score,
    }
}

fn score_question(question: &Question, answers: &AnswerSet) -> QuestionOutcome {
    let (verdict, points) = match question.key() {
        AnswerKey::FreeText { accepted } => {
            let submitted = normalize(answers.text(question.id()));
            if accepted.iter().any(|a| normalize(a) == submitted) {
                (Verdict::Correct, 1)
            } else {
                (Verdict::Incorrect, 0)
            }
        }
        AnswerKey::MultiSelectTrio { correct, .. } => {
            let selected = answers.selection(question.id());
            let matches = correct.iter().filter(|l| selected.contains(*l)).count();
            let verdict = if matches == TRIO_SIZE {
                Verdict::Correct
            } else {
                Verdict::Partial
            };
            (verdict, matches as u32)
        }
    };

    QuestionOutcome {
        id: question.id().to_string(),
        kind: question.kind(),
        verdict,
        points,
        max_points: question.weight(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::QuestionBank;
    use crate::model::OptionLetter;

    fn letter(c: char) -> OptionLetter {
        c.to_string().parse().unwrap()
    }

    fn select(answers: &mut AnswerSet, id: &str, letters: &str) {
        for c in letters.chars() {
            answers.toggle_option(id, letter(c));
        }
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Big Department STORES \t"), "big department stores");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn free_text_accepts_any_variant() {
        let bank = QuestionBank::shopping_habits();
        for variant in ["50 pounds", "  £50", "FIFTY POUNDS  ", "Fifty Pounds"] {
            let mut answers = AnswerSet::new();
            answers.set_text("q22", variant);
            let result = evaluate(bank.questions(), &answers);
            assert_eq!(result.verdict("q22"), Some(Verdict::Correct), "{variant:?}");
        }
    }

    #[test]
    fn free_text_rejects_near_misses() {
        let bank = QuestionBank::shopping_habits();
        for attempt in ["50", "fifty-pounds", "£ 50", "cashier", ""] {
            let mut answers = AnswerSet::new();
            answers.set_text("q22", attempt);
            let result = evaluate(bank.questions(), &answers);
            assert_eq!(result.verdict("q22"), Some(Verdict::Incorrect), "{attempt:?}");
        }
    }

    #[test]
    fn trio_all_correct_in_any_order() {
        let bank = QuestionBank::shopping_habits();
        let mut answers = AnswerSet::new();
        select(&mut answers, "q28-30", "FDE");
        let result = evaluate(bank.questions(), &answers);
        let outcome = result.outcome("q28-30").unwrap();
        assert_eq!(outcome.verdict, Verdict::Correct);
        assert_eq!(outcome.points, 3);
        assert_eq!(outcome.max_points, 3);
    }

    #[test]
    fn trio_partial_counts_matches() {
        let bank = QuestionBank::shopping_habits();
        for (letters, expected) in [("", 0), ("ABC", 0), ("AD", 1), ("DEA", 2)] {
            let mut answers = AnswerSet::new();
            select(&mut answers, "q28-30", letters);
            let result = evaluate(bank.questions(), &answers);
            let outcome = result.outcome("q28-30").unwrap();
            assert_eq!(outcome.verdict, Verdict::Partial, "{letters:?}");
            assert_eq!(outcome.points, expected, "{letters:?}");
        }
    }

    #[test]
    fn empty_answers_score_zero() {
        let bank = QuestionBank::shopping_habits();
        let result = evaluate(bank.questions(), &AnswerSet::new());
        assert_eq!(result.raw_score, 0);
        assert_eq!(result.total_weight, 10);
        assert_eq!(result.display_score(), "0.0");
        for outcome in &result.outcomes {
            let expected = match outcome.kind {
                QuestionKind::FreeText => Verdict::Incorrect,
                QuestionKind::MultiSelectTrio => Verdict::Partial,
            };
            assert_eq!(outcome.verdict, expected);
        }
    }

    #[test]
    fn mixed_answers_score_five() {
        let bank = QuestionBank::shopping_habits();
        let mut answers = AnswerSet::new();
        answers.set_text("q21", "Cashier");
        answers.set_text("q22", "£50");
        select(&mut answers, "q28-30", "DEF");

        let result = evaluate(bank.questions(), &answers);
        assert_eq!(result.verdict("q21"), Some(Verdict::Correct));
        assert_eq!(result.verdict("q22"), Some(Verdict::Correct));
        assert_eq!(result.verdict("q28-30"), Some(Verdict::Correct));
        assert_eq!(result.verdict("q23"), Some(Verdict::Incorrect));
        assert_eq!(result.raw_score, 5);
        assert_eq!(result.total_weight, 10);
        assert_eq!(result.score, 5.0);
        assert_eq!(result.display_score(), "5.0");
    }

    #[test]
    fn single_trio_match_scores_one() {
        let bank = QuestionBank::shopping_habits();
        let mut answers = AnswerSet::new();
        select(&mut answers, "q28-30", "AD");
        let result = evaluate(bank.questions(), &answers);
        assert_eq!(result.verdict("q28-30"), Some(Verdict::Partial));
        assert_eq!(result.raw_score, 1);
        assert_eq!(result.display_score(), "1.0");
    }

    #[test]
    fn evaluation_is_idempotent() {
        let bank = QuestionBank::shopping_habits();
        let mut answers = AnswerSet::new();
        answers.set_text("q24", " JEANS ");
        select(&mut answers, "q28-30", "BE");
        let first = evaluate(bank.questions(), &answers);
        let second = evaluate(bank.questions(), &answers);
        assert_eq!(first, second);
        assert_eq!(first.score.to_bits(), second.score.to_bits());
    }

    #[test]
    fn mismatched_answer_types_count_as_empty() {
        let bank = QuestionBank::shopping_habits();
        let mut answers = AnswerSet::new();
        answers.set_text("q28-30", "D E F");
        select(&mut answers, "q21", "A");
        let result = evaluate(bank.questions(), &answers);
        assert_eq!(result.verdict("q21"), Some(Verdict::Incorrect));
        assert_eq!(result.outcome("q28-30").unwrap().points, 0);
    }

    #[test]
    fn empty_question_list_scores_zero() {
        let result = evaluate(&[], &AnswerSet::new());
        assert_eq!(result.total_weight, 0);
        assert_eq!(result.score, 0.0);
        assert!(result.verdicts().is_empty());
    }

    #[test]
    fn score_is_not_rounded() {
        let questions = vec![
            Question::free_text("a", 1, "p", vec!["x".into()]).unwrap(),
            Question::free_text("b", 2, "p", vec!["y".into()]).unwrap(),
            Question::free_text("c", 3, "p", vec!["z".into()]).unwrap(),
        ];
        let mut answers = AnswerSet::new();
        answers.set_text("a", "x");
        let result = evaluate(&questions, &answers);
        assert!((result.score - 10.0 / 3.0).abs() < 1e-12);
        assert_eq!(result.display_score(), "3.3");
    }
}
