//! Learner-facing feedback text.

use std::fmt;

use serde::Serialize;

use crate::evaluator::{ScoreResult, Verdict, SCORE_SCALE};

/// Encouragement band for a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Outstanding,
    GoodJob,
    KeepPracticing,
}

impl Band {
    /// Band for a score on the 0–10 scale.
    pub fn for_score(score: f64) -> Self {
        if score >= 8.0 {
            Band::Outstanding
        } else if score >= 5.0 {
            Band::GoodJob
        } else {
            Band::KeepPracticing
        }
    }

    /// Text shown next to the score.
    pub fn message(self) -> &'static str {
        match self {
            Band::Outstanding => "Outstanding!",
            Band::GoodJob => "Good job!",
            Band::KeepPracticing => "Keep practicing!",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// `"5.0/10"`.
pub fn score_line(result: &ScoreResult) -> String {
    format!("{}/{}", result.display_score(), SCORE_SCALE)
}

/// Message shown under a multi-select trio.
pub fn trio_message(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Correct => "Excellent! You selected all 3 correct options.",
        Verdict::Partial | Verdict::Incorrect => {
            "You selected some correct options. Marks were awarded per correct letter."
        }
    }
}
