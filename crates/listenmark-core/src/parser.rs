//! TOML question bank and answer sheet parser.
//!
//! Loads question banks from TOML files and directories, validates them, and
//! reads answer sheets for non-interactive checking.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::answers::{AnswerSet, SelectionChange};
use crate::bank::{QuestionBank, Section};
use crate::evaluator::normalize;
use crate::model::{OptionLetter, Question, QuestionKind};

/// Intermediate TOML structure for question bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    sections: Vec<TomlSection>,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    title: String,
    #[serde(default)]
    audio_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlSection {
    title: String,
    #[serde(default)]
    instruction: String,
    first: u32,
    last: u32,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    number: u32,
    #[serde(rename = "type", default = "default_kind")]
    kind: String,
    prompt: String,
    #[serde(default)]
    instruction: Option<String>,
    #[serde(default)]
    accepted: Vec<String>,
    #[serde(default)]
    options: Vec<String>,
}

fn default_kind() -> String {
    "free_text".to_string()
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(into_question)
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid question in {}", source_path.display()))?;

    let sections = parsed
        .sections
        .into_iter()
        .map(|s| Section::new(s.title, s.instruction, s.first, s.last))
        .collect();

    let mut bank = QuestionBank::new(parsed.bank.id, parsed.bank.title, questions)
        .with_context(|| format!("invalid question bank: {}", source_path.display()))?
        .with_sections(sections);
    if let Some(url) = parsed.bank.audio_url {
        bank = bank.with_audio_url(url);
    }
    Ok(bank)
}

fn into_question(q: TomlQuestion) -> Result<Question> {
    let kind: QuestionKind = q
        .kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;

    let question = match kind {
        QuestionKind::FreeText => {
            if !q.options.is_empty() {
                tracing::warn!("question {}: options are ignored for free-text questions", q.id);
            }
            Question::free_text(q.id, q.number, q.prompt, q.accepted)?
        }
        QuestionKind::MultiSelectTrio => {
            let letters = q
                .accepted
                .iter()
                .map(|s| s.parse::<OptionLetter>())
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("question {}", q.id))?;
            Question::multi_select_trio(q.id, q.number, q.prompt, q.options, &letters)?
        }
    };

    Ok(match q.instruction {
        Some(instruction) => question.with_instruction(instruction),
        None => question,
    })
}

/// Recursively load all `.toml` question banks from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Check a bank for issues that do not break scoring but likely are mistakes.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let warn = |id: &str, message: String| ValidationWarning {
        question_id: Some(id.to_string()),
        message,
    };

    for question in bank.questions() {
        if question.prompt().trim().is_empty() {
            warnings.push(warn(question.id(), "prompt is empty".into()));
        }

        if question.kind() == QuestionKind::FreeText {
            let mut seen = HashSet::new();
            for accepted in question.accepted_answers() {
                let normalized = normalize(&accepted);
                if normalized.is_empty() {
                    warnings.push(warn(
                        question.id(),
                        "blank accepted answer matches an empty submission".into(),
                    ));
                } else if !seen.insert(normalized) {
                    warnings.push(warn(
                        question.id(),
                        format!("accepted answer {accepted:?} duplicates another variant"),
                    ));
                }
            }
        }
    }

    // Display numbers must not collide, counting all three numbers of a trio
    let mut owners: BTreeMap<u32, &str> = BTreeMap::new();
    for question in bank.questions() {
        for number in question.numbers() {
            if let Some(other) = owners.insert(number, question.id()) {
                warnings.push(warn(
                    question.id(),
                    format!("number {number} is also used by {other}"),
                ));
            }
        }
    }

    if !bank.sections().is_empty() {
        for question in bank.questions() {
            let covered = bank
                .sections()
                .iter()
                .any(|s| s.range().contains(&question.number()));
            if !covered {
                warnings.push(warn(question.id(), "not shown in any section".into()));
            }
        }

        for (i, a) in bank.sections().iter().enumerate() {
            for b in &bank.sections()[i + 1..] {
                if a.first <= b.last && b.first <= a.last {
                    warnings.push(ValidationWarning {
                        question_id: None,
                        message: format!("sections {:?} and {:?} overlap", a.title, b.title),
                    });
                }
            }
        }
    }

    warnings
}

/// Intermediate TOML structure for answer sheets.
#[derive(Debug, Deserialize)]
struct TomlAnswerSheet {
    #[serde(default)]
    answers: BTreeMap<String, TomlAnswer>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlAnswer {
    Text(String),
    Letters(Vec<String>),
}

/// Read an answer sheet from a TOML file, applying it against `bank`.
pub fn parse_answer_sheet(path: &Path, bank: &QuestionBank) -> Result<AnswerSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer sheet: {}", path.display()))?;

    parse_answer_sheet_str(&content, path, bank)
}

/// Parse an answer sheet.
///
/// Letter lists go through the same checks as interactive input: letters
/// naming no option of the question are skipped, and letters past the third
/// are dropped. Both are logged as warnings.
pub fn parse_answer_sheet_str(
    content: &str,
    source_path: &Path,
    bank: &QuestionBank,
) -> Result<AnswerSet> {
    let parsed: TomlAnswerSheet = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut answers = AnswerSet::new();
    for (id, answer) in parsed.answers {
        match answer {
            TomlAnswer::Text(value) => answers.set_text(id, value),
            TomlAnswer::Letters(letters) => {
                let question = bank
                    .get(&id)
                    .filter(|q| q.kind() == QuestionKind::MultiSelectTrio);
                for raw in &letters {
                    let letter: OptionLetter = raw.parse().with_context(|| {
                        format!("answer for {id} in {}", source_path.display())
                    })?;
                    if question.is_some_and(|q| !q.has_option(letter)) {
                        tracing::warn!("{id}: ignoring {letter}, the question has no such option");
                        continue;
                    }
                    if answers.selection(&id).contains(&letter) {
                        continue;
                    }
                    if answers.toggle_option(&id, letter) == SelectionChange::Rejected {
                        tracing::warn!("{id}: ignoring {letter}, at most 3 options may be selected");
                    }
                }
            }
        }
    }

    Ok(answers)
}
