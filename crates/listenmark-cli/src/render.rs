//! Terminal rendering of questions and results.

use std::io::Write;

use anyhow::Result;
use comfy_table::{Cell, Table};

use listenmark_core::answers::AnswerSet;
use listenmark_core::bank::QuestionBank;
use listenmark_core::evaluator::{ScoreResult, Verdict};
use listenmark_core::feedback::{score_line, trio_message, Band};
use listenmark_core::model::{Question, QuestionKind};

/// Display label for a question's numbers, e.g. `21` or `28-30`.
pub fn number_label(question: &Question) -> String {
    let numbers = question.numbers();
    if numbers.start() == numbers.end() {
        numbers.start().to_string()
    } else {
        format!("{}-{}", numbers.start(), numbers.end())
    }
}

/// The bank header: title and audio link.
pub fn write_header(out: &mut impl Write, bank: &QuestionBank) -> Result<()> {
    writeln!(out, "{}", bank.title())?;
    if let Some(url) = bank.audio_url() {
        writeln!(out, "Audio: {url}")?;
    }
    Ok(())
}

/// One question with its options. Accepted answers are never shown here.
pub fn write_question(out: &mut impl Write, question: &Question) -> Result<()> {
    writeln!(out, "{}. {}", number_label(question), question.prompt())?;
    if let Some(instruction) = question.instruction() {
        writeln!(out, "   ({instruction})")?;
    }
    for (letter, text) in question.lettered_options() {
        writeln!(out, "   {letter}. {text}")?;
    }
    Ok(())
}

/// Questions grouped under their sections.
///
/// Questions not covered by any section are listed last.
pub fn write_questions(
    out: &mut impl Write,
    bank: &QuestionBank,
    selected: &[&Question],
) -> Result<()> {
    let mut shown = 0usize;
    for section in bank.sections() {
        let in_section: Vec<_> = selected
            .iter()
            .filter(|q| section.range().contains(&q.number()))
            .collect();
        if in_section.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "{}", section.title)?;
        if !section.instruction.is_empty() {
            writeln!(out, "{}", section.instruction)?;
        }
        for question in in_section {
            write_question(out, question)?;
            shown += 1;
        }
    }

    if shown < selected.len() {
        let rest: Vec<_> = selected
            .iter()
            .filter(|q| !bank.sections().iter().any(|s| s.range().contains(&q.number())))
            .collect();
        writeln!(out)?;
        if !bank.sections().is_empty() {
            writeln!(out, "Other questions")?;
        }
        for question in rest {
            write_question(out, question)?;
        }
    }
    Ok(())
}

/// The submitted answer as typed or selected.
pub fn answer_label(question: &Question, answers: &AnswerSet) -> String {
    match question.kind() {
        QuestionKind::FreeText => answers.text(question.id()).trim().to_string(),
        QuestionKind::MultiSelectTrio => answers
            .selection(question.id())
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Verdict table, trio feedback, and the final score line.
pub fn write_result(
    out: &mut impl Write,
    bank: &QuestionBank,
    answers: &AnswerSet,
    result: &ScoreResult,
    reveal: bool,
) -> Result<()> {
    let mut table = Table::new();
    let mut header = vec!["No.", "Your answer", "Result", "Points"];
    if reveal {
        header.push("Accepted");
    }
    table.set_header(header);

    for question in bank.questions() {
        let Some(outcome) = result.outcome(question.id()) else {
            continue;
        };
        let mut row = vec![
            Cell::new(number_label(question)),
            Cell::new(answer_label(question, answers)),
            Cell::new(outcome.verdict),
            Cell::new(format!("{}/{}", outcome.points, outcome.max_points)),
        ];
        if reveal {
            row.push(Cell::new(question.accepted_answers().join(" / ")));
        }
        table.add_row(row);
    }
    writeln!(out, "{table}")?;

    for question in bank.of_kind(QuestionKind::MultiSelectTrio) {
        let verdict = result.verdict(question.id()).unwrap_or(Verdict::Partial);
        writeln!(out, "{}: {}", number_label(question), trio_message(verdict))?;
    }

    writeln!(
        out,
        "Score: {}  {}",
        score_line(result),
        Band::for_score(result.score)
    )?;
    Ok(())
}
