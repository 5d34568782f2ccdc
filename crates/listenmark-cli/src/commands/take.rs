//! The `listenmark take` command: an interactive quiz session.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use listenmark_core::answers::SelectionChange;
use listenmark_core::model::{OptionLetter, Question, QuestionKind};
use listenmark_core::session::QuizSession;

use crate::config::{load_config_from, resolve_bank};
use crate::render;

pub fn execute(bank_path: Option<PathBuf>, reveal: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = resolve_bank(bank_path.as_deref(), &config)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_session(
        QuizSession::new(bank),
        stdin.lock(),
        stdout.lock(),
        reveal || config.reveal_answers,
    )
}

/// Drive one session over line-based input until the user declines a retry
/// or input runs out.
pub fn run_session(
    mut session: QuizSession,
    mut input: impl BufRead,
    mut out: impl Write,
    reveal: bool,
) -> Result<()> {
    loop {
        render::write_header(&mut out, session.bank())?;

        let questions: Vec<Question> = session.bank().questions().to_vec();
        for question in &questions {
            writeln!(out)?;
            render::write_question(&mut out, question)?;
            match question.kind() {
                QuestionKind::FreeText => {
                    write!(out, "> ")?;
                    out.flush()?;
                    let line = read_line(&mut input)?.unwrap_or_default();
                    session.set_text(question.id(), &line)?;
                }
                QuestionKind::MultiSelectTrio => {
                    write!(out, "Select up to 3 letters (e.g. A C E) > ")?;
                    out.flush()?;
                    let line = read_line(&mut input)?.unwrap_or_default();
                    select_letters(&mut session, question, &line, &mut out)?;
                }
            }
        }

        let result = session.submit()?.clone();
        writeln!(out)?;
        render::write_result(&mut out, session.bank(), session.answers(), &result, reveal)?;

        write!(out, "\nReset and try again? [y/N] ")?;
        out.flush()?;
        let again = read_line(&mut input)?
            .map(|l| matches!(l.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false);
        if !again {
            writeln!(out)?;
            return Ok(());
        }
        session.reset();
        writeln!(out)?;
    }
}

/// Apply whitespace- or comma-separated letters to a multi-select question.
fn select_letters(
    session: &mut QuizSession,
    question: &Question,
    line: &str,
    out: &mut impl Write,
) -> Result<()> {
    let tokens = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty());

    for token in tokens {
        let letter = match token.parse::<OptionLetter>() {
            Ok(letter) => letter,
            Err(e) => {
                writeln!(out, "  ignoring {token:?}: {e}")?;
                continue;
            }
        };
        if session.answers().selection(question.id()).contains(&letter) {
            continue;
        }
        match session.toggle_option(question.id(), letter) {
            Ok(SelectionChange::Rejected) => {
                writeln!(out, "  ignoring {letter}: at most 3 options may be selected")?;
            }
            Ok(_) => {}
            Err(e) if !e.is_locked() => writeln!(out, "  ignoring {letter}: {e}")?,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Next line without its terminator, or `None` at end of input.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
