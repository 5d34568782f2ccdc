//! The `listenmark check` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use listenmark_core::evaluator::{evaluate, ScoreResult};
use listenmark_core::feedback::Band;
use listenmark_core::parser::parse_answer_sheet;

use crate::config::{load_config_from, resolve_bank, OutputFormat};
use crate::render;

/// JSON shape of a checked answer sheet.
#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    bank: &'a str,
    display_score: String,
    band: Band,
    result: &'a ScoreResult,
}

pub fn execute(
    answers_path: PathBuf,
    bank_path: Option<PathBuf>,
    format: Option<String>,
    reveal: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let format = config.format_or(format.as_deref())?;
    let bank = resolve_bank(bank_path.as_deref(), &config)?;
    let answers = parse_answer_sheet(&answers_path, &bank)?;

    for (id, _) in answers.iter() {
        if bank.get(id).is_none() {
            tracing::warn!("answer sheet has an answer for unknown question {id}");
        }
    }

    let result = evaluate(bank.questions(), &answers);

    match format {
        OutputFormat::Json => {
            let report = CheckReport {
                bank: bank.id(),
                display_score: result.display_score(),
                band: Band::for_score(result.score),
                result: &result,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            render::write_header(&mut out, &bank)?;
            render::write_result(
                &mut out,
                &bank,
                &answers,
                &result,
                reveal || config.reveal_answers,
            )?;
        }
    }

    Ok(())
}
