//! The `listenmark show` command.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use listenmark_core::model::{Question, QuestionKind};

use crate::config::{load_config_from, resolve_bank, OutputFormat};
use crate::render;

/// JSON shape of a question as shown to a learner: no answer key.
#[derive(Debug, Serialize)]
struct QuestionView<'a> {
    id: &'a str,
    number: u32,
    #[serde(rename = "type")]
    kind: QuestionKind,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    instruction: Option<&'a str>,
    options: &'a [String],
}

impl<'a> From<&'a Question> for QuestionView<'a> {
    fn from(q: &'a Question) -> Self {
        QuestionView {
            id: q.id(),
            number: q.number(),
            kind: q.kind(),
            prompt: q.prompt(),
            instruction: q.instruction(),
            options: q.options(),
        }
    }
}

pub fn execute(
    bank_path: Option<PathBuf>,
    kind: Option<String>,
    from: Option<u32>,
    to: Option<u32>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let format = config.format_or(format.as_deref())?;
    let bank = resolve_bank(bank_path.as_deref(), &config)?;

    let kind: Option<QuestionKind> = kind
        .map(|k| k.parse().map_err(|e: String| anyhow::anyhow!(e)))
        .transpose()?;
    let range = from.unwrap_or(0)..=to.unwrap_or(u32::MAX);
    anyhow::ensure!(!range.is_empty(), "--from must not be greater than --to");

    let selected: Vec<&Question> = bank
        .in_range(range)
        .filter(|q| kind.map_or(true, |k| q.kind() == k))
        .collect();

    match format {
        OutputFormat::Json => {
            let views: Vec<QuestionView<'_>> =
                selected.iter().map(|q| QuestionView::from(*q)).collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        OutputFormat::Text => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            render::write_header(&mut out, &bank)?;
            if selected.is_empty() {
                writeln!(out, "\nNo questions match.")?;
            } else {
                render::write_questions(&mut out, &bank, &selected)?;
            }
        }
    }

    Ok(())
}
