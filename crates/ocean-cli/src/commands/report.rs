//! The `ocean report` command.
//!
//! Scores a pre-filled answer sheet through the same session state machine
//! the interactive command uses.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use ocean_core::model::{Rating, RespondentProfile, STATEMENT_COUNT};
use ocean_core::session::{Event, Session};
use ocean_notify::config::load_config_from;
use ocean_notify::Dispatcher;

use super::{deliver, score_table};

/// On-disk answer sheet. A rating of 0 leaves the statement unanswered.
#[derive(Debug, Deserialize)]
struct AnswerSheet {
    ratings: Vec<u8>,
    #[serde(default)]
    profile: RespondentProfile,
}

fn load_answer_sheet(path: &Path) -> Result<AnswerSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer sheet: {}", path.display()))?;
    let sheet: AnswerSheet = toml::from_str(&content)
        .with_context(|| format!("failed to parse answer sheet: {}", path.display()))?;
    anyhow::ensure!(
        sheet.ratings.len() <= STATEMENT_COUNT,
        "answer sheet has {} ratings, expected at most {STATEMENT_COUNT}",
        sheet.ratings.len()
    );
    Ok(sheet)
}

pub async fn execute(
    answers_path: PathBuf,
    send: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let sheet = load_answer_sheet(&answers_path)?;

    let mut session = Session::new();
    session.apply(Event::SubmitProfile(sheet.profile))?;

    for (statement, &value) in sheet.ratings.iter().enumerate() {
        if value == 0 {
            continue;
        }
        let rating =
            Rating::new(value).with_context(|| format!("statement {}", statement + 1))?;
        session.apply(Event::Rate { statement, rating })?;
    }

    session
        .apply(Event::SubmitAnswers)
        .context("answer sheet is incomplete")?;

    let scores = *session
        .state()
        .scores()
        .context("session was not scored")?;
    println!("{}", score_table(&scores));

    let dispatcher = Dispatcher::from_config(&config);
    let mut out = std::io::stdout();
    deliver(
        &mut session,
        &dispatcher,
        send,
        &config.report.confirmation,
        &mut out,
    )
    .await
}
