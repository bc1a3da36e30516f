pub mod init;
pub mod questions;
pub mod report;
pub mod take;

use std::io::Write;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use ocean_core::model::{Rating, STATEMENTS_PER_TRAIT};
use ocean_core::scoring::TraitScores;
use ocean_core::session::Session;
use ocean_notify::{DispatchOutcome, Dispatcher};

/// Trait totals as a table.
pub fn score_table(scores: &TraitScores) -> Table {
    let max = STATEMENTS_PER_TRAIT * usize::from(Rating::MAX);
    let mut table = Table::new();
    table.set_header(vec!["Trait", "Code", "Score"]);
    for (t, total) in scores.iter() {
        table.add_row(vec![
            Cell::new(t.label()),
            Cell::new(t.code()),
            Cell::new(format!("{total} / {max}")),
        ]);
    }
    table
}

/// Either email the report or print it, for a session that has been scored.
pub async fn deliver(
    session: &mut Session,
    dispatcher: &Dispatcher,
    send: bool,
    confirmation: &str,
    out: &mut impl Write,
) -> Result<()> {
    if !send {
        let preview = dispatcher
            .preview(session.state())
            .context("session has not been scored")?;
        writeln!(out, "\nSubject: {}\n", preview.subject)?;
        write!(out, "{}", preview.body)?;
        return Ok(());
    }

    let outcome = dispatcher
        .dispatch(session)
        .await
        .context("results could not be sent; restart the assessment to try again")?;
    if outcome == DispatchOutcome::AlreadySent {
        tracing::debug!("results were already sent for this session");
    }
    writeln!(out, "\n{confirmation}")?;
    Ok(())
}
