//! Text rendering of the questionnaire.
//!
//! The selected-rating indicator is derived from the response set on every
//! call; nothing else tracks which control is highlighted.

use std::fmt::Write as _;

use crate::model::{Rating, Statement, STATEMENTS};
use crate::responses::ResponseSet;

/// Heading shown above the statements.
pub const RATING_HEADER: &str = "Rate each statement (1 = Strongly Disagree, 5 = Strongly Agree)";

/// The five rating controls for one statement, e.g. `[1] [2] >3< [4] [5]`.
pub fn rating_controls(selected: Option<Rating>) -> String {
    Rating::all()
        .map(|r| {
            if Some(r) == selected {
                format!(">{r}<")
            } else {
                format!("[{r}]")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One statement block: numbered prompt followed by its controls.
pub fn render_statement(index: usize, statement: &Statement, selected: Option<Rating>) -> String {
    format!(
        "{:>2}. {}\n    {}",
        index + 1,
        statement.prompt,
        rating_controls(selected)
    )
}

/// The whole questionnaire with the header and a progress line.
pub fn render_questionnaire(responses: &ResponseSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RATING_HEADER}\n");
    for (index, statement) in STATEMENTS.iter().enumerate() {
        let _ = writeln!(out, "{}", render_statement(index, statement, responses.get(index)));
    }
    let _ = write!(
        out,
        "\nAnswered {}/{}",
        responses.answered(),
        STATEMENTS.len()
    );
    out
}
