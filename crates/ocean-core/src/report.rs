//! Plain-text results report.

use std::fmt::Write as _;

use crate::model::{RespondentProfile, STATEMENTS};
use crate::responses::ResponseSet;
use crate::scoring::TraitScores;

/// Default report title used in the message subject.
pub const DEFAULT_REPORT_TITLE: &str = "OCEAN Test Results";

/// Subject line: `"<title> – <name>"`.
pub fn subject(title: &str, profile: &RespondentProfile) -> String {
    format!("{title} \u{2013} {}", profile.name)
}

/// Render the report body.
///
/// Layout: profile fields in declared order, the five trait totals, then
/// every statement with its trait code and rating in catalog order.
pub fn render_body(
    profile: &RespondentProfile,
    scores: &TraitScores,
    responses: &ResponseSet,
) -> String {
    let mut body = String::new();

    for (label, value) in profile.fields() {
        let _ = writeln!(body, "{label}: {value}");
    }

    body.push_str("\n--- OCEAN SCORES ---\n");
    for (t, total) in scores.iter() {
        let _ = writeln!(body, "{} ({}): {total}", t.label(), t.code());
    }

    body.push_str("\n--- Detailed Responses ---\n");
    for (index, statement) in STATEMENTS.iter().enumerate() {
        let _ = writeln!(
            body,
            "{} [{}]: {}",
            statement.prompt,
            statement.trait_code.code(),
            responses.value(index)
        );
    }

    body
}
