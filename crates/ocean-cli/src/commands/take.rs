//! The `ocean take` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use ocean_core::model::{Age, Rating, RespondentProfile, STATEMENTS, STATEMENT_COUNT};
use ocean_core::render::{render_questionnaire, render_statement, RATING_HEADER};
use ocean_core::session::{Event, Session};
use ocean_notify::config::load_config_from;
use ocean_notify::Dispatcher;

use super::{deliver, score_table};

pub async fn execute(dry_run: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let dispatcher = Dispatcher::from_config(&config);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();

    run_session(
        &mut input,
        &mut out,
        &dispatcher,
        !dry_run,
        &config.report.confirmation,
    )
    .await
}

/// Drive one session from intake to delivery over a line-based terminal.
pub async fn run_session<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    dispatcher: &Dispatcher,
    send: bool,
    confirmation: &str,
) -> Result<()> {
    let mut session = Session::new();
    writeln!(out, "OCEAN Personality Assessment\n")?;

    let profile = read_profile(input, out)?;
    session.apply(Event::SubmitProfile(profile))?;

    writeln!(out, "\n{RATING_HEADER}")?;
    writeln!(out, "Press Enter to skip a statement and come back to it later.\n")?;
    for (index, statement) in STATEMENTS.iter().enumerate() {
        writeln!(out, "{}", render_statement(index, statement, None))?;
        if let Some(rating) = read_rating(input, out)? {
            session.apply(Event::Rate {
                statement: index,
                rating,
            })?;
        }
    }

    review(&mut session, input, out)?;

    let scores = *session
        .state()
        .scores()
        .context("session was not scored")?;
    writeln!(out, "\n{}", score_table(&scores))?;

    deliver(&mut session, dispatcher, send, confirmation, out).await
}

fn read_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<String> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed before the assessment was finished");
    }
    Ok(line.trim().to_string())
}

fn read_profile<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<RespondentProfile> {
    let name = read_line(input, out, "Full Name: ")?;
    let age = loop {
        let raw = read_line(input, out, &format!("Age ({}-{}): ", Age::MIN, Age::MAX))?;
        if raw.is_empty() {
            break Age::default();
        }
        match raw.parse::<u32>().map_err(|e| e.to_string()).and_then(|v| {
            Age::new(v).map_err(|e| e.to_string())
        }) {
            Ok(age) => break age,
            Err(e) => writeln!(out, "  Invalid age: {e}")?,
        }
    };

    Ok(RespondentProfile {
        name,
        age,
        education: read_line(input, out, "Education: ")?,
        school: read_line(input, out, "School / University: ")?,
        subjects: read_line(input, out, "Subjects: ")?,
        hobbies: read_line(input, out, "Hobbies: ")?,
        dream: read_line(input, out, "Your 'Impossible' Dream: ")?,
        email: read_line(input, out, "Email: ")?,
        phone: read_line(input, out, "Phone Number: ")?,
    })
}

/// `Ok(None)` when the respondent skips the statement.
fn read_rating<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<Rating>> {
    loop {
        let raw = read_line(input, out, "    Rating (1-5): ")?;
        if raw.is_empty() {
            return Ok(None);
        }
        match raw.parse::<u8>().ok().and_then(|v| Rating::new(v).ok()) {
            Some(rating) => return Ok(Some(rating)),
            None => writeln!(out, "    Enter a number from 1 to 5.")?,
        }
    }
}

/// Let the respondent change answers until they submit a complete set.
fn review<R: BufRead, W: Write>(session: &mut Session, input: &mut R, out: &mut W) -> Result<()> {
    loop {
        let responses = session
            .state()
            .responses()
            .context("session is not collecting answers")?;
        writeln!(out, "\n{}", render_questionnaire(responses))?;

        let submit_hint = if session.state().can_submit() {
            "submit"
        } else {
            "submit (locked until all answered)"
        };
        let command = read_line(
            input,
            out,
            &format!("Command (<n> <rating> | {submit_hint} | quit): "),
        )?;

        match command.to_lowercase().as_str() {
            "submit" => match session.apply(Event::SubmitAnswers).map(|_| ()) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    let hint = session
                        .state()
                        .responses()
                        .and_then(|r| r.first_unanswered())
                        .map(|i| format!(" (next: #{})", i + 1))
                        .unwrap_or_default();
                    writeln!(out, "  Cannot submit yet: {e}{hint}")?
                }
            },
            "quit" | "q" => bail!("assessment abandoned; nothing was sent"),
            other => match parse_change(other) {
                Some((statement, rating)) => {
                    if let Err(e) = session.apply(Event::Rate { statement, rating }) {
                        writeln!(out, "  {e}")?;
                    }
                }
                None => writeln!(
                    out,
                    "  Unknown command. Type a statement number and rating, e.g. `7 4`."
                )?,
            },
        }
    }
}

/// Parse `"<n> <rating>"` with a 1-based statement number.
fn parse_change(command: &str) -> Option<(usize, Rating)> {
    let mut parts = command.split_whitespace();
    let number: usize = parts.next()?.parse().ok()?;
    let rating: u8 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !(1..=STATEMENT_COUNT).contains(&number) {
        return None;
    }
    Some((number - 1, Rating::new(rating).ok()?))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::io::Cursor;
    use std::sync::Arc;

    use ocean_core::error::DispatchError;
    use ocean_notify::secrets::SecretStore;
    use ocean_notify::MockMailer;

    use super::*;

    fn secrets(complete: bool) -> Box<dyn SecretStore> {
        let mut map = BTreeMap::new();
        map.insert("EMAIL".to_string(), "sender@example.com".to_string());
        map.insert("RECEIVER".to_string(), "counsellor@example.com".to_string());
        if complete {
            map.insert("EMAIL_PASSWORD".to_string(), "app-password".to_string());
        }
        Box::new(map)
    }

    fn script(profile: &[&str], ratings: &[&str], commands: &[&str]) -> Cursor<Vec<u8>> {
        let lines: Vec<&str> = profile
            .iter()
            .chain(ratings)
            .chain(commands)
            .copied()
            .collect();
        Cursor::new(format!("{}\n", lines.join("\n")).into_bytes())
    }

    const ALEX: [&str; 9] = ["Alex", "30", "", "", "", "", "", "", ""];

    async fn run(
        input: Cursor<Vec<u8>>,
        mailer: Arc<MockMailer>,
        complete_secrets: bool,
        send: bool,
    ) -> (Result<()>, String) {
        let dispatcher = Dispatcher::new(mailer, secrets(complete_secrets), "OCEAN Test Results");
        let mut input = input;
        let mut out = Vec::new();
        let result = run_session(&mut input, &mut out, &dispatcher, send, "Sent!").await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn all_fives_sends_report() {
        let mailer = Arc::new(MockMailer::new());
        let input = script(&ALEX, &["5"; STATEMENT_COUNT], &["submit"]);

        let (result, output) = run(input, mailer.clone(), true, true).await;
        result.unwrap();

        assert!(output.contains("Sent!"));
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].body.contains("Name: Alex"));
        assert!(sent[0].body.contains("Age: 30"));
        assert!(sent[0].body.contains("Emotional Stability (ES): 25"));
    }

    #[tokio::test]
    async fn skipped_statement_locks_submit_until_answered() {
        let mailer = Arc::new(MockMailer::new());
        let mut ratings = ["3"; STATEMENT_COUNT];
        ratings[6] = "";
        let input = script(&ALEX, &ratings, &["submit", "7 3", "submit"]);

        let (result, output) = run(input, mailer.clone(), true, false).await;
        result.unwrap();

        assert!(output.contains("submit (locked until all answered)"));
        assert!(output.contains("Cannot submit yet: 1 statement(s) still unanswered (next: #7)"));
        assert!(output.contains("Conscientiousness (C): 15"));
        assert_eq!(mailer.call_count(), 0, "dry run must not send");
    }

    #[tokio::test]
    async fn invalid_inputs_are_reprompted() {
        let mailer = Arc::new(MockMailer::new());
        let profile = ["Sam", "7", "abc", "", "", "", "", "", "", "", ""];
        let mut ratings = vec!["9", "x"];
        ratings.extend(["2"; STATEMENT_COUNT]);
        let input = script(&profile, &ratings, &["1 4", "submit"]);

        let (result, output) = run(input, mailer.clone(), true, true).await;
        result.unwrap();

        assert!(output.contains("Invalid age: age 7 is outside 10..=100"));
        assert!(output.contains("Invalid age"));
        assert!(output.contains("Enter a number from 1 to 5."));
        let body = &mailer.sent()[0].body;
        assert!(body.contains("Age: 10"));
        assert!(body.contains("Extraversion (E): 12"));
    }

    #[tokio::test]
    async fn missing_secret_reports_error_without_sending() {
        let mailer = Arc::new(MockMailer::new());
        let input = script(&ALEX, &["4"; STATEMENT_COUNT], &["submit"]);

        let (result, output) = run(input, mailer.clone(), false, true).await;
        let err = result.unwrap_err();

        assert!(format!("{err:#}").contains("missing secrets: EMAIL_PASSWORD"));
        assert!(!output.contains("Sent!"));
        assert_eq!(mailer.call_count(), 0);
    }

    #[tokio::test]
    async fn relay_auth_failure_hides_confirmation() {
        let mailer = Arc::new(MockMailer::failing(DispatchError::AuthenticationFailed(
            "535".into(),
        )));
        let input = script(&ALEX, &["1"; STATEMENT_COUNT], &["submit"]);

        let (result, output) = run(input, mailer.clone(), true, true).await;

        assert!(result.is_err());
        assert!(!output.contains("Sent!"));
        assert_eq!(mailer.call_count(), 1);
    }

    #[tokio::test]
    async fn quit_abandons_session() {
        let mailer = Arc::new(MockMailer::new());
        let input = script(&ALEX, &["3"; STATEMENT_COUNT], &["quit"]);

        let (result, _) = run(input, mailer.clone(), true, true).await;
        assert!(result.unwrap_err().to_string().contains("abandoned"));
        assert_eq!(mailer.call_count(), 0);
    }

    #[tokio::test]
    async fn closed_input_is_an_error() {
        let mailer = Arc::new(MockMailer::new());
        let input = script(&ALEX, &["3"; 4], &[]);

        let (result, _) = run(input, mailer, true, true).await;
        assert!(result.unwrap_err().to_string().contains("input closed"));
    }

    #[test]
    fn parse_change_bounds() {
        assert_eq!(parse_change("1 5"), Some((0, Rating::new(5).unwrap())));
        assert_eq!(parse_change("25 1"), Some((24, Rating::new(1).unwrap())));
        assert_eq!(parse_change("0 3"), None);
        assert_eq!(parse_change("26 3"), None);
        assert_eq!(parse_change("3 6"), None);
        assert_eq!(parse_change("3"), None);
        assert_eq!(parse_change("3 4 5"), None);
    }
}
