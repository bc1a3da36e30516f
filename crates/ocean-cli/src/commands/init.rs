//! The `ocean init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_absent(Path::new("ocean.toml"), SAMPLE_CONFIG)?;
    write_if_absent(Path::new("answers.example.toml"), EXAMPLE_ANSWERS)?;

    println!("\nNext steps:");
    println!("  1. Set OCEAN_EMAIL, OCEAN_RECEIVER and OCEAN_EMAIL_PASSWORD (or edit ocean.toml)");
    println!("  2. Try it offline: ocean report --answers answers.example.toml");
    println!("  3. Take the assessment: ocean take");

    Ok(())
}

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# ocean configuration

[smtp]
host = "smtp.gmail.com"
port = 587
timeout_secs = 30

[report]
title = "OCEAN Test Results"
confirmation = """
Your results have been securely sent to the assessment team.
Please contact them to receive your personalized report."""

# OCEAN_EMAIL, OCEAN_RECEIVER and OCEAN_EMAIL_PASSWORD take precedence.
[secrets]
EMAIL = "${OCEAN_SENDER_ADDRESS}"
RECEIVER = "${OCEAN_RECEIVER_ADDRESS}"
EMAIL_PASSWORD = "${OCEAN_SMTP_PASSWORD}"
"#;

const EXAMPLE_ANSWERS: &str = r#"# One rating per statement, in `ocean questions` order.
# 1 = Strongly Disagree ... 5 = Strongly Agree; 0 = unanswered.
ratings = [
    4, 3, 2, 5, 4,
    3, 4, 3, 5, 4,
    4, 5, 2, 4, 4,
    3, 4, 3, 5, 5,
    4, 4, 3, 5, 5,
]

[profile]
name = "Alex Example"
age = 30
education = "Undergraduate"
school = "Example University"
subjects = "Physics, Mathematics"
hobbies = "Climbing, chess"
dream = "Visit Mars"
email = "alex@example.com"
phone = "+1 555 0100"
"#;
