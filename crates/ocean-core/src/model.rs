//! Core data model types for ocean.
//!
//! The fixed statement catalog, the five trait categories, and the
//! respondent profile captured before the questionnaire starts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RangeError;

/// Number of statements in the questionnaire.
pub const STATEMENT_COUNT: usize = 25;

/// Number of statements mapped to each trait.
pub const STATEMENTS_PER_TRAIT: usize = 5;

/// One of the five personality trait categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Trait {
    #[serde(rename = "O")]
    Openness,
    #[serde(rename = "C")]
    Conscientiousness,
    #[serde(rename = "E")]
    Extraversion,
    #[serde(rename = "A")]
    Agreeableness,
    #[serde(rename = "ES")]
    EmotionalStability,
}

impl Trait {
    /// All traits in report order.
    pub const ALL: [Trait; 5] = [
        Trait::Openness,
        Trait::Conscientiousness,
        Trait::Extraversion,
        Trait::Agreeableness,
        Trait::EmotionalStability,
    ];

    /// Short code used in reports (e.g. "ES").
    pub fn code(self) -> &'static str {
        match self {
            Trait::Openness => "O",
            Trait::Conscientiousness => "C",
            Trait::Extraversion => "E",
            Trait::Agreeableness => "A",
            Trait::EmotionalStability => "ES",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Trait::Openness => "Openness",
            Trait::Conscientiousness => "Conscientiousness",
            Trait::Extraversion => "Extraversion",
            Trait::Agreeableness => "Agreeableness",
            Trait::EmotionalStability => "Emotional Stability",
        }
    }

    /// Position of this trait in [`Trait::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Trait {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "O" => Ok(Trait::Openness),
            "C" => Ok(Trait::Conscientiousness),
            "E" => Ok(Trait::Extraversion),
            "A" => Ok(Trait::Agreeableness),
            "ES" => Ok(Trait::EmotionalStability),
            other => Err(format!("unknown trait code: {other}")),
        }
    }
}

/// A questionnaire statement and the trait it measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement {
    pub prompt: &'static str,
    pub trait_code: Trait,
}

const fn statement(prompt: &'static str, trait_code: Trait) -> Statement {
    Statement { prompt, trait_code }
}

/// The fixed statement catalog, in presentation order.
pub const STATEMENTS: [Statement; STATEMENT_COUNT] = [
    statement("I enjoy meeting new people and being the center of attention.", Trait::Extraversion),
    statement("I keep my tasks well-organized and complete work on time.", Trait::Conscientiousness),
    statement("I stay calm even in stressful situations.", Trait::EmotionalStability),
    statement("I enjoy learning new things and exploring new ideas.", Trait::Openness),
    statement("I care about others' feelings and try to help them.", Trait::Agreeableness),
    statement("I like participating in group discussions.", Trait::Extraversion),
    statement("I am detail-oriented in my work.", Trait::Conscientiousness),
    statement("I bounce back quickly after disappointments.", Trait::EmotionalStability),
    statement("I am curious and enjoy intellectual challenges.", Trait::Openness),
    statement("I avoid conflicts and try to maintain harmony.", Trait::Agreeableness),
    statement("I feel energized when I'm around others.", Trait::Extraversion),
    statement("I take responsibilities seriously.", Trait::Conscientiousness),
    statement("I don\u{2019}t get anxious easily when I have to perform under pressure.", Trait::EmotionalStability),
    statement("I like to explore artistic or creative activities.", Trait::Openness),
    statement("I enjoy cooperating with others on shared goals.", Trait::Agreeableness),
    statement("I am energetic and enthusiastic in group settings.", Trait::Extraversion),
    statement("I plan ahead before starting a task.", Trait::Conscientiousness),
    statement("I can keep my emotions in check during difficult times.", Trait::EmotionalStability),
    statement("I get excited about trying new experiences.", Trait::Openness),
    statement("I am considerate and polite in interactions.", Trait::Agreeableness),
    statement("I enjoy being part of social or team activities.", Trait::Extraversion),
    statement("I follow through on my commitments consistently.", Trait::Conscientiousness),
    statement("I handle setbacks without getting overly upset.", Trait::EmotionalStability),
    statement("I am open to different opinions and perspectives.", Trait::Openness),
    statement("I try to be empathetic and understanding.", Trait::Agreeableness),
];

/// A single rating on the 1–5 agreement scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, RangeError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RangeError::Rating(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every valid rating, lowest first.
    pub fn all() -> impl Iterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }
}

impl TryFrom<u8> for Rating {
    type Error = RangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Respondent age, bounded to `10..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Age(u32);

impl Age {
    pub const MIN: u32 = 10;
    pub const MAX: u32 = 100;

    pub fn new(value: u32) -> Result<Self, RangeError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RangeError::Age(value))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Age {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u32> for Age {
    type Error = RangeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Age::new(value)
    }
}

impl From<Age> for u32 {
    fn from(age: Age) -> Self {
        age.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Personal details captured by the intake form.
///
/// Only `age` is constrained. Every other field is accepted as typed,
/// including the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Age,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub subjects: String,
    #[serde(default)]
    pub hobbies: String,
    #[serde(default)]
    pub dream: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl RespondentProfile {
    /// Field labels and values in declared order, as they appear in reports.
    pub fn fields(&self) -> [(&'static str, String); 9] {
        [
            ("Name", self.name.clone()),
            ("Age", self.age.to_string()),
            ("Education", self.education.clone()),
            ("School", self.school.clone()),
            ("Subjects", self.subjects.clone()),
            ("Hobbies", self.hobbies.clone()),
            ("Dream", self.dream.clone()),
            ("Email", self.email.clone()),
            ("Phone", self.phone.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_display_and_parse() {
        assert_eq!(Trait::EmotionalStability.to_string(), "ES");
        assert_eq!("o".parse::<Trait>().unwrap(), Trait::Openness);
        assert_eq!("Es".parse::<Trait>().unwrap(), Trait::EmotionalStability);
        assert!("N".parse::<Trait>().is_err());
    }

    #[test]
    fn trait_index_matches_all_order() {
        for (i, t) in Trait::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }

    #[test]
    fn catalog_has_five_statements_per_trait() {
        for t in Trait::ALL {
            let count = STATEMENTS.iter().filter(|s| s.trait_code == t).count();
            assert_eq!(count, STATEMENTS_PER_TRAIT, "trait {t}");
        }
    }

    #[test]
    fn rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(3).unwrap().get(), 3);
        assert_eq!(Rating::all().count(), 5);
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert!(Age::new(9).is_err());
        assert!(Age::new(10).is_ok());
        assert!(Age::new(100).is_ok());
        assert!(Age::new(101).is_err());
        assert_eq!(Age::default().get(), 10);
    }

    #[test]
    fn profile_serde_rejects_out_of_range_age() {
        let json = r#"{"name":"Alex","age":7}"#;
        assert!(serde_json::from_str::<RespondentProfile>(json).is_err());

        let json = r#"{"name":"Alex","age":30}"#;
        let profile: RespondentProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.age.get(), 30);
        assert!(profile.school.is_empty());
    }
}
