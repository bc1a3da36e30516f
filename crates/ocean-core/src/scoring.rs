//! Trait scoring.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::TransitionError;
use crate::model::{Trait, STATEMENTS};
use crate::responses::ResponseSet;

/// Per-trait rating totals.
///
/// Once computed from a complete response set every total lies in `5..=25`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitScores {
    totals: [u32; 5],
}

impl TraitScores {
    pub fn get(&self, t: Trait) -> u32 {
        self.totals[t.index()]
    }

    /// Sum across all traits.
    pub fn total(&self) -> u32 {
        self.totals.iter().sum()
    }

    /// `(trait, total)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Trait, u32)> + '_ {
        Trait::ALL.into_iter().map(|t| (t, self.get(t)))
    }
}

impl Index<Trait> for TraitScores {
    type Output = u32;

    fn index(&self, t: Trait) -> &u32 {
        &self.totals[t.index()]
    }
}

/// Fold a response set into trait totals.
///
/// Refuses an incomplete set so a partially answered questionnaire can never
/// produce a score.
pub fn score(responses: &ResponseSet) -> Result<TraitScores, TransitionError> {
    if !responses.is_complete() {
        return Err(TransitionError::Incomplete {
            unanswered: responses.unanswered(),
        });
    }

    let totals = STATEMENTS
        .iter()
        .enumerate()
        .fold([0u32; 5], |mut acc, (index, statement)| {
            acc[statement.trait_code.index()] += u32::from(responses.value(index));
            acc
        });

    Ok(TraitScores { totals })
}
