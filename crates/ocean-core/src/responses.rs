//! The per-session response set and the completion gate.

use serde::{Deserialize, Serialize};

use crate::error::RangeError;
use crate::model::{Rating, STATEMENT_COUNT};

/// Ratings chosen so far, one slot per statement.
///
/// An empty slot reads as 0 ("unanswered"). Selecting a rating overwrites the
/// slot; there is no way to clear it again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSet {
    slots: [Option<Rating>; STATEMENT_COUNT],
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a complete set from 25 raw values.
    pub fn from_values(values: &[u8]) -> Result<Self, RangeError> {
        if values.len() != STATEMENT_COUNT {
            return Err(RangeError::StatementIndex(values.len()));
        }
        let mut set = Self::new();
        for (index, &value) in values.iter().enumerate() {
            set.select(index, Rating::new(value)?)?;
        }
        Ok(set)
    }

    /// Record `rating` for statement `index`, replacing any earlier choice.
    pub fn select(&mut self, index: usize, rating: Rating) -> Result<(), RangeError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(RangeError::StatementIndex(index))?;
        *slot = Some(rating);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<Rating> {
        self.slots.get(index).copied().flatten()
    }

    /// Raw value for statement `index`, 0 when unanswered.
    pub fn value(&self, index: usize) -> u8 {
        self.get(index).map(Rating::get).unwrap_or(0)
    }

    pub fn answered(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn unanswered(&self) -> usize {
        STATEMENT_COUNT - self.answered()
    }

    /// Index of the first statement still waiting for a rating.
    pub fn first_unanswered(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Completion gate: every statement carries a rating of at least 1.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(v: u8) -> Rating {
        Rating::new(v).unwrap()
    }

    #[test]
    fn empty_set_is_incomplete() {
        let set = ResponseSet::new();
        assert!(!set.is_complete());
        assert_eq!(set.answered(), 0);
        assert_eq!(set.value(0), 0);
        assert_eq!(set.first_unanswered(), Some(0));
    }

    #[test]
    fn last_selection_wins() {
        let mut set = ResponseSet::new();
        set.select(4, r(2)).unwrap();
        set.select(4, r(5)).unwrap();
        assert_eq!(set.value(4), 5);
        assert_eq!(set.answered(), 1);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut set = ResponseSet::new();
        assert_eq!(
            set.select(25, r(3)),
            Err(RangeError::StatementIndex(25))
        );
    }

    #[test]
    fn gate_closed_until_every_slot_is_set() {
        let mut set = ResponseSet::new();
        for i in 0..STATEMENT_COUNT - 1 {
            set.select(i, r(3)).unwrap();
            assert!(!set.is_complete());
        }
        assert_eq!(set.first_unanswered(), Some(24));
        set.select(24, r(1)).unwrap();
        assert!(set.is_complete());
        assert_eq!(set.unanswered(), 0);
    }

    #[test]
    fn gate_closed_for_any_single_gap() {
        for gap in 0..STATEMENT_COUNT {
            let mut set = ResponseSet::new();
            for i in (0..STATEMENT_COUNT).filter(|&i| i != gap) {
                set.select(i, r(4)).unwrap();
            }
            assert!(!set.is_complete(), "gap at {gap}");
        }
    }

    #[test]
    fn from_values_rejects_zero_and_wrong_length() {
        let mut values = [3u8; STATEMENT_COUNT];
        assert!(ResponseSet::from_values(&values).unwrap().is_complete());

        values[7] = 0;
        assert_eq!(
            ResponseSet::from_values(&values),
            Err(RangeError::Rating(0))
        );
        assert!(ResponseSet::from_values(&[3u8; 24]).is_err());
    }
}
