//! NotchSet: the positions at which a rotor carries the next rotor along.

use std::fmt;

use crate::error::{EnigmaError, Result};
use crate::position::Position;

/// Most notches any catalog rotor carries (rotors VI–VIII have two).
const MAX_NOTCHES: usize = 2;

/// The set of 1–2 positions at which a rotor's step also steps its left neighbour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotchSet {
    positions: Vec<Position>,
}

impl NotchSet {
    /// Creates a notch set.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidConfiguration`] if `positions` is empty,
    /// holds more than two positions, or repeats a position.
    pub fn new(positions: &[Position]) -> Result<Self> {
        let given: String = positions.iter().map(Position::character).collect();
        if positions.is_empty() || positions.len() > MAX_NOTCHES {
            return Err(EnigmaError::config(format!(
                "Invalid notch set. A rotor must have 1 to {} notches. Given: '{}'.",
                MAX_NOTCHES,
                given
            )));
        }
        for (i, p) in positions.iter().enumerate() {
            if positions[..i].contains(p) {
                return Err(EnigmaError::config(format!(
                    "Invalid notch set. Duplicate notch '{}'. Given: '{}'.",
                    p,
                    given
                )));
            }
        }
        Ok(NotchSet {
            positions: positions.to_vec(),
        })
    }

    /// Creates a notch set from its letters, e.g. `"ZM"`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] for a letter outside the alphabet,
    /// or [`EnigmaError::InvalidConfiguration`] as for [`NotchSet::new`].
    pub fn from_letters(letters: &str) -> Result<Self> {
        let positions = letters
            .chars()
            .map(Position::new)
            .collect::<Result<Vec<_>>>()?;
        Self::new(&positions)
    }

    /// Returns true if `position` is one of the notches.
    pub fn contains(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }

    /// The notch positions in declaration order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }
}

impl fmt::Display for NotchSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.positions {
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let notches = NotchSet::from_letters("ZM").unwrap();
        assert!(notches.contains(Position::new('Z').unwrap()));
        assert!(notches.contains(Position::new('M').unwrap()));
        assert!(!notches.contains(Position::new('A').unwrap()));
        assert_eq!(notches.to_string(), "ZM");
    }

    #[test]
    fn test_invalid_notch_sets() {
        for letters in ["", "ABC", "QQ"] {
            assert!(
                matches!(
                    NotchSet::from_letters(letters),
                    Err(EnigmaError::InvalidConfiguration(_))
                ),
                "'{}' should be rejected",
                letters
            );
        }
        assert!(matches!(
            NotchSet::from_letters("q"),
            Err(EnigmaError::InvalidInput(_))
        ));
    }
}
