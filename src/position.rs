//! Position and RingSetting: single-letter rotor settings.
//!
//! A [`Position`] is the letter showing in a rotor's window and changes as
//! the rotor steps. A [`RingSetting`] is the fixed offset of the wiring core
//! relative to the letter ring. Both range over the alphabet (index 0..25)
//! and default to `A`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alphabet::{self, ALPHABET, SIZE};
use crate::error::{EnigmaError, Result};

/// The rotational letter a rotor currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    index: u8,
}

impl Position {
    /// Creates a position from a letter.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] if `character` is outside the alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_machine::Position;
    ///
    /// let position = Position::new('Q').unwrap();
    /// assert_eq!(position.index(), 16);
    /// assert!(Position::new('q').is_err());
    /// ```
    pub fn new(character: char) -> Result<Self> {
        Ok(Position {
            index: alphabet::index_of(character)? as u8,
        })
    }

    /// Creates a position from an alphabet index, wrapping modulo 26.
    pub fn from_index(index: usize) -> Self {
        Position {
            index: (index % SIZE) as u8,
        }
    }

    /// The letter of this position.
    pub fn character(&self) -> char {
        alphabet::char_at(self.index as usize)
    }

    /// The alphabet index (0..25) of this position.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Returns the position one step further, wrapping `Z` to `A`.
    pub fn stepped(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// All valid position letters.
    pub fn list() -> Vec<char> {
        ALPHABET.chars().collect()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.character())
    }
}

impl FromStr for Position {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Position::new(c),
            _ => Err(EnigmaError::input(format!(
                "Invalid string length. A rotor position must be a single character. Given: '{}'.",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Position {
    type Error = EnigmaError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        value.to_string()
    }
}

/// The offset of a rotor's internal wiring relative to its letter ring.
///
/// Historically ring settings were written either as letters (`A`..`Z`) or
/// as numbers (`01`..`26`); both forms parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RingSetting {
    index: u8,
}

impl RingSetting {
    /// Creates a ring setting from a letter.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] if `character` is outside the alphabet.
    pub fn new(character: char) -> Result<Self> {
        Ok(RingSetting {
            index: alphabet::index_of(character)? as u8,
        })
    }

    /// Creates a ring setting from its historical number, `1` (`A`) to `26` (`Z`).
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] if `number` is not in `1..=26`.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_machine::RingSetting;
    ///
    /// assert_eq!(RingSetting::from_number(2).unwrap().character(), 'B');
    /// assert!(RingSetting::from_number(0).is_err());
    /// ```
    pub fn from_number(number: usize) -> Result<Self> {
        if !(1..=SIZE).contains(&number) {
            return Err(EnigmaError::input(format!(
                "Invalid ring setting number. Valid: '1' to '26'. Given: '{}'.",
                number
            )));
        }
        Ok(RingSetting {
            index: (number - 1) as u8,
        })
    }

    /// The letter of this ring setting.
    pub fn character(&self) -> char {
        alphabet::char_at(self.index as usize)
    }

    /// The alphabet index (0..25) of this ring setting.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// All valid ring setting letters.
    pub fn list() -> Vec<char> {
        ALPHABET.chars().collect()
    }
}

impl fmt::Display for RingSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.character())
    }
}

impl FromStr for RingSetting {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            let number = trimmed.parse::<usize>().map_err(|_| {
                EnigmaError::input(format!(
                    "Invalid ring setting number. Valid: '1' to '26'. Given: '{}'.",
                    s
                ))
            })?;
            return RingSetting::from_number(number);
        }

        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => RingSetting::new(c),
            _ => Err(EnigmaError::input(format!(
                "Invalid string length. A ring setting must be a single character or a number. Given: '{}'.",
                s
            ))),
        }
    }
}

impl TryFrom<String> for RingSetting {
    type Error = EnigmaError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RingSetting> for String {
    fn from(value: RingSetting) -> Self {
        value.to_string()
    }
}
