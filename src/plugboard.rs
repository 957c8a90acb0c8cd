//! Plugboard: symmetric letter-pair swaps around the rotor stack.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::alphabet::{self, SIZE};
use crate::error::{EnigmaError, Result};
use crate::observer::{Event, Observer};

/// Most cables a plugboard can hold: every letter used once.
pub const MAX_PAIRS: usize = SIZE / 2;

/// Swap table applied before and after the rotor stack.
///
/// Letters not connected by a cable pass through unchanged. The table is
/// its own inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugboard {
    pairs: Vec<(char, char)>,
    map: [u8; SIZE],
}

impl Default for Plugboard {
    fn default() -> Self {
        Self::empty()
    }
}

impl Plugboard {
    /// A plugboard with no cables.
    pub fn empty() -> Self {
        let mut map = [0u8; SIZE];
        for (i, item) in map.iter_mut().enumerate() {
            *item = i as u8;
        }
        Plugboard {
            pairs: Vec::new(),
            map,
        }
    }

    /// Creates a plugboard from letter pairs.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidConfiguration`] if there are more than
    /// 13 pairs, a pair contains a non-letter, or a letter is used twice
    /// (including a letter paired with itself).
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_machine::Plugboard;
    ///
    /// let plugboard = Plugboard::new(&[('A', 'B'), ('C', 'D')]).unwrap();
    /// assert_eq!(plugboard.encipher('B').unwrap(), 'A');
    /// assert_eq!(plugboard.encipher('E').unwrap(), 'E');
    ///
    /// assert!(Plugboard::new(&[('A', 'B'), ('B', 'C')]).is_err());
    /// ```
    pub fn new(pairs: &[(char, char)]) -> Result<Self> {
        if pairs.len() > MAX_PAIRS {
            return Err(EnigmaError::config(format!(
                "Invalid plugboard. At most {} pairs allowed. Given: '{}'.",
                MAX_PAIRS,
                format_pairs(pairs)
            )));
        }

        let mut plugboard = Self::empty();
        let mut used = [false; SIZE];
        for &(first, second) in pairs {
            let invalid = |reason: &str| {
                EnigmaError::config(format!(
                    "Invalid plugboard pair '{}{}'. {}. Given: '{}'.",
                    first,
                    second,
                    reason,
                    format_pairs(pairs)
                ))
            };
            let a = alphabet::index_of(first).map_err(|_| invalid("Letters must be A-Z"))?;
            let b = alphabet::index_of(second).map_err(|_| invalid("Letters must be A-Z"))?;
            if a == b {
                return Err(invalid("A letter cannot be paired with itself"));
            }
            if used[a] || used[b] {
                return Err(invalid("Each letter may be used in only one pair"));
            }
            used[a] = true;
            used[b] = true;
            plugboard.map[a] = b as u8;
            plugboard.map[b] = a as u8;
            plugboard.pairs.push((first, second));
        }
        Ok(plugboard)
    }

    /// Swaps `character` with its partner, if it has one.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] if `character` is outside the alphabet.
    pub fn encipher(&self, character: char) -> Result<char> {
        let index = alphabet::index_of(character)?;
        Ok(alphabet::char_at(self.encipher_index(index, &mut ())))
    }

    pub(crate) fn encipher_index(&self, index: usize, observer: &mut dyn Observer) -> usize {
        let output = self.map[index] as usize;
        observer.on_event(&Event::PlugboardSubstitute {
            input: alphabet::char_at(index),
            output: alphabet::char_at(output),
            pairs: Cow::Borrowed(&self.pairs),
        });
        output
    }

    /// Configured pairs in insertion order.
    pub fn pairs(&self) -> &[(char, char)] {
        &self.pairs
    }
}

fn format_pairs(pairs: &[(char, char)]) -> String {
    pairs
        .iter()
        .map(|(a, b)| format!("{}{}", a, b))
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Plugboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_pairs(&self.pairs))
    }
}

/// Parses whitespace- or comma-separated two-letter pairs, e.g. `"AB CD EF"`.
impl FromStr for Plugboard {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self> {
        let mut pairs = Vec::new();
        for token in s.split(|c: char| c.is_whitespace() || c == ',') {
            if token.is_empty() {
                continue;
            }
            let mut chars = token.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some(a), Some(b), None) => pairs.push((a, b)),
                _ => {
                    return Err(EnigmaError::config(format!(
                        "Invalid plugboard pair. Each pair must be two letters. Given: '{}'.",
                        token
                    )))
                }
            }
        }
        Plugboard::new(&pairs)
    }
}
