//! SubstitutionMap: validated letter permutation with reverse lookup.
//!
//! The wiring of every rotor and reflector is a permutation of the
//! alphabet. Both lookup directions are precomputed into index tables at
//! construction so substitution never searches the cipher string.

use crate::alphabet::{self, ALPHABET, SIZE};
use crate::error::{EnigmaError, Result};

/// A bijective mapping from the alphabet to a permuted cipher alphabet.
///
/// Forward substitution of the letter at alphabet index `i` yields the
/// `i`-th letter of the cipher string. Reverse substitution is its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionMap {
    cipher_set: String,
    forward: [u8; SIZE],
    reverse: [u8; SIZE],
}

impl SubstitutionMap {
    /// Creates a substitution map from a 26-letter cipher string.
    ///
    /// # Parameters
    /// - `cipher_set`: The permuted alphabet, e.g. `"EKMFLGDQVZNTOWYHXUSPAIBRCJ"`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidConfiguration`] if the string is not
    /// exactly 26 characters long, contains a character outside the
    /// alphabet, or repeats a letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_machine::SubstitutionMap;
    ///
    /// let map = SubstitutionMap::new("EKMFLGDQVZNTOWYHXUSPAIBRCJ").unwrap();
    /// assert_eq!(map.encipher('A', false).unwrap(), 'E');
    /// assert_eq!(map.encipher('E', true).unwrap(), 'A');
    ///
    /// assert!(SubstitutionMap::new("AACDEFGHIJKLMNOPQRSTUVWXYZ").is_err());
    /// ```
    pub fn new(cipher_set: &str) -> Result<Self> {
        let invalid = || {
            EnigmaError::config(format!(
                "Invalid cipher set. Must be a permutation of '{}'. Given: '{}'.",
                ALPHABET, cipher_set
            ))
        };

        if cipher_set.chars().count() != SIZE {
            return Err(invalid());
        }

        let mut forward = [0u8; SIZE];
        let mut reverse = [0u8; SIZE];
        let mut seen = [false; SIZE];
        for (i, c) in cipher_set.chars().enumerate() {
            let target = alphabet::index_of(c).map_err(|_| invalid())?;
            if seen[target] {
                return Err(invalid());
            }
            seen[target] = true;
            forward[i] = target as u8;
            reverse[target] = i as u8;
        }

        Ok(SubstitutionMap {
            cipher_set: cipher_set.to_string(),
            forward,
            reverse,
        })
    }

    /// Substitutes `character` in the given direction.
    ///
    /// # Parameters
    /// - `character`: Letter to substitute.
    /// - `reverse`: `false` maps alphabet → cipher set, `true` maps cipher set → alphabet.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] if `character` is outside the alphabet.
    pub fn encipher(&self, character: char, reverse: bool) -> Result<char> {
        let index = alphabet::index_of(character)?;
        Ok(alphabet::char_at(self.map_index(index, reverse)))
    }

    /// Index-level substitution used by the rotor and reflector hot path.
    pub(crate) fn map_index(&self, index: usize, reverse: bool) -> usize {
        if reverse {
            self.reverse[index] as usize
        } else {
            self.forward[index] as usize
        }
    }

    /// The plain alphabet this map substitutes from.
    pub fn character_set(&self) -> &'static str {
        ALPHABET
    }

    /// The permuted alphabet this map substitutes to.
    pub fn cipher_set(&self) -> &str {
        &self.cipher_set
    }

    /// Letters wired to themselves.
    pub fn fixed_points(&self) -> Vec<char> {
        (0..SIZE)
            .filter(|&i| self.forward[i] as usize == i)
            .map(alphabet::char_at)
            .collect()
    }

    /// Returns true if substituting twice always returns the original letter.
    pub fn is_involution(&self) -> bool {
        self.forward == self.reverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTOR_I: &str = "EKMFLGDQVZNTOWYHXUSPAIBRCJ";

    #[test]
    fn test_invalid_cipher_sets() {
        for cipher_set in [
            "",
            "AAAAAAAAAAAAAAAAAAAAAAAAAA",
            "ABCDEFGHIJKLMNOPQRSTUVWXYZABC",
            "AACDEFGHIJKLMNOPQRSTUVWXYZ",
            "abcdefghijklmnopqrstuvwxyz",
            "EKMFLGDQVZNTOWYHXUSPAIBRC1",
        ] {
            let err = SubstitutionMap::new(cipher_set).unwrap_err();
            assert!(matches!(err, EnigmaError::InvalidConfiguration(_)));
            assert!(
                format!("{}", err).contains(cipher_set),
                "Error should cite '{}'",
                cipher_set
            );
        }
    }

    #[test]
    fn test_forward_substitution() {
        let map = SubstitutionMap::new(ROTOR_I).unwrap();
        for (plain, cipher) in ALPHABET.chars().zip(ROTOR_I.chars()) {
            assert_eq!(map.encipher(plain, false).unwrap(), cipher);
        }
    }

    #[test]
    fn test_reverse_substitution() {
        let map = SubstitutionMap::new(ROTOR_I).unwrap();
        for (plain, cipher) in ALPHABET.chars().zip(ROTOR_I.chars()) {
            assert_eq!(map.encipher(cipher, true).unwrap(), plain);
        }
    }

    #[test]
    fn test_invalid_character() {
        let map = SubstitutionMap::new(ROTOR_I).unwrap();
        for c in [' ', 'a', '@'] {
            assert!(matches!(
                map.encipher(c, false),
                Err(EnigmaError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_fixed_points_and_involution() {
        let rotor_i = SubstitutionMap::new(ROTOR_I).unwrap();
        assert_eq!(rotor_i.fixed_points(), vec!['S']);
        assert!(!rotor_i.is_involution());

        let reflector_b = SubstitutionMap::new("YRUHQSLDPXNGOKMIEBFZCWVJAT").unwrap();
        assert!(reflector_b.fixed_points().is_empty());
        assert!(reflector_b.is_involution());
    }
}
