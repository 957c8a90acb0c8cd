//! The fixed 26-letter alphabet shared by every component.
//!
//! Components work on letter indices (`0..26`) internally; characters are
//! converted at the boundary with [`index_of`] and [`char_at`].

use crate::error::{EnigmaError, Result};

/// The canonical letter ordering.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of letters in [`ALPHABET`].
pub const SIZE: usize = 26;

const LETTERS: &[u8; SIZE] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Returns the alphabet index of `character`.
///
/// # Errors
/// Returns [`EnigmaError::InvalidInput`] if `character` is not one of the
/// 26 uppercase letters.
///
/// # Examples
///
/// ```
/// use enigma_machine::alphabet;
///
/// assert_eq!(alphabet::index_of('C').unwrap(), 2);
/// assert!(alphabet::index_of('c').is_err());
/// ```
pub fn index_of(character: char) -> Result<usize> {
    if character.is_ascii_uppercase() {
        Ok((character as u8 - b'A') as usize)
    } else {
        Err(EnigmaError::input(format!(
            "Invalid character. Valid: '{}'. Given: '{}'.",
            ALPHABET, character
        )))
    }
}

/// Returns the letter at `index` (taken modulo 26).
pub fn char_at(index: usize) -> char {
    LETTERS[index % SIZE] as char
}

/// Returns true if `character` belongs to the alphabet.
pub fn contains(character: char) -> bool {
    character.is_ascii_uppercase()
}

/// Shifts `index` forward by `offset` positions, wrapping around.
pub(crate) fn shift(index: usize, offset: usize) -> usize {
    (index + offset) % SIZE
}

/// Shifts `index` backward by `offset` positions, wrapping around.
pub(crate) fn unshift(index: usize, offset: usize) -> usize {
    (index + SIZE - offset % SIZE) % SIZE
}

/// Checks that every character of `text` belongs to the alphabet.
///
/// # Errors
/// Returns [`EnigmaError::InvalidInput`] naming the first offending
/// character and its position in `text`.
pub fn validate(text: &str) -> Result<()> {
    match text.chars().enumerate().find(|(_, c)| !contains(*c)) {
        Some((at, c)) => Err(EnigmaError::input(format!(
            "Invalid character at index {}. Valid: '{}'. Given: '{}'.",
            at, ALPHABET, c
        ))),
        None => Ok(()),
    }
}
