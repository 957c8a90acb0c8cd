//! RotorUnit: the rotor stack, its reflector and the stepping mechanism.
//!
//! Rotors are held left to right, as they sit in the machine and as they
//! are listed in a key sheet. The rightmost rotor is the entry point: it
//! sees the keystroke first and steps on every key press.
//!
//! ```text
//!  plugboard ──► [right] ──► [middle] ──► [left] ──► reflector
//!  plugboard ◄── [right] ◄── [middle] ◄── [left] ◄──┘
//! ```

use crate::alphabet;
use crate::error::{EnigmaError, Result};
use crate::observer::Observer;
use crate::position::Position;
use crate::reflector::Reflector;
use crate::rotor::Rotor;

/// Most rotors a single unit can hold.
pub const MAX_ROTORS: usize = 8;

/// Ordered rotor stack plus reflector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorUnit {
    rotors: Vec<Rotor>,
    reflector: Reflector,
}

impl RotorUnit {
    /// Assembles a rotor unit.
    ///
    /// # Parameters
    /// - `reflector`: The reflector at the far end of the stack.
    /// - `rotors`: Rotors ordered left to right; the last one is the entry rotor.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidConfiguration`] if `rotors` is empty or
    /// holds more than [`MAX_ROTORS`]. The exact count a machine needs is
    /// checked by [`Enigma::new`](crate::Enigma::new).
    pub fn new(reflector: Reflector, rotors: Vec<Rotor>) -> Result<Self> {
        if rotors.is_empty() || rotors.len() > MAX_ROTORS {
            return Err(EnigmaError::config(format!(
                "Invalid rotor count. A rotor unit holds 1 to {} rotors. Given: '{}'.",
                MAX_ROTORS,
                rotors.len()
            )));
        }
        Ok(RotorUnit { rotors, reflector })
    }

    /// Advances the rotors for one keystroke.
    ///
    /// Notches are read before anything moves, so a rotor that lands on its
    /// notch during this step only carries on the next one:
    /// - the rightmost rotor always advances;
    /// - any other rotor advances if its right neighbour is at a notch;
    /// - a rotor between two others also advances if it is itself at a
    ///   notch (the double step: its own notch pawl drops in and drags it
    ///   along with its left neighbour).
    pub fn step(&mut self) {
        // Walk right to left so each rotor is inspected before it moves.
        let mut right_at_notch = None;
        for (i, rotor) in self.rotors.iter_mut().enumerate().rev() {
            let at_notch = rotor.is_at_notch();
            let advances = match right_at_notch {
                None => true,
                Some(carry) => carry || (i > 0 && at_notch),
            };
            if advances {
                rotor.advance();
            }
            right_at_notch = Some(at_notch);
        }
    }

    /// Passes `character` from the entry rotor toward the reflector.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] if `character` is outside the alphabet.
    pub fn encipher_forward(&self, character: char) -> Result<char> {
        let index = alphabet::index_of(character)?;
        Ok(alphabet::char_at(self.forward_index(index, &mut ())))
    }

    /// Passes `character` through the reflector.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] if `character` is outside the alphabet.
    pub fn reflect(&self, character: char) -> Result<char> {
        self.reflector.reflect(character)
    }

    /// Passes a reflected `character` back from the leftmost rotor to the entry rotor.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] if `character` is outside the alphabet.
    pub fn encipher_backward(&self, character: char) -> Result<char> {
        let index = alphabet::index_of(character)?;
        Ok(alphabet::char_at(self.backward_index(index, &mut ())))
    }

    pub(crate) fn forward_index(&self, index: usize, observer: &mut dyn Observer) -> usize {
        let mut index = index;
        for rotor in self.rotors.iter().rev() {
            index = rotor.encipher_index(index, false, observer);
        }
        index
    }

    pub(crate) fn reflect_index(&self, index: usize, observer: &mut dyn Observer) -> usize {
        self.reflector.reflect_index(index, observer)
    }

    pub(crate) fn backward_index(&self, index: usize, observer: &mut dyn Observer) -> usize {
        let mut index = index;
        for rotor in &self.rotors {
            index = rotor.encipher_index(index, true, observer);
        }
        index
    }

    /// Current rotor positions, left to right.
    pub fn positions(&self) -> Vec<Position> {
        self.rotors.iter().map(Rotor::position).collect()
    }

    /// Writes the current positions into `out`, left to right, and returns
    /// the rotor count.
    pub(crate) fn copy_positions(&self, out: &mut [Position; MAX_ROTORS]) -> usize {
        for (slot, rotor) in out.iter_mut().zip(&self.rotors) {
            *slot = rotor.position();
        }
        self.rotors.len()
    }

    /// Sets every rotor's position, left to right.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidConfiguration`] if `positions` does not
    /// hold exactly one position per rotor.
    pub fn set_positions(&mut self, positions: &[Position]) -> Result<()> {
        if positions.len() != self.rotors.len() {
            let given: String = positions.iter().map(Position::character).collect();
            return Err(EnigmaError::config(format!(
                "Invalid position count. Expected '{}' positions. Given: '{}'.",
                self.rotors.len(),
                given
            )));
        }
        for (rotor, &position) in self.rotors.iter_mut().zip(positions) {
            rotor.set_position(position);
        }
        Ok(())
    }

    /// Rotors, left to right.
    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    /// Reflector at the far end of the stack.
    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }
}
