//! Reflector: fixed wiring plate that sends the current back through the rotors.
//!
//! The reflector pairs letters up, so its wiring must be an involution with
//! no letter wired to itself. That is what makes the machine
//! self-reciprocal: two identically configured machines decipher each
//! other's output.

use std::borrow::Cow;

use crate::alphabet;
use crate::catalog::{MachineType, ReflectorKind};
use crate::error::{EnigmaError, Result};
use crate::observer::{Event, Observer};
use crate::substitution::SubstitutionMap;

/// Non-rotating reflector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflector {
    kind: ReflectorKind,
    wiring: SubstitutionMap,
    compatibility: Vec<MachineType>,
}

impl Reflector {
    /// Creates a reflector.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidConfiguration`] if the wiring maps any
    /// letter to itself or is not its own inverse.
    pub fn new(
        kind: ReflectorKind,
        wiring: SubstitutionMap,
        compatibility: &[MachineType],
    ) -> Result<Self> {
        let fixed = wiring.fixed_points();
        if !fixed.is_empty() {
            return Err(EnigmaError::config(format!(
                "Invalid reflector wiring. No letter may map to itself. Self-mapped: '{}'. Given: '{}'.",
                fixed.iter().collect::<String>(),
                wiring.cipher_set()
            )));
        }
        if !wiring.is_involution() {
            return Err(EnigmaError::config(format!(
                "Invalid reflector wiring. Letters must be wired in pairs. Given: '{}'.",
                wiring.cipher_set()
            )));
        }
        Ok(Reflector {
            kind,
            wiring,
            compatibility: compatibility.to_vec(),
        })
    }

    /// Reflects a single letter.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] if `character` is outside the alphabet.
    pub fn reflect(&self, character: char) -> Result<char> {
        let index = alphabet::index_of(character)?;
        Ok(alphabet::char_at(self.reflect_index(index, &mut ())))
    }

    pub(crate) fn reflect_index(&self, index: usize, observer: &mut dyn Observer) -> usize {
        let output = self.wiring.map_index(index, false);
        observer.on_event(&Event::ReflectorSubstitute {
            reflector: self.kind,
            input: alphabet::char_at(index),
            output: alphabet::char_at(output),
            cipher_set: Cow::Borrowed(self.wiring.cipher_set()),
        });
        output
    }

    /// Returns true if `machine` accepts this reflector.
    pub fn is_compatible(&self, machine: MachineType) -> bool {
        self.compatibility.contains(&machine)
    }

    /// Catalog type of this reflector.
    pub fn kind(&self) -> ReflectorKind {
        self.kind
    }

    /// Paired wiring.
    pub fn wiring(&self) -> &SubstitutionMap {
        &self.wiring
    }
}
