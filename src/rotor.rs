//! Rotor: a rotating wired wheel with ring setting and notches.
//!
//! The wiring is fixed to the rotor core, so as the rotor turns the
//! contacts it presents to its neighbours move. Substitution therefore
//! shifts the incoming letter forward by the rotor's offset, applies the
//! wiring, and shifts the result back by the same offset.

use std::borrow::Cow;

use crate::alphabet::{self, SIZE};
use crate::catalog::{MachineType, RotorKind};
use crate::error::Result;
use crate::notch::NotchSet;
use crate::observer::{Event, Observer};
use crate::position::{Position, RingSetting};
use crate::substitution::SubstitutionMap;

/// One physical rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    kind: RotorKind,
    wiring: SubstitutionMap,
    notches: NotchSet,
    compatibility: Vec<MachineType>,
    position: Position,
    ring_setting: RingSetting,
}

impl Rotor {
    /// Assembles a rotor from already-validated parts.
    ///
    /// Catalog rotors are normally built with
    /// [`catalog::build_rotor`](crate::catalog::build_rotor).
    ///
    /// # Parameters
    /// - `kind`: The rotor's type tag.
    /// - `wiring`: Internal wiring.
    /// - `notches`: Positions that carry the next rotor.
    /// - `compatibility`: Machine variants that accept this rotor.
    /// - `position`: Starting position.
    /// - `ring_setting`: Ring setting.
    pub fn new(
        kind: RotorKind,
        wiring: SubstitutionMap,
        notches: NotchSet,
        compatibility: &[MachineType],
        position: Position,
        ring_setting: RingSetting,
    ) -> Self {
        Rotor {
            kind,
            wiring,
            notches,
            compatibility: compatibility.to_vec(),
            position,
            ring_setting,
        }
    }

    /// Substitutes a single letter through this rotor at its current position.
    ///
    /// # Parameters
    /// - `character`: Letter entering the rotor.
    /// - `reverse`: `false` on the way toward the reflector, `true` on the way back.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`](crate::EnigmaError::InvalidInput)
    /// if `character` is outside the alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_machine::catalog::{self, RotorKind};
    /// use enigma_machine::{Position, RingSetting};
    ///
    /// let position = Position::new('B').unwrap();
    /// let rotor = catalog::build_rotor(RotorKind::I, position, RingSetting::default()).unwrap();
    /// let out = rotor.encipher('A', false).unwrap();
    /// assert_eq!(out, 'J');
    /// assert_eq!(rotor.encipher(out, true).unwrap(), 'A');
    /// ```
    pub fn encipher(&self, character: char, reverse: bool) -> Result<char> {
        let index = alphabet::index_of(character)?;
        let output = self.encipher_index(index, reverse, &mut ());
        Ok(alphabet::char_at(output))
    }

    /// Index-level substitution, reporting each sub-step to `observer`.
    pub(crate) fn encipher_index(
        &self,
        index: usize,
        reverse: bool,
        observer: &mut dyn Observer,
    ) -> usize {
        let offset = self.offset();

        let shifted = alphabet::shift(index, offset);
        observer.on_event(&Event::RotorShift {
            rotor: self.kind,
            input: alphabet::char_at(index),
            output: alphabet::char_at(shifted),
            offset,
            position: self.position,
            ring_setting: self.ring_setting,
        });

        let substituted = self.wiring.map_index(shifted, reverse);
        observer.on_event(&Event::RotorSubstitute {
            rotor: self.kind,
            input: alphabet::char_at(shifted),
            output: alphabet::char_at(substituted),
            reverse,
            cipher_set: Cow::Borrowed(self.wiring.cipher_set()),
        });

        let output = alphabet::unshift(substituted, offset);
        observer.on_event(&Event::RotorDeshift {
            rotor: self.kind,
            input: alphabet::char_at(substituted),
            output: alphabet::char_at(output),
            offset,
        });

        output
    }

    /// Rotational displacement of the wiring: position minus ring setting, mod 26.
    pub fn offset(&self) -> usize {
        (self.position.index() + SIZE - self.ring_setting.index()) % SIZE
    }

    /// Returns true if the current position is one of this rotor's notches.
    pub fn is_at_notch(&self) -> bool {
        self.notches.contains(self.position)
    }

    /// Turns the rotor one position forward.
    pub fn advance(&mut self) {
        self.position = self.position.stepped();
    }

    /// Returns true if `machine` accepts this rotor.
    pub fn is_compatible(&self, machine: MachineType) -> bool {
        self.compatibility.contains(&machine)
    }

    /// Catalog type of this rotor.
    pub fn kind(&self) -> RotorKind {
        self.kind
    }

    /// Letter currently showing in the window.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Turns the rotor directly to `position`.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Ring setting fixed at construction.
    pub fn ring_setting(&self) -> RingSetting {
        self.ring_setting
    }

    /// Positions at which this rotor carries its left neighbour.
    pub fn notches(&self) -> &NotchSet {
        &self.notches
    }

    /// Internal wiring, independent of position and ring setting.
    pub fn wiring(&self) -> &SubstitutionMap {
        &self.wiring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ALPHABET;
    use crate::catalog::build_rotor;
    use crate::observer::EventType;

    fn rotor(kind: RotorKind, position: char, ring: char) -> Rotor {
        build_rotor(
            kind,
            Position::new(position).unwrap(),
            RingSetting::new(ring).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_offset() {
        assert_eq!(rotor(RotorKind::I, 'A', 'A').offset(), 0);
        assert_eq!(rotor(RotorKind::I, 'D', 'B').offset(), 2);
        assert_eq!(rotor(RotorKind::I, 'A', 'B').offset(), 25);
    }

    #[test]
    fn test_identity_offset_matches_wiring() {
        let r = rotor(RotorKind::I, 'A', 'A');
        assert_eq!(r.encipher('A', false).unwrap(), 'E');
        assert_eq!(r.encipher('E', true).unwrap(), 'A');
    }

    #[test]
    fn test_forward_backward_are_inverse() {
        for kind in RotorKind::ALL {
            for (position, ring) in [('A', 'A'), ('Q', 'C'), ('Z', 'Z'), ('B', 'Y')] {
                let r = rotor(kind, position, ring);
                for c in ALPHABET.chars() {
                    let forward = r.encipher(c, false).unwrap();
                    assert_eq!(r.encipher(forward, true).unwrap(), c);
                }
            }
        }
    }

    #[test]
    fn test_ring_setting_cancels_position() {
        let shifted = rotor(RotorKind::III, 'F', 'F');
        let plain = rotor(RotorKind::III, 'A', 'A');
        for c in ALPHABET.chars() {
            assert_eq!(
                shifted.encipher(c, false).unwrap(),
                plain.encipher(c, false).unwrap()
            );
        }
    }

    #[test]
    fn test_notch_and_advance() {
        let mut r = rotor(RotorKind::I, 'P', 'A');
        assert!(!r.is_at_notch());
        r.advance();
        assert_eq!(r.position().character(), 'Q');
        assert!(r.is_at_notch());
        r.advance();
        assert!(!r.is_at_notch());

        let mut z = rotor(RotorKind::VI, 'Z', 'A');
        assert!(z.is_at_notch());
        z.advance();
        assert_eq!(z.position().character(), 'A');
    }

    #[test]
    fn test_invalid_character() {
        let r = rotor(RotorKind::II, 'A', 'A');
        assert!(r.encipher('a', false).is_err());
    }

    #[test]
    fn test_encipher_emits_three_events() {
        let r = rotor(RotorKind::I, 'B', 'A');
        let mut events: Vec<Event<'static>> = Vec::new();
        let out = r.encipher_index(0, false, &mut events);
        assert_eq!(alphabet::char_at(out), 'J');
        let types: Vec<EventType> = events.iter().map(Event::event_type).collect();
        assert_eq!(
            types,
            vec![EventType::Shift, EventType::Substitute, EventType::DeShift]
        );
    }
}
