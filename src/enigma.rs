//! Enigma: the complete cipher machine.
//!
//! Owns a [`RotorUnit`] and a [`Plugboard`] and enciphers text one
//! keystroke at a time: step the rotors, then route the letter through
//! plugboard, rotors, reflector, rotors and plugboard again.

use std::borrow::Cow;

use crate::alphabet;
use crate::catalog::MachineType;
use crate::error::{EnigmaError, Result};
use crate::observer::{Event, Observer};
use crate::plugboard::Plugboard;
use crate::position::Position;
use crate::rotor_unit::{RotorUnit, MAX_ROTORS};

/// A fully assembled Enigma machine.
///
/// The machine is stateful: rotor positions persist between calls to
/// [`encipher`](Self::encipher), exactly as they would on the physical
/// machine. Deciphering requires a second machine (or a reset via
/// [`set_positions`](Self::set_positions)) at the same starting positions.
///
/// Stepping is not reentrant; share an instance between threads only
/// behind a lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enigma {
    machine_type: MachineType,
    rotor_unit: RotorUnit,
    plugboard: Plugboard,
}

impl Enigma {
    /// Assembles a machine of the given variant.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidConfiguration`] if the rotor count does
    /// not match the variant, or if any rotor or the reflector is not
    /// compatible with it.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_machine::catalog::{self, MachineType, ReflectorKind, RotorKind};
    /// use enigma_machine::{Enigma, Plugboard, Position, RingSetting, RotorUnit};
    ///
    /// let rotors = [RotorKind::I, RotorKind::V, RotorKind::III]
    ///     .into_iter()
    ///     .map(|kind| catalog::build_rotor(kind, Position::default(), RingSetting::default()))
    ///     .collect::<Result<Vec<_>, _>>()
    ///     .unwrap();
    /// let reflector = catalog::build_reflector(ReflectorKind::B).unwrap();
    /// let unit = RotorUnit::new(reflector, rotors).unwrap();
    ///
    /// let mut enigma = Enigma::new(MachineType::EnigmaI, unit, Plugboard::empty()).unwrap();
    /// assert_eq!(enigma.encipher("AAAAA").unwrap(), "SCSUX");
    /// ```
    pub fn new(
        machine_type: MachineType,
        rotor_unit: RotorUnit,
        plugboard: Plugboard,
    ) -> Result<Self> {
        let required = machine_type.rotor_count();
        let given = rotor_unit.rotors().len();
        if given != required {
            return Err(EnigmaError::config(format!(
                "Invalid rotor count. '{}' must have '{}' rotors. Given: '{}'.",
                machine_type, required, given
            )));
        }

        if let Some(rotor) = rotor_unit
            .rotors()
            .iter()
            .find(|r| !r.is_compatible(machine_type))
        {
            return Err(EnigmaError::config(format!(
                "Incompatible rotor. '{}' rotor is not compatible with '{}'.",
                rotor.kind(),
                machine_type
            )));
        }

        if !rotor_unit.reflector().is_compatible(machine_type) {
            return Err(EnigmaError::config(format!(
                "Incompatible reflector. '{}' reflector is not compatible with '{}'.",
                rotor_unit.reflector().kind(),
                machine_type
            )));
        }

        Ok(Enigma {
            machine_type,
            rotor_unit,
            plugboard,
        })
    }

    /// Enciphers (or deciphers) `text`, advancing the rotors once per letter.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] if `text` contains anything
    /// other than uppercase `A`-`Z`. The whole text is checked before the
    /// first letter is processed, so on error the rotors have not moved.
    pub fn encipher(&mut self, text: &str) -> Result<String> {
        self.encipher_with(text, &mut ())
    }

    /// Like [`encipher`](Self::encipher), reporting every step and
    /// substitution to `observer`.
    pub fn encipher_with(&mut self, text: &str, observer: &mut dyn Observer) -> Result<String> {
        alphabet::validate(text)?;

        let mut output = String::with_capacity(text.len());
        for character in text.chars() {
            self.step(observer);
            let index = alphabet::index_of(character)?;
            output.push(alphabet::char_at(self.substitute(index, observer)));
        }
        Ok(output)
    }

    fn step(&mut self, observer: &mut dyn Observer) {
        let mut before = [Position::default(); MAX_ROTORS];
        let mut after = [Position::default(); MAX_ROTORS];
        let count = self.rotor_unit.copy_positions(&mut before);
        self.rotor_unit.step();
        self.rotor_unit.copy_positions(&mut after);
        observer.on_event(&Event::Step {
            machine: self.machine_type,
            rotors: Cow::Borrowed(self.rotor_unit.rotors()),
            before: Cow::Borrowed(&before[..count]),
            after: Cow::Borrowed(&after[..count]),
        });
    }

    fn substitute(&self, index: usize, observer: &mut dyn Observer) -> usize {
        let plugged = self.plugboard.encipher_index(index, observer);
        let forward = self.rotor_unit.forward_index(plugged, observer);
        let reflected = self.rotor_unit.reflect_index(forward, observer);
        let backward = self.rotor_unit.backward_index(reflected, observer);
        self.plugboard.encipher_index(backward, observer)
    }

    /// Current rotor positions, left to right.
    pub fn positions(&self) -> Vec<Position> {
        self.rotor_unit.positions()
    }

    /// Resets the rotors to new positions, left to right, e.g. to start a
    /// new message key.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidConfiguration`] on a count mismatch.
    pub fn set_positions(&mut self, positions: &[Position]) -> Result<()> {
        self.rotor_unit.set_positions(positions)
    }

    /// Machine variant this instance was built as.
    pub fn machine_type(&self) -> MachineType {
        self.machine_type
    }

    /// Rotor stack and reflector.
    pub fn rotor_unit(&self) -> &RotorUnit {
        &self.rotor_unit
    }

    /// Plugboard wiring.
    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{build_reflector, build_rotor, ReflectorKind, RotorKind};
    use crate::observer::EventType;
    use crate::position::RingSetting;

    fn machine(
        machine_type: MachineType,
        kinds: &[RotorKind],
        plugboard: &str,
    ) -> Result<Enigma> {
        let rotors = kinds
            .iter()
            .map(|&k| build_rotor(k, Position::default(), RingSetting::default()))
            .collect::<Result<Vec<_>>>()?;
        let unit = RotorUnit::new(build_reflector(ReflectorKind::B)?, rotors)?;
        Enigma::new(machine_type, unit, plugboard.parse::<Plugboard>()?)
    }

    #[test]
    fn test_enigma_i_vector() {
        let mut enigma = machine(
            MachineType::EnigmaI,
            &[RotorKind::I, RotorKind::V, RotorKind::III],
            "",
        )
        .unwrap();
        assert_eq!(enigma.encipher("AAAAA").unwrap(), "SCSUX");
    }

    #[test]
    fn test_enigma_m3_vector() {
        let mut enigma = machine(
            MachineType::EnigmaM3,
            &[RotorKind::VI, RotorKind::VII, RotorKind::VIII],
            "",
        )
        .unwrap();
        assert_eq!(enigma.encipher("AAAAA").unwrap(), "GJUBB");
    }

    #[test]
    fn test_state_persists_between_calls() {
        let kinds = [RotorKind::I, RotorKind::V, RotorKind::III];
        let mut split = machine(MachineType::EnigmaI, &kinds, "").unwrap();
        let mut first = split.encipher("AA").unwrap();
        first.push_str(&split.encipher("AAA").unwrap());
        assert_eq!(first, "SCSUX");
    }

    #[test]
    fn test_invalid_input_leaves_rotors_untouched() {
        let mut enigma = machine(
            MachineType::EnigmaI,
            &[RotorKind::I, RotorKind::II, RotorKind::III],
            "",
        )
        .unwrap();
        let before = enigma.positions();
        let err = enigma.encipher("HELLO WORLD").unwrap_err();
        assert!(matches!(err, EnigmaError::InvalidInput(_)));
        assert_eq!(enigma.positions(), before);
    }

    #[test]
    fn test_rotor_count_rejected() {
        for kinds in [
            &[RotorKind::I][..],
            &[RotorKind::I, RotorKind::II][..],
            &[RotorKind::I, RotorKind::II, RotorKind::III, RotorKind::IV][..],
        ] {
            for machine_type in MachineType::ALL {
                let err = machine(machine_type, kinds, "").unwrap_err();
                assert!(format!("{}", err).contains("must have '3' rotors"));
            }
        }
    }

    #[test]
    fn test_incompatible_rotor_rejected() {
        let err = machine(
            MachineType::EnigmaI,
            &[RotorKind::I, RotorKind::II, RotorKind::VIII],
            "",
        )
        .unwrap_err();
        assert!(format!("{}", err).contains("'VIII' rotor is not compatible with 'ENIGMA_I'"));
    }

    #[test]
    fn test_observer_sees_full_pipeline() {
        let mut enigma = machine(
            MachineType::EnigmaI,
            &[RotorKind::I, RotorKind::II, RotorKind::III],
            "AB",
        )
        .unwrap();
        let mut events: Vec<Event<'static>> = Vec::new();
        let out = enigma.encipher_with("A", &mut events).unwrap();
        assert_eq!(out.len(), 1);

        // step, plugboard, 3 rotors x 3, reflector, 3 rotors x 3, plugboard
        assert_eq!(events.len(), 1 + 1 + 9 + 1 + 9 + 1);
        assert_eq!(events[0].event_type(), EventType::Step);
        match &events[0] {
            Event::Step {
                machine,
                rotors,
                before,
                after,
            } => {
                assert_eq!(*machine, MachineType::EnigmaI);
                let kinds: Vec<RotorKind> = rotors.iter().map(|r| r.kind()).collect();
                assert_eq!(kinds, vec![RotorKind::I, RotorKind::II, RotorKind::III]);
                assert_eq!(before[..], [Position::default(); 3]);
                assert_eq!(after[2].character(), 'B');
            }
            other => panic!("Unexpected first event {:?}", other),
        }
        assert_eq!(
            events[0].to_string(),
            "STEP       | AAA -> AAB   | ENIGMA_I    | \
             Rotor types: I-II-III; Notch characters: Q-E-V"
        );
        assert_eq!(
            events[1],
            Event::PlugboardSubstitute {
                input: 'A',
                output: 'B',
                pairs: Cow::Owned(vec![('A', 'B')]),
            }
        );
        match events.last() {
            Some(Event::PlugboardSubstitute { output, .. }) => {
                assert_eq!(out.chars().next(), Some(*output))
            }
            other => panic!("Unexpected last event {:?}", other),
        }
    }
}
