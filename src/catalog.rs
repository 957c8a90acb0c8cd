//! Catalog of historical rotors, reflectors and machine profiles.
//!
//! The catalog is plain data: each kind maps to a fixed table row (wiring,
//! notches, compatibility) and components are built from the looked-up row
//! by [`build_rotor`] and [`build_reflector`]. The wirings are the
//! historical ones and must stay bit-for-bit identical for messages to
//! interoperate with other Enigma implementations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EnigmaError, Result};
use crate::notch::NotchSet;
use crate::position::{Position, RingSetting};
use crate::reflector::Reflector;
use crate::rotor::Rotor;
use crate::substitution::SubstitutionMap;

/// Supported machine variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MachineType {
    /// Army and air force Enigma I.
    EnigmaI,
    /// Naval Enigma M3.
    EnigmaM3,
}

/// Named rotor wirings I–VIII.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RotorKind {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
    VIII,
}

/// Named reflector wirings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReflectorKind {
    B,
    C,
}

/// One row of the rotor table.
#[derive(Debug)]
pub struct RotorSpec {
    pub kind: RotorKind,
    pub wiring: &'static str,
    pub notches: &'static str,
    pub compatibility: &'static [MachineType],
}

/// One row of the reflector table.
#[derive(Debug)]
pub struct ReflectorSpec {
    pub kind: ReflectorKind,
    pub wiring: &'static str,
    pub compatibility: &'static [MachineType],
}

/// Required shape of a machine variant.
#[derive(Debug)]
pub struct MachineProfile {
    pub machine: MachineType,
    pub rotor_count: usize,
}

const BOTH: &[MachineType] = &[MachineType::EnigmaI, MachineType::EnigmaM3];
const NAVAL: &[MachineType] = &[MachineType::EnigmaM3];

#[rustfmt::skip]
static ROTORS: [RotorSpec; 8] = [
    RotorSpec { kind: RotorKind::I, wiring: "EKMFLGDQVZNTOWYHXUSPAIBRCJ", notches: "Q", compatibility: BOTH },
    RotorSpec { kind: RotorKind::II, wiring: "AJDKSIRUXBLHWTMCQGZNPYFVOE", notches: "E", compatibility: BOTH },
    RotorSpec { kind: RotorKind::III, wiring: "BDFHJLCPRTXVZNYEIWGAKMUSQO", notches: "V", compatibility: BOTH },
    RotorSpec { kind: RotorKind::IV, wiring: "ESOVPZJAYQUIRHXLNFTGKDCMWB", notches: "J", compatibility: BOTH },
    RotorSpec { kind: RotorKind::V, wiring: "VZBRGITYUPSDNHLXAWMJQOFECK", notches: "Z", compatibility: BOTH },
    RotorSpec { kind: RotorKind::VI, wiring: "JPGVOUMFYQBENHZRDKASXLICTW", notches: "ZM", compatibility: NAVAL },
    RotorSpec { kind: RotorKind::VII, wiring: "NZJHGRCXMYSWBOUFAIVLPEKQDT", notches: "ZM", compatibility: NAVAL },
    RotorSpec { kind: RotorKind::VIII, wiring: "FKQHTLXOCBJSPDZRAMEWNIUYGV", notches: "ZM", compatibility: NAVAL },
];

#[rustfmt::skip]
static REFLECTORS: [ReflectorSpec; 2] = [
    ReflectorSpec { kind: ReflectorKind::B, wiring: "YRUHQSLDPXNGOKMIEBFZCWVJAT", compatibility: BOTH },
    ReflectorSpec { kind: ReflectorKind::C, wiring: "FVPJIAOYEDRZXWGCTKUQSBNMHL", compatibility: BOTH },
];

#[rustfmt::skip]
static PROFILES: [MachineProfile; 2] = [
    MachineProfile { machine: MachineType::EnigmaI, rotor_count: 3 },
    MachineProfile { machine: MachineType::EnigmaM3, rotor_count: 3 },
];

/// Looks up the table row for a rotor kind.
pub fn rotor_spec(kind: RotorKind) -> &'static RotorSpec {
    &ROTORS[kind as usize]
}

/// Looks up the table row for a reflector kind.
pub fn reflector_spec(kind: ReflectorKind) -> &'static ReflectorSpec {
    &REFLECTORS[kind as usize]
}

/// Looks up the required shape of a machine variant.
pub fn machine_profile(machine: MachineType) -> &'static MachineProfile {
    &PROFILES[machine as usize]
}

/// Builds a catalog rotor at the given position and ring setting.
///
/// # Examples
///
/// ```
/// use enigma_machine::catalog::{self, RotorKind};
/// use enigma_machine::{Position, RingSetting};
///
/// let position = Position::new('C').unwrap();
/// let rotor = catalog::build_rotor(RotorKind::I, position, RingSetting::default()).unwrap();
/// assert_eq!(rotor.kind(), RotorKind::I);
/// assert_eq!(rotor.position(), position);
/// ```
pub fn build_rotor(
    kind: RotorKind,
    position: Position,
    ring_setting: RingSetting,
) -> Result<Rotor> {
    let spec = rotor_spec(kind);
    Ok(Rotor::new(
        kind,
        SubstitutionMap::new(spec.wiring)?,
        NotchSet::from_letters(spec.notches)?,
        spec.compatibility,
        position,
        ring_setting,
    ))
}

/// Builds a catalog reflector.
pub fn build_reflector(kind: ReflectorKind) -> Result<Reflector> {
    let spec = reflector_spec(kind);
    Reflector::new(kind, SubstitutionMap::new(spec.wiring)?, spec.compatibility)
}

impl MachineType {
    /// Every supported machine variant.
    pub const ALL: [MachineType; 2] = [MachineType::EnigmaI, MachineType::EnigmaM3];

    /// Canonical name, e.g. `ENIGMA_I`.
    pub fn name(&self) -> &'static str {
        match self {
            MachineType::EnigmaI => "ENIGMA_I",
            MachineType::EnigmaM3 => "ENIGMA_M3",
        }
    }

    /// Canonical names of every supported variant.
    pub fn list() -> Vec<&'static str> {
        Self::ALL.iter().map(MachineType::name).collect()
    }

    /// Number of rotors this variant requires.
    pub fn rotor_count(&self) -> usize {
        machine_profile(*self).rotor_count
    }
}

impl RotorKind {
    /// Every catalog rotor.
    pub const ALL: [RotorKind; 8] = [
        RotorKind::I,
        RotorKind::II,
        RotorKind::III,
        RotorKind::IV,
        RotorKind::V,
        RotorKind::VI,
        RotorKind::VII,
        RotorKind::VIII,
    ];

    /// Roman numeral name, e.g. `VII`.
    pub fn name(&self) -> &'static str {
        match self {
            RotorKind::I => "I",
            RotorKind::II => "II",
            RotorKind::III => "III",
            RotorKind::IV => "IV",
            RotorKind::V => "V",
            RotorKind::VI => "VI",
            RotorKind::VII => "VII",
            RotorKind::VIII => "VIII",
        }
    }

    /// Names of every catalog rotor.
    pub fn list() -> Vec<&'static str> {
        Self::ALL.iter().map(RotorKind::name).collect()
    }
}

impl ReflectorKind {
    /// Every catalog reflector.
    pub const ALL: [ReflectorKind; 2] = [ReflectorKind::B, ReflectorKind::C];

    /// Canonical name, e.g. `REFLECTOR_B`.
    pub fn name(&self) -> &'static str {
        match self {
            ReflectorKind::B => "REFLECTOR_B",
            ReflectorKind::C => "REFLECTOR_C",
        }
    }

    /// Canonical names of every catalog reflector.
    pub fn list() -> Vec<&'static str> {
        Self::ALL.iter().map(ReflectorKind::name).collect()
    }
}

fn unknown(what: &str, valid: Vec<&str>, given: &str) -> EnigmaError {
    EnigmaError::config(format!(
        "Unknown {}. Valid: '{}'. Given: '{}'.",
        what,
        valid.join(", "),
        given
    ))
}

impl FromStr for MachineType {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_uppercase();
        let short = wanted.strip_prefix("ENIGMA_").unwrap_or(&wanted);
        Self::ALL
            .into_iter()
            .find(|m| m.name().strip_prefix("ENIGMA_") == Some(short))
            .ok_or_else(|| unknown("machine type", Self::list(), s))
    }
}

impl FromStr for RotorKind {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|r| r.name() == wanted)
            .ok_or_else(|| unknown("rotor", Self::list(), s))
    }
}

impl FromStr for ReflectorKind {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_uppercase();
        let short = wanted.strip_prefix("REFLECTOR_").unwrap_or(&wanted);
        Self::ALL
            .into_iter()
            .find(|r| r.name().strip_prefix("REFLECTOR_") == Some(short))
            .ok_or_else(|| unknown("reflector", Self::list(), s))
    }
}

macro_rules! string_conversions {
    ($($kind:ty),*) => {$(
        impl fmt::Display for $kind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl TryFrom<String> for $kind {
            type Error = EnigmaError;

            fn try_from(value: String) -> Result<Self> {
                value.parse()
            }
        }

        impl From<$kind> for String {
            fn from(value: $kind) -> Self {
                value.name().to_string()
            }
        }
    )*};
}

string_conversions!(MachineType, RotorKind, ReflectorKind);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_indexed_by_kind() {
        for kind in RotorKind::ALL {
            assert_eq!(rotor_spec(kind).kind, kind);
        }
        for kind in ReflectorKind::ALL {
            assert_eq!(reflector_spec(kind).kind, kind);
        }
        for machine in MachineType::ALL {
            assert_eq!(machine_profile(machine).machine, machine);
            assert_eq!(machine.rotor_count(), 3);
        }
    }

    #[test]
    fn test_every_catalog_entry_builds() {
        for kind in RotorKind::ALL {
            let rotor = build_rotor(kind, Position::default(), RingSetting::default());
            assert!(rotor.is_ok(), "Rotor {} failed to build", kind);
        }
        for kind in ReflectorKind::ALL {
            assert!(
                build_reflector(kind).is_ok(),
                "Reflector {} failed to build",
                kind
            );
        }
    }

    #[test]
    fn test_compatibility() {
        let position = Position::default();
        let ring = RingSetting::default();
        for kind in [RotorKind::I, RotorKind::V] {
            let rotor = build_rotor(kind, position, ring).unwrap();
            assert!(rotor.is_compatible(MachineType::EnigmaI));
            assert!(rotor.is_compatible(MachineType::EnigmaM3));
        }
        for kind in [RotorKind::VI, RotorKind::VII, RotorKind::VIII] {
            let rotor = build_rotor(kind, position, ring).unwrap();
            assert!(!rotor.is_compatible(MachineType::EnigmaI));
            assert!(rotor.is_compatible(MachineType::EnigmaM3));
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "ENIGMA_I".parse::<MachineType>().unwrap(),
            MachineType::EnigmaI
        );
        assert_eq!("m3".parse::<MachineType>().unwrap(), MachineType::EnigmaM3);
        assert_eq!("viii".parse::<RotorKind>().unwrap(), RotorKind::VIII);
        assert_eq!("B".parse::<ReflectorKind>().unwrap(), ReflectorKind::B);
        assert_eq!(
            "REFLECTOR_C".parse::<ReflectorKind>().unwrap(),
            ReflectorKind::C
        );

        let err = "IX".parse::<RotorKind>().unwrap_err();
        assert!(format!("{}", err).contains("'IX'"));
        assert!("ENIGMA_K".parse::<MachineType>().is_err());
        assert!("A".parse::<ReflectorKind>().is_err());
    }

    #[test]
    fn test_list() {
        assert_eq!(MachineType::list(), vec!["ENIGMA_I", "ENIGMA_M3"]);
        assert_eq!(ReflectorKind::list(), vec!["REFLECTOR_B", "REFLECTOR_C"]);
        assert_eq!(RotorKind::list().len(), 8);
        assert_eq!(RotorKind::VII.to_string(), "VII");
    }
}
