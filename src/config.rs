//! Plain configuration for assembling a machine in one pass.
//!
//! A [`MachineConfig`] names a machine variant, a reflector, the rotors
//! (left to right, each with a starting position and ring setting) and the
//! plugboard pairs. It can be written by hand, parsed from TOML, or built
//! from the short strings found on a key sheet:
//!
//! ```toml
//! machine = "ENIGMA_I"
//! reflector = "B"
//! plugboard = ["AV", "BS", "CG"]
//!
//! [[rotors]]
//! rotor = "II"
//! position = "B"
//! ring_setting = "2"
//!
//! [[rotors]]
//! rotor = "IV"
//!
//! [[rotors]]
//! rotor = "V"
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, MachineType, ReflectorKind, RotorKind};
use crate::enigma::Enigma;
use crate::error::{EnigmaError, Result};
use crate::plugboard::Plugboard;
use crate::position::{Position, RingSetting};
use crate::rotor_unit::RotorUnit;

/// One rotor slot: which rotor, where it starts and its ring setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotorConfig {
    pub rotor: RotorKind,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub ring_setting: RingSetting,
}

impl RotorConfig {
    /// A rotor at position `A` with ring setting `A`.
    pub fn new(rotor: RotorKind) -> Self {
        RotorConfig {
            rotor,
            position: Position::default(),
            ring_setting: RingSetting::default(),
        }
    }
}

/// Everything needed to assemble an [`Enigma`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    pub machine: MachineType,
    pub reflector: ReflectorKind,
    pub rotors: Vec<RotorConfig>,
    /// Two-letter plugboard pairs, e.g. `["AB", "CD"]`.
    #[serde(default)]
    pub plugboard: Vec<String>,
}

impl MachineConfig {
    /// Validates the configuration and assembles a machine.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidConfiguration`] for a bad plugboard,
    /// a wrong rotor count or an incompatible rotor or reflector.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_machine::MachineConfig;
    ///
    /// let config = MachineConfig::from_strings("ENIGMA_I", "B", "I,II,III", "", "", "").unwrap();
    /// let mut enigma = config.build().unwrap();
    /// assert_eq!(enigma.encipher("AAAAA").unwrap(), "BDZGO");
    /// ```
    pub fn build(&self) -> Result<Enigma> {
        let rotors = self
            .rotors
            .iter()
            .map(|r| catalog::build_rotor(r.rotor, r.position, r.ring_setting))
            .collect::<Result<Vec<_>>>()?;
        let reflector = catalog::build_reflector(self.reflector)?;
        let plugboard: Plugboard = self.plugboard.join(" ").parse()?;
        let enigma = Enigma::new(self.machine, RotorUnit::new(reflector, rotors)?, plugboard)?;

        let rotor_names: Vec<&str> = self.rotors.iter().map(|r| r.rotor.name()).collect();
        tracing::debug!(
            machine = %self.machine,
            reflector = %self.reflector,
            rotors = %rotor_names.join(","),
            plugboard = %enigma.plugboard(),
            "Machine assembled"
        );
        Ok(enigma)
    }

    /// Parses a configuration from TOML.
    ///
    /// Component names and settings are read as strings first and then
    /// parsed the same way [`from_strings`](Self::from_strings) parses them,
    /// so both report the same error kinds.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidConfiguration`] with the parser message
    /// if the document is malformed or names an unknown component, and
    /// [`EnigmaError::InvalidInput`] for a position or ring setting outside
    /// the alphabet.
    pub fn from_toml_str(document: &str) -> Result<Self> {
        let raw: RawMachineConfig = toml::from_str(document).map_err(|e| {
            EnigmaError::config(format!("Failed to parse machine configuration: {}", e))
        })?;
        raw.parse()
    }

    /// Builds a configuration from key-sheet style strings.
    ///
    /// # Parameters
    /// - `machine`: Machine variant, e.g. `"ENIGMA_I"` or `"M3"`.
    /// - `reflector`: Reflector, e.g. `"B"`.
    /// - `rotors`: Comma separated rotors, left to right, e.g. `"I,II,III"`.
    /// - `positions`: One letter per rotor (`"ADU"`) or comma separated; empty for all `A`.
    /// - `ring_settings`: As `positions`; numbers `1`..`26` are accepted when comma separated.
    /// - `plugboard`: Whitespace separated pairs, e.g. `"AB CD"`; empty for none.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidConfiguration`] for unknown names or a
    /// setting count that does not match the rotor count, and
    /// [`EnigmaError::InvalidInput`] for a setting outside the alphabet.
    pub fn from_strings(
        machine: &str,
        reflector: &str,
        rotors: &str,
        positions: &str,
        ring_settings: &str,
        plugboard: &str,
    ) -> Result<Self> {
        let kinds = rotors
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(RotorKind::from_str)
            .collect::<Result<Vec<_>>>()?;
        let count = kinds.len();
        let positions = parse_settings::<Position>("position", positions, count)?;
        let ring_settings = parse_settings::<RingSetting>("ring setting", ring_settings, count)?;

        Ok(MachineConfig {
            machine: machine.parse()?,
            reflector: reflector.parse()?,
            rotors: kinds
                .into_iter()
                .zip(positions)
                .zip(ring_settings)
                .map(|((rotor, position), ring_setting)| RotorConfig {
                    rotor,
                    position,
                    ring_setting,
                })
                .collect(),
            plugboard: plugboard
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

/// TOML shape of a [`MachineConfig`], before any name is parsed.
#[derive(Debug, Deserialize)]
struct RawMachineConfig {
    machine: String,
    reflector: String,
    rotors: Vec<RawRotorConfig>,
    #[serde(default)]
    plugboard: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawRotorConfig {
    rotor: String,
    position: Option<String>,
    ring_setting: Option<String>,
}

impl RawMachineConfig {
    fn parse(self) -> Result<MachineConfig> {
        let rotors = self
            .rotors
            .into_iter()
            .map(RawRotorConfig::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(MachineConfig {
            machine: self.machine.parse()?,
            reflector: self.reflector.parse()?,
            rotors,
            plugboard: self.plugboard,
        })
    }
}

impl RawRotorConfig {
    fn parse(self) -> Result<RotorConfig> {
        Ok(RotorConfig {
            rotor: self.rotor.parse()?,
            position: parse_or_default(self.position.as_deref())?,
            ring_setting: parse_or_default(self.ring_setting.as_deref())?,
        })
    }
}

fn parse_or_default<T>(value: Option<&str>) -> Result<T>
where
    T: FromStr<Err = EnigmaError> + Default,
{
    value.map_or_else(|| Ok(T::default()), T::from_str)
}

/// Splits a settings string into one value per rotor.
fn parse_settings<T>(what: &str, value: &str, count: usize) -> Result<Vec<T>>
where
    T: FromStr<Err = EnigmaError> + Default + Clone,
{
    let value = value.trim();
    if value.is_empty() {
        return Ok(vec![T::default(); count]);
    }

    let settings = if value.contains(',') {
        value
            .split(',')
            .map(T::from_str)
            .collect::<Result<Vec<_>>>()?
    } else {
        value
            .chars()
            .map(|c| T::from_str(c.encode_utf8(&mut [0; 4])))
            .collect::<Result<Vec<_>>>()?
    };

    if settings.len() != count {
        return Err(EnigmaError::config(format!(
            "Invalid {} count. Expected '{}' values, one per rotor. Given: '{}'.",
            what, count, value
        )));
    }
    Ok(settings)
}
