//! Literal end-to-end vectors for the historical machines.
//!
//! Every expected ciphertext is a frozen snapshot: a change in output means
//! the wiring tables, the stepping rules or the substitution pipeline
//! regressed.
//!
//! Coverage:
//! - `Enigma::encipher` with default, shifted and ring-set rotors
//! - `Plugboard` in the pipeline
//! - `MachineConfig::from_strings` / `MachineConfig::from_toml_str`
//! - stepping across the double-step window

use enigma_machine::catalog::{self, MachineType, ReflectorKind, RotorKind};
use enigma_machine::{Enigma, MachineConfig, Plugboard, Position, RingSetting, RotorUnit};

fn build(
    machine: &str,
    reflector: &str,
    rotors: &str,
    positions: &str,
    rings: &str,
    plugboard: &str,
) -> Enigma {
    MachineConfig::from_strings(machine, reflector, rotors, positions, rings, plugboard)
        .unwrap()
        .build()
        .unwrap()
}

fn positions(enigma: &Enigma) -> String {
    enigma.positions().iter().map(Position::character).collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Default settings
// ═══════════════════════════════════════════════════════════════════════

/// Enigma I, reflector B, rotors I-V-III, all defaults, no plugboard.
#[test]
fn enigma_i_rotors_i_v_iii() {
    let reflector = catalog::build_reflector(ReflectorKind::B).unwrap();
    let rotors = [RotorKind::I, RotorKind::V, RotorKind::III]
        .into_iter()
        .map(|k| catalog::build_rotor(k, Position::default(), RingSetting::default()).unwrap())
        .collect();
    let unit = RotorUnit::new(reflector, rotors).unwrap();
    let mut enigma = Enigma::new(MachineType::EnigmaI, unit, Plugboard::empty()).unwrap();

    assert_eq!(enigma.encipher("AAAAA").unwrap(), "SCSUX");
}

/// Enigma M3, reflector B, rotors VI-VII-VIII, all defaults, no plugboard.
#[test]
fn enigma_m3_rotors_vi_vii_viii() {
    let mut enigma = build("ENIGMA_M3", "B", "VI,VII,VIII", "", "", "");
    assert_eq!(enigma.encipher("AAAAA").unwrap(), "GJUBB");
}

/// The textbook I-II-III check: `AAAAA` enciphers to `BDZGO`.
#[test]
fn enigma_i_rotors_i_ii_iii() {
    let mut enigma = build("ENIGMA_I", "B", "I,II,III", "", "", "");
    assert_eq!(enigma.encipher("AAAAA").unwrap(), "BDZGO");
    assert_eq!(positions(&enigma), "AAF");
}

/// Empty input produces empty output and does not step.
#[test]
fn empty_message() {
    let mut enigma = build("ENIGMA_I", "B", "I,II,III", "", "", "");
    assert_eq!(enigma.encipher("").unwrap(), "");
    assert_eq!(positions(&enigma), "AAA");
}

// ═══════════════════════════════════════════════════════════════════════
// Ring settings, positions, plugboard
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn ring_settings_bbb() {
    let mut enigma = build("ENIGMA_I", "B", "I,II,III", "", "BBB", "");
    assert_eq!(enigma.encipher("AAAAA").unwrap(), "EWTYX");
}

#[test]
fn starting_positions_through_double_step() {
    let mut enigma = build("ENIGMA_I", "B", "I,II,III", "ADU", "", "");
    assert_eq!(enigma.encipher("HELLOWORLD").unwrap(), "IBXXXNVDFL");
    assert_eq!(positions(&enigma), "BFE");
}

#[test]
fn plugboard_pairs() {
    let mut enigma = build("ENIGMA_I", "B", "I,II,III", "", "", "AB CD EF");
    assert_eq!(enigma.encipher("HELLOWORLD").unwrap(), "IKACBBMTBF");
}

#[test]
fn reflector_c_with_everything_set() {
    let mut enigma = build("ENIGMA_I", "C", "I,II,III", "QEV", "CFK", "AZ BY");
    assert_eq!(enigma.encipher("AAAAA").unwrap(), "CENLG");
    assert_eq!(positions(&enigma), "RFA");
}

#[test]
fn full_key_sheet_from_toml() {
    let document = r#"
machine = "ENIGMA_I"
reflector = "B"
plugboard = ["AV", "BS", "CG", "DL", "FU", "HZ", "IN", "KM", "OW", "RX"]
rotors = [
    { rotor = "II", position = "B", ring_setting = "2" },
    { rotor = "IV", position = "L", ring_setting = "21" },
    { rotor = "V", position = "A", ring_setting = "12" },
]
"#;
    let config = MachineConfig::from_toml_str(document).unwrap();
    let mut enigma = config.build().unwrap();
    let ciphertext = enigma
        .encipher("THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG")
        .unwrap();
    assert_eq!(ciphertext, "NIBAJBTJDJGUHGVUHXYJGLXDSHWZRYVCEHA");
    assert_eq!(positions(&enigma), "BMJ");
}

// ═══════════════════════════════════════════════════════════════════════
// Stepping
// ═══════════════════════════════════════════════════════════════════════

/// Middle rotor one before its notch (II: E), right rotor one before its
/// notch (III: V). The right rotor carries the middle onto its notch, and
/// on the very next key the middle rotor steps again, taking the left
/// rotor with it.
#[test]
fn double_step_positions() {
    let mut enigma = build("ENIGMA_I", "B", "I,II,III", "ADU", "", "");
    let expected = ["ADV", "AEW", "BFX", "BFY"];
    for want in expected {
        enigma.encipher("A").unwrap();
        assert_eq!(positions(&enigma), want);
    }
}

/// Middle rotor at its notch and right rotor at its notch: one key press
/// advances all three rotors.
#[test]
fn all_three_rotors_advance() {
    let mut enigma = build("ENIGMA_I", "B", "I,II,III", "AEV", "", "");
    enigma.encipher("A").unwrap();
    assert_eq!(positions(&enigma), "BFW");
}

/// Ring settings do not move the notches relative to the window letters.
#[test]
fn ring_setting_does_not_move_notch() {
    let mut enigma = build("ENIGMA_I", "B", "I,II,III", "AAV", "ZZZ", "");
    enigma.encipher("A").unwrap();
    assert_eq!(positions(&enigma), "ABW");
}
