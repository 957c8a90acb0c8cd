//! Enigma I / M3 rotor cipher machine.
//!
//! A keystroke enters the plugboard, passes right to left through a stack
//! of rotating substitution rotors, bounces off a fixed reflector, passes
//! back left to right through the rotors and leaves through the plugboard
//! again. Before every keystroke the rotors step according to their
//! notches, including the historical double step of the middle rotor.
//!
//! Wirings, notches and machine profiles are the historical ones, so
//! output interoperates with any other faithful Enigma implementation.
//!
//! # Architecture
//!
//! ```text
//! SubstitutionMap (validated permutation, forward + reverse lookup)
//!     ↓ wired into
//! Rotor (map + NotchSet + Position + RingSetting)   Reflector (involution)
//!     ↓ stacked left to right
//! RotorUnit (stepping state machine + forward/reflect/backward pass)
//!     ↓ owned by, together with a Plugboard
//! Enigma (validates machine profile, enciphers text)
//! ```
//!
//! # Examples
//!
//! Encipher on one machine and decipher on an identically configured one:
//!
//! ```
//! use enigma_machine::MachineConfig;
//!
//! let config = MachineConfig::from_strings("ENIGMA_I", "B", "I,V,III", "", "", "").unwrap();
//!
//! let mut sender = config.build().unwrap();
//! let ciphertext = sender.encipher("AAAAA").unwrap();
//! assert_eq!(ciphertext, "SCSUX");
//!
//! let mut receiver = config.build().unwrap();
//! assert_eq!(receiver.encipher(&ciphertext).unwrap(), "AAAAA");
//! ```
//!
//! Trace every substitution step:
//!
//! ```
//! use enigma_machine::{Event, MachineConfig};
//!
//! let mut enigma = MachineConfig::from_strings("M3", "B", "VI,VII,VIII", "", "", "AB")
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let mut events: Vec<Event<'static>> = Vec::new();
//! enigma.encipher_with("A", &mut events).unwrap();
//! for event in &events {
//!     println!("{}", event);
//! }
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod catalog;
pub mod config;
pub mod error;
pub mod observer;

mod enigma;
mod notch;
mod plugboard;
mod position;
mod reflector;
mod rotor;
mod rotor_unit;
mod substitution;

pub use config::{MachineConfig, RotorConfig};
pub use enigma::Enigma;
pub use error::{EnigmaError, Result};
pub use notch::NotchSet;
pub use observer::{Event, EventType, Observer, TracingObserver};
pub use plugboard::Plugboard;
pub use position::{Position, RingSetting};
pub use reflector::Reflector;
pub use rotor::Rotor;
pub use rotor_unit::{RotorUnit, MAX_ROTORS};
pub use substitution::SubstitutionMap;
