//! Observation hooks for the substitution pipeline.
//!
//! The core never formats or emits log output itself. At each extension
//! point (after a step, after every plugboard, rotor and reflector
//! substitution) it hands an immutable [`Event`] to an [`Observer`].
//! Events borrow the machine's own data, so building one costs nothing;
//! all rendering happens in `Event`'s `Display` impl. `()` ignores events,
//! `Vec<Event<'static>>` records owned copies, and [`TracingObserver`]
//! forwards them to `tracing`.

use std::borrow::Cow;
use std::fmt;

use crate::alphabet::ALPHABET;
use crate::catalog::{MachineType, ReflectorKind, RotorKind};
use crate::position::{Position, RingSetting};
use crate::rotor::Rotor;

/// Width of the event type column.
const TYPE_WIDTH: usize = 10;
/// Width of the `a -> b` column.
const RESULT_WIDTH: usize = 12;
/// Width of the component name column.
const COMPONENT_WIDTH: usize = 11;

/// Category of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Step,
    Substitute,
    Shift,
    DeShift,
}

impl EventType {
    /// Upper-case label used in the first log column, e.g. `DE_SHIFT`.
    pub fn name(&self) -> &'static str {
        match self {
            EventType::Step => "STEP",
            EventType::Substitute => "SUBSTITUTE",
            EventType::Shift => "SHIFT",
            EventType::DeShift => "DE_SHIFT",
        }
    }
}

/// Snapshot of one sub-step of enciphering a character.
///
/// Slices and strings are borrowed from the machine while it runs; call
/// [`into_owned`](Self::into_owned) to keep an event past the callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    /// The rotor stack stepped before a keystroke.
    Step {
        machine: MachineType,
        rotors: Cow<'a, [Rotor]>,
        before: Cow<'a, [Position]>,
        after: Cow<'a, [Position]>,
    },
    /// A character passed through the plugboard.
    PlugboardSubstitute {
        input: char,
        output: char,
        pairs: Cow<'a, [(char, char)]>,
    },
    /// A character was shifted by a rotor's offset on the way in.
    RotorShift {
        rotor: RotorKind,
        input: char,
        output: char,
        offset: usize,
        position: Position,
        ring_setting: RingSetting,
    },
    /// A character was substituted by a rotor's wiring.
    RotorSubstitute {
        rotor: RotorKind,
        input: char,
        output: char,
        reverse: bool,
        cipher_set: Cow<'a, str>,
    },
    /// A character was shifted back by a rotor's offset on the way out.
    RotorDeshift {
        rotor: RotorKind,
        input: char,
        output: char,
        offset: usize,
    },
    /// A character was substituted by the reflector.
    ReflectorSubstitute {
        reflector: ReflectorKind,
        input: char,
        output: char,
        cipher_set: Cow<'a, str>,
    },
}

impl Event<'_> {
    /// Category of this event.
    pub fn event_type(&self) -> EventType {
        match self {
            Event::Step { .. } => EventType::Step,
            Event::PlugboardSubstitute { .. }
            | Event::RotorSubstitute { .. }
            | Event::ReflectorSubstitute { .. } => EventType::Substitute,
            Event::RotorShift { .. } => EventType::Shift,
            Event::RotorDeshift { .. } => EventType::DeShift,
        }
    }

    /// Name of the component involved.
    pub fn component(&self) -> &'static str {
        match self {
            Event::Step { machine, .. } => machine.name(),
            Event::PlugboardSubstitute { .. } => "PLUGBOARD",
            Event::RotorShift { rotor, .. }
            | Event::RotorSubstitute { rotor, .. }
            | Event::RotorDeshift { rotor, .. } => rotor.name(),
            Event::ReflectorSubstitute { reflector, .. } => reflector.name(),
        }
    }

    /// Copies any borrowed data so the event outlives the machine.
    pub fn into_owned(self) -> Event<'static> {
        match self {
            Event::Step {
                machine,
                rotors,
                before,
                after,
            } => Event::Step {
                machine,
                rotors: Cow::Owned(rotors.into_owned()),
                before: Cow::Owned(before.into_owned()),
                after: Cow::Owned(after.into_owned()),
            },
            Event::PlugboardSubstitute {
                input,
                output,
                pairs,
            } => Event::PlugboardSubstitute {
                input,
                output,
                pairs: Cow::Owned(pairs.into_owned()),
            },
            Event::RotorShift {
                rotor,
                input,
                output,
                offset,
                position,
                ring_setting,
            } => Event::RotorShift {
                rotor,
                input,
                output,
                offset,
                position,
                ring_setting,
            },
            Event::RotorSubstitute {
                rotor,
                input,
                output,
                reverse,
                cipher_set,
            } => Event::RotorSubstitute {
                rotor,
                input,
                output,
                reverse,
                cipher_set: Cow::Owned(cipher_set.into_owned()),
            },
            Event::RotorDeshift {
                rotor,
                input,
                output,
                offset,
            } => Event::RotorDeshift {
                rotor,
                input,
                output,
                offset,
            },
            Event::ReflectorSubstitute {
                reflector,
                input,
                output,
                cipher_set,
            } => Event::ReflectorSubstitute {
                reflector,
                input,
                output,
                cipher_set: Cow::Owned(cipher_set.into_owned()),
            },
        }
    }

    fn write_result(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = match self {
            Event::Step { before, after, .. } => {
                format!("{} -> {}", letters(before), letters(after))
            }
            Event::RotorShift { input, output, .. } => format!("{} .. {}", input, output),
            Event::RotorDeshift { input, output, .. } => format!("{} .. {}", input, output),
            Event::PlugboardSubstitute { input, output, .. }
            | Event::RotorSubstitute { input, output, .. }
            | Event::ReflectorSubstitute { input, output, .. } => {
                format!("{} -> {}", input, output)
            }
        };
        write!(f, "{:<width$}", result, width = RESULT_WIDTH)
    }

    fn write_detail(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Step { rotors, .. } => {
                f.write_str("Rotor types: ")?;
                write_joined(f, rotors.iter().map(Rotor::kind))?;
                f.write_str("; Notch characters: ")?;
                write_joined(f, rotors.iter().map(Rotor::notches))
            }
            Event::PlugboardSubstitute { pairs, .. } if pairs.is_empty() => {
                f.write_str("No connectors")
            }
            Event::PlugboardSubstitute { pairs, .. } => {
                f.write_str("Connectors:")?;
                for (a, b) in pairs.iter() {
                    write!(f, " {}{}", a, b)?;
                }
                Ok(())
            }
            Event::RotorShift {
                offset,
                position,
                ring_setting,
                ..
            } => write!(
                f,
                "Rotor offset: {} = offset {} (Position {}) minus offset {} (Ring Setting {})",
                offset,
                position.index(),
                position,
                ring_setting.index(),
                ring_setting
            ),
            Event::RotorSubstitute {
                reverse,
                cipher_set,
                ..
            } => {
                if *reverse {
                    write!(f, "Cipher set map: {} => {}", cipher_set, ALPHABET)
                } else {
                    write!(f, "Cipher set map: {} => {}", ALPHABET, cipher_set)
                }
            }
            Event::RotorDeshift { offset, .. } => write!(f, "Rotor offset: {}", offset),
            Event::ReflectorSubstitute { cipher_set, .. } => {
                write!(f, "Cipher set map: {} => {}", ALPHABET, cipher_set)
            }
        }
    }
}

fn letters(positions: &[Position]) -> String {
    positions.iter().map(Position::character).collect()
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str("-")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<w$} | ", self.event_type().name(), w = TYPE_WIDTH)?;
        self.write_result(f)?;
        write!(f, " | {:<w$} | ", self.component(), w = COMPONENT_WIDTH)?;
        self.write_detail(f)
    }
}

/// Receives pipeline events.
pub trait Observer {
    /// Called once per step or substitution, in pipeline order.
    fn on_event(&mut self, event: &Event<'_>);
}

impl Observer for () {
    fn on_event(&mut self, _event: &Event<'_>) {}
}

impl Observer for Vec<Event<'static>> {
    fn on_event(&mut self, event: &Event<'_>) {
        self.push(event.clone().into_owned());
    }
}

/// Forwards every event to `tracing` at `DEBUG` level.
///
/// Each record carries the event type, component and the rendered log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_event(&mut self, event: &Event<'_>) {
        tracing::debug!(
            event_type = event.event_type().name(),
            component = event.component(),
            "{}",
            event
        );
    }
}
