/*!
The `core` module is for types and concepts that are *not* strictly related to MIDI *files*.
These types and concepts could be used for realtime MIDI as well.
!*/

mod clocks;
mod numbers;

pub use clocks::Clocks;
pub use numbers::{
    Channel, ControlValue, MicrosecondsPerQuarter, NoteNumber, PortValue, Program,
    QuarterNoteDivision, QuartersPerMinute, Velocity, U7,
};
