//! Static, read-only lookup tables for human-readable names. Data-heavy and
//! algorithmically trivial: plain `match` expressions rather than a runtime
//! map, since the tables have no construction cost to amortize.

mod controllers;
mod manufacturers;

pub use controllers::controller_name;
pub use manufacturers::{manufacturer_label, manufacturer_name};

/// Key signature names, keyed by the signed count of sharps (positive) or
/// flats (negative) from a Key Signature meta event, `-7..=7`.
pub fn key_name(sharps_or_flats: i8) -> &'static str {
    match sharps_or_flats {
        -7 => "Cb",
        -6 => "Gb",
        -5 => "Db",
        -4 => "Ab",
        -3 => "Eb",
        -2 => "Bb",
        -1 => "F",
        0 => "C",
        1 => "G",
        2 => "D",
        3 => "A",
        4 => "E",
        5 => "B",
        6 => "F#",
        7 => "C#",
        _ => "Unknown Key",
    }
}

/// SMPTE frame rate, decoded from the 2-bit code in bits 5-6 of a SMPTE
/// Offset meta event's hour byte.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum FrameRate {
    /// code 0
    Fps24,
    /// code 1
    Fps25,
    /// code 2, "30 drop"
    Fps2997,
    /// code 3
    Fps30,
}

impl FrameRate {
    pub fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0 => FrameRate::Fps24,
            1 => FrameRate::Fps25,
            2 => FrameRate::Fps2997,
            _ => FrameRate::Fps30,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            FrameRate::Fps24 => 0,
            FrameRate::Fps25 => 1,
            FrameRate::Fps2997 => 2,
            FrameRate::Fps30 => 3,
        }
    }
}
