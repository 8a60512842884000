//! The 16-bit time-division field of the MThd chunk: either pulses-per-
//! quarter-note (metrical) or SMPTE frames/ticks (time-code based).

use crate::core::{QuarterNoteDivision, U7};

const DIVISION_TYPE_BIT: u16 = 0b1000_0000_0000_0000;

/// Specifies the meaning of a track's delta-times.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum TimeDivision {
    /// Bit 15 of the raw field is zero; bits 14-0 are the number of ticks
    /// per quarter note.
    Ppq(QuarterNoteDivision),
    /// Bit 15 of the raw field is one; the low byte of the field holds the
    /// frame count (bits 0-6 of byte 0, this implementation's reading of
    /// the wire format) and the second byte holds the ticks-per-frame
    /// resolution.
    Smpte {
        /// Frames per second, as the raw 7-bit field value.
        frames_per_second: U7,
        /// Sub-frame resolution, e.g. 4, 8, 10, 80, or 100.
        ticks_per_frame: u8,
    },
}

impl Default for TimeDivision {
    fn default() -> Self {
        TimeDivision::Ppq(QuarterNoteDivision::default())
    }
}

impl TimeDivision {
    pub(crate) fn from_u16(value: u16) -> Self {
        if value & DIVISION_TYPE_BIT == DIVISION_TYPE_BIT {
            let byte0 = ((value >> 8) & 0xFF) as u8;
            let byte1 = (value & 0xFF) as u8;
            TimeDivision::Smpte {
                frames_per_second: U7::new(byte0 & 0x7F),
                ticks_per_frame: byte1,
            }
        } else {
            TimeDivision::Ppq(QuarterNoteDivision::new(value))
        }
    }

    pub(crate) fn to_u16(self) -> u16 {
        match self {
            TimeDivision::Ppq(q) => q.get(),
            TimeDivision::Smpte {
                frames_per_second,
                ticks_per_frame,
            } => {
                let byte0 = DIVISION_TYPE_BIT | ((frames_per_second.get() as u16) << 8);
                byte0 | ticks_per_frame as u16
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_480_ppq() {
        assert_eq!(TimeDivision::Ppq(QuarterNoteDivision::new(480)), TimeDivision::default());
    }

    #[test]
    fn ppq_roundtrips() {
        let d = TimeDivision::Ppq(QuarterNoteDivision::new(96));
        assert_eq!(d, TimeDivision::from_u16(d.to_u16()));
    }

    #[test]
    fn smpte_roundtrips() {
        let d = TimeDivision::Smpte {
            frames_per_second: U7::new(25),
            ticks_per_frame: 40,
        };
        assert_eq!(d, TimeDivision::from_u16(d.to_u16()));
    }

    #[test]
    fn high_bit_selects_smpte() {
        match TimeDivision::from_u16(0xE250) {
            TimeDivision::Smpte {
                frames_per_second,
                ticks_per_frame,
            } => {
                assert_eq!(0x62, frames_per_second.get());
                assert_eq!(0x50, ticks_per_frame);
            }
            TimeDivision::Ppq(_) => panic!("expected Smpte"),
        }
    }
}
