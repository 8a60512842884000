//! Channel voice messages: status bytes `0x80`-`0xEF`. The upper nibble
//! selects the kind, the lower nibble is the channel (handled by the
//! caller, which also owns the running-status byte).

use crate::core::{Channel, NoteNumber, Program, Velocity, U7};
use crate::cursor::ByteCursor;
use crate::error::LibResult;

pub(crate) const NOTE_OFF: u8 = 0x8;
pub(crate) const NOTE_ON: u8 = 0x9;
pub(crate) const POLY_AFTERTOUCH: u8 = 0xA;
pub(crate) const CONTROL_CHANGE: u8 = 0xB;
pub(crate) const PROGRAM_CHANGE: u8 = 0xC;
pub(crate) const CHANNEL_PRESSURE: u8 = 0xD;
pub(crate) const PITCH_BEND: u8 = 0xE;

/// The payload of a channel voice event, minus the channel number (which is
/// carried by the enclosing [`crate::EventKind::ChannelVoice`]).
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum ChannelVoiceKind {
    /// `0x8_`. `length` is 0 until matched with a Note-On by the NotePairer
    /// during decode; always 0 on freshly constructed events.
    NoteOff {
        note: NoteNumber,
        velocity: Velocity,
        length: u32,
    },
    /// `0x9_`. `length` is back-patched by the NotePairer once the matching
    /// Note-Off (or zero-velocity Note-On) is seen.
    NoteOn {
        note: NoteNumber,
        velocity: Velocity,
        length: u32,
    },
    /// `0xA_`.
    PolyAftertouch { note: NoteNumber, pressure: U7 },
    /// `0xB_`.
    ControlChange { controller: U7, value: U7 },
    /// `0xC_`.
    ProgramChange { program: Program },
    /// `0xD_`.
    ChannelPressure { pressure: U7 },
    /// `0xE_`. `value14 == (msb << 7) | lsb`.
    PitchBend { value14: u16, lsb: U7, msb: U7 },
}

impl ChannelVoiceKind {
    pub(crate) fn type_nibble(&self) -> u8 {
        match self {
            ChannelVoiceKind::NoteOff { .. } => NOTE_OFF,
            ChannelVoiceKind::NoteOn { .. } => NOTE_ON,
            ChannelVoiceKind::PolyAftertouch { .. } => POLY_AFTERTOUCH,
            ChannelVoiceKind::ControlChange { .. } => CONTROL_CHANGE,
            ChannelVoiceKind::ProgramChange { .. } => PROGRAM_CHANGE,
            ChannelVoiceKind::ChannelPressure { .. } => CHANNEL_PRESSURE,
            ChannelVoiceKind::PitchBend { .. } => PITCH_BEND,
        }
    }

    pub(crate) fn decode(type_nibble: u8, cursor: &mut ByteCursor) -> LibResult<Self> {
        Ok(match type_nibble {
            NOTE_OFF => {
                let note = NoteNumber::new(cursor.read_u8()?);
                let velocity = Velocity::new(cursor.read_u8()?);
                ChannelVoiceKind::NoteOff {
                    note,
                    velocity,
                    length: 0,
                }
            }
            NOTE_ON => {
                let note = NoteNumber::new(cursor.read_u8()?);
                let velocity = Velocity::new(cursor.read_u8()?);
                ChannelVoiceKind::NoteOn {
                    note,
                    velocity,
                    length: 0,
                }
            }
            POLY_AFTERTOUCH => {
                let note = NoteNumber::new(cursor.read_u8()?);
                let pressure = U7::new(cursor.read_u8()?);
                ChannelVoiceKind::PolyAftertouch { note, pressure }
            }
            CONTROL_CHANGE => {
                let controller = U7::new(cursor.read_u8()?);
                let value = U7::new(cursor.read_u8()?);
                ChannelVoiceKind::ControlChange { controller, value }
            }
            PROGRAM_CHANGE => {
                let program = Program::new(cursor.read_u8()?);
                ChannelVoiceKind::ProgramChange { program }
            }
            CHANNEL_PRESSURE => {
                let pressure = U7::new(cursor.read_u8()?);
                ChannelVoiceKind::ChannelPressure { pressure }
            }
            PITCH_BEND => {
                let lsb = U7::new(cursor.read_u8()?);
                let msb = U7::new(cursor.read_u8()?);
                let value14 = ((msb.get() as u16) << 7) | (lsb.get() as u16);
                ChannelVoiceKind::PitchBend { value14, lsb, msb }
            }
            _ => invalid_file!("unknown channel voice type nibble {:#x}", type_nibble),
        })
    }

    pub(crate) fn encode(&self, cursor: &mut ByteCursor) {
        match *self {
            ChannelVoiceKind::NoteOff { note, velocity, .. } => {
                cursor.write_u8(note.get());
                cursor.write_u8(velocity.get());
            }
            ChannelVoiceKind::NoteOn { note, velocity, .. } => {
                cursor.write_u8(note.get());
                cursor.write_u8(velocity.get());
            }
            ChannelVoiceKind::PolyAftertouch { note, pressure } => {
                cursor.write_u8(note.get());
                cursor.write_u8(pressure.get());
            }
            ChannelVoiceKind::ControlChange { controller, value } => {
                cursor.write_u8(controller.get());
                cursor.write_u8(value.get());
            }
            ChannelVoiceKind::ProgramChange { program } => {
                cursor.write_u8(program.get());
            }
            ChannelVoiceKind::ChannelPressure { pressure } => {
                cursor.write_u8(pressure.get());
            }
            ChannelVoiceKind::PitchBend { lsb, msb, .. } => {
                cursor.write_u8(lsb.get());
                cursor.write_u8(msb.get());
            }
        }
    }

    /// A human-readable label for the event; for Control Change this comes
    /// from the controller name table (§6.3), matching what every other
    /// channel-voice kind gets from its own fixed name.
    pub(crate) fn label(&self) -> String {
        match self {
            ChannelVoiceKind::NoteOff { .. } => "Note Off".to_string(),
            ChannelVoiceKind::NoteOn { .. } => "Note On".to_string(),
            ChannelVoiceKind::PolyAftertouch { .. } => "Polyphonic Key Pressure".to_string(),
            ChannelVoiceKind::ControlChange { controller, .. } => {
                crate::labels::controller_name(controller.get()).to_string()
            }
            ChannelVoiceKind::ProgramChange { .. } => "Program Change".to_string(),
            ChannelVoiceKind::ChannelPressure { .. } => "Channel Pressure".to_string(),
            ChannelVoiceKind::PitchBend { .. } => "Pitch Bend".to_string(),
        }
    }
}

pub(crate) fn write_status_byte(cursor: &mut ByteCursor, type_nibble: u8, channel: Channel) {
    cursor.write_u8((type_nibble << 4) | (channel.get() & 0x0F));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_bend_combines_14_bits() {
        let mut cursor = ByteCursor::for_reading(vec![0x7F, 0x7F]);
        let kind = ChannelVoiceKind::decode(PITCH_BEND, &mut cursor).unwrap();
        match kind {
            ChannelVoiceKind::PitchBend { value14, .. } => assert_eq!(0x3FFF, value14),
            _ => panic!("expected PitchBend"),
        }
    }

    #[test]
    fn note_on_roundtrips() {
        let kind = ChannelVoiceKind::NoteOn {
            note: NoteNumber::new(60),
            velocity: Velocity::new(100),
            length: 0,
        };
        let mut cursor = ByteCursor::for_writing();
        kind.encode(&mut cursor);
        let mut read_cursor = ByteCursor::for_reading(cursor.into_bytes());
        let decoded = ChannelVoiceKind::decode(NOTE_ON, &mut read_cursor).unwrap();
        assert_eq!(kind, decoded);
    }
}
