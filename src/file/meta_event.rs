//! Meta events: `0xFF <type> <declared length VLQ> <payload>`. Meta events
//! only exist in the file format, not in real-time MIDI.
//!
//! In general, meta-events in a track which occur at the same time may occur
//! in any order. If a copyright event is used, it should be placed as early
//! as possible in the file, so it will be noticed easily. Sequence Number
//! and Sequence/Track Name events, if present, must appear at time 0. An
//! end-of-track event must occur as the last event in the track.

use crate::core::{Channel, Clocks, MicrosecondsPerQuarter, PortValue};
use crate::cursor::ByteCursor;
use crate::error::LibResult;
use crate::labels;
use crate::text::Text;
use crate::vlq;

pub(crate) const META_SEQUENCE_NUM: u8 = 0x00;
pub(crate) const META_TEXT: u8 = 0x01;
pub(crate) const META_COPYRIGHT: u8 = 0x02;
pub(crate) const META_TRACK_NAME: u8 = 0x03;
pub(crate) const META_INSTR_NAME: u8 = 0x04;
pub(crate) const META_LYRIC: u8 = 0x05;
pub(crate) const META_MARKER: u8 = 0x06;
pub(crate) const META_CUE_POINT: u8 = 0x07;
pub(crate) const META_PROG_NAME: u8 = 0x08;
pub(crate) const META_DEVICE_NAME: u8 = 0x09;
pub(crate) const META_CHAN_PREFIX: u8 = 0x20;
pub(crate) const META_PORT: u8 = 0x21;
pub(crate) const META_END_OF_TRACK: u8 = 0x2F;
pub(crate) const META_M_LIVE_TAG: u8 = 0x4B;
pub(crate) const META_SET_TEMPO: u8 = 0x51;
pub(crate) const META_SMPTE_OFFSET: u8 = 0x54;
pub(crate) const META_TIME_SIG: u8 = 0x58;
pub(crate) const META_KEY_SIG: u8 = 0x59;
pub(crate) const META_SEQ_SPECIFIC: u8 = 0x7F;

pub(crate) const LEN_META_CHAN_PREFIX: u32 = 1;
pub(crate) const LEN_META_END_OF_TRACK: u32 = 0;
pub(crate) const LEN_META_SET_TEMPO: u32 = 3;
pub(crate) const LEN_META_SMPTE_OFFSET: u32 = 5;
pub(crate) const LEN_META_TIME_SIG: u32 = 4;
pub(crate) const LEN_META_KEY_SIG: u32 = 2;

/// `FF <type> <declared length VLQ> <payload>`. `declared_length` is kept
/// alongside the decoded payload because the validator checks it against
/// the wire-standard length for fixed-size meta types even when the decoder
/// tolerated a mismatch.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct MetaEvent {
    declared_length: u32,
    kind: MetaEventKind,
}

#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum MetaEventKind {
    /// `FF 00 02 ssss`, or a fallback to the track's index if the declared
    /// length was not 2.
    SequenceNumber(u16),
    /// `FF 01 len text`.
    OtherText(Text),
    /// `FF 02 len text`.
    Copyright(Text),
    /// `FF 03 len text`.
    TrackName(Text),
    /// `FF 04 len text`.
    InstrumentName(Text),
    /// `FF 05 len text`.
    Lyric(Text),
    /// `FF 06 len text`.
    Marker(Text),
    /// `FF 07 len text`.
    CuePoint(Text),
    /// `FF 08 len text`.
    ProgramName(Text),
    /// `FF 09 len text`.
    DeviceName(Text),
    /// `FF 20 01 cc`.
    MidiChannelPrefix(Channel),
    /// `FF 21 01 pp`, non-standard but widely used (e.g. by Cakewalk).
    MidiPort(PortValue),
    /// `FF 2F 00`.
    EndOfTrack,
    /// `FF 51 03 tttttt`, microseconds per quarter note.
    SetTempo(MicrosecondsPerQuarter),
    /// `FF 54 05 hr mn se fr ff`.
    SmpteOffset(SmpteOffsetValue),
    /// `FF 58 04 nn dd cc bb`.
    TimeSignature(TimeSignatureValue),
    /// `FF 59 02 sf mi`.
    KeySignature(KeySignatureValue),
    /// `FF 4B len tag tagValue`, non-standard. `tag` selects the label
    /// (1:Genre, 2:Artist, 3:Composer, 4:Duration, 5:BPM); `tag_value` is
    /// whatever bytes follow it.
    MLiveTag { tag: u8, tag_value: Vec<u8> },
    /// `FF 7F len data`.
    SequencerSpecific(Vec<u8>),
    /// Any other `metaType`, preserved as opaque bytes.
    Unknown { meta_type: u8, data: Vec<u8> },
}

impl Default for MetaEvent {
    fn default() -> Self {
        MetaEvent {
            declared_length: LEN_META_END_OF_TRACK,
            kind: MetaEventKind::EndOfTrack,
        }
    }
}

impl MetaEvent {
    pub fn new(kind: MetaEventKind) -> Self {
        MetaEvent {
            declared_length: kind.standard_length().unwrap_or(0),
            kind: kind,
        }
    }

    pub fn kind(&self) -> &MetaEventKind {
        &self.kind
    }

    pub fn declared_length(&self) -> u32 {
        self.declared_length
    }

    /// `m_live_tag` label lookup, e.g. `"BPM"` for `tag == 5`.
    pub fn m_live_tag_label(tag: u8) -> &'static str {
        match tag {
            1 => "Genre",
            2 => "Artist",
            3 => "Composer",
            4 => "Duration",
            5 => "BPM",
            _ => "Unknown Tag",
        }
    }

    pub(crate) fn decode(cursor: &mut ByteCursor, track_index: u16) -> LibResult<Self> {
        let meta_type = cursor.read_u8()?;
        let declared_length = vlq::read_vlq(cursor)?;
        let kind = match meta_type {
            META_SEQUENCE_NUM => {
                if declared_length == 2 {
                    let hi = cursor.read_u8()?;
                    let lo = cursor.read_u8()?;
                    MetaEventKind::SequenceNumber(((hi as u16) << 8) | lo as u16)
                } else {
                    log::warn!(
                        "sequence number meta event had declared length {} (expected 2); \
                         falling back to track index",
                        declared_length
                    );
                    cursor.advance(1);
                    MetaEventKind::SequenceNumber(track_index)
                }
            }
            META_TEXT => MetaEventKind::OtherText(read_text(cursor, declared_length)?),
            META_COPYRIGHT => MetaEventKind::Copyright(read_text(cursor, declared_length)?),
            META_TRACK_NAME => MetaEventKind::TrackName(read_text(cursor, declared_length)?),
            META_INSTR_NAME => MetaEventKind::InstrumentName(read_text(cursor, declared_length)?),
            META_LYRIC => MetaEventKind::Lyric(read_text(cursor, declared_length)?),
            META_MARKER => MetaEventKind::Marker(read_text(cursor, declared_length)?),
            META_CUE_POINT => MetaEventKind::CuePoint(read_text(cursor, declared_length)?),
            META_PROG_NAME => MetaEventKind::ProgramName(read_text(cursor, declared_length)?),
            META_DEVICE_NAME => MetaEventKind::DeviceName(read_text(cursor, declared_length)?),
            META_CHAN_PREFIX => {
                let channel = Channel::new(cursor.read_u8()?);
                if declared_length > 1 {
                    cursor.advance((declared_length - 1) as usize);
                }
                MetaEventKind::MidiChannelPrefix(channel)
            }
            META_PORT => {
                let port = PortValue::new(cursor.read_u8()?);
                if declared_length > 1 {
                    cursor.advance((declared_length - 1) as usize);
                }
                MetaEventKind::MidiPort(port)
            }
            META_END_OF_TRACK => {
                if declared_length != 0 {
                    log::warn!(
                        "end-of-track meta event had declared length {} (expected 0)",
                        declared_length
                    );
                    cursor.advance(declared_length as usize);
                }
                MetaEventKind::EndOfTrack
            }
            META_SET_TEMPO => {
                let bytes = cursor.read_bytes(declared_length.max(3) as usize)?;
                let tempo = ((bytes[0] as u32) << 16) | ((bytes[1] as u32) << 8) | bytes[2] as u32;
                MetaEventKind::SetTempo(MicrosecondsPerQuarter::new(tempo))
            }
            META_SMPTE_OFFSET => {
                MetaEventKind::SmpteOffset(SmpteOffsetValue::decode(cursor, declared_length)?)
            }
            META_TIME_SIG => {
                MetaEventKind::TimeSignature(TimeSignatureValue::decode(cursor, declared_length)?)
            }
            META_KEY_SIG => {
                MetaEventKind::KeySignature(KeySignatureValue::decode(cursor, declared_length)?)
            }
            META_M_LIVE_TAG => {
                let tag = cursor.read_u8()?;
                let tag_value = cursor.read_bytes((declared_length.saturating_sub(1)) as usize)?;
                MetaEventKind::MLiveTag { tag, tag_value }
            }
            META_SEQ_SPECIFIC => {
                MetaEventKind::SequencerSpecific(cursor.read_bytes(declared_length as usize)?)
            }
            other => MetaEventKind::Unknown {
                meta_type: other,
                data: cursor.read_bytes(declared_length as usize)?,
            },
        };
        Ok(MetaEvent {
            declared_length,
            kind,
        })
    }

    pub(crate) fn encode(&self, cursor: &mut ByteCursor) {
        cursor.write_u8(0xFF);
        match &self.kind {
            MetaEventKind::SequenceNumber(v) => {
                cursor.write_u8(META_SEQUENCE_NUM);
                vlq::write_vlq(cursor, 2);
                cursor.write_u16_be(*v);
            }
            MetaEventKind::OtherText(t) => write_text(cursor, META_TEXT, t),
            MetaEventKind::Copyright(t) => write_text(cursor, META_COPYRIGHT, t),
            MetaEventKind::TrackName(t) => write_text(cursor, META_TRACK_NAME, t),
            MetaEventKind::InstrumentName(t) => write_text(cursor, META_INSTR_NAME, t),
            MetaEventKind::Lyric(t) => write_text(cursor, META_LYRIC, t),
            MetaEventKind::Marker(t) => write_text(cursor, META_MARKER, t),
            MetaEventKind::CuePoint(t) => write_text(cursor, META_CUE_POINT, t),
            MetaEventKind::ProgramName(t) => write_text(cursor, META_PROG_NAME, t),
            MetaEventKind::DeviceName(t) => write_text(cursor, META_DEVICE_NAME, t),
            MetaEventKind::MidiChannelPrefix(channel) => {
                cursor.write_u8(META_CHAN_PREFIX);
                vlq::write_vlq(cursor, LEN_META_CHAN_PREFIX);
                cursor.write_u8(channel.get());
            }
            MetaEventKind::MidiPort(port) => {
                cursor.write_u8(META_PORT);
                vlq::write_vlq(cursor, 1);
                cursor.write_u8(port.get());
            }
            MetaEventKind::EndOfTrack => {
                cursor.write_u8(META_END_OF_TRACK);
                vlq::write_vlq(cursor, LEN_META_END_OF_TRACK);
            }
            MetaEventKind::SetTempo(tempo) => {
                cursor.write_u8(META_SET_TEMPO);
                vlq::write_vlq(cursor, LEN_META_SET_TEMPO);
                let bytes = tempo.get().to_be_bytes();
                cursor.write_bytes(&bytes[1..]);
            }
            MetaEventKind::SmpteOffset(value) => value.encode(cursor),
            MetaEventKind::TimeSignature(value) => value.encode(cursor),
            MetaEventKind::KeySignature(value) => value.encode(cursor),
            MetaEventKind::MLiveTag { tag, tag_value } => {
                cursor.write_u8(META_M_LIVE_TAG);
                vlq::write_vlq(cursor, 1 + tag_value.len() as u32);
                cursor.write_u8(*tag);
                cursor.write_bytes(tag_value);
            }
            MetaEventKind::SequencerSpecific(data) => {
                cursor.write_u8(META_SEQ_SPECIFIC);
                vlq::write_vlq(cursor, data.len() as u32);
                cursor.write_bytes(data);
            }
            MetaEventKind::Unknown { meta_type, data } => {
                cursor.write_u8(*meta_type);
                vlq::write_vlq(cursor, data.len() as u32);
                cursor.write_bytes(data);
            }
        }
    }

    pub(crate) fn label(&self) -> String {
        match &self.kind {
            MetaEventKind::SequenceNumber(_) => "Sequence Number".to_string(),
            MetaEventKind::OtherText(_) => "Text".to_string(),
            MetaEventKind::Copyright(_) => "Copyright Notice".to_string(),
            MetaEventKind::TrackName(_) => "Track Name".to_string(),
            MetaEventKind::InstrumentName(_) => "Instrument Name".to_string(),
            MetaEventKind::Lyric(_) => "Lyric".to_string(),
            MetaEventKind::Marker(_) => "Marker".to_string(),
            MetaEventKind::CuePoint(_) => "Cue Point".to_string(),
            MetaEventKind::ProgramName(_) => "Program Name".to_string(),
            MetaEventKind::DeviceName(_) => "Device Name".to_string(),
            MetaEventKind::MidiChannelPrefix(_) => "MIDI Channel Prefix".to_string(),
            MetaEventKind::MidiPort(_) => "MIDI Port".to_string(),
            MetaEventKind::EndOfTrack => "End of Track".to_string(),
            MetaEventKind::SetTempo(_) => "Set Tempo".to_string(),
            MetaEventKind::SmpteOffset(_) => "SMPTE Offset".to_string(),
            MetaEventKind::TimeSignature(_) => "Time Signature".to_string(),
            MetaEventKind::KeySignature(_) => "Key Signature".to_string(),
            MetaEventKind::MLiveTag { tag, .. } => {
                format!("M-Live Tag ({})", Self::m_live_tag_label(*tag))
            }
            MetaEventKind::SequencerSpecific(_) => "Sequencer Specific".to_string(),
            MetaEventKind::Unknown { meta_type, .. } => format!("Unknown Meta ({:#04X})", meta_type),
        }
    }
}

impl MetaEventKind {
    /// `Some(len)` for meta types with a wire-standard fixed length, used by
    /// the validator and by encoding freshly-constructed events.
    pub(crate) fn standard_length(&self) -> Option<u32> {
        match self {
            MetaEventKind::SequenceNumber(_) => Some(2),
            MetaEventKind::MidiChannelPrefix(_) => Some(LEN_META_CHAN_PREFIX),
            MetaEventKind::MidiPort(_) => Some(1),
            MetaEventKind::EndOfTrack => Some(LEN_META_END_OF_TRACK),
            MetaEventKind::SetTempo(_) => Some(LEN_META_SET_TEMPO),
            MetaEventKind::SmpteOffset(_) => Some(LEN_META_SMPTE_OFFSET),
            MetaEventKind::TimeSignature(_) => Some(LEN_META_TIME_SIG),
            MetaEventKind::KeySignature(_) => Some(LEN_META_KEY_SIG),
            _ => None,
        }
    }
}

fn read_text(cursor: &mut ByteCursor, declared_length: u32) -> LibResult<Text> {
    let bytes = cursor.read_bytes(declared_length as usize)?;
    Ok(Text::from(bytes))
}

fn write_text(cursor: &mut ByteCursor, meta_type: u8, text: &Text) {
    cursor.write_u8(meta_type);
    let bytes = text.as_bytes();
    vlq::write_vlq(cursor, bytes.len() as u32);
    cursor.write_bytes(bytes);
}

/// `FF 54 05 hr mn se fr ff`. `frame_rate`/`hour` are derived from `hr`'s
/// bits rather than stored redundantly.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct SmpteOffsetValue {
    hour_byte: u8,
    minute: u8,
    second: u8,
    frame: u8,
    sub_frame: u8,
}

impl SmpteOffsetValue {
    pub fn new(
        frame_rate: labels::FrameRate,
        hour: u8,
        minute: u8,
        second: u8,
        frame: u8,
        sub_frame: u8,
    ) -> Self {
        let hour_byte = (frame_rate.code() << 5) | (hour & 0x1F);
        Self {
            hour_byte,
            minute,
            second,
            frame,
            sub_frame,
        }
    }

    /// Bits 5-6 of the hour byte.
    pub fn frame_rate(&self) -> labels::FrameRate {
        labels::FrameRate::from_code((self.hour_byte >> 5) & 0b11)
    }

    /// Bits 0-4 of the hour byte.
    pub fn hour(&self) -> u8 {
        self.hour_byte & 0x1F
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn frame(&self) -> u8 {
        self.frame
    }

    pub fn sub_frame(&self) -> u8 {
        self.sub_frame
    }

    pub(crate) fn decode(cursor: &mut ByteCursor, declared_length: u32) -> LibResult<Self> {
        let bytes = cursor.read_bytes(declared_length.max(5) as usize)?;
        Ok(Self {
            hour_byte: bytes[0],
            minute: bytes[1],
            second: bytes[2],
            frame: bytes[3],
            sub_frame: bytes[4],
        })
    }

    pub(crate) fn encode(&self, cursor: &mut ByteCursor) {
        cursor.write_u8(META_SMPTE_OFFSET);
        vlq::write_vlq(cursor, LEN_META_SMPTE_OFFSET);
        cursor.write_u8(self.hour_byte);
        cursor.write_u8(self.minute);
        cursor.write_u8(self.second);
        cursor.write_u8(self.frame);
        cursor.write_u8(self.sub_frame);
    }
}

/// `FF 58 04 nn dd cc bb`.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct TimeSignatureValue {
    /// The upper part of a time signature. For example, in 6/8 this is 6.
    numerator: u8,
    /// The lower part, stored as the wire byte: a negative power of two (2
    /// means quarter-note, 3 means eighth-note, etc).
    denominator: u8,
    /// Number of MIDI clocks per metronome click.
    metronome: Clocks,
    /// Number of notated 32nd-notes per MIDI quarter note (24 clocks);
    /// normally 8.
    thirty_second_notes: u8,
}

impl Default for TimeSignatureValue {
    fn default() -> Self {
        Self {
            numerator: 4,
            denominator: 2,
            metronome: Clocks::default(),
            thirty_second_notes: 8,
        }
    }
}

impl TimeSignatureValue {
    pub fn new(numerator: u8, denominator: u8, metronome: Clocks, thirty_second_notes: u8) -> Self {
        Self {
            numerator,
            denominator,
            metronome,
            thirty_second_notes,
        }
    }

    pub fn numerator(&self) -> u8 {
        self.numerator
    }

    pub fn denominator(&self) -> u8 {
        self.denominator
    }

    pub fn metronome(&self) -> Clocks {
        self.metronome
    }

    pub fn thirty_second_notes(&self) -> u8 {
        self.thirty_second_notes
    }

    pub(crate) fn decode(cursor: &mut ByteCursor, declared_length: u32) -> LibResult<Self> {
        let bytes = cursor.read_bytes(declared_length.max(4) as usize)?;
        Ok(Self {
            numerator: bytes[0],
            denominator: bytes[1],
            metronome: Clocks::from_u8(bytes[2]),
            thirty_second_notes: bytes[3],
        })
    }

    pub(crate) fn encode(&self, cursor: &mut ByteCursor) {
        cursor.write_u8(META_TIME_SIG);
        vlq::write_vlq(cursor, LEN_META_TIME_SIG);
        cursor.write_u8(self.numerator);
        cursor.write_u8(self.denominator);
        cursor.write_u8(self.metronome.to_u8());
        cursor.write_u8(self.thirty_second_notes);
    }
}

/// Signed count of flats (negative) or sharps (positive) in a key
/// signature, `-7..=7`. For example `-2` means "2 flats".
clamp!(KeyAccidentals, i8, -7, 7, 0, pub);

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum KeyMode {
    Major,
    Minor,
}

impl Default for KeyMode {
    fn default() -> Self {
        KeyMode::Major
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct KeySignatureValue {
    accidentals: KeyAccidentals,
    mode: KeyMode,
}

impl KeySignatureValue {
    pub fn new(accidentals: KeyAccidentals, mode: KeyMode) -> Self {
        Self { accidentals, mode }
    }

    pub fn accidentals(&self) -> KeyAccidentals {
        self.accidentals
    }

    pub fn mode(&self) -> KeyMode {
        self.mode
    }

    /// The key's name, e.g. `"G"` for one sharp, from the fixed 15-entry
    /// table keyed by signed accidental count.
    pub fn key_name(&self) -> &'static str {
        labels::key_name(self.accidentals.get())
    }

    pub(crate) fn decode(cursor: &mut ByteCursor, declared_length: u32) -> LibResult<Self> {
        let bytes = cursor.read_bytes(declared_length.max(2) as usize)?;
        let accidentals = KeyAccidentals::new(bytes[0] as i8);
        let mode = if bytes[1] == 1 {
            KeyMode::Minor
        } else {
            KeyMode::Major
        };
        Ok(Self { accidentals, mode })
    }

    pub(crate) fn encode(&self, cursor: &mut ByteCursor) {
        cursor.write_u8(META_KEY_SIG);
        vlq::write_vlq(cursor, LEN_META_KEY_SIG);
        cursor.write_u8(self.accidentals.get() as u8);
        cursor.write_u8(self.mode as u8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tempo_roundtrips() {
        let event = MetaEvent::new(MetaEventKind::SetTempo(MicrosecondsPerQuarter::new(500_000)));
        let mut cursor = ByteCursor::for_writing();
        event.encode(&mut cursor);
        assert_eq!(
            vec![0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20],
            cursor.clone().into_bytes()
        );
        let mut read_cursor = ByteCursor::for_reading(cursor.into_bytes());
        read_cursor.read_u8().unwrap(); // consume the 0xFF the caller would normally peel off
        let decoded = MetaEvent::decode(&mut read_cursor, 0).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn end_of_track_roundtrips() {
        let event = MetaEvent::new(MetaEventKind::EndOfTrack);
        let mut cursor = ByteCursor::for_writing();
        event.encode(&mut cursor);
        assert_eq!(vec![0xFF, 0x2F, 0x00], cursor.into_bytes());
    }

    #[test]
    fn smpte_offset_hour_byte_bits() {
        let value = SmpteOffsetValue::new(labels::FrameRate::Fps2997, 10, 0, 0, 0, 0);
        assert_eq!(labels::FrameRate::Fps2997, value.frame_rate());
        assert_eq!(10, value.hour());
    }

    #[test]
    fn key_signature_names() {
        let value = KeySignatureValue::new(KeyAccidentals::new(1), KeyMode::Major);
        assert_eq!("G", value.key_name());
    }

    #[test]
    fn sequence_number_fallback_to_track_index() {
        let mut cursor = ByteCursor::for_reading(vec![META_SEQUENCE_NUM, 0x01, 0x00]);
        let decoded = MetaEvent::decode(&mut cursor, 3).unwrap();
        assert_eq!(MetaEventKind::SequenceNumber(3), decoded.kind);
    }
}
