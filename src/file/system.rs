//! System common (`0xF1`-`0xF7`) and system real-time (`0xF8`-`0xFE`)
//! messages, excluding `0xF0` (SysEx, handled separately) and `0xFF` (Meta,
//! handled separately).
//!
//! The decision on the open question of how 0xF2-0xFE framing works (a
//! VLQ-prefixed blob vs. the standard's fixed per-message argument counts)
//! is recorded in DESIGN.md: this implementation reads a VLQ-prefixed blob.

use crate::cursor::ByteCursor;
use crate::error::LibResult;
use crate::vlq;

/// `0xF1`-`0xF7`.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum SystemCommonKind {
    /// `0xF1`, undefined by the standard but reserved.
    Undefined1(Vec<u8>),
    /// `0xF2`.
    SongPositionPointer { msb: u8, lsb: u8 },
    /// `0xF3`.
    SongSelect(Vec<u8>),
    /// `0xF4`, undefined by the standard but reserved.
    Undefined4(Vec<u8>),
    /// `0xF5`, undefined by the standard but reserved.
    Undefined5(Vec<u8>),
    /// `0xF6`.
    TuneRequest(Vec<u8>),
    /// `0xF7`, end of exclusive (sysex escape/terminator outside the
    /// `0xF0 ... 0xF7`-framed SysEx event proper).
    EndOfExclusive(Vec<u8>),
}

/// `0xF8`-`0xFE`.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum SystemRealTimeKind {
    /// `0xF8`.
    TimingClock(Vec<u8>),
    /// `0xF9`, undefined by the standard but reserved.
    Undefined9(Vec<u8>),
    /// `0xFA`.
    Start(Vec<u8>),
    /// `0xFB`.
    Continue(Vec<u8>),
    /// `0xFC`.
    Stop(Vec<u8>),
    /// `0xFD`, undefined by the standard but reserved.
    UndefinedD(Vec<u8>),
    /// `0xFE`.
    ActiveSensing(Vec<u8>),
}

pub(crate) const SONG_POSITION_POINTER: u8 = 0xF2;
pub(crate) const SONG_SELECT: u8 = 0xF3;
pub(crate) const TUNE_REQUEST: u8 = 0xF6;
pub(crate) const END_OF_EXCLUSIVE: u8 = 0xF7;
pub(crate) const TIMING_CLOCK: u8 = 0xF8;
pub(crate) const START: u8 = 0xFA;
pub(crate) const CONTINUE: u8 = 0xFB;
pub(crate) const STOP: u8 = 0xFC;
pub(crate) const ACTIVE_SENSING: u8 = 0xFE;

fn read_vlq_blob(cursor: &mut ByteCursor) -> LibResult<Vec<u8>> {
    let len = vlq::read_vlq(cursor)? as usize;
    cursor.read_bytes(len)
}

impl SystemCommonKind {
    pub(crate) fn decode(status: u8, cursor: &mut ByteCursor) -> LibResult<Self> {
        Ok(match status {
            SONG_POSITION_POINTER => {
                let data = read_vlq_blob(cursor)?;
                let msb = data.first().copied().unwrap_or(0);
                let lsb = data.get(1).copied().unwrap_or(0);
                SystemCommonKind::SongPositionPointer { msb, lsb }
            }
            SONG_SELECT => SystemCommonKind::SongSelect(read_vlq_blob(cursor)?),
            TUNE_REQUEST => SystemCommonKind::TuneRequest(read_vlq_blob(cursor)?),
            0xF1 => SystemCommonKind::Undefined1(read_vlq_blob(cursor)?),
            0xF4 => SystemCommonKind::Undefined4(read_vlq_blob(cursor)?),
            0xF5 => SystemCommonKind::Undefined5(read_vlq_blob(cursor)?),
            END_OF_EXCLUSIVE => SystemCommonKind::EndOfExclusive(read_vlq_blob(cursor)?),
            _ => invalid_file!("status byte {:#x} is not a system common message", status),
        })
    }

    pub(crate) fn status(&self) -> u8 {
        match self {
            SystemCommonKind::Undefined1(_) => 0xF1,
            SystemCommonKind::SongPositionPointer { .. } => SONG_POSITION_POINTER,
            SystemCommonKind::SongSelect(_) => SONG_SELECT,
            SystemCommonKind::Undefined4(_) => 0xF4,
            SystemCommonKind::Undefined5(_) => 0xF5,
            SystemCommonKind::TuneRequest(_) => TUNE_REQUEST,
            SystemCommonKind::EndOfExclusive(_) => END_OF_EXCLUSIVE,
        }
    }

    pub(crate) fn encode(&self, cursor: &mut ByteCursor) {
        let data = match self {
            SystemCommonKind::Undefined1(d) => d.clone(),
            SystemCommonKind::SongPositionPointer { msb, lsb } => vec![*msb, *lsb],
            SystemCommonKind::SongSelect(d) => d.clone(),
            SystemCommonKind::Undefined4(d) => d.clone(),
            SystemCommonKind::Undefined5(d) => d.clone(),
            SystemCommonKind::TuneRequest(d) => d.clone(),
            SystemCommonKind::EndOfExclusive(d) => d.clone(),
        };
        vlq::write_vlq(cursor, data.len() as u32);
        cursor.write_bytes(&data);
    }

    pub(crate) fn label(&self) -> String {
        match self {
            SystemCommonKind::Undefined1(_) => "Undefined (F1)".to_string(),
            SystemCommonKind::SongPositionPointer { .. } => "Song Position Pointer".to_string(),
            SystemCommonKind::SongSelect(_) => "Song Select".to_string(),
            SystemCommonKind::Undefined4(_) => "Undefined (F4)".to_string(),
            SystemCommonKind::Undefined5(_) => "Undefined (F5)".to_string(),
            SystemCommonKind::TuneRequest(_) => "Tune Request".to_string(),
            SystemCommonKind::EndOfExclusive(_) => "End of Exclusive".to_string(),
        }
    }
}

impl SystemRealTimeKind {
    pub(crate) fn decode(status: u8, cursor: &mut ByteCursor) -> LibResult<Self> {
        Ok(match status {
            TIMING_CLOCK => SystemRealTimeKind::TimingClock(read_vlq_blob(cursor)?),
            START => SystemRealTimeKind::Start(read_vlq_blob(cursor)?),
            CONTINUE => SystemRealTimeKind::Continue(read_vlq_blob(cursor)?),
            STOP => SystemRealTimeKind::Stop(read_vlq_blob(cursor)?),
            ACTIVE_SENSING => SystemRealTimeKind::ActiveSensing(read_vlq_blob(cursor)?),
            0xF9 => SystemRealTimeKind::Undefined9(read_vlq_blob(cursor)?),
            0xFD => SystemRealTimeKind::UndefinedD(read_vlq_blob(cursor)?),
            _ => invalid_file!("status byte {:#x} is not a system real-time message", status),
        })
    }

    pub(crate) fn status(&self) -> u8 {
        match self {
            SystemRealTimeKind::TimingClock(_) => TIMING_CLOCK,
            SystemRealTimeKind::Undefined9(_) => 0xF9,
            SystemRealTimeKind::Start(_) => START,
            SystemRealTimeKind::Continue(_) => CONTINUE,
            SystemRealTimeKind::Stop(_) => STOP,
            SystemRealTimeKind::UndefinedD(_) => 0xFD,
            SystemRealTimeKind::ActiveSensing(_) => ACTIVE_SENSING,
        }
    }

    pub(crate) fn encode(&self, cursor: &mut ByteCursor) {
        let data: &[u8] = match self {
            SystemRealTimeKind::TimingClock(d) => d,
            SystemRealTimeKind::Undefined9(d) => d,
            SystemRealTimeKind::Start(d) => d,
            SystemRealTimeKind::Continue(d) => d,
            SystemRealTimeKind::Stop(d) => d,
            SystemRealTimeKind::UndefinedD(d) => d,
            SystemRealTimeKind::ActiveSensing(d) => d,
        };
        vlq::write_vlq(cursor, data.len() as u32);
        cursor.write_bytes(data);
    }

    pub(crate) fn label(&self) -> String {
        match self {
            SystemRealTimeKind::TimingClock(_) => "Timing Clock".to_string(),
            SystemRealTimeKind::Undefined9(_) => "Undefined (F9)".to_string(),
            SystemRealTimeKind::Start(_) => "Start".to_string(),
            SystemRealTimeKind::Continue(_) => "Continue".to_string(),
            SystemRealTimeKind::Stop(_) => "Stop".to_string(),
            SystemRealTimeKind::UndefinedD(_) => "Undefined (FD)".to_string(),
            SystemRealTimeKind::ActiveSensing(_) => "Active Sensing".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_position_pointer_roundtrips() {
        let kind = SystemCommonKind::SongPositionPointer { msb: 1, lsb: 2 };
        let mut cursor = ByteCursor::for_writing();
        kind.encode(&mut cursor);
        let mut read_cursor = ByteCursor::for_reading(cursor.into_bytes());
        let decoded = SystemCommonKind::decode(SONG_POSITION_POINTER, &mut read_cursor).unwrap();
        assert_eq!(kind, decoded);
    }

    #[test]
    fn end_of_exclusive_roundtrips() {
        let kind = SystemCommonKind::EndOfExclusive(vec![0x01, 0x02]);
        let mut cursor = ByteCursor::for_writing();
        kind.encode(&mut cursor);
        let mut read_cursor = ByteCursor::for_reading(cursor.into_bytes());
        let decoded = SystemCommonKind::decode(END_OF_EXCLUSIVE, &mut read_cursor).unwrap();
        assert_eq!(kind, decoded);
        assert_eq!(END_OF_EXCLUSIVE, decoded.status());
    }

    #[test]
    fn active_sensing_roundtrips_empty() {
        let kind = SystemRealTimeKind::ActiveSensing(vec![]);
        let mut cursor = ByteCursor::for_writing();
        kind.encode(&mut cursor);
        let mut read_cursor = ByteCursor::for_reading(cursor.into_bytes());
        let decoded = SystemRealTimeKind::decode(ACTIVE_SENSING, &mut read_cursor).unwrap();
        assert_eq!(kind, decoded);
    }
}
