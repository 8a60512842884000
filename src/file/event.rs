//! The per-track event stream: `<delta-time> <event>`, dispatched across the
//! three event families plus SysEx, with running status carried by the
//! caller (the decode loop in [`crate::file::track`]).

use crate::core::Channel;
use crate::cursor::ByteCursor;
use crate::error::LibResult;
use crate::file::channel_voice::{self, ChannelVoiceKind};
use crate::file::meta_event::MetaEvent;
use crate::file::sysex::{SysexEvent, SYSEX_START};
use crate::file::system::{SystemCommonKind, SystemRealTimeKind};
use crate::vlq;

const META_STATUS: u8 = 0xFF;

/// One event on the wire: a delta-time followed by a typed payload. Every
/// variant carries a human-readable `label`, assigned at decode time (or at
/// construction, for events built in memory) rather than recomputed on every
/// access.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct Event {
    delta_time: u32,
    kind: EventKind,
    label: String,
}

#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum EventKind {
    /// `0x80`-`0xEF`.
    ChannelVoice {
        channel: Channel,
        kind: ChannelVoiceKind,
    },
    /// `0xF0 ... 0xF7`.
    SystemExclusive(SysexEvent),
    /// `0xF1`-`0xF7`.
    SystemCommon(SystemCommonKind),
    /// `0xF8`-`0xFE`.
    SystemRealTime(SystemRealTimeKind),
    /// `0xFF <type> <len> <payload>`.
    Meta(MetaEvent),
}

impl Event {
    pub fn new(delta_time: u32, kind: EventKind) -> Self {
        let label = kind.label();
        Event {
            delta_time,
            kind,
            label,
        }
    }

    pub fn delta_time(&self) -> u32 {
        self.delta_time
    }

    pub fn set_delta_time(&mut self, delta_time: u32) {
        self.delta_time = delta_time;
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut EventKind {
        &mut self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_end_of_track(&self) -> bool {
        matches!(
            &self.kind,
            EventKind::Meta(meta) if matches!(meta.kind(), crate::file::meta_event::MetaEventKind::EndOfTrack)
        )
    }

    /// Reads one event, given the running status byte carried over from the
    /// previous event (`None` if this is the first event in the track or the
    /// previous event was a meta/sysex message, which cannot be the subject
    /// of running status). Returns the event and the status byte that should
    /// be carried forward (unchanged for meta/sysex/system-realtime, updated
    /// for channel voice and system common).
    pub(crate) fn decode(
        cursor: &mut ByteCursor,
        running_status: Option<u8>,
        track_index: u16,
    ) -> LibResult<(Self, Option<u8>)> {
        let delta_time = vlq::read_vlq(cursor)?;
        let first = cursor.read_u8()?;
        let status = if first >= 0x80 {
            first
        } else {
            cursor.rewind(1);
            match running_status {
                Some(status) => status,
                None => invalid_file!("event has no status byte and no running status is active"),
            }
        };

        let (kind, next_running_status) = match status {
            SYSEX_START => {
                let sysex = SysexEvent::decode(cursor)?;
                (EventKind::SystemExclusive(sysex), running_status)
            }
            META_STATUS => {
                let meta = MetaEvent::decode(cursor, track_index)?;
                (EventKind::Meta(meta), running_status)
            }
            0xF1..=0xF7 => {
                let common = SystemCommonKind::decode(status, cursor)?;
                (EventKind::SystemCommon(common), None)
            }
            0xF8..=0xFE => {
                let realtime = SystemRealTimeKind::decode(status, cursor)?;
                (EventKind::SystemRealTime(realtime), running_status)
            }
            0x80..=0xEF => {
                let channel = Channel::new(status & 0x0F);
                let kind = ChannelVoiceKind::decode(status >> 4, cursor)?;
                (EventKind::ChannelVoice { channel, kind }, Some(status))
            }
            other => invalid_file!("unrecognized status byte {:#04X}", other),
        };

        Ok((Event::new(delta_time, kind), next_running_status))
    }

    /// Writes one event. Unlike the decoder, the encoder never compresses
    /// via running status: every event gets a fresh status byte.
    pub(crate) fn encode(&self, cursor: &mut ByteCursor) {
        vlq::write_vlq(cursor, self.delta_time);
        self.kind.encode(cursor);
    }
}

impl EventKind {
    fn label(&self) -> String {
        match self {
            EventKind::ChannelVoice { kind, .. } => kind.label(),
            EventKind::SystemExclusive(sysex) => {
                format!("System Exclusive ({})", sysex.manufacturer_label())
            }
            EventKind::SystemCommon(kind) => kind.label(),
            EventKind::SystemRealTime(kind) => kind.label(),
            EventKind::Meta(meta) => meta.label(),
        }
    }

    fn encode(&self, cursor: &mut ByteCursor) {
        match self {
            EventKind::ChannelVoice { channel, kind } => {
                channel_voice::write_status_byte(cursor, kind.type_nibble(), *channel);
                kind.encode(cursor);
            }
            EventKind::SystemExclusive(sysex) => {
                cursor.write_u8(SYSEX_START);
                sysex.encode(cursor);
            }
            EventKind::SystemCommon(kind) => {
                cursor.write_u8(kind.status());
                kind.encode(cursor);
            }
            EventKind::SystemRealTime(kind) => {
                cursor.write_u8(kind.status());
                kind.encode(cursor);
            }
            EventKind::Meta(meta) => meta.encode(cursor),
        }
    }
}
