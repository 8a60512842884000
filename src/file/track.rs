//! `MTrk` chunks: a 4-byte tag, a 4-byte big-endian length, and a sequence of
//! `<delta-time><event>` pairs.

use crate::core::{Channel, Clocks, MicrosecondsPerQuarter, NoteNumber, Velocity, U7};
use crate::cursor::ByteCursor;
use crate::error::LibResult;
use crate::file::channel_voice::ChannelVoiceKind;
use crate::file::event::{Event, EventKind};
use crate::file::meta_event::{MetaEvent, MetaEventKind, TimeSignatureValue};
use crate::file::note_pairer::NotePairer;
use crate::text::Text;

const MTRK_TAG: &str = "MTrk";

/// One track chunk. `chunk_length` is the raw header value on a freshly
/// parsed track (informational; may disagree with the encoded length of
/// `events` if the track was mutated after parsing) and is recomputed from
/// scratch on encode.
#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct Track {
    chunk_length: u32,
    events: Vec<Event>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunk_length(&self) -> u32 {
        self.chunk_length
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events_len(&self) -> usize {
        self.events.len()
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Inserts `event` at `index`, shifting later events back.
    pub fn insert_event(&mut self, index: usize, event: Event) {
        self.events.insert(index, event);
    }

    /// Replaces the event at `index` wholesale.
    pub fn replace_event(&mut self, index: usize, event: Event) {
        if let Some(slot) = self.events.get_mut(index) {
            *slot = event;
        }
    }

    /// Appends an `EndOfTrack` meta event unless the track already ends with
    /// one.
    pub fn ensure_end_of_track(&mut self) {
        if !self.events.last().map_or(false, Event::is_end_of_track) {
            self.push_event(Event::new(0, EventKind::Meta(MetaEvent::new(MetaEventKind::EndOfTrack))));
        }
    }

    pub fn push_note_on(&mut self, delta_time: u32, channel: Channel, note: NoteNumber, velocity: Velocity) {
        self.push_event(Event::new(
            delta_time,
            EventKind::ChannelVoice {
                channel,
                kind: ChannelVoiceKind::NoteOn {
                    note,
                    velocity,
                    length: 0,
                },
            },
        ));
    }

    pub fn push_note_off(&mut self, delta_time: u32, channel: Channel, note: NoteNumber, velocity: Velocity) {
        self.push_event(Event::new(
            delta_time,
            EventKind::ChannelVoice {
                channel,
                kind: ChannelVoiceKind::NoteOff {
                    note,
                    velocity,
                    length: 0,
                },
            },
        ));
    }

    pub fn push_pitch_bend(&mut self, delta_time: u32, channel: Channel, value14: u16) {
        let lsb = U7::new((value14 & 0x7F) as u8);
        let msb = U7::new(((value14 >> 7) & 0x7F) as u8);
        self.push_event(Event::new(
            delta_time,
            EventKind::ChannelVoice {
                channel,
                kind: ChannelVoiceKind::PitchBend { value14, lsb, msb },
            },
        ));
    }

    pub fn push_tempo(&mut self, delta_time: u32, tempo: MicrosecondsPerQuarter) {
        self.push_event(Event::new(
            delta_time,
            EventKind::Meta(MetaEvent::new(MetaEventKind::SetTempo(tempo))),
        ));
    }

    pub fn push_time_signature(
        &mut self,
        delta_time: u32,
        numerator: u8,
        denominator: u8,
        metronome: Clocks,
        thirty_second_notes: u8,
    ) {
        let value = TimeSignatureValue::new(numerator, denominator, metronome, thirty_second_notes);
        self.push_event(Event::new(
            delta_time,
            EventKind::Meta(MetaEvent::new(MetaEventKind::TimeSignature(value))),
        ));
    }

    pub fn push_lyric(&mut self, delta_time: u32, text: impl Into<Text>) {
        self.push_event(Event::new(
            delta_time,
            EventKind::Meta(MetaEvent::new(MetaEventKind::Lyric(text.into()))),
        ));
    }

    /// Adds, or replaces, the track/sequence name among the delta-time-zero
    /// events at the start of the track.
    pub fn set_name(&mut self, name: impl Into<Text>) {
        self.set_leading_text(name.into(), |kind| matches!(kind, MetaEventKind::TrackName(_)), MetaEventKind::TrackName);
    }

    /// Adds, or replaces, the instrument name among the delta-time-zero
    /// events at the start of the track.
    pub fn set_instrument_name(&mut self, name: impl Into<Text>) {
        self.set_leading_text(
            name.into(),
            |kind| matches!(kind, MetaEventKind::InstrumentName(_)),
            MetaEventKind::InstrumentName,
        );
    }

    fn set_leading_text(
        &mut self,
        text: Text,
        is_match: impl Fn(&MetaEventKind) -> bool,
        make: impl Fn(Text) -> MetaEventKind,
    ) {
        for (index, event) in self.events.iter().enumerate() {
            if event.delta_time() != 0 {
                break;
            }
            if let EventKind::Meta(meta) = event.kind() {
                if is_match(meta.kind()) {
                    self.replace_event(index, Event::new(0, EventKind::Meta(MetaEvent::new(make(text)))));
                    return;
                }
            }
        }
        self.insert_event(0, Event::new(0, EventKind::Meta(MetaEvent::new(make(text)))));
    }

    pub(crate) fn decode(cursor: &mut ByteCursor, track_index: u16) -> LibResult<Self> {
        if !cursor.is_tag(MTRK_TAG) {
            invalid_file!("expected an MTrk chunk but found a different tag");
        }
        cursor.advance(4);
        let chunk_length = cursor.read_u32_be()?;
        let chunk_end = cursor.position() + chunk_length as usize;

        let mut events = Vec::new();
        let mut current_time: u32 = 0;
        let mut running_status: Option<u8> = None;
        let mut pairer = NotePairer::new();

        while cursor.position() < chunk_end && !cursor.is_end() {
            let (mut event, next_status) = Event::decode(cursor, running_status, track_index)?;
            running_status = next_status;
            current_time += event.delta_time();

            match event.kind() {
                EventKind::ChannelVoice {
                    kind: ChannelVoiceKind::NoteOn { note, .. },
                    ..
                } => {
                    let note = *note;
                    let index = events.len();
                    events.push(event);
                    pairer.note_on(note, current_time, index);
                }
                EventKind::ChannelVoice {
                    kind: ChannelVoiceKind::NoteOff { note, .. },
                    ..
                } => {
                    let note = *note;
                    if let Some(length) = pairer.note_off(note, current_time, &mut events) {
                        if let EventKind::ChannelVoice {
                            kind: ChannelVoiceKind::NoteOff { length: l, .. },
                            ..
                        } = event.kind_mut()
                        {
                            *l = length;
                        }
                    }
                    events.push(event);
                }
                _ => {
                    let is_end = event.is_end_of_track();
                    events.push(event);
                    if is_end {
                        break;
                    }
                }
            }
        }

        // Any bytes left in the chunk after EndOfTrack are skipped; the
        // decoder trusts the chunk length, not the event stream, for where
        // the next chunk begins.
        if cursor.position() < chunk_end {
            cursor.seek(chunk_end);
        }

        Ok(Track {
            chunk_length,
            events,
        })
    }

    pub(crate) fn encode(&self, cursor: &mut ByteCursor) {
        cursor.write_ascii(MTRK_TAG);
        let length_position = cursor.position();
        cursor.write_u32_be(0);
        let body_start = cursor.position();
        for event in &self.events {
            event.encode(cursor);
        }
        let body_end = cursor.position();
        let length = (body_end - body_start) as u32;
        cursor.seek(length_position);
        cursor.write_u32_be(length);
        cursor.seek(body_end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NoteNumber;

    #[test]
    fn decode_pairs_note_on_and_off() {
        let mut cursor = ByteCursor::for_writing();
        let mut track = Track::new();
        track.push_note_on(0, Channel::new(0), NoteNumber::new(60), Velocity::new(100));
        track.push_note_off(480, Channel::new(0), NoteNumber::new(60), Velocity::new(0));
        track.ensure_end_of_track();
        track.encode(&mut cursor);

        let mut read_cursor = ByteCursor::for_reading(cursor.into_bytes());
        let decoded = Track::decode(&mut read_cursor, 0).unwrap();
        let events: Vec<&Event> = decoded.events().collect();
        assert_eq!(3, events.len());
        match events[0].kind() {
            EventKind::ChannelVoice {
                kind: ChannelVoiceKind::NoteOn { length, .. },
                ..
            } => assert_eq!(480, *length),
            _ => panic!("expected NoteOn"),
        }
        match events[1].kind() {
            EventKind::ChannelVoice {
                kind: ChannelVoiceKind::NoteOff { length, .. },
                ..
            } => assert_eq!(480, *length),
            _ => panic!("expected NoteOff"),
        }
        assert!(events[2].is_end_of_track());
    }

    #[test]
    fn ensure_end_of_track_is_idempotent() {
        let mut track = Track::new();
        track.ensure_end_of_track();
        track.ensure_end_of_track();
        assert_eq!(1, track.events_len());
    }

    #[test]
    fn set_name_replaces_existing_leading_event() {
        let mut track = Track::new();
        track.set_name("first");
        track.set_name("second");
        assert_eq!(1, track.events_len());
        let event = track.events().next().unwrap();
        match event.kind() {
            EventKind::Meta(meta) => match meta.kind() {
                MetaEventKind::TrackName(text) => assert_eq!("second", text.to_string()),
                _ => panic!("expected TrackName"),
            },
            _ => panic!("expected Meta"),
        }
    }
}
