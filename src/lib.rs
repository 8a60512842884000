/*!
A bidirectional codec, validator, and note-event builder for Standard MIDI
Files (SMF).

[`File::parse`]/[`File::encode`] round-trip bytes through a structured
representation of a MIDI file: a header (format, time division) plus an
ordered list of [`file::Track`]s, each a list of time-ordered
[`file::Event`]s. [`validate`] runs a semantic well-formedness pass over an
already-parsed `File` and returns human-readable issue strings rather than
failing the parse — a malformed-but-interpretable file still parses, and its
anomalies surface as accumulated issues, not a raised error. [`convert_to_midi`]
assembles a `File` from plain note lists, for callers who don't want to
build up tracks event-by-event.

The crate is split by concern: [`core`] holds types and concepts that are
not specific to the file format (bounded numeric newtypes, `Clocks`), while
[`file`] holds the file-format-specific types (`Header`, `Track`, `Event`,
`TimeDivision`, the meta-event payloads).
!*/

#![allow(dead_code)]

#[macro_use]
mod error;
#[macro_use]
mod clamp;

mod cursor;
mod text;
mod vlq;

pub mod core;
pub mod file;
pub mod labels;
mod note_builder;
mod validator;

use crate::cursor::ByteCursor;
use crate::error::LibResult;
use crate::file::{Format, Header, Track};
use snafu::ResultExt;
use std::path::Path;

pub use error::{Error, Result};
pub use note_builder::{
    convert_to_midi, end_of_track_event, meta_string_event, midi_to_note, note_to_midi,
    tempo_event, used_notes, ConvertToMidiSpec, ConvertToMidiTrack, NoteSpec, UsedNote,
};
pub use validator::validate;

/// A parsed (or freshly-built) Standard MIDI File: an [`file::Header`] plus
/// an ordered list of [`file::Track`]s.
///
/// `track_count` is the header's declared track count. On a file built with
/// [`File::new`]/[`File::push_track`] it always agrees with the number of
/// tracks actually present; on a freshly parsed file it reflects whatever
/// the `MThd` chunk declared, which [`validate`] — not `parse` — checks
/// against `tracks.len()`.
#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct File {
    header: Header,
    track_count: u16,
    tracks: Vec<Track>,
}

impl File {
    /// An empty file with the given header and no tracks.
    pub fn new(header: Header) -> Self {
        File {
            header,
            track_count: 0,
            tracks: Vec::new(),
        }
    }

    /// The file's format and time division.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Shorthand for `self.header().format()`.
    pub fn format(&self) -> Format {
        self.header.format()
    }

    /// Shorthand for `self.header().time_division()`.
    pub fn time_division(&self) -> file::TimeDivision {
        self.header.time_division()
    }

    /// The header's declared track count (may disagree with
    /// `self.tracks_len()` on a freshly parsed file).
    pub fn track_count(&self) -> u16 {
        self.track_count
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn tracks_len(&self) -> usize {
        self.tracks.len()
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Appends `track` and keeps `track_count` in sync with the number of
    /// tracks actually present.
    pub fn push_track(&mut self, track: Track) {
        self.tracks.push(track);
        self.track_count = self.tracks.len() as u16;
    }

    #[cfg(test)]
    pub(crate) fn set_track_count_for_test(&mut self, track_count: u16) {
        self.track_count = track_count;
    }

    fn parse_inner(bytes: Vec<u8>) -> LibResult<Self> {
        let mut cursor = ByteCursor::for_reading(bytes);
        let (header, track_count) = Header::decode(&mut cursor)?;
        let mut tracks = Vec::new();
        for index in 0..track_count {
            if !cursor.is_tag("MTrk") {
                log::warn!(
                    "chunk {} of {} is not an MTrk tag; stopping track parse",
                    index,
                    track_count
                );
                break;
            }
            tracks.push(Track::decode(&mut cursor, index)?);
        }
        Ok(File {
            header,
            track_count,
            tracks,
        })
    }

    /// Parses a byte buffer into a `File`. Syntactic problems (truncation
    /// below what a field requires, an unrecognized status byte) raise an
    /// [`Error`]; everything the decoder can interpret leniently (a bad
    /// `MTrk` tag, a non-standard meta length) is tolerated and surfaces
    /// later through [`validate`], not here.
    pub fn parse(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        Ok(Self::parse_inner(bytes.into())?)
    }

    fn load_inner<P: AsRef<Path>>(path: P) -> LibResult<Self> {
        let bytes = std::fs::read(path).context(io!())?;
        Self::parse_inner(bytes)
    }

    /// Reads and parses a MIDI file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::load_inner(path)?)
    }

    /// Serializes the file to bytes. The encoder always emits an explicit
    /// status byte per event (no running-status compression) and computes
    /// each track's chunk length from its actually-encoded body.
    pub fn encode(&self) -> Vec<u8> {
        let mut cursor = ByteCursor::for_writing();
        self.header.encode(&mut cursor, self.track_count);
        for track in &self.tracks {
            track.encode(&mut cursor);
        }
        cursor.into_bytes()
    }

    fn save_inner<P: AsRef<Path>>(&self, path: P) -> LibResult<()> {
        std::fs::write(path, self.encode()).context(io!())
    }

    /// Encodes the file and writes it to disk.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        Ok(self.save_inner(path)?)
    }

    /// Runs [`validate`] over this file.
    pub fn validate(&self) -> Vec<String> {
        validator::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Channel, NoteNumber, QuarterNoteDivision, Velocity};
    use crate::file::{Format, TimeDivision};

    #[test]
    fn minimal_empty_file_parses() {
        let bytes: Vec<u8> = vec![
            0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x01, 0xE0,
            0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04, 0x00, 0xFF, 0x2F, 0x00,
        ];
        let file = File::parse(bytes).unwrap();
        assert_eq!(Format::Single, file.format());
        assert_eq!(1, file.track_count());
        assert_eq!(
            TimeDivision::Ppq(QuarterNoteDivision::new(480)),
            file.time_division()
        );
        assert_eq!(1, file.tracks_len());
        let track = file.track(0).unwrap();
        assert_eq!(1, track.events_len());
        assert!(track.events().next().unwrap().is_end_of_track());
    }

    #[test]
    fn round_trips_a_built_file() {
        let header = Header::new(Format::Multi, TimeDivision::default());
        let mut file = File::new(header);
        let mut track = Track::new();
        track.set_name("Lead");
        track.push_note_on(0, Channel::new(0), NoteNumber::new(60), Velocity::new(100));
        track.push_note_off(480, Channel::new(0), NoteNumber::new(60), Velocity::new(0));
        track.ensure_end_of_track();
        file.push_track(track);

        let bytes = file.encode();
        let decoded = File::parse(bytes).unwrap();
        assert_eq!(file.format(), decoded.format());
        assert_eq!(file.time_division(), decoded.time_division());
        assert_eq!(file.tracks_len(), decoded.tracks_len());
        assert!(decoded.validate().is_empty());
    }

    #[test]
    fn truncated_header_raises_underflow() {
        let bytes = vec![0x4D, 0x54, 0x68, 0x64, 0x00];
        assert!(File::parse(bytes).is_err());
    }

    #[test]
    fn running_status_decodes_three_note_ons() {
        // delta 0, status 0x90 (NoteOn ch0), note 0x3C vel 0x40, then two
        // more NoteOns on notes 0x3E and 0x40 with the status byte omitted.
        let bytes = vec![
            0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x01, 0xE0,
            0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x0B, 0x00, 0x90, 0x3C, 0x40, 0x00, 0x3E,
            0x40, 0x00, 0x40, 0x40,
        ];
        let file = File::parse(bytes).unwrap();
        let track = file.track(0).unwrap();
        let notes: Vec<u8> = track
            .events()
            .filter_map(|e| match e.kind() {
                file::EventKind::ChannelVoice {
                    kind: file::channel_voice::ChannelVoiceKind::NoteOn { note, .. },
                    ..
                } => Some(note.get()),
                _ => None,
            })
            .collect();
        assert_eq!(vec![60, 62, 64], notes);
    }
}
