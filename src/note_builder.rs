//! `notes -> File` convenience construction: batch-assembles a multi-track
//! file from plain note lists, plus the scientific-pitch-notation helpers
//! (`note_to_midi`/`midi_to_note`) and the small meta-event builders that
//! both this module and [`crate::file::Track`]'s own push methods share.

use crate::core::{Channel, MicrosecondsPerQuarter, NoteNumber, QuarterNoteDivision, Velocity};
use crate::error::Result;
use crate::file::{ChannelVoiceKind, Event, EventKind, Format, Header, MetaEvent, MetaEventKind, TimeDivision, Track};
use crate::File;
use std::collections::HashMap;

const DEFAULT_OCTAVE_OFFSET: i32 = 2;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// One note in a [`ConvertToMidiTrack`]'s note list. `ticks` is how far the
/// cursor advances (in ticks) before the *next* note in the list starts;
/// `length` is how long this note rings, independent of that spacing (a
/// staccato note has `length < ticks`).
#[derive(Clone, Copy, Debug)]
pub struct NoteSpec {
    pub midi_note: NoteNumber,
    pub velocity: Velocity,
    pub length: f64,
    pub ticks: f64,
}

/// One track's worth of input to [`convert_to_midi`].
#[derive(Clone, Debug, Default)]
pub struct ConvertToMidiTrack {
    pub notes: Vec<NoteSpec>,
    /// Meta-string events to insert at time 0, keyed by meta type byte
    /// (e.g. `0x03` for the track name, `0x05` for a lyric).
    pub meta_string_events: HashMap<u8, String>,
}

/// Input to [`convert_to_midi`].
#[derive(Clone, Debug)]
pub struct ConvertToMidiSpec {
    pub ppq: u16,
    pub bpm: Option<f64>,
    pub tracks: Vec<ConvertToMidiTrack>,
    pub skip_notes: Vec<NoteNumber>,
}

impl Default for ConvertToMidiSpec {
    fn default() -> Self {
        ConvertToMidiSpec {
            ppq: 480,
            bpm: None,
            tracks: Vec::new(),
            skip_notes: Vec::new(),
        }
    }
}

/// A note number actually sounded in a file (a Note-On with nonzero
/// velocity), paired with its scientific-pitch-notation name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UsedNote {
    pub note_number: NoteNumber,
    pub note_name: String,
}

/// Builds a tempo meta event from a beats-per-minute value.
pub fn tempo_event(bpm: f64) -> Event {
    let tempo = (60_000_000.0 / bpm).round() as u32;
    Event::new(
        0,
        EventKind::Meta(MetaEvent::new(MetaEventKind::SetTempo(MicrosecondsPerQuarter::new(tempo)))),
    )
}

/// Builds one of the text-family meta events (`0x01`-`0x09`) from its meta
/// type byte and text. Falls back to the generic `Text` (`0x01`) event for
/// any other byte.
pub fn meta_string_event(meta_type: u8, text: impl Into<crate::text::Text>) -> Event {
    let text = text.into();
    let kind = match meta_type {
        0x02 => MetaEventKind::Copyright(text),
        0x03 => MetaEventKind::TrackName(text),
        0x04 => MetaEventKind::InstrumentName(text),
        0x05 => MetaEventKind::Lyric(text),
        0x06 => MetaEventKind::Marker(text),
        0x07 => MetaEventKind::CuePoint(text),
        0x08 => MetaEventKind::ProgramName(text),
        0x09 => MetaEventKind::DeviceName(text),
        _ => MetaEventKind::OtherText(text),
    };
    Event::new(0, EventKind::Meta(MetaEvent::new(kind)))
}

pub fn end_of_track_event() -> Event {
    Event::new(0, EventKind::Meta(MetaEvent::new(MetaEventKind::EndOfTrack)))
}

/// Converts a scientific-pitch-notation name (e.g. `"C4"`, `"F#3"`, `"Eb5"`)
/// to a MIDI note number. `octave_offset` shifts which octave is called `4`;
/// the default of 2 makes `"C4"` equal 72. A custom `note_map` may override
/// the base letter-to-semitone table (e.g. for a different accidental
/// convention); `None` uses the standard sharps-based table.
///
/// Enharmonic spellings that land on the same semitone (`E#`/`F`, `B#`/`C`)
/// are accepted and collapse to the same note number; the input spelling is
/// not recoverable from the resulting number.
pub fn note_to_midi(name: &str, octave_offset: Option<i32>, note_map: Option<&HashMap<char, i32>>) -> Result<NoteNumber> {
    let offset = octave_offset.unwrap_or(DEFAULT_OCTAVE_OFFSET);
    let mut chars = name.chars().peekable();
    let letter = chars
        .next()
        .ok_or_else(|| invalid_file_e!("empty note name").into())
        .map(|c| c.to_ascii_uppercase())?;
    let default_map = default_note_map();
    let map = note_map.unwrap_or(&default_map);
    let base = *map
        .get(&letter)
        .ok_or_else(|| crate::error::Error::from(invalid_file_e!("unrecognized note letter '{}'", letter)))?;

    let mut accidental = 0i32;
    while let Some(&c) = chars.peek() {
        match c {
            '#' => {
                accidental += 1;
                chars.next();
            }
            'b' => {
                accidental -= 1;
                chars.next();
            }
            _ => break,
        }
    }
    let octave_str: String = chars.collect();
    let octave: i32 = octave_str
        .parse()
        .map_err(|_| crate::error::Error::from(invalid_file_e!("invalid octave in note name '{}'", name)))?;

    let semitone = (base + accidental).rem_euclid(12);
    let raw = (octave + offset) * 12 + semitone;
    if !(0..=127).contains(&raw) {
        return Err(invalid_file_e!("note '{}' is out of the 0..127 MIDI range", name).into());
    }
    Ok(NoteNumber::new(raw as u8))
}

fn default_note_map() -> HashMap<char, i32> {
    [
        ('C', 0),
        ('D', 2),
        ('E', 4),
        ('F', 5),
        ('G', 7),
        ('A', 9),
        ('B', 11),
    ]
    .iter()
    .copied()
    .collect()
}

/// Converts a MIDI note number to its scientific-pitch-notation name, e.g.
/// `60 -> "C4"` at the default octave offset. `names` overrides the 12
/// pitch-class names (index 0 = C); `None` uses the standard sharps table.
pub fn midi_to_note(value: NoteNumber, octave_offset: Option<i32>, names: Option<&[&str; 12]>) -> String {
    let offset = octave_offset.unwrap_or(DEFAULT_OCTAVE_OFFSET);
    let names = names.unwrap_or(&NOTE_NAMES);
    let value = value.get() as i32;
    let pitch_class = (value % 12) as usize;
    let octave = value / 12 - offset;
    format!("{}{}", names[pitch_class], octave)
}

/// Unique note numbers actually sounded anywhere in `file` (Note-Ons with
/// nonzero velocity), sorted ascending, paired with their pitch name.
pub fn used_notes(file: &File) -> Vec<UsedNote> {
    let mut numbers: Vec<u8> = Vec::new();
    for track in file.tracks() {
        for event in track.events() {
            if let EventKind::ChannelVoice {
                kind: ChannelVoiceKind::NoteOn { note, velocity, .. },
                ..
            } = event.kind()
            {
                if velocity.get() > 0 && !numbers.contains(&note.get()) {
                    numbers.push(note.get());
                }
            }
        }
    }
    numbers.sort_unstable();
    numbers
        .into_iter()
        .map(|n| {
            let note_number = NoteNumber::new(n);
            UsedNote {
                note_number,
                note_name: midi_to_note(note_number, None, None),
            }
        })
        .collect()
}

/// Batch-assembles a [`File`] from plain note lists: one track per
/// `spec.tracks` entry, an optional tempo and meta-string events at time 0,
/// and Note-On/Note-Off pairs laid out by each note's `ticks` spacing and
/// `length` duration.
pub fn convert_to_midi(spec: ConvertToMidiSpec) -> File {
    let header = Header::new(Format::Multi, TimeDivision::Ppq(QuarterNoteDivision::new(spec.ppq)));
    let mut file = File::new(header);
    for track_spec in &spec.tracks {
        file.push_track(build_track(spec.ppq, spec.bpm, track_spec, &spec.skip_notes));
    }
    file
}

fn build_track(ppq: u16, bpm: Option<f64>, track_spec: &ConvertToMidiTrack, skip_notes: &[NoteNumber]) -> Track {
    let mut timed: Vec<(f64, Event)> = Vec::new();
    if let Some(bpm) = bpm {
        timed.push((0.0, tempo_event(bpm)));
    }
    for (&meta_type, text) in &track_spec.meta_string_events {
        timed.push((0.0, meta_string_event(meta_type, text.clone())));
    }

    let mut current_time_quarters = 0f64;
    for note in &track_spec.notes {
        let ticks_advance = note.ticks;
        if skip_notes.contains(&note.midi_note) {
            current_time_quarters += ticks_advance / ppq as f64;
            continue;
        }
        let on_time = current_time_quarters * ppq as f64;
        let off_time = on_time + note.length.ceil();
        timed.push((
            on_time,
            Event::new(
                0,
                EventKind::ChannelVoice {
                    channel: Channel::default(),
                    kind: ChannelVoiceKind::NoteOn {
                        note: note.midi_note,
                        velocity: note.velocity,
                        length: 0,
                    },
                },
            ),
        ));
        timed.push((
            off_time,
            Event::new(
                0,
                EventKind::ChannelVoice {
                    channel: Channel::default(),
                    kind: ChannelVoiceKind::NoteOff {
                        note: note.midi_note,
                        velocity: Velocity::new(0),
                        length: 0,
                    },
                },
            ),
        ));
        current_time_quarters += ticks_advance / ppq as f64;
    }

    timed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut track = Track::new();
    let mut last_absolute = 0f64;
    for (absolute, mut event) in timed {
        let delta = (absolute - last_absolute).round().max(0.0) as u32;
        event.set_delta_time(delta);
        last_absolute = absolute;
        track.push_event(event);
    }
    track.ensure_end_of_track();
    track
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_to_midi_default_offset() {
        assert_eq!(72, note_to_midi("C4", None, None).unwrap().get());
    }

    #[test]
    fn midi_to_note_default_offset() {
        assert_eq!("C4", midi_to_note(NoteNumber::new(72), None, None));
    }

    #[test]
    fn sharps_and_flats_roundtrip_through_semitone() {
        assert_eq!(
            note_to_midi("C#4", None, None).unwrap().get(),
            note_to_midi("Db4", None, None).unwrap().get()
        );
    }

    #[test]
    fn enharmonic_collapse_is_accepted() {
        assert_eq!(
            note_to_midi("E#4", None, None).unwrap().get(),
            note_to_midi("F4", None, None).unwrap().get()
        );
    }

    #[test]
    fn out_of_range_note_raises() {
        assert!(note_to_midi("C20", None, None).is_err());
    }

    #[test]
    fn convert_to_midi_produces_sorted_events() {
        let spec = ConvertToMidiSpec {
            ppq: 480,
            bpm: Some(120.0),
            tracks: vec![ConvertToMidiTrack {
                notes: vec![
                    NoteSpec {
                        midi_note: NoteNumber::new(60),
                        velocity: Velocity::new(100),
                        length: 480.0,
                        ticks: 480.0,
                    },
                    NoteSpec {
                        midi_note: NoteNumber::new(64),
                        velocity: Velocity::new(100),
                        length: 480.0,
                        ticks: 480.0,
                    },
                ],
                meta_string_events: HashMap::new(),
            }],
            skip_notes: Vec::new(),
        };
        let file = convert_to_midi(spec);
        assert_eq!(1, file.tracks().count());
        let track = file.tracks().next().unwrap();
        assert!(track.events().last().unwrap().is_end_of_track());
    }
}
