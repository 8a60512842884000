mod utils;

use midi_file::core::{NoteNumber, Velocity};
use midi_file::{convert_to_midi, midi_to_note, note_to_midi, used_notes, ConvertToMidiSpec, ConvertToMidiTrack, NoteSpec};
use std::collections::HashMap;
use utils::enable_logging;

#[test]
fn note_name_round_trips_at_the_default_octave_offset() {
    enable_logging();
    for value in 0u8..=127 {
        let note = NoteNumber::new(value);
        let name = midi_to_note(note, None, None);
        let back = note_to_midi(&name, None, None).unwrap();
        assert_eq!(note, back, "{} -> {} -> {:?}", value, name, back);
    }
}

#[test]
fn out_of_range_note_name_raises() {
    assert!(note_to_midi("C20", None, None).is_err());
}

#[test]
fn convert_to_midi_builds_a_playable_file_and_used_notes_matches_the_note_list() {
    let mut meta_string_events = HashMap::new();
    meta_string_events.insert(0x03u8, "Lead".to_string());

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
                NoteSpec {
                    midi_note: NoteNumber::new(60),
                    velocity: Velocity::new(100),
                    length: 240.0,
                    ticks: 240.0,
                },
            ],
            meta_string_events,
        }],
        skip_notes: Vec::new(),
    };

    let file = convert_to_midi(spec);
    assert_eq!(1, file.tracks_len());
    assert!(file.validate().is_empty());

    let encoded = file.encode();
    let decoded = midi_file::File::parse(encoded).unwrap();
    let mut notes = used_notes(&decoded);
    notes.sort_by_key(|n| n.note_number.get());
    let numbers: Vec<u8> = notes.iter().map(|n| n.note_number.get()).collect();
    assert_eq!(vec![60, 64], numbers);
}

#[test]
fn skip_notes_are_omitted_from_the_built_track() {
    let spec = ConvertToMidiSpec {
        ppq: 480,
        bpm: None,
        tracks: vec![ConvertToMidiTrack {
            notes: vec![
                NoteSpec {
                    midi_note: NoteNumber::new(60),
                    velocity: Velocity::new(100),
                    length: 480.0,
                    ticks: 480.0,
                },
                NoteSpec {
                    midi_note: NoteNumber::new(61),
                    velocity: Velocity::new(100),
                    length: 480.0,
                    ticks: 480.0,
                },
            ],
            meta_string_events: HashMap::new(),
        }],
        skip_notes: vec![NoteNumber::new(61)],
    };

    let file = convert_to_midi(spec);
    let encoded = file.encode();
    let decoded = midi_file::File::parse(encoded).unwrap();
    let notes = used_notes(&decoded);
    assert_eq!(1, notes.len());
    assert_eq!(60, notes[0].note_number.get());
}
