mod utils;

use midi_file::core::{Channel, NoteNumber, QuarterNoteDivision, Velocity};
use midi_file::file::{Event, EventKind, Format, Header, TimeDivision, Track};
use midi_file::File;
use utils::enable_logging;

#[test]
fn minimal_empty_file_matches_the_reference_bytes() {
    enable_logging();
    let bytes: Vec<u8> = vec![
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x01, 0xE0, 0x4D,
        0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04, 0x00, 0xFF, 0x2F, 0x00,
    ];
    let file = File::parse(bytes.clone()).unwrap();
    assert_eq!(Format::Single, file.format());
    assert_eq!(1, file.track_count());
    assert_eq!(
        TimeDivision::Ppq(QuarterNoteDivision::new(480)),
        file.time_division()
    );
    let track = file.track(0).unwrap();
    assert_eq!(1, track.events_len());
    assert!(track.events().next().unwrap().is_end_of_track());
    assert_eq!(bytes, file.encode());
}

#[test]
fn running_status_three_note_ons() {
    // 90 3C 40 00 3E 40 00 40 40 -- only the first event carries a status byte.
    let mut bytes = vec![
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x01, 0xE0, 0x4D,
        0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x00,
    ];
    let body: Vec<u8> = vec![
        0x00, 0x90, 0x3C, 0x40, 0x00, 0x3E, 0x40, 0x00, 0x40, 0x40,
    ];
    let body_len = body.len() as u32;
    bytes[18..22].copy_from_slice(&body_len.to_be_bytes());
    bytes.extend(body);

    let file = File::parse(bytes).unwrap();
    let track = file.track(0).unwrap();
    let notes: Vec<u8> = track
        .events()
        .filter_map(|event| match event.kind() {
            EventKind::ChannelVoice {
                kind: midi_file::file::ChannelVoiceKind::NoteOn { note, .. },
                ..
            } => Some(note.get()),
            _ => None,
        })
        .collect();
    assert_eq!(vec![60, 62, 64], notes);
}

#[test]
fn vlq_edge_values_round_trip_through_note_on_delta_times() {
    // Exercises the VLQ writer/reader at its documented boundaries (0,
    // 127, 128, and the maximum 4-byte value) by using each as a delta
    // time ahead of a Note-On.
    for delta in [0u32, 127, 128, 0x0FFF_FFFF] {
        let mut track = Track::new();
        track.push_event(Event::new(
            delta,
            EventKind::ChannelVoice {
                channel: Channel::new(0),
                kind: midi_file::file::ChannelVoiceKind::NoteOn {
                    note: NoteNumber::new(60),
                    velocity: Velocity::new(100),
                    length: 0,
                },
            },
        ));
        track.ensure_end_of_track();

        let header = Header::new(Format::Single, TimeDivision::default());
        let mut file = File::new(header);
        file.push_track(track);

        let decoded = File::parse(file.encode()).unwrap();
        let decoded_track = decoded.track(0).unwrap();
        assert_eq!(delta, decoded_track.events().next().unwrap().delta_time());
    }
}

#[test]
fn tempo_event_bytes_match_the_reference_encoding() {
    let event = midi_file::tempo_event(120.0);
    let mut track = Track::new();
    track.push_event(event);
    let header = Header::new(Format::Single, TimeDivision::default());
    let mut file = File::new(header);
    file.push_track(track);
    let bytes = file.encode();
    // MTrk body: delta 00, FF 51 03, tempo bytes 07 A1 20 (500000 us/qtr).
    assert!(bytes
        .windows(7)
        .any(|w| w == [0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20]));
}

#[test]
fn note_on_and_off_pairing_back_patches_length() {
    let mut track = Track::new();
    track.push_note_on(0, Channel::new(0), NoteNumber::new(60), Velocity::new(100));
    track.push_note_off(240, Channel::new(0), NoteNumber::new(60), Velocity::new(0));
    track.ensure_end_of_track();

    let header = Header::new(Format::Single, TimeDivision::default());
    let mut file = File::new(header);
    file.push_track(track);

    let decoded = File::parse(file.encode()).unwrap();
    let events: Vec<_> = decoded.track(0).unwrap().events().collect();
    match events[0].kind() {
        EventKind::ChannelVoice {
            kind: midi_file::file::ChannelVoiceKind::NoteOn { length, .. },
            ..
        } => assert_eq!(240, *length),
        other => panic!("expected NoteOn, got {:?}", other),
    }
}

#[test]
fn well_formed_file_round_trips_and_validates_clean() {
    let header = Header::new(Format::Multi, TimeDivision::Ppq(QuarterNoteDivision::new(480)));
    let mut file = File::new(header);

    let mut lead = Track::new();
    lead.set_name("Lead");
    lead.push_tempo(0, midi_file::core::MicrosecondsPerQuarter::new(500_000));
    lead.push_note_on(0, Channel::new(0), NoteNumber::new(60), Velocity::new(100));
    lead.push_note_off(480, Channel::new(0), NoteNumber::new(60), Velocity::new(0));
    lead.push_note_on(0, Channel::new(0), NoteNumber::new(64), Velocity::new(100));
    lead.push_note_off(480, Channel::new(0), NoteNumber::new(64), Velocity::new(0));
    lead.ensure_end_of_track();
    file.push_track(lead);

    let mut drums = Track::new();
    drums.set_name("Drums");
    drums.ensure_end_of_track();
    file.push_track(drums);

    let encoded = file.encode();
    let decoded = File::parse(encoded).unwrap();
    assert_eq!(file.tracks_len(), decoded.tracks_len());
    assert_eq!(file.format(), decoded.format());
    assert_eq!(file.time_division(), decoded.time_division());
    assert!(decoded.validate().is_empty());
}

#[test]
fn save_then_load_round_trips_through_the_filesystem() {
    let header = Header::new(Format::Single, TimeDivision::default());
    let mut file = File::new(header);
    let mut track = Track::new();
    track.ensure_end_of_track();
    file.push_track(track);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.mid");
    file.save(&path).unwrap();

    let loaded = File::load(&path).unwrap();
    assert_eq!(file.format(), loaded.format());
    assert_eq!(file.tracks_len(), loaded.tracks_len());
}

#[test]
fn non_mtrk_chunk_mid_file_stops_the_track_loop_without_erroring() {
    // Header declares 2 tracks but the second chunk is not tagged MTrk; the
    // decoder is expected to stop reading further tracks rather than fail.
    let bytes: Vec<u8> = vec![
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x02, 0x01, 0xE0, 0x4D,
        0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04, 0x00, 0xFF, 0x2F, 0x00, 0x58, 0x58, 0x58, 0x58,
    ];
    let file = File::parse(bytes).unwrap();
    assert_eq!(2, file.track_count());
    assert_eq!(1, file.tracks_len());
}
