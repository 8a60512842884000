use midi_file::core::{Channel, Clocks, MicrosecondsPerQuarter, NoteNumber, QuarterNoteDivision, Velocity};
use midi_file::file::{Format, Header, TimeDivision, Track};
use midi_file::File;

// durations, in ticks at 1024 pulses per quarter note
const QUARTER: u32 = 1024;
const EIGHTH: u32 = QUARTER / 2;
const DOTTED_QUARTER: u32 = QUARTER + EIGHTH;

// pitches
const C4: NoteNumber = NoteNumber::new(72);
const D4: NoteNumber = NoteNumber::new(74);
const E4: NoteNumber = NoteNumber::new(76);

// some arbitrary velocity
const V: Velocity = Velocity::new(64);

// channel zero (displayed as channel 1 in any sequencer UI)
const CH: Channel = Channel::new(0);

fn main() {
    let header = Header::new(
        Format::Multi,
        TimeDivision::Ppq(QuarterNoteDivision::new(1024)),
    );
    let mut file = File::new(header);

    let mut track = Track::new();
    track.set_name("Singer");
    track.set_instrument_name("Alto");

    // time signature (6/8) and tempo (116 bpm)
    track.push_time_signature(0, 6, 3, Clocks::DottedQuarter, 8);
    track.push_tempo(0, MicrosecondsPerQuarter::new((60_000_000.0 / 116.0).round() as u32));

    // measure 1: no rests, so every lyric/note-on is at delta time zero
    track.push_lyric(0, "Row");
    track.push_note_on(0, CH, C4, V);
    track.push_note_off(DOTTED_QUARTER, CH, C4, Velocity::default());

    track.push_lyric(0, "row");
    track.push_note_on(0, CH, C4, V);
    track.push_note_off(DOTTED_QUARTER, CH, C4, V);

    // measure 2
    track.push_lyric(0, "row");
    track.push_note_on(0, CH, C4, V);
    track.push_note_off(QUARTER, CH, C4, V);

    track.push_lyric(0, "your");
    track.push_note_on(0, CH, D4, V);
    track.push_note_off(EIGHTH, CH, D4, V);

    track.push_lyric(0, "boat");
    track.push_note_on(0, CH, E4, V);
    track.push_note_off(DOTTED_QUARTER, CH, E4, V);

    track.ensure_end_of_track();
    file.push_track(track);

    let bytes = file.encode();
    assert!(file.validate().is_empty());

    // round-trip it to prove the demo actually decodes what it wrote
    let decoded = File::parse(bytes).unwrap();
    assert_eq!(1, decoded.tracks_len());
    assert_eq!(20, decoded.track(0).unwrap().events_len());
}
