//! Semantic well-formedness checks over an already-parsed [`crate::File`],
//! as a dedicated pass separate from decoding. Every check is non-fatal:
//! issues accumulate into an ordered list of human-readable strings rather
//! than aborting, distinguishing this from the decoder's syntactic failures
//! (`Error`). A file with no issues is well-formed; a file with issues may
//! still have parsed successfully.

use crate::core::NoteNumber;
use crate::file::channel_voice::ChannelVoiceKind;
use crate::file::{EventKind, MetaEventKind, Track};
use crate::File;
use std::collections::HashMap;

/// Runs every semantic check over `file` and returns the accumulated issue
/// strings, in the order encountered. An empty vec means `file` is
/// well-formed.
pub fn validate(file: &File) -> Vec<String> {
    let mut issues = Vec::new();

    if !file.format().is_standard() {
        issues.push(format!(
            "format is not one of 0, 1, or 2: {:?}",
            file.format()
        ));
    }

    let actual_track_count = file.tracks_len();
    if file.track_count() as usize != actual_track_count {
        issues.push(format!(
            "header declares {} tracks but the file contains {}",
            file.track_count(),
            actual_track_count
        ));
    }

    for (index, track) in file.tracks().enumerate() {
        validate_track(index, track, &mut issues);
    }

    issues
}

fn validate_track(index: usize, track: &Track, issues: &mut Vec<String>) {
    // `chunk_length` is only ever populated by `Track::decode`; a track built
    // in memory and never parsed leaves it at its `0` default regardless of
    // how many events it holds (computed fresh at encode time, per §3). Only
    // flag a disagreement once we know the length came off the wire.
    if track.chunk_length() != 0 && track.events_len() == 0 {
        issues.push(format!(
            "track {}: chunk length {} disagrees with its {} events",
            index,
            track.chunk_length(),
            track.events_len()
        ));
    }

    let mut active_counts: HashMap<NoteNumber, i32> = HashMap::new();
    let events: Vec<_> = track.events().collect();
    let last_index = events.len().checked_sub(1);
    let mut end_of_track_count = 0usize;

    for (event_index, event) in events.iter().enumerate() {
        match event.kind() {
            EventKind::ChannelVoice {
                kind: ChannelVoiceKind::NoteOn { note, velocity, .. },
                ..
            } => {
                if velocity.get() > 0 {
                    *active_counts.entry(*note).or_insert(0) += 1;
                } else {
                    decrement_active(&mut active_counts, *note, index, issues);
                }
            }
            EventKind::ChannelVoice {
                kind: ChannelVoiceKind::NoteOff { note, .. },
                ..
            } => {
                decrement_active(&mut active_counts, *note, index, issues);
            }
            EventKind::Meta(meta) => {
                if matches!(meta.kind(), MetaEventKind::EndOfTrack) {
                    end_of_track_count += 1;
                    if Some(event_index) != last_index {
                        issues.push(format!(
                            "track {}: End-of-Track occurs before the last event",
                            index
                        ));
                    }
                }
                match meta.kind() {
                    // the decoder tolerates either the standard length or
                    // the fallback-to-track-index shape; both are legal.
                    MetaEventKind::SequenceNumber(_) => {
                        if meta.declared_length() != 0 && meta.declared_length() != 2 {
                            issues.push(format!(
                                "track {}: Sequence Number declared length {} is neither 0 nor 2",
                                index,
                                meta.declared_length()
                            ));
                        }
                    }
                    other => {
                        if let Some(expected) = other.standard_length() {
                            if meta.declared_length() != expected {
                                issues.push(format!(
                                    "track {}: {} declared length {} but the standard length is {}",
                                    index,
                                    meta.label(),
                                    meta.declared_length(),
                                    expected
                                ));
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    match end_of_track_count {
        0 => issues.push(format!("track {}: missing End-of-Track", index)),
        1 => {}
        n => issues.push(format!(
            "track {}: {} End-of-Track events, expected exactly one",
            index, n
        )),
    }

    let mut unmatched: Vec<NoteNumber> = active_counts
        .into_iter()
        .filter(|&(_, count)| count > 0)
        .map(|(note, _)| note)
        .collect();
    unmatched.sort_by_key(NoteNumber::get);
    for note in unmatched {
        issues.push(format!(
            "track {}: unmatched Note On for note {}",
            index,
            note.get()
        ));
    }
}

fn decrement_active(
    active_counts: &mut HashMap<NoteNumber, i32>,
    note: NoteNumber,
    track_index: usize,
    issues: &mut Vec<String>,
) {
    let counter = active_counts.entry(note).or_insert(0);
    *counter -= 1;
    if *counter < 0 {
        issues.push(format!(
            "track {}: Note-Off without active Note-On for note {}",
            track_index,
            note.get()
        ));
        *counter = 0;
    }
}
