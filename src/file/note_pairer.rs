//! Tracks active Note-On events during decode so a later Note-Off (or a
//! zero-velocity Note-On, its semantic equivalent) can be matched up and the
//! elapsed tick count back-patched onto the stored Note-On's `length` field.
//! Scoped to a single track decode; discarded once the track ends.

use crate::core::NoteNumber;
use crate::file::event::{Event, EventKind};
use std::collections::HashMap;

struct Active {
    start_time: u32,
    /// Index into the track's `events` vector of the stored Note-On.
    event_index: usize,
}

#[derive(Default)]
pub(crate) struct NotePairer {
    active: HashMap<NoteNumber, Active>,
}

impl NotePairer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Called after a Note-On event has been pushed onto `events`.
    /// Unconditionally records the note, last-wins on collision.
    pub(crate) fn note_on(&mut self, note: NoteNumber, start_time: u32, event_index: usize) {
        self.active.insert(
            note,
            Active {
                start_time,
                event_index,
            },
        );
    }

    /// Called when a Note-Off (or zero-velocity Note-On) is seen at
    /// `current_time`. If a matching active Note-On is found, back-patches
    /// its `length` in `events` and returns the elapsed ticks; otherwise
    /// returns `None` and the caller's event keeps `length == 0`.
    pub(crate) fn note_off(
        &mut self,
        note: NoteNumber,
        current_time: u32,
        events: &mut [Event],
    ) -> Option<u32> {
        let active = self.active.remove(&note)?;
        let length = current_time.saturating_sub(active.start_time);
        if let Some(event) = events.get_mut(active.event_index) {
            if let EventKind::ChannelVoice {
                kind: crate::file::channel_voice::ChannelVoiceKind::NoteOn { length: l, .. },
                ..
            } = event.kind_mut()
            {
                *l = length;
            }
        }
        Some(length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Channel, Velocity};
    use crate::file::channel_voice::ChannelVoiceKind;

    fn note_on_event(note: NoteNumber) -> Event {
        Event::new(
            0,
            EventKind::ChannelVoice {
                channel: Channel::new(0),
                kind: ChannelVoiceKind::NoteOn {
                    note,
                    velocity: Velocity::new(100),
                    length: 0,
                },
            },
        )
    }

    #[test]
    fn matched_pair_back_patches_length() {
        let mut events = vec![note_on_event(NoteNumber::new(60))];
        let mut pairer = NotePairer::new();
        pairer.note_on(NoteNumber::new(60), 10, 0);
        let length = pairer.note_off(NoteNumber::new(60), 34, &mut events);
        assert_eq!(Some(24), length);
        match events[0].kind() {
            EventKind::ChannelVoice {
                kind: ChannelVoiceKind::NoteOn { length, .. },
                ..
            } => assert_eq!(24, *length),
            _ => panic!("expected NoteOn"),
        }
    }

    #[test]
    fn unmatched_note_off_returns_none() {
        let mut events = Vec::new();
        let mut pairer = NotePairer::new();
        assert_eq!(None, pairer.note_off(NoteNumber::new(60), 10, &mut events));
    }

    #[test]
    fn last_note_on_wins_on_collision() {
        let mut events = vec![note_on_event(NoteNumber::new(60)), note_on_event(NoteNumber::new(60))];
        let mut pairer = NotePairer::new();
        pairer.note_on(NoteNumber::new(60), 0, 0);
        pairer.note_on(NoteNumber::new(60), 5, 1);
        pairer.note_off(NoteNumber::new(60), 10, &mut events);
        match events[0].kind() {
            EventKind::ChannelVoice {
                kind: ChannelVoiceKind::NoteOn { length, .. },
                ..
            } => assert_eq!(0, *length),
            _ => panic!("expected NoteOn"),
        }
        match events[1].kind() {
            EventKind::ChannelVoice {
                kind: ChannelVoiceKind::NoteOn { length, .. },
                ..
            } => assert_eq!(5, *length),
            _ => panic!("expected NoteOn"),
        }
    }
}
