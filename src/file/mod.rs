/*!
The `file` module is for types and concepts strictly related to MIDI *files*.
These are kept separate from types and concepts that are also used in realtime MIDI (`core`).
!*/

pub(crate) mod channel_voice;
mod event;
mod header;
pub(crate) mod meta_event;
mod note_pairer;
pub(crate) mod sysex;
pub(crate) mod system;
mod time_division;
mod track;

pub use channel_voice::ChannelVoiceKind;
pub use event::{Event, EventKind};
pub use header::{Format, Header};
pub use meta_event::{
    KeyAccidentals, KeyMode, KeySignatureValue, MetaEvent, MetaEventKind, SmpteOffsetValue,
    TimeSignatureValue,
};
pub use sysex::SysexEvent;
pub use system::{SystemCommonKind, SystemRealTimeKind};
pub use time_division::TimeDivision;
pub use track::Track;
