use crate::cursor::ByteCursor;
use crate::file::TimeDivision;

/// The decoded `MThd` chunk: file format and time division. Track count is
/// tracked separately by [`crate::File`] since on a freshly parsed file it
/// may not agree with the number of track chunks actually present.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct Header {
    format: Format,
    time_division: TimeDivision,
}

impl Header {
    /// Create a new `Header` value.
    pub fn new(format: Format, time_division: TimeDivision) -> Self {
        Self {
            format,
            time_division,
        }
    }

    /// A getter for the `format` field.
    pub fn format(&self) -> Format {
        self.format
    }

    /// A getter for the `time_division` field.
    pub fn time_division(&self) -> TimeDivision {
        self.time_division
    }

    pub(crate) fn decode(cursor: &mut ByteCursor) -> crate::error::LibResult<(Self, u16)> {
        // The 4-byte tag is surfaced but not treated as fatal; a file with a
        // different tag here is still handed to the rest of the decoder.
        let _tag = cursor.read_ascii_string(4)?;
        let chunk_length = cursor.read_u32_be()?;
        let format_word = cursor.read_u16_be()?;
        let track_count = cursor.read_u16_be()?;
        let division_word = cursor.read_u16_be()?;
        // the standard requires exactly 6; tolerate (and skip) any excess
        if chunk_length > 6 {
            cursor.advance((chunk_length - 6) as usize);
        }
        let header = Header {
            format: Format::from_u16(format_word),
            time_division: TimeDivision::from_u16(division_word),
        };
        Ok((header, track_count))
    }

    pub(crate) fn encode(&self, cursor: &mut ByteCursor, track_count: u16) {
        cursor.write_ascii("MThd");
        cursor.write_u32_be(6);
        cursor.write_u16_be(self.format.to_u16());
        cursor.write_u16_be(track_count);
        cursor.write_u16_be(self.time_division.to_u16());
    }
}

/// The first word of the MThd chunk. Out-of-range values are preserved
/// rather than rejected: a malformed `format` is a semantic issue the
/// validator reports, not a reason to fail the parse.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum Format {
    /// 0: the file contains a single multi-channel track.
    Single,
    /// 1: the file contains one or more simultaneous tracks of a sequence.
    Multi,
    /// 2: the file contains one or more sequentially independent patterns.
    Sequential,
    /// Any value other than 0, 1, or 2.
    Other(u16),
}

impl Default for Format {
    fn default() -> Self {
        Format::Multi
    }
}

impl Format {
    pub(crate) fn from_u16(value: u16) -> Self {
        match value {
            0 => Format::Single,
            1 => Format::Multi,
            2 => Format::Sequential,
            other => Format::Other(other),
        }
    }

    pub(crate) fn to_u16(self) -> u16 {
        match self {
            Format::Single => 0,
            Format::Multi => 1,
            Format::Sequential => 2,
            Format::Other(v) => v,
        }
    }

    /// `true` for 0, 1, and 2 — the formats defined by the standard.
    pub fn is_standard(self) -> bool {
        !matches!(self, Format::Other(_))
    }
}
