//! System Exclusive events: `0xF0 <manufacturer id> <data…> 0xF7`.

use crate::cursor::ByteCursor;
use crate::error::LibResult;

pub(crate) const SYSEX_START: u8 = 0xF0;
const SYSEX_END: u8 = 0xF7;

/// A manufacturer-specific event. `data` holds everything between the
/// manufacturer id byte and the terminating `0xF7`, exclusive of both.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct SysexEvent {
    manufacturer_id: u8,
    data: Vec<u8>,
}

impl SysexEvent {
    pub fn new(manufacturer_id: u8, data: Vec<u8>) -> Self {
        Self {
            manufacturer_id,
            data,
        }
    }

    pub fn manufacturer_id(&self) -> u8 {
        self.manufacturer_id
    }

    pub fn manufacturer_label(&self) -> String {
        crate::labels::manufacturer_label(self.manufacturer_id)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn decode(cursor: &mut ByteCursor) -> LibResult<Self> {
        let manufacturer_id = cursor.read_u8()?;
        let mut data = Vec::new();
        loop {
            if cursor.is_end() {
                log::warn!(
                    "system exclusive event reached end of track without a 0xF7 terminator"
                );
                break;
            }
            let byte = cursor.read_u8()?;
            if byte == SYSEX_END {
                break;
            }
            data.push(byte);
        }
        Ok(SysexEvent {
            manufacturer_id,
            data,
        })
    }

    pub(crate) fn encode(&self, cursor: &mut ByteCursor) {
        cursor.write_u8(self.manufacturer_id);
        cursor.write_bytes(&self.data);
        cursor.write_u8(SYSEX_END);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips() {
        let event = SysexEvent::new(0x41, vec![0x01, 0x02, 0x03]);
        let mut cursor = ByteCursor::for_writing();
        event.encode(&mut cursor);
        let bytes = cursor.into_bytes();
        assert_eq!(SYSEX_END, *bytes.last().unwrap());
        let mut read_cursor = ByteCursor::for_reading(bytes);
        let decoded = SysexEvent::decode(&mut read_cursor).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn truncated_stream_does_not_panic() {
        let mut cursor = ByteCursor::for_reading(vec![0x41, 0x01, 0x02]);
        let decoded = SysexEvent::decode(&mut cursor).unwrap();
        assert_eq!(vec![0x01, 0x02], decoded.data);
    }
}
