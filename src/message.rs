// src/message.rs - PGN payload buffer shared with the bus transport
//
// The transport stack owns framing, addressing and fast-packet reassembly. This
// module only models what crosses the seam: a PGN tag, a priority and a
// little-endian payload built or consumed field by field.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;

/// Largest payload a fast-packet PGN can carry
pub const MAX_DATA_LEN: usize = 223;

/// Encoding byte of a variable-length string holding ASCII/UTF-8 text
const VAR_STR_ASCII: u8 = 0x01;

/// Value read for a byte past the end of the payload ("data not available")
pub const NOT_AVAILABLE_U8: u8 = 0xFF;

/// One PGN payload as exchanged with the transport
#[derive(Clone, PartialEq, Eq)]
pub struct N2kMessage {
    pgn: u32,
    priority: u8,
    data: BytesMut,
}

impl N2kMessage {
    /// Start an empty outbound message
    pub fn new(pgn: u32, priority: u8) -> Self {
        Self {
            pgn,
            priority,
            data: BytesMut::with_capacity(MAX_DATA_LEN),
        }
    }

    /// Wrap a payload received from the transport
    pub fn from_payload(pgn: u32, priority: u8, payload: &[u8]) -> Self {
        Self {
            pgn,
            priority,
            data: BytesMut::from(payload),
        }
    }

    /// PGN tag
    pub fn pgn(&self) -> u32 {
        self.pgn
    }

    /// Bus priority (0 highest, 7 lowest)
    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// Override the bus priority
    pub fn set_priority(&mut self, priority: u8) {
        self.priority = priority;
    }

    /// Payload bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` for an empty payload
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Hand the payload over to the transport
    pub fn into_payload(self) -> Bytes {
        self.data.freeze()
    }

    /// Append one byte
    pub fn add_byte(&mut self, value: u8) {
        self.data.put_u8(value);
    }

    /// Append a 2-byte unsigned integer
    pub fn add_u16(&mut self, value: u16) {
        self.data.put_u16_le(value);
    }

    /// Append an 8-byte unsigned integer
    pub fn add_u64(&mut self, value: u64) {
        self.data.put_u64_le(value);
    }

    /// Append a variable-length string: total length, encoding byte, text.
    ///
    /// The text is shortened to keep the payload within [`MAX_DATA_LEN`]; if
    /// not even the two header bytes fit, nothing is written.
    pub fn add_var_str(&mut self, text: &str) {
        let Some(room) = MAX_DATA_LEN.checked_sub(self.data.len() + 2) else {
            return;
        };
        let mut end = text.len().min(room).min(u8::MAX as usize - 2);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.data.put_u8(end as u8 + 2);
        self.data.put_u8(VAR_STR_ASCII);
        self.data.put_slice(&text.as_bytes()[..end]);
    }

    /// Sequential reader over the payload
    pub fn reader(&self) -> MessageReader<'_> {
        MessageReader {
            pgn: self.pgn,
            data: &self.data,
            offset: 0,
        }
    }
}

impl fmt::Debug for N2kMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("N2kMessage")
            .field("pgn", &self.pgn)
            .field("priority", &self.priority)
            .field("data", &hex::encode_upper(&self.data))
            .finish()
    }
}

/// Cursor over an inbound payload.
///
/// Reads never fail. Fields past the end of the payload come back as "data not
/// available" (all bits set) and strings as empty, the way bus peers fill
/// fields they do not provide.
#[derive(Debug, Clone)]
pub struct MessageReader<'a> {
    pgn: u32,
    data: &'a [u8],
    offset: usize,
}

impl<'a> MessageReader<'a> {
    /// Bytes consumed so far
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn take(&mut self, count: usize) -> Option<&'a [u8]> {
        if self.remaining() < count {
            log::trace!(
                "PGN {}: {} byte(s) short at offset {}, reading as not available",
                self.pgn,
                count - self.remaining(),
                self.offset
            );
            self.offset = self.data.len();
            return None;
        }
        let chunk = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Some(chunk)
    }

    /// Read one byte, [`NOT_AVAILABLE_U8`] past the end
    pub fn get_byte(&mut self) -> u8 {
        self.take(1).map_or(NOT_AVAILABLE_U8, |mut b| b.get_u8())
    }

    /// Read a 2-byte unsigned integer, all ones past the end
    pub fn get_u16(&mut self) -> u16 {
        self.take(2).map_or(u16::MAX, |mut b| b.get_u16_le())
    }

    /// Read an 8-byte unsigned integer, all ones past the end
    pub fn get_u64(&mut self) -> u64 {
        self.take(8).map_or(u64::MAX, |mut b| b.get_u64_le())
    }

    /// Read a variable-length string and return its text bytes.
    ///
    /// A declared length below 2 is read as an empty field. Text in an encoding
    /// other than ASCII/UTF-8 is skipped and reported as empty. A string cut by
    /// the end of the payload keeps the bytes that are present; a missing
    /// string reads as empty.
    pub fn get_var_str(&mut self) -> &'a [u8] {
        let total = self.get_byte() as usize;
        if total < 2 {
            return &[];
        }
        let encoding = self.get_byte();
        if encoding != VAR_STR_ASCII {
            log::trace!("PGN {}: skipping string with encoding {:#04x}", self.pgn, encoding);
            let skip = (total - 2).min(self.remaining());
            self.offset += skip;
            return &[];
        }
        let len = (total - 2).min(self.remaining());
        let text = &self.data[self.offset..self.offset + len];
        self.offset += len;
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_are_little_endian() {
        let mut msg = N2kMessage::new(126983, 2);
        msg.add_byte(0xAB);
        msg.add_u16(0x1234);
        msg.add_u64(0x0102_0304_0506_0708);
        assert_eq!(
            msg.data(),
            &[0xAB, 0x34, 0x12, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );

        let mut reader = msg.reader();
        assert_eq!(reader.get_byte(), 0xAB);
        assert_eq!(reader.get_u16(), 0x1234);
        assert_eq!(reader.get_u64(), 0x0102_0304_0506_0708);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_var_str_layout() {
        let mut msg = N2kMessage::new(126985, 2);
        msg.add_var_str("Bilge");
        assert_eq!(msg.data(), &[7, 0x01, b'B', b'i', b'l', b'g', b'e']);

        let mut msg = N2kMessage::new(126985, 2);
        msg.add_var_str("");
        assert_eq!(msg.data(), &[2, 0x01]);
        assert_eq!(msg.reader().get_var_str(), b"");
    }

    #[test]
    fn test_var_str_is_shortened_to_fit_payload() {
        let mut msg = N2kMessage::new(126985, 2);
        for _ in 0..200 {
            msg.add_byte(0);
        }
        msg.add_var_str(&"y".repeat(100));
        assert_eq!(msg.len(), MAX_DATA_LEN);
        assert_eq!(msg.data()[200], 23);

        // no room left for even the header
        msg.add_var_str("z");
        assert_eq!(msg.len(), MAX_DATA_LEN);
    }

    #[test]
    fn test_reads_past_end_are_not_available() {
        let msg = N2kMessage::from_payload(126984, 2, &[0x01, 0x02]);
        let mut reader = msg.reader();
        assert_eq!(reader.get_byte(), 0x01);
        assert_eq!(reader.get_u16(), u16::MAX);
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.get_u64(), u64::MAX);
        assert_eq!(reader.get_byte(), NOT_AVAILABLE_U8);
        assert_eq!(reader.get_var_str(), b"");
    }

    #[test]
    fn test_var_str_cut_by_payload_end_keeps_present_bytes() {
        let msg = N2kMessage::from_payload(126985, 2, &[7, 0x01, b'B', b'i', b'l']);
        let mut reader = msg.reader();
        assert_eq!(reader.get_var_str(), b"Bil");
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_var_str_other_encoding_is_skipped() {
        let msg = N2kMessage::from_payload(126985, 2, &[5, 0x00, b'a', 0x00, b'b', 9]);
        let mut reader = msg.reader();
        assert_eq!(reader.get_var_str(), b"");
        assert_eq!(reader.get_byte(), 9);
    }

    #[test]
    fn test_debug_shows_hex_payload() {
        let msg = N2kMessage::from_payload(126984, 2, &[0x0F, 0xA0]);
        assert!(format!("{msg:?}").contains("0FA0"));
        assert_eq!(msg.into_payload().as_ref(), &[0x0F, 0xA0]);
    }
}
