// src/record/position_record.rs
use crate::error::{NvtError, Result};
use crate::record::layout::{POINTS_COUNT, RECORD_SIZE, TARGETS_COUNT};
use crate::record::RawRecord;
use crate::types::Position;
use byteorder::{LittleEndian, ReadBytesExt};
use bytes::{BufMut, BytesMut};
use std::io::Cursor;

/// A fully decoded video tracker record.
///
/// Only the timestamp and the extracted position matter to the repair; the
/// remaining fields are kept so a record can be decoded and re-encoded
/// without loss.
///
/// # Example
///
/// ```
/// use nvtfix::{PositionRecord, Position};
///
/// let record = PositionRecord::new(1_000, Position::new(120, 80, 45));
/// let raw = record.to_raw();
///
/// assert_eq!(raw.timestamp(), 1_000);
/// assert_eq!(PositionRecord::from_raw(&raw).unwrap(), record);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRecord {
    pub stx: u16,
    pub id: u16,
    pub data_size: u16,
    pub timestamp: u64,
    pub points: Vec<u32>,
    pub crc: i16,
    pub position: Position,
    pub targets: Vec<i32>,
}

impl PositionRecord {
    /// Create a record with the given timestamp and position and empty
    /// point/target buffers
    pub fn new(timestamp: u64, position: Position) -> Self {
        PositionRecord {
            stx: 0,
            id: 0,
            data_size: 0,
            timestamp,
            points: vec![0; POINTS_COUNT],
            crc: 0,
            position,
            targets: vec![0; TARGETS_COUNT],
        }
    }

    /// Decode a record from exactly `RECORD_SIZE` bytes
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != RECORD_SIZE {
            return Err(NvtError::InvalidRecordLength {
                expected: RECORD_SIZE,
                found: bytes.len(),
            });
        }

        let mut cursor = Cursor::new(bytes);
        let stx = cursor.read_u16::<LittleEndian>()?;
        let id = cursor.read_u16::<LittleEndian>()?;
        let data_size = cursor.read_u16::<LittleEndian>()?;
        let timestamp = cursor.read_u64::<LittleEndian>()?;

        let mut points = vec![0u32; POINTS_COUNT];
        cursor.read_u32_into::<LittleEndian>(&mut points)?;

        let crc = cursor.read_i16::<LittleEndian>()?;
        let x = cursor.read_i32::<LittleEndian>()?;
        let y = cursor.read_i32::<LittleEndian>()?;
        let angle = cursor.read_i32::<LittleEndian>()?;

        let mut targets = vec![0i32; TARGETS_COUNT];
        cursor.read_i32_into::<LittleEndian>(&mut targets)?;

        Ok(PositionRecord {
            stx,
            id,
            data_size,
            timestamp,
            points,
            crc,
            position: Position::new(x, y, angle),
            targets,
        })
    }

    pub fn from_raw(raw: &RawRecord) -> Result<Self> {
        Self::decode(raw.as_bytes())
    }

    /// Append the encoded record to `buf`.
    ///
    /// Point and target buffers shorter than their fixed size are zero
    /// padded; longer ones are truncated.
    pub fn encode(&self, buf: &mut BytesMut) {
        buf.reserve(RECORD_SIZE);
        buf.put_u16_le(self.stx);
        buf.put_u16_le(self.id);
        buf.put_u16_le(self.data_size);
        buf.put_u64_le(self.timestamp);
        for i in 0..POINTS_COUNT {
            buf.put_u32_le(self.points.get(i).copied().unwrap_or(0));
        }
        buf.put_i16_le(self.crc);
        buf.put_i32_le(self.position.x);
        buf.put_i32_le(self.position.y);
        buf.put_i32_le(self.position.angle);
        for i in 0..TARGETS_COUNT {
            buf.put_i32_le(self.targets.get(i).copied().unwrap_or(0));
        }
    }

    pub fn to_raw(&self) -> RawRecord {
        let mut buf = BytesMut::with_capacity(RECORD_SIZE);
        self.encode(&mut buf);
        let mut raw = RawRecord::zeroed();
        raw.as_mut_bytes().copy_from_slice(&buf);
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::layout;

    #[test]
    fn test_encode_size() {
        let mut buf = BytesMut::new();
        PositionRecord::new(1, Position::ZERO).encode(&mut buf);
        assert_eq!(buf.len(), RECORD_SIZE);
    }

    #[test]
    fn test_encode_places_fields_per_layout() {
        let mut record = PositionRecord::new(0x0102030405060708, Position::new(11, -22, 33));
        record.stx = 0x800;
        record.crc = -1;
        record.points[0] = 0xDEADBEEF;
        record.targets[TARGETS_COUNT - 1] = 77;

        let raw = record.to_raw();
        let bytes = raw.as_bytes();

        assert_eq!(&bytes[layout::STX.range()], &0x800u16.to_le_bytes());
        assert_eq!(&bytes[layout::TIMESTAMP.range()], &0x0102030405060708u64.to_le_bytes());
        assert_eq!(&bytes[layout::POINTS.offset..layout::POINTS.offset + 4], &0xDEADBEEFu32.to_le_bytes());
        assert_eq!(&bytes[layout::CRC.range()], &(-1i16).to_le_bytes());
        assert_eq!(&bytes[layout::EXTRACTED_Y.range()], &(-22i32).to_le_bytes());
        assert_eq!(&bytes[layout::TARGETS.end() - 4..], &77i32.to_le_bytes());

        assert_eq!(raw.position(), Position::new(11, -22, 33));
    }

    #[test]
    fn test_decode_preserves_unused_buffers() {
        let mut record = PositionRecord::new(9, Position::new(1, 2, 3));
        record.id = 4;
        record.data_size = 5;
        record.points = (0..POINTS_COUNT as u32).collect();
        record.targets = (0..TARGETS_COUNT as i32).map(|t| -t).collect();

        let decoded = PositionRecord::from_raw(&record.to_raw()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_decode_rejects_short_slice() {
        assert!(PositionRecord::decode(&[0u8; RECORD_SIZE - 1]).is_err());
    }
}
