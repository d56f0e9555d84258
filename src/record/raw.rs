// src/record/raw.rs
use crate::error::{NvtError, Result};
use crate::record::layout::{self, FieldSpec, RECORD_SIZE};
use crate::types::Position;
use byteorder::{ByteOrder, LittleEndian};

/// The exact bytes of one position record.
///
/// Streaming stages move records around as `RawRecord` so every byte they do
/// not explicitly touch is carried through verbatim. Accessors decode single
/// fields through the layout table.
#[derive(Clone, PartialEq, Eq)]
pub struct RawRecord {
    bytes: Box<[u8; RECORD_SIZE]>,
}

impl RawRecord {
    /// A record with every byte set to zero
    pub fn zeroed() -> Self {
        RawRecord { bytes: Box::new([0u8; RECORD_SIZE]) }
    }

    /// Copy a record out of a byte slice of exactly `RECORD_SIZE` bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != RECORD_SIZE {
            return Err(NvtError::InvalidRecordLength {
                expected: RECORD_SIZE,
                found: bytes.len(),
            });
        }
        let mut record = Self::zeroed();
        record.bytes.copy_from_slice(bytes);
        Ok(record)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.bytes[..]
    }

    fn field(&self, spec: FieldSpec) -> &[u8] {
        &self.bytes[spec.range()]
    }

    fn field_mut(&mut self, spec: FieldSpec) -> &mut [u8] {
        &mut self.bytes[spec.range()]
    }

    pub fn timestamp(&self) -> u64 {
        LittleEndian::read_u64(self.field(layout::TIMESTAMP))
    }

    pub fn x(&self) -> i32 {
        LittleEndian::read_i32(self.field(layout::EXTRACTED_X))
    }

    pub fn y(&self) -> i32 {
        LittleEndian::read_i32(self.field(layout::EXTRACTED_Y))
    }

    pub fn angle(&self) -> i32 {
        LittleEndian::read_i32(self.field(layout::EXTRACTED_ANGLE))
    }

    pub fn position(&self) -> Position {
        Position::new(self.x(), self.y(), self.angle())
    }

    /// Overwrite the extracted x, y and angle, leaving every other byte intact
    pub fn set_position(&mut self, position: Position) {
        LittleEndian::write_i32(self.field_mut(layout::EXTRACTED_X), position.x);
        LittleEndian::write_i32(self.field_mut(layout::EXTRACTED_Y), position.y);
        LittleEndian::write_i32(self.field_mut(layout::EXTRACTED_ANGLE), position.angle);
    }
}

impl Default for RawRecord {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl std::fmt::Debug for RawRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawRecord")
            .field("timestamp", &self.timestamp())
            .field("position", &self.position())
            .finish_non_exhaustive()
    }
}
