// src/record/layout.rs
//! Byte layout of an NVT file.
//!
//! The file is a fixed 16 KiB header followed by tightly packed,
//! little-endian position records. Every field of a record is described by a
//! [`FieldSpec`] so readers and writers never depend on native struct layout.

use std::ops::Range;

/// Size of the opaque text header at the start of every NVT file
pub const HEADER_SIZE: usize = 0x4000;

/// Number of raw points stored in each record
pub const POINTS_COUNT: usize = 400;

/// Number of targets stored in each record
pub const TARGETS_COUNT: usize = 50;

/// Location of one field inside a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub offset: usize,
    /// Width of a single element in bytes
    pub width: usize,
    /// Number of elements (1 for scalars)
    pub count: usize,
}

impl FieldSpec {
    const fn first(name: &'static str, width: usize, count: usize) -> Self {
        FieldSpec { name, offset: 0, width, count }
    }

    const fn after(prev: &FieldSpec, name: &'static str, width: usize, count: usize) -> Self {
        FieldSpec { name, offset: prev.end(), width, count }
    }

    /// Total size of the field in bytes
    pub const fn size(&self) -> usize {
        self.width * self.count
    }

    /// Offset of the first byte past this field
    pub const fn end(&self) -> usize {
        self.offset + self.size()
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

pub const STX: FieldSpec = FieldSpec::first("stx", 2, 1);
pub const ID: FieldSpec = FieldSpec::after(&STX, "id", 2, 1);
pub const DATA_SIZE: FieldSpec = FieldSpec::after(&ID, "data_size", 2, 1);
pub const TIMESTAMP: FieldSpec = FieldSpec::after(&DATA_SIZE, "timestamp", 8, 1);
pub const POINTS: FieldSpec = FieldSpec::after(&TIMESTAMP, "points", 4, POINTS_COUNT);
pub const CRC: FieldSpec = FieldSpec::after(&POINTS, "crc", 2, 1);
pub const EXTRACTED_X: FieldSpec = FieldSpec::after(&CRC, "extracted_x", 4, 1);
pub const EXTRACTED_Y: FieldSpec = FieldSpec::after(&EXTRACTED_X, "extracted_y", 4, 1);
pub const EXTRACTED_ANGLE: FieldSpec = FieldSpec::after(&EXTRACTED_Y, "extracted_angle", 4, 1);
pub const TARGETS: FieldSpec = FieldSpec::after(&EXTRACTED_ANGLE, "targets", 4, TARGETS_COUNT);

/// All record fields in file order
pub const FIELDS: [FieldSpec; 10] = [
    STX,
    ID,
    DATA_SIZE,
    TIMESTAMP,
    POINTS,
    CRC,
    EXTRACTED_X,
    EXTRACTED_Y,
    EXTRACTED_ANGLE,
    TARGETS,
];

/// Size of one position record; also the seek stride for random access
pub const RECORD_SIZE: usize = TARGETS.end();

/// Absolute file offset of the record with the given index
pub fn record_offset(index: u64) -> u64 {
    HEADER_SIZE as u64 + index * RECORD_SIZE as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_size() {
        assert_eq!(RECORD_SIZE, 1828);
        assert_eq!(HEADER_SIZE, 16384);
    }

    #[test]
    fn test_fields_are_contiguous() {
        let mut expected_offset = 0;
        for field in FIELDS.iter() {
            assert_eq!(field.offset, expected_offset, "gap before {}", field.name);
            expected_offset = field.end();
        }
        assert_eq!(expected_offset, RECORD_SIZE);
    }

    #[test]
    fn test_position_field_offsets() {
        assert_eq!(TIMESTAMP.offset, 6);
        assert_eq!(CRC.offset, 1614);
        assert_eq!(EXTRACTED_X.offset, 1616);
        assert_eq!(EXTRACTED_Y.offset, 1620);
        assert_eq!(EXTRACTED_ANGLE.offset, 1624);
        assert_eq!(TARGETS.range(), 1628..1828);
    }

    #[test]
    fn test_record_offset() {
        assert_eq!(record_offset(0), 16384);
        assert_eq!(record_offset(1), 16384 + 1828);
        assert_eq!(record_offset(1_000_000), 16384 + 1_828_000_000);
    }
}
