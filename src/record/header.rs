// src/record/header.rs
use crate::error::{NvtError, Result};
use crate::reader::fill_buffer;
use crate::record::layout::HEADER_SIZE;
use bytes::Bytes;
use std::io::{Read, Seek, SeekFrom, Write};

/// The opaque header at the start of an NVT file.
///
/// Its contents are never interpreted; the repair copies it to the output
/// byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    bytes: Bytes,
}

impl FileHeader {
    /// Read the header from the start of `reader`.
    ///
    /// The stream is positioned at offset 0 first, so the header can be read
    /// regardless of where a previous stage left it.
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        reader.seek(SeekFrom::Start(0))?;

        let mut bytes = vec![0u8; HEADER_SIZE];
        let filled = fill_buffer(reader, &mut bytes)?;

        if filled < HEADER_SIZE {
            return Err(NvtError::TruncatedHeader {
                expected: HEADER_SIZE,
                found: filled,
            });
        }

        Ok(FileHeader { bytes: Bytes::from(bytes) })
    }

    /// Write the header at offset 0 of `writer`
    pub fn write_to<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        writer.seek(SeekFrom::Start(0))?;
        writer.write_all(&self.bytes)?;
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_header_copied_verbatim() {
        let mut data: Vec<u8> = (0..HEADER_SIZE + 100).map(|i| (i % 251) as u8).collect();
        data[0] = b'#';
        let mut input = Cursor::new(data.clone());
        input.set_position(500);

        let header = FileHeader::read(&mut input).unwrap();
        assert_eq!(header.len(), HEADER_SIZE);
        assert_eq!(header.as_bytes(), &data[..HEADER_SIZE]);

        let mut output = Cursor::new(Vec::new());
        header.write_to(&mut output).unwrap();
        assert_eq!(output.into_inner(), &data[..HEADER_SIZE]);
    }

    #[test]
    fn test_truncated_header() {
        let mut input = Cursor::new(vec![0u8; 100]);
        let err = FileHeader::read(&mut input).unwrap_err();
        assert!(matches!(
            err,
            NvtError::TruncatedHeader { expected: HEADER_SIZE, found: 100 }
        ));
    }
}
