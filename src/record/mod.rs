// src/record/mod.rs
pub mod layout;
mod header;
mod position_record;
mod raw;

pub use header::FileHeader;
pub use layout::{record_offset, FieldSpec, HEADER_SIZE, RECORD_SIZE};
pub use position_record::PositionRecord;
pub use raw::RawRecord;
