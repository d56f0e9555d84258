// src/writer/mod.rs
mod copier;
mod csv_export;
mod patcher;

pub use copier::{copy_header, copy_records};
pub use csv_export::{export_csv, CSV_HEADER};
pub use patcher::{PatchSummary, Patcher};
