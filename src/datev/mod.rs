//! DATEV EXTF Buchungsstapel format knowledge.
//!
//! Covers the period-dependent BU-Schlüssel tables, the fixed 124-column
//! row layout, the 31-field header, and batch serialization.
//! Format reference: <https://developer.datev.de/portal/de/dtvf/formate>

mod bu_key;
pub mod columns;
mod header;
mod row;
mod writer;

pub use bu_key::{BuSchluessel, PeriodBuTable, TaxKey, UstKey, VstKey};
pub use header::header_fields;
pub use row::DatevRow;
pub use writer::{render_batch, write_export_file};
