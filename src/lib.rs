//! # kassenwart
//!
//! Converts a jVerein club ledger into a DATEV-compatible Buchungsstapel
//! (EXTF format 700, category 21). The pipeline merges jVerein's tax-split
//! rows back into gross bookings, resolves the period-dependent
//! BU-Schlüssel (including the 2020 rate-cut renumbering), generates
//! clearing split pairs for bookings that belong to an earlier tax period,
//! and writes the fixed 124-column CSV.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Format reference: <https://developer.datev.de/portal/de/dtvf/formate>
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use kassenwart::config::{DateRange, TaxAccount, TaxRegistry};
//! use kassenwart::datev::{TaxKey, UstKey};
//! use kassenwart::ledger::{BookingTypeTable, LedgerEntry};
//! use kassenwart::pipeline::reconcile;
//! use rust_decimal_macros::dec;
//!
//! let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
//! let registry = TaxRegistry::new(vec![TaxAccount {
//!     account: 9650,
//!     name: "Umsatzsteuer 19%".into(),
//!     rate: 19,
//!     key: TaxKey::Ust(UstKey::K19),
//!     active_ranges: vec![DateRange::new(
//!         NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
//!     )],
//! }])
//! .unwrap();
//! let booking_types: BookingTypeTable =
//!     [(1, 2100), (2, 9650)].into_iter().collect();
//!
//! let net = LedgerEntry {
//!     id: 1,
//!     account_id: 1,
//!     booking_type: 1,
//!     group_key: "4711".into(),
//!     amount: dec!(100.00),
//!     date,
//!     text: "Beitrag".into(),
//!     split_type: None,
//! };
//! let tax = LedgerEntry {
//!     id: 2,
//!     booking_type: 2,
//!     amount: dec!(19.00),
//!     text: "Beitrag USt".into(),
//!     ..net.clone()
//! };
//!
//! let bookings = reconcile(&[net, tax], &booking_types, &registry).unwrap();
//! assert_eq!(bookings.len(), 1);
//! assert_eq!(bookings[0].amount, dec!(119.00));
//! ```

pub mod config;
pub mod datev;
pub mod error;
pub mod export;
pub mod ledger;
pub mod pipeline;

pub use error::ExportError;
pub use export::export_year;
