//! BU-Schlüssel (tax posting keys) and their period tables.
//!
//! The numeric key DATEV expects in field 9 depends on the booking date:
//! the temporary VAT reduction in the second half of 2020 renumbered the
//! keys, and 2021 renumbered them again. The crate therefore works with
//! abstract per-rate keys and resolves them through [`PeriodBuTable`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::DateRange;
use crate::error::ExportError;

/// Numeric DATEV BU-Schlüssel as written to field 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuSchluessel(pub u8);

/// Abstract Umsatzsteuer (output tax) key, period-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UstKey {
    K0,
    K5,
    K7,
    K16,
    K19,
}

/// Abstract Vorsteuer (input tax) key, period-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VstKey {
    K5,
    K7,
    K16,
    K19,
}

/// Tax key tagged with its code space.
///
/// Output and input tax keys live in disjoint numbering spaces and are
/// looked up in separate period tables; keeping the tag in the type rules
/// out cross-space confusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxKey {
    Ust(UstKey),
    Vst(VstKey),
}

/// Date-interval tables resolving abstract keys to numeric BU-Schlüssel.
///
/// Intervals are pairwise disjoint and contiguous from 2007 up to the
/// horizon year fixed at construction time.
#[derive(Debug, Clone)]
pub struct PeriodBuTable {
    ust: Vec<(DateRange, Vec<(UstKey, u8)>)>,
    vst: Vec<(DateRange, Vec<(VstKey, u8)>)>,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid table date")
}

impl PeriodBuTable {
    /// The standard German key history: pre-2020 numbering, the 2020 H2
    /// reduced-rate interlude, and the numbering in force since 2021.
    ///
    /// `horizon_year` closes the open future edge, typically
    /// `max(export year, current year)`.
    pub fn standard(horizon_year: i32) -> Self {
        let until = date(horizon_year, 12, 31);
        Self {
            ust: vec![
                (
                    DateRange::new(date(2007, 1, 1), date(2020, 6, 30)),
                    vec![
                        (UstKey::K0, 1),
                        (UstKey::K7, 2),
                        (UstKey::K19, 3),
                        (UstKey::K16, 5),
                    ],
                ),
                (
                    DateRange::new(date(2020, 7, 1), date(2020, 12, 31)),
                    vec![
                        (UstKey::K0, 1),
                        (UstKey::K5, 2),
                        (UstKey::K16, 3),
                        (UstKey::K7, 4),
                        (UstKey::K19, 5),
                    ],
                ),
                (
                    DateRange::new(date(2021, 1, 1), until),
                    vec![
                        (UstKey::K0, 1),
                        (UstKey::K7, 2),
                        (UstKey::K19, 3),
                        (UstKey::K5, 4),
                        (UstKey::K16, 5),
                    ],
                ),
            ],
            vst: vec![
                (
                    DateRange::new(date(2007, 1, 1), date(2020, 6, 30)),
                    vec![(VstKey::K16, 7), (VstKey::K7, 8), (VstKey::K19, 9)],
                ),
                (
                    DateRange::new(date(2020, 7, 1), date(2020, 12, 31)),
                    vec![
                        (VstKey::K7, 6),
                        (VstKey::K19, 7),
                        (VstKey::K5, 8),
                        (VstKey::K16, 9),
                    ],
                ),
                (
                    DateRange::new(date(2021, 1, 1), until),
                    vec![
                        (VstKey::K5, 6),
                        (VstKey::K16, 7),
                        (VstKey::K7, 8),
                        (VstKey::K19, 9),
                    ],
                ),
            ],
        }
    }

    /// Resolve a key to the numeric BU-Schlüssel in force on `on`.
    ///
    /// Linear scan over the handful of intervals. Fails with
    /// [`ExportError::NoMatchingPeriod`] when no interval covers the date
    /// or the covering interval does not number this key.
    pub fn lookup(&self, key: TaxKey, on: NaiveDate) -> Result<BuSchluessel, ExportError> {
        let code = match key {
            TaxKey::Ust(k) => Self::scan(&self.ust, k, on),
            TaxKey::Vst(k) => Self::scan(&self.vst, k, on),
        };
        code.map(BuSchluessel)
            .ok_or(ExportError::NoMatchingPeriod { key, date: on })
    }

    fn scan<K: PartialEq + Copy>(
        periods: &[(DateRange, Vec<(K, u8)>)],
        key: K,
        on: NaiveDate,
    ) -> Option<u8> {
        periods
            .iter()
            .find(|(range, _)| range.contains(on))
            .and_then(|(_, codes)| codes.iter().find(|(k, _)| *k == key))
            .map(|(_, code)| *code)
    }
}
