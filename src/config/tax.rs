use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::datev::TaxKey;
use crate::error::ExportError;
use crate::ledger::BookingTypeTable;

/// Closed calendar interval, both bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A configured tax account of the ledger.
///
/// Bookings on this account are tax splits of some net booking. The
/// `active_ranges` record when this rate/key combination is valid for
/// direct reporting; bookings dated outside them go through the
/// retroactive split mechanism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxAccount {
    /// Target account number the ledger's booking type resolves to.
    pub account: u32,
    /// Display name, e.g. "Umsatzsteuer Zweckbetrieb 7%".
    pub name: String,
    /// Tax rate in whole percent.
    pub rate: u8,
    /// Abstract tax key, resolved per period to the numeric BU-Schlüssel.
    pub key: TaxKey,
    /// Ordered, non-overlapping ranges during which the rate is in force.
    pub active_ranges: Vec<DateRange>,
}

impl TaxAccount {
    /// Whether the rate is valid for direct reporting on `date`.
    pub fn is_active(&self, date: NaiveDate) -> bool {
        self.active_ranges.iter().any(|r| r.contains(date))
    }

    /// End date of the latest active range strictly before `date`.
    pub fn previous_active_end(&self, date: NaiveDate) -> Result<NaiveDate, ExportError> {
        self.active_ranges
            .iter()
            .filter(|r| r.end < date)
            .map(|r| r.end)
            .max()
            .ok_or(ExportError::NoPriorActivePeriod {
                account: self.account,
                date,
            })
    }

    /// Tax amount expected for a net amount, rounded to cents.
    pub fn expected_tax(&self, net: Decimal) -> Decimal {
        (net * Decimal::from(self.rate) / Decimal::from(100u8)).round_dp(2)
    }
}

/// All configured tax accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRegistry {
    accounts: Vec<TaxAccount>,
}

impl TaxRegistry {
    /// Build the registry, checking each account's ranges are ordered and
    /// pairwise disjoint.
    pub fn new(accounts: Vec<TaxAccount>) -> Result<Self, ExportError> {
        for acc in &accounts {
            for pair in acc.active_ranges.windows(2) {
                if pair[0].end >= pair[1].start {
                    return Err(ExportError::Configuration(format!(
                        "tax account {} ('{}') has unordered or overlapping \
                         active ranges: {:?} then {:?}",
                        acc.account, acc.name, pair[0], pair[1]
                    )));
                }
            }
            for range in &acc.active_ranges {
                if range.start > range.end {
                    return Err(ExportError::Configuration(format!(
                        "tax account {} ('{}') has an inverted range: {range:?}",
                        acc.account, acc.name
                    )));
                }
            }
        }
        Ok(Self { accounts })
    }

    /// The tax account carrying the given key.
    pub fn by_key(&self, key: TaxKey) -> Result<&TaxAccount, ExportError> {
        self.accounts
            .iter()
            .find(|a| a.key == key)
            .ok_or_else(|| ExportError::UnknownTaxAccount(format!("no account for key {key:?}")))
    }

    /// The tax account with the given target account number, if any.
    pub fn by_account(&self, account: u32) -> Option<&TaxAccount> {
        self.accounts.iter().find(|a| a.account == account)
    }

    /// The tax account a ledger booking type resolves to, if any.
    ///
    /// Returns `None` both for unknown booking types and for booking types
    /// that resolve to a non-tax account.
    pub fn by_booking_type(
        &self,
        booking_types: &BookingTypeTable,
        booking_type: i64,
    ) -> Option<&TaxAccount> {
        booking_types
            .get(&booking_type)
            .and_then(|account| self.by_account(*account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datev::UstKey;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ust7() -> TaxAccount {
        TaxAccount {
            account: 9650,
            name: "Umsatzsteuer Zweckbetrieb 7%".into(),
            rate: 7,
            key: TaxKey::Ust(UstKey::K7),
            active_ranges: vec![
                DateRange::new(date(2007, 1, 1), date(2020, 6, 30)),
                DateRange::new(date(2021, 1, 1), date(2025, 12, 31)),
            ],
        }
    }

    #[test]
    fn active_inside_ranges_only() {
        let acc = ust7();
        assert!(acc.is_active(date(2020, 6, 30)));
        assert!(!acc.is_active(date(2020, 7, 1)));
        assert!(!acc.is_active(date(2020, 12, 31)));
        assert!(acc.is_active(date(2021, 1, 1)));
    }

    #[test]
    fn previous_active_end_picks_latest_earlier_range() {
        let acc = ust7();
        assert_eq!(
            acc.previous_active_end(date(2020, 8, 15)).unwrap(),
            date(2020, 6, 30)
        );
    }

    #[test]
    fn previous_active_end_before_all_ranges_fails() {
        let acc = ust7();
        let err = acc.previous_active_end(date(2006, 1, 1)).unwrap_err();
        assert!(matches!(err, ExportError::NoPriorActivePeriod { .. }));
    }

    #[test]
    fn expected_tax_rounds_to_cents() {
        let acc = ust7();
        assert_eq!(acc.expected_tax(dec!(100)), dec!(7.00));
        assert_eq!(acc.expected_tax(dec!(33.33)), dec!(2.33));
    }

    #[test]
    fn registry_rejects_overlapping_ranges() {
        let mut acc = ust7();
        acc.active_ranges = vec![
            DateRange::new(date(2007, 1, 1), date(2020, 6, 30)),
            DateRange::new(date(2020, 6, 30), date(2021, 12, 31)),
        ];
        assert!(matches!(
            TaxRegistry::new(vec![acc]),
            Err(ExportError::Configuration(_))
        ));
    }

    #[test]
    fn registry_lookup_by_key_and_account() {
        let reg = TaxRegistry::new(vec![ust7()]).unwrap();
        assert_eq!(reg.by_key(TaxKey::Ust(UstKey::K7)).unwrap().account, 9650);
        assert!(reg.by_key(TaxKey::Ust(UstKey::K19)).is_err());
        assert!(reg.by_account(9650).is_some());
        assert!(reg.by_account(9999).is_none());
    }

    #[test]
    fn registry_lookup_by_booking_type() {
        let reg = TaxRegistry::new(vec![ust7()]).unwrap();
        let table: BookingTypeTable = [(42, 9650u32), (43, 2100u32)].into_iter().collect();
        assert!(reg.by_booking_type(&table, 42).is_some());
        assert!(reg.by_booking_type(&table, 43).is_none());
        assert!(reg.by_booking_type(&table, 99).is_none());
    }
}
