//! Booking reconciliation: merging tax-split rows into their net rows.
//!
//! jVerein books a taxed payment as two rows sharing a voucher: the net
//! amount on the revenue/expense booking type and the tax amount on a
//! configured tax account. DATEV wants one gross row carrying the
//! BU-Schlüssel, so each tax row has to be paired with exactly one net
//! row and folded into it.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::config::TaxRegistry;
use crate::datev::TaxKey;
use crate::error::ExportError;
use crate::ledger::{BookingTypeTable, LedgerEntry};

/// A reconciled booking: gross amount, tax key assigned where a split was
/// merged. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub account_id: i64,
    pub booking_type: i64,
    pub group_key: String,
    /// Gross amount (net plus merged tax), still signed.
    pub amount: Decimal,
    pub date: NaiveDate,
    pub text: String,
    pub tax_key: Option<TaxKey>,
}

impl Booking {
    fn from_entry(entry: &LedgerEntry) -> Self {
        Self {
            account_id: entry.account_id,
            booking_type: entry.booking_type,
            group_key: entry.group_key.clone(),
            amount: entry.amount,
            date: entry.date,
            text: entry.text.clone(),
            tax_key: None,
        }
    }
}

/// Merge tax splits into their net bookings, per (account, voucher) group.
///
/// A tax row matches a net row when the tax recomputed from the net amount
/// lands within one cent of the tax row's amount, the tax row's narrative
/// starts with the net row's narrative, and the net row has not absorbed a
/// split yet. Anything other than exactly one match aborts the run with
/// the full group attached for operator diagnosis.
///
/// Bookings whose final amount is zero carry no reportable value and are
/// dropped.
pub fn reconcile(
    entries: &[LedgerEntry],
    booking_types: &BookingTypeTable,
    registry: &TaxRegistry,
) -> Result<Vec<Booking>, ExportError> {
    let mut groups: BTreeMap<(i64, &str), Vec<&LedgerEntry>> = BTreeMap::new();
    for entry in entries.iter().filter(|e| e.is_exportable()) {
        groups
            .entry((entry.account_id, entry.group_key.as_str()))
            .or_default()
            .push(entry);
    }

    let cent = dec!(0.01);
    let mut out = Vec::new();

    for group in groups.values() {
        let (tax_splits, net_rows): (Vec<&LedgerEntry>, Vec<&LedgerEntry>) =
            group.iter().copied().partition(|e| {
                registry
                    .by_booking_type(booking_types, e.booking_type)
                    .is_some()
            });

        let mut bookings: Vec<Booking> =
            net_rows.iter().map(|e| Booking::from_entry(e)).collect();

        for candidate in tax_splits {
            // by_booking_type succeeded in the partition above
            let account = registry
                .by_booking_type(booking_types, candidate.booking_type)
                .ok_or_else(|| {
                    ExportError::UnknownTaxAccount(format!(
                        "booking type {} vanished from the registry",
                        candidate.booking_type
                    ))
                })?;

            let matches: Vec<usize> = bookings
                .iter()
                .enumerate()
                .filter(|(_, b)| {
                    b.tax_key.is_none()
                        && (account.expected_tax(b.amount) - candidate.amount).abs() <= cent
                        && candidate.text.starts_with(&b.text)
                })
                .map(|(i, _)| i)
                .collect();

            let index = match matches.as_slice() {
                [i] => *i,
                [] => {
                    return Err(ExportError::NoMatchingNetEntry {
                        candidate: Box::new(candidate.clone()),
                        group: group.iter().map(|e| (**e).clone()).collect(),
                    });
                }
                _ => {
                    return Err(ExportError::AmbiguousNetEntry {
                        candidate: Box::new(candidate.clone()),
                        group: group.iter().map(|e| (**e).clone()).collect(),
                    });
                }
            };

            let net = &mut bookings[index];
            debug!(
                group_key = %net.group_key,
                net_amount = %net.amount,
                tax_amount = %candidate.amount,
                "merging tax split"
            );
            net.amount = (net.amount + candidate.amount).round_dp(2);
            net.tax_key = Some(account.key);
        }

        out.extend(bookings.into_iter().filter(|b| !b.amount.is_zero()));
    }

    Ok(out)
}
