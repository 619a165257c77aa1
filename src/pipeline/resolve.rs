//! Temporal split resolution: turning reconciled bookings into export rows.
//!
//! A booking whose tax key is still legally in force on the booking date
//! becomes one row. A booking reported under a since-superseded tax rule
//! becomes a primary row keyed to the prior active period plus, when
//! clearing is enabled, a compensating offset row routed through the
//! clearing accounts so the pair nets to zero.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::config::{ClearingConfig, TaxRegistry};
use crate::datev::{DatevRow, PeriodBuTable};
use crate::error::ExportError;
use crate::ledger::BookingTypeTable;

use super::Booking;

/// Narrative prefix marking a compensating offset row.
pub const OFFSET_PREFIX: &str = "Ausgleich - ";

/// Resolves reconciled bookings into [`DatevRow`]s.
pub struct Resolver<'a> {
    registry: &'a TaxRegistry,
    bu_table: &'a PeriodBuTable,
    booking_types: &'a BookingTypeTable,
    /// Internal ledger account id → DATEV account number.
    datev_accounts: &'a HashMap<i64, u32>,
    clearing: ClearingConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(
        registry: &'a TaxRegistry,
        bu_table: &'a PeriodBuTable,
        booking_types: &'a BookingTypeTable,
        datev_accounts: &'a HashMap<i64, u32>,
        clearing: ClearingConfig,
    ) -> Self {
        Self {
            registry,
            bu_table,
            booking_types,
            datev_accounts,
            clearing,
        }
    }

    /// Emit the row(s) for one booking. When a split pair is produced the
    /// primary row precedes its offset row.
    pub fn resolve(&self, booking: &Booking) -> Result<Vec<DatevRow>, ExportError> {
        let target_account = *self
            .booking_types
            .get(&booking.booking_type)
            .ok_or_else(|| {
                ExportError::Configuration(format!(
                    "booking type {} has no target account (group {})",
                    booking.booking_type, booking.group_key
                ))
            })?;
        let source_account = *self
            .datev_accounts
            .get(&booking.account_id)
            .ok_or_else(|| {
                ExportError::Configuration(format!(
                    "ledger account id {} has no DATEV number (group {})",
                    booking.account_id, booking.group_key
                ))
            })?;

        // Positive amounts debit the target account, negative ones the source.
        let positive = booking.amount >= Decimal::ZERO;
        let (account, contra_account) = if positive {
            (target_account, source_account)
        } else {
            (source_account, target_account)
        };

        let mut primary = DatevRow {
            amount: booking.amount.abs(),
            account,
            contra_account,
            bu_key: None,
            date: booking.date,
            document_number: booking.group_key.clone(),
            posting_text: booking.text.clone(),
            service_date: None,
            tax_period_date: None,
        };

        let Some(key) = booking.tax_key else {
            return Ok(vec![primary]);
        };

        let tax_account = self.registry.by_key(key)?;
        if tax_account.is_active(booking.date) {
            primary.bu_key = Some(self.bu_table.lookup(key, booking.date)?);
            return Ok(vec![primary]);
        }

        // Retroactive: key the row to the last period the rate was in
        // force and record both dates for the tax office.
        let service_date = tax_account.previous_active_end(booking.date)?;
        primary.bu_key = Some(self.bu_table.lookup(key, service_date)?);
        primary.service_date = Some(service_date);
        primary.tax_period_date = Some(booking.date);

        if !self.clearing.enabled {
            return Ok(vec![primary]);
        }

        let mut offset = DatevRow {
            amount: booking.amount.abs(),
            account,
            contra_account,
            bu_key: None,
            date: booking.date,
            document_number: booking.group_key.clone(),
            posting_text: format!("{OFFSET_PREFIX}{}", booking.text),
            service_date: None,
            tax_period_date: None,
        };

        if positive {
            primary.contra_account = self.clearing.creditor_account;
            offset.account = source_account;
            offset.contra_account = self.clearing.creditor_account;
        } else {
            primary.account = self.clearing.debtor_account;
            offset.account = self.clearing.debtor_account;
            offset.contra_account = source_account;
        }

        Ok(vec![primary, offset])
    }
}
