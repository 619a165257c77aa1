use std::collections::HashMap;

use chrono::Datelike;

use super::LedgerEntry;
use crate::error::ExportError;

/// Booking type id → target account number (jVerein `buchungsart` table).
pub type BookingTypeTable = HashMap<i64, u32>;

/// Internal account id → display name (jVerein `konto` table).
pub type AccountNames = HashMap<i64, String>;

/// Upstream ledger store.
///
/// Implementations fetch in bulk; the pipeline treats each call as atomic
/// and aborts the run on failure.
pub trait LedgerSource {
    /// All booking rows dated within the given calendar year.
    fn entries(&mut self, year: i32) -> Result<Vec<LedgerEntry>, ExportError>;

    /// The booking-type table.
    fn booking_types(&mut self) -> Result<BookingTypeTable, ExportError>;

    /// The account-name table.
    fn account_names(&mut self) -> Result<AccountNames, ExportError>;
}

/// In-memory [`LedgerSource`] for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: Vec<LedgerEntry>,
    booking_types: BookingTypeTable,
    account_names: AccountNames,
}

impl MemorySource {
    pub fn new(
        entries: Vec<LedgerEntry>,
        booking_types: BookingTypeTable,
        account_names: AccountNames,
    ) -> Self {
        Self {
            entries,
            booking_types,
            account_names,
        }
    }
}

impl LedgerSource for MemorySource {
    fn entries(&mut self, year: i32) -> Result<Vec<LedgerEntry>, ExportError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.date.year() == year)
            .cloned()
            .collect())
    }

    fn booking_types(&mut self) -> Result<BookingTypeTable, ExportError> {
        Ok(self.booking_types.clone())
    }

    fn account_names(&mut self) -> Result<AccountNames, ExportError> {
        Ok(self.account_names.clone())
    }
}
