use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Split marker as stored in the ledger (jVerein `splittyp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitType {
    /// Head row of a split booking, carrying the full payment amount.
    Head,
    /// Counter row balancing the head.
    Counter,
    /// Component row of a split booking (net part or tax part).
    Part,
}

/// A raw booking row from the ledger.
///
/// `amount` is signed; positive means income on the source account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Ledger row id.
    pub id: i64,
    /// Internal id of the bank/cash account the booking ran through.
    pub account_id: i64,
    /// Booking type (Buchungsart) id; resolves to a target account number.
    pub booking_type: i64,
    /// Voucher identifier grouping related rows, e.g. a payment plus its
    /// tax split. Exported as Belegfeld 1.
    pub group_key: String,
    /// Signed amount in EUR.
    pub amount: Decimal,
    /// Booking date.
    pub date: NaiveDate,
    /// Free-text purpose (Verwendungszweck); also the export narrative.
    pub text: String,
    /// Split marker; `None` for plain bookings.
    pub split_type: Option<SplitType>,
}

impl LedgerEntry {
    /// Whether this row enters the export pipeline at all.
    ///
    /// Split heads and counter rows duplicate the amounts of their parts
    /// and are skipped; plain rows and split parts are kept.
    pub fn is_exportable(&self) -> bool {
        matches!(self.split_type, None | Some(SplitType::Part))
    }
}
