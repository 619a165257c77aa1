//! Encoding of a single Buchungsstapel data row.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::BuSchluessel;
use super::columns::{COLUMN_COUNT, field};

/// One data row of the export, in the fixed 124-field layout.
///
/// Produced by the resolver and never mutated afterwards. `amount` is the
/// absolute value; DATEV derives the direction from the account pair.
#[derive(Debug, Clone, PartialEq)]
pub struct DatevRow {
    /// Absolute gross amount (Umsatz).
    pub amount: Decimal,
    /// Konto.
    pub account: u32,
    /// Gegenkonto (ohne BU-Schlüssel).
    pub contra_account: u32,
    /// Numeric BU-Schlüssel, if the booking carries tax.
    pub bu_key: Option<BuSchluessel>,
    /// Belegdatum; the year comes from the header.
    pub date: NaiveDate,
    /// Belegfeld 1, the voucher identifier.
    pub document_number: String,
    /// Buchungstext.
    pub posting_text: String,
    /// Leistungsdatum, set for retroactively reported bookings.
    pub service_date: Option<NaiveDate>,
    /// Datum Zuord. Steuerperiode, set for retroactively reported bookings.
    pub tax_period_date: Option<NaiveDate>,
}

impl DatevRow {
    /// Render all 124 fields in column order. Unset fields stay empty.
    ///
    /// Formatting only — malformed upstream values pass through unchanged.
    pub fn to_fields(&self) -> Vec<String> {
        let mut fields = vec![String::new(); COLUMN_COUNT];
        fields[field::UMSATZ] = format_amount(self.amount);
        fields[field::WKZ_UMSATZ] = "EUR".into();
        fields[field::KONTO] = self.account.to_string();
        fields[field::GEGENKONTO] = self.contra_account.to_string();
        if let Some(bu) = self.bu_key {
            fields[field::BU_SCHLUESSEL] = bu.0.to_string();
        }
        fields[field::BELEGDATUM] = self.date.format("%d%m").to_string();
        fields[field::BELEGFELD_1] = self.document_number.clone();
        fields[field::BUCHUNGSTEXT] = strip_line_breaks(&self.posting_text);
        if let Some(d) = self.service_date {
            fields[field::LEISTUNGSDATUM] = d.format("%d%m%Y").to_string();
        }
        if let Some(d) = self.tax_period_date {
            fields[field::DATUM_ZUORD_STEUERPERIODE] = d.format("%d%m%Y").to_string();
        }
        fields
    }
}

/// German amount formatting: absolute value, comma separator, 2 decimals.
pub(crate) fn format_amount(amount: Decimal) -> String {
    let scaled = amount.abs().round_dp(2);
    format!("{scaled:.2}").replace('.', ",")
}

fn strip_line_breaks(text: &str) -> String {
    text.replace(['\r', '\n'], "")
}
