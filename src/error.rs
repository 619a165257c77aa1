use chrono::NaiveDate;
use thiserror::Error;

use crate::datev::TaxKey;
use crate::ledger::LedgerEntry;

/// Errors that can occur while building a Buchungsstapel export.
///
/// Every variant is fatal for the run: the batch is a deterministic
/// transform, so the fix is always to correct the source data or the
/// configuration and run again.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// Static tables are missing or contradictory.
    #[error("configuration fault: {0}")]
    Configuration(String),

    /// No configured tax account matches the requested key or account.
    #[error("unknown tax account: {0}")]
    UnknownTaxAccount(String),

    /// A tax split has no corresponding net booking in its group.
    #[error(
        "cannot find matching net booking for tax split\n  {candidate:?}\nin group:\n{}",
        format_group(.group)
    )]
    NoMatchingNetEntry {
        candidate: Box<LedgerEntry>,
        group: Vec<LedgerEntry>,
    },

    /// A tax split matches more than one net booking in its group.
    #[error(
        "net booking for tax split is not unique\n  {candidate:?}\nin group:\n{}",
        format_group(.group)
    )]
    AmbiguousNetEntry {
        candidate: Box<LedgerEntry>,
        group: Vec<LedgerEntry>,
    },

    /// No BU-Schlüssel period covers the date for this key.
    #[error("no BU-Schlüssel period covers {date} for {key:?}")]
    NoMatchingPeriod { key: TaxKey, date: NaiveDate },

    /// A booking predates every active range of its tax account.
    #[error("no active tax period before {date} for tax account {account}")]
    NoPriorActivePeriod { account: u32, date: NaiveDate },

    /// The upstream ledger store failed to deliver data.
    #[error("ledger source error: {0}")]
    Source(String),

    /// Writing the export file failed.
    #[error("write error: {0}")]
    Write(#[from] std::io::Error),
}

fn format_group(group: &[LedgerEntry]) -> String {
    group
        .iter()
        .map(|e| format!("  {e:?}"))
        .collect::<Vec<_>>()
        .join("\n")
}
