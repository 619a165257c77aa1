//! Static run configuration: export parameters, account mapping, and the
//! tax-account registry. All of it is loaded once at startup and never
//! modified during a run.

mod accounts;
mod tax;

pub use accounts::{AccountMapping, AccountTable};
pub use tax::{DateRange, TaxAccount, TaxRegistry};

use serde::{Deserialize, Serialize};

/// Clearing accounts used when a booking must be reported under an
/// earlier tax period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearingConfig {
    /// Emit the compensating offset row and reroute through the clearing
    /// accounts. When disabled only the primary row is written, with the
    /// originally assigned accounts.
    pub enabled: bool,
    /// Debitor clearing account, used when the amount is negative.
    pub debtor_account: u32,
    /// Kreditor clearing account, used when the amount is positive.
    pub creditor_account: u32,
}

impl Default for ClearingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debtor_account: 9999,
            creditor_account: 99999,
        }
    }
}

/// Configuration for the EXTF export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// DATEV consultant number (Beraternummer).
    pub consultant_number: u32,
    /// DATEV client number (Mandantennummer).
    pub client_number: u32,
    /// G/L account length (Sachkontenlänge), typically 4.
    pub account_length: u8,
    /// Dictation mark (Diktatkürzel), upper-case initials of the operator.
    pub dictation_mark: String,
    /// Lock postings on import (Festschreibung).
    pub lock_postings: bool,
    /// Retroactive-period clearing behavior.
    pub clearing: ClearingConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            consultant_number: 123,
            client_number: 321,
            account_length: 4,
            dictation_mark: "VR".into(),
            lock_postings: true,
            clearing: ClearingConfig::default(),
        }
    }
}

/// Builder for [`ExportConfig`].
///
/// # Example
///
/// ```
/// use kassenwart::config::ExportConfigBuilder;
///
/// let config = ExportConfigBuilder::new(12345, 99999)
///     .dictation_mark("AB")
///     .build();
/// assert_eq!(config.consultant_number, 12345);
/// ```
pub struct ExportConfigBuilder {
    config: ExportConfig,
}

impl ExportConfigBuilder {
    /// Create a builder with the required consultant and client numbers.
    pub fn new(consultant_number: u32, client_number: u32) -> Self {
        Self {
            config: ExportConfig {
                consultant_number,
                client_number,
                ..Default::default()
            },
        }
    }

    /// Set the G/L account length.
    pub fn account_length(mut self, len: u8) -> Self {
        self.config.account_length = len;
        self
    }

    /// Set the dictation mark (max 2 chars by convention).
    pub fn dictation_mark(mut self, mark: impl Into<String>) -> Self {
        self.config.dictation_mark = mark.into();
        self
    }

    /// Enable or disable posting lock on import.
    pub fn lock_postings(mut self, lock: bool) -> Self {
        self.config.lock_postings = lock;
        self
    }

    /// Override the clearing-account behavior.
    pub fn clearing(mut self, clearing: ClearingConfig) -> Self {
        self.config.clearing = clearing;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ExportConfig {
        self.config
    }
}
