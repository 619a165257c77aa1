//! Yearly export orchestration.

use std::path::{Path, PathBuf};

use chrono::{Datelike, Local};
use tracing::info;

use crate::config::{AccountTable, ExportConfig, TaxRegistry};
use crate::datev::{self, PeriodBuTable};
use crate::error::ExportError;
use crate::ledger::LedgerSource;
use crate::pipeline::{Resolver, reconcile};

/// Run the full pipeline for one calendar year and write the export file.
///
/// Fetches all bookings of the year from `source`, merges tax splits,
/// resolves retroactive periods, and writes
/// `datev_export_{year}.csv` into `out_dir`. Returns the path of the
/// written file. Any error aborts the run before the file is touched.
pub fn export_year(
    year: i32,
    source: &mut dyn LedgerSource,
    config: &ExportConfig,
    registry: &TaxRegistry,
    accounts: &AccountTable,
    out_dir: &Path,
) -> Result<PathBuf, ExportError> {
    let entries = source.entries(year)?;
    let booking_types = source.booking_types()?;
    let account_names = source.account_names()?;
    info!(year, entries = entries.len(), "ledger fetched");

    let datev_accounts = accounts.resolve_ids(&account_names)?;
    let horizon = year.max(Local::now().date_naive().year());
    let bu_table = PeriodBuTable::standard(horizon);

    let bookings = reconcile(&entries, &booking_types, registry)?;

    let resolver = Resolver::new(
        registry,
        &bu_table,
        &booking_types,
        &datev_accounts,
        config.clearing.clone(),
    );
    let mut rows = Vec::new();
    for booking in &bookings {
        rows.extend(resolver.resolve(booking)?);
    }
    info!(bookings = bookings.len(), rows = rows.len(), "batch resolved");

    datev::write_export_file(out_dir, year, config, &rows)
}
