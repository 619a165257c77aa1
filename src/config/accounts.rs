use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::ledger::AccountNames;

/// Association between a ledger account display name and its DATEV number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMapping {
    /// Account name as configured in the ledger, e.g. "Hauptkonto".
    pub ledger_name: String,
    /// DATEV account number, e.g. 920.
    pub datev_account: u32,
}

impl AccountMapping {
    pub fn new(ledger_name: impl Into<String>, datev_account: u32) -> Self {
        Self {
            ledger_name: ledger_name.into(),
            datev_account,
        }
    }
}

/// Bidirectional name ↔ number table, loaded once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountTable {
    mappings: Vec<AccountMapping>,
}

impl AccountTable {
    pub fn new(mappings: Vec<AccountMapping>) -> Self {
        Self { mappings }
    }

    /// DATEV number for a ledger account name.
    pub fn datev_account(&self, ledger_name: &str) -> Option<u32> {
        self.mappings
            .iter()
            .find(|m| m.ledger_name == ledger_name)
            .map(|m| m.datev_account)
    }

    /// Ledger account name for a DATEV number.
    pub fn ledger_name(&self, datev_account: u32) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| m.datev_account == datev_account)
            .map(|m| m.ledger_name.as_str())
    }

    /// Join the ledger's internal account ids with their DATEV numbers.
    ///
    /// Every account the ledger reports must be mapped; a missing name is a
    /// configuration fault, not a per-row condition.
    pub fn resolve_ids(&self, names: &AccountNames) -> Result<HashMap<i64, u32>, ExportError> {
        let mut resolved = HashMap::with_capacity(names.len());
        for (id, name) in names {
            let datev = self.datev_account(name).ok_or_else(|| {
                ExportError::Configuration(format!(
                    "ledger account '{name}' (id {id}) has no DATEV account mapping"
                ))
            })?;
            resolved.insert(*id, datev);
        }
        Ok(resolved)
    }
}
