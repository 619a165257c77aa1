//! Raw ledger types and the upstream data-source seam.
//!
//! The actual database connection is an external collaborator; the crate
//! only sees the [`LedgerSource`] trait.

mod entry;
mod source;

pub use entry::{LedgerEntry, SplitType};
pub use source::{AccountNames, BookingTypeTable, LedgerSource, MemorySource};
