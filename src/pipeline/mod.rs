//! The core transformation: tax-split reconciliation and retroactive
//! period resolution.

mod reconcile;
mod resolve;

pub use reconcile::{Booking, reconcile};
pub use resolve::{OFFSET_PREFIX, Resolver};
