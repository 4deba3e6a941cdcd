//! Staff sales commission engine.
//!
//! Turns a month's VAT-inclusive sales into an equal per-person commission
//! share, adds each employee's overtime net of withholding, and converts
//! months to and from the flat record shape used by the persistence store.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod models;

pub use engine::CommissionEngine;
pub use ledger::CommissionLedger;
