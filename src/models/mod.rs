//! Core data models for the Commission Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee_entry;
mod field_update;
mod flat_record;
mod monthly_figures;
mod summary;

pub use employee_entry::{EmployeeEntry, EmployeeFigures};
pub use field_update::FieldUpdate;
pub use flat_record::{FlatRecord, SaveRequest};
pub use monthly_figures::{CommissionBreakdown, MonthlyFigures};
pub use summary::LedgerSummary;
