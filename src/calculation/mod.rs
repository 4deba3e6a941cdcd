//! Calculation logic for the Commission Engine.
//!
//! This module contains the pure functions that turn sales, VAT and overtime
//! into a reconciled payout breakdown: money rounding and parsing, the
//! monthly commission split, per-employee payouts, field and overtime
//! updates, and mapping to and from the store's flat records.

mod employee_payout;
mod field_update;
mod flat_records;
mod money;
mod monthly_commission;

pub use employee_payout::compute_employee_figures;
pub use field_update::{apply_field_update, apply_overtime_update};
pub use flat_records::{distinct_months, from_flat_records, records_for_month, to_flat_records};
pub use money::{
    MONEY_DECIMAL_PLACES, checked_money_add, checked_money_mul, ensure_non_negative, parse_money,
    parse_money_or_zero, round_money,
};
pub use monthly_commission::{compute_monthly_figures, new_monthly_figures};
