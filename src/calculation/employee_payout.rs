//! Per-employee payout calculation.

use rust_decimal::Decimal;

use crate::config::CommissionPolicy;
use crate::error::EngineResult;
use crate::models::EmployeeFigures;

use super::money::{checked_money_add, checked_money_mul, ensure_non_negative, round_money};

/// Computes an employee's net overtime and final payout.
///
/// Overtime is withheld at the flat policy rate on its own; the withholding
/// already applied to the shared commission is not compounded.
///
/// # Arguments
///
/// * `net_shared_commission_per_person` - The month's net per-person share
/// * `overtime` - Gross overtime for the employee
/// * `policy` - The commission policy supplying the withholding rate
///
/// # Returns
///
/// An [`EmployeeFigures`] with:
/// - `net_overtime`: overtime after withholding, rounded to cents
/// - `final_amount`: the net share plus `net_overtime`, rounded to cents
///
/// # Errors
///
/// Returns `InvalidInput` if either input is negative, or if the payout
/// does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::compute_employee_figures;
/// use commission_engine::config::CommissionPolicy;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let figures = compute_employee_figures(
///     Decimal::from_str("2115.27").unwrap(),
///     Decimal::from(2000),
///     &CommissionPolicy::default(),
/// )
/// .unwrap();
///
/// assert_eq!(figures.net_overtime, Decimal::from_str("1940.00").unwrap());
/// assert_eq!(figures.final_amount, Decimal::from_str("4055.27").unwrap());
/// ```
pub fn compute_employee_figures(
    net_shared_commission_per_person: Decimal,
    overtime: Decimal,
    policy: &CommissionPolicy,
) -> EngineResult<EmployeeFigures> {
    ensure_non_negative("netSharedCommission", net_shared_commission_per_person)?;
    ensure_non_negative("overtime", overtime)?;

    let net_overtime = round_money(checked_money_mul(
        "overtime",
        overtime,
        policy.retained_after_withholding(),
    )?);
    let final_amount = round_money(checked_money_add(
        "finalAmount",
        net_shared_commission_per_person,
        net_overtime,
    )?);

    Ok(EmployeeFigures {
        net_overtime,
        final_amount,
    })
}
