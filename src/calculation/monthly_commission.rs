//! Monthly commission calculation.
//!
//! Turns a month's sales total and VAT rate into the shared commission
//! breakdown. Each step consumes the rounded result of the previous one:
//!
//! 1. `sales_ex_vat = total_sales / (1 + vat_percent / 100)`
//! 2. `total_commission = sales_ex_vat * commission_rate * employee_share`
//! 3. `shared = total_commission / headcount`
//! 4. `net_shared = shared * (1 - withholding_rate)`

use rust_decimal::Decimal;

use crate::config::CommissionPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{CommissionBreakdown, EmployeeEntry, MonthlyFigures};

use super::money::{checked_money_mul, ensure_non_negative, round_money};

/// Computes the commission breakdown for a month.
///
/// The pool is always divided by `policy.headcount`, never by the number of
/// entries a month happens to hold.
///
/// # Arguments
///
/// * `total_sales` - Sales for the month, including VAT
/// * `vat_percent` - VAT in percentage points (`7` means 7%)
/// * `policy` - The commission policy supplying rates and headcount
///
/// # Returns
///
/// A [`CommissionBreakdown`] with every figure rounded to cents:
/// - `sales_ex_vat`: sales with VAT removed
/// - `total_commission`: the employees' share of the commission pool
/// - `shared_commission_per_person`: the pool split by headcount
/// - `net_shared_commission_per_person`: the split after withholding
///
/// # Errors
///
/// Returns `InvalidInput` if either input is negative or the commission
/// does not fit in a `Decimal`, and `ConfigInvalid` if the policy headcount
/// is zero.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::compute_monthly_figures;
/// use commission_engine::config::CommissionPolicy;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let policy = CommissionPolicy::default();
/// let breakdown =
///     compute_monthly_figures(Decimal::from(100000), Decimal::from(7), &policy).unwrap();
///
/// assert_eq!(breakdown.sales_ex_vat, Decimal::from_str("93457.94").unwrap());
/// assert_eq!(breakdown.total_commission, Decimal::from_str("6542.06").unwrap());
/// assert_eq!(breakdown.shared_commission_per_person, Decimal::from_str("2180.69").unwrap());
/// assert_eq!(breakdown.net_shared_commission_per_person, Decimal::from_str("2115.27").unwrap());
/// ```
pub fn compute_monthly_figures(
    total_sales: Decimal,
    vat_percent: Decimal,
    policy: &CommissionPolicy,
) -> EngineResult<CommissionBreakdown> {
    ensure_non_negative("totalSales", total_sales)?;
    ensure_non_negative("vatPercent", vat_percent)?;

    if policy.headcount == 0 {
        return Err(EngineError::ConfigInvalid {
            field: "headcount".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    let vat_divisor = Decimal::ONE + vat_percent / Decimal::ONE_HUNDRED;
    let sales_ex_vat = round_money(total_sales / vat_divisor);

    let commission_pool =
        checked_money_mul("totalCommission", sales_ex_vat, policy.commission_rate)?;
    let total_commission = round_money(checked_money_mul(
        "totalCommission",
        commission_pool,
        policy.employee_share,
    )?);

    let shared_commission_per_person =
        round_money(total_commission / Decimal::from(policy.headcount));

    let net_shared_commission_per_person = round_money(checked_money_mul(
        "netSharedCommission",
        shared_commission_per_person,
        policy.retained_after_withholding(),
    )?);

    Ok(CommissionBreakdown {
        sales_ex_vat,
        total_commission,
        shared_commission_per_person,
        net_shared_commission_per_person,
    })
}

/// Creates an empty month with one zeroed entry per roster member.
///
/// VAT starts at the policy default and the month label is empty until the
/// user names it.
pub fn new_monthly_figures(policy: &CommissionPolicy) -> MonthlyFigures {
    let entries = policy
        .roster
        .iter()
        .map(|name| EmployeeEntry::new(name.clone(), String::new()))
        .collect();

    MonthlyFigures::new(
        String::new(),
        Decimal::ZERO,
        policy.default_vat_percent,
        CommissionBreakdown::zero(),
        entries,
    )
}
