//! State transitions for a month.
//!
//! Both transitions are pure: they validate and compute everything first and
//! return a new [`MonthlyFigures`], leaving the input untouched on error.

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::CommissionPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeFigures, FieldUpdate, MonthlyFigures};

use super::employee_payout::compute_employee_figures;
use super::monthly_commission::compute_monthly_figures;

/// Applies a field edit and cascades the recalculation.
///
/// A sales or VAT change recomputes the breakdown and then every entry's
/// payout from its existing overtime. A month change only relabels the month
/// and its entries.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::{apply_field_update, new_monthly_figures};
/// use commission_engine::config::CommissionPolicy;
/// use commission_engine::models::FieldUpdate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let policy = CommissionPolicy::default();
/// let month = new_monthly_figures(&policy);
/// let month = apply_field_update(&month, FieldUpdate::TotalSales(Decimal::from(100000)), &policy)
///     .unwrap();
///
/// assert_eq!(month.net_shared_commission_per_person(), Decimal::from_str("2115.27").unwrap());
/// assert!(month.entries().iter().all(|e| e.final_amount() == Decimal::from_str("2115.27").unwrap()));
/// ```
pub fn apply_field_update(
    figures: &MonthlyFigures,
    update: FieldUpdate,
    policy: &CommissionPolicy,
) -> EngineResult<MonthlyFigures> {
    match update {
        FieldUpdate::Month(month) => {
            let mut updated = figures.clone();
            for entry in updated.entries_mut() {
                entry.set_month(&month);
            }
            debug!(month = %month, "Relabelled month");
            updated.set_month(month);
            Ok(updated)
        }
        FieldUpdate::TotalSales(total_sales) => {
            recalculate(figures, total_sales, figures.vat_percent(), policy)
        }
        FieldUpdate::VatPercent(vat_percent) => {
            recalculate(figures, figures.total_sales(), vat_percent, policy)
        }
    }
}

fn recalculate(
    figures: &MonthlyFigures,
    total_sales: Decimal,
    vat_percent: Decimal,
    policy: &CommissionPolicy,
) -> EngineResult<MonthlyFigures> {
    let breakdown = compute_monthly_figures(total_sales, vat_percent, policy)?;

    let payouts = figures
        .entries()
        .iter()
        .map(|entry| {
            compute_employee_figures(
                breakdown.net_shared_commission_per_person,
                entry.overtime(),
                policy,
            )
        })
        .collect::<EngineResult<Vec<EmployeeFigures>>>()?;

    let mut updated = figures.clone();
    updated.set_sales(total_sales, vat_percent, breakdown);

    let month = updated.month().to_string();
    for (entry, payout) in updated.entries_mut().iter_mut().zip(payouts) {
        entry.set_month(&month);
        entry.set_figures(payout);
    }

    debug!(
        total_sales = %total_sales,
        vat_percent = %vat_percent,
        net_shared = %breakdown.net_shared_commission_per_person,
        "Recalculated month"
    );

    Ok(updated)
}

/// Records an employee's overtime and recomputes only that entry.
///
/// # Errors
///
/// Returns `NotFound` if no entry has `employee_id`, or `InvalidInput` if
/// `overtime` is negative.
pub fn apply_overtime_update(
    figures: &MonthlyFigures,
    employee_id: Uuid,
    overtime: Decimal,
    policy: &CommissionPolicy,
) -> EngineResult<MonthlyFigures> {
    if figures.entry(employee_id).is_none() {
        return Err(EngineError::NotFound {
            employee_id: employee_id.to_string(),
        });
    }

    let payout =
        compute_employee_figures(figures.net_shared_commission_per_person(), overtime, policy)?;

    let mut updated = figures.clone();
    if let Some(entry) = updated.entry_mut(employee_id) {
        entry.set_overtime(overtime, payout);
    }

    debug!(
        employee_id = %employee_id,
        overtime = %overtime,
        final_amount = %payout.final_amount,
        "Updated overtime"
    );

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::new_monthly_figures;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn policy() -> CommissionPolicy {
        CommissionPolicy::default()
    }

    fn month_with_sales(sales: &str) -> MonthlyFigures {
        let month = new_monthly_figures(&policy());
        let month =
            apply_field_update(&month, FieldUpdate::Month("May".to_string()), &policy()).unwrap();
        apply_field_update(&month, FieldUpdate::TotalSales(dec(sales)), &policy()).unwrap()
    }

    #[test]
    fn test_month_label_propagates_to_entries() {
        let month = new_monthly_figures(&policy());
        let updated =
            apply_field_update(&month, FieldUpdate::Month("June".to_string()), &policy()).unwrap();

        assert_eq!(updated.month(), "June");
        assert!(updated.entries().iter().all(|e| e.month() == "June"));
        assert_eq!(updated.breakdown(), month.breakdown());
        assert_eq!(month.month(), "");
    }

    #[test]
    fn test_sales_update_recomputes_breakdown_and_entries() {
        let month = month_with_sales("100000");

        assert_eq!(month.sales_ex_vat(), dec("93457.94"));
        assert_eq!(month.net_shared_commission_per_person(), dec("2115.27"));
        for entry in month.entries() {
            assert_eq!(entry.final_amount(), dec("2115.27"));
            assert_eq!(entry.month(), "May");
        }
    }

    #[test]
    fn test_sales_update_keeps_overtime_and_moves_final_amount() {
        let month = month_with_sales("100000");
        let ting = month.entry_for("Ting").unwrap().id();
        let month = apply_overtime_update(&month, ting, dec("2000"), &policy()).unwrap();
        assert_eq!(month.entry(ting).unwrap().final_amount(), dec("4055.27"));

        let updated =
            apply_field_update(&month, FieldUpdate::TotalSales(dec("50000")), &policy()).unwrap();

        for (before, after) in month.entries().iter().zip(updated.entries()) {
            assert_eq!(before.id(), after.id());
            assert_eq!(before.overtime(), after.overtime());
            assert_eq!(before.net_overtime(), after.net_overtime());
            assert_ne!(before.final_amount(), after.final_amount());
            assert_eq!(
                after.final_amount(),
                updated.net_shared_commission_per_person() + after.net_overtime()
            );
        }
    }

    #[test]
    fn test_vat_update_recomputes() {
        let month = month_with_sales("107000");
        let updated =
            apply_field_update(&month, FieldUpdate::VatPercent(Decimal::ZERO), &policy()).unwrap();

        assert_eq!(updated.vat_percent(), Decimal::ZERO);
        assert_eq!(updated.sales_ex_vat(), dec("107000"));
        assert_eq!(month.sales_ex_vat(), dec("100000"));
    }

    #[test]
    fn test_invalid_sales_leaves_month_untouched() {
        let month = month_with_sales("100000");
        let result = apply_field_update(&month, FieldUpdate::TotalSales(dec("-5")), &policy());

        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
        assert_eq!(month.total_sales(), dec("100000"));
    }

    #[test]
    fn test_headcount_divisor_ignores_entry_count() {
        for keep in 1..=3 {
            let mut month = new_monthly_figures(&policy());
            let mut kept = 0;
            month.retain_entries(|_| {
                kept += 1;
                kept <= keep
            });
            assert_eq!(month.entries().len(), keep);

            let updated =
                apply_field_update(&month, FieldUpdate::TotalSales(dec("100000")), &policy())
                    .unwrap();
            assert_eq!(updated.shared_commission_per_person(), dec("2180.69"));
            assert_eq!(
                updated.shared_commission_per_person(),
                round_three(updated.total_commission())
            );
        }
    }

    fn round_three(total: Decimal) -> Decimal {
        crate::calculation::round_money(total / dec("3"))
    }

    #[test]
    fn test_overtime_update_touches_one_entry() {
        let month = month_with_sales("100000");
        let bank = month.entry_for("Bank").unwrap().id();

        let updated = apply_overtime_update(&month, bank, dec("2000"), &policy()).unwrap();

        let entry = updated.entry(bank).unwrap();
        assert_eq!(entry.overtime(), dec("2000"));
        assert_eq!(entry.net_overtime(), dec("1940.00"));
        assert_eq!(entry.final_amount(), dec("4055.27"));

        for name in ["Ting", "Tann"] {
            assert_eq!(updated.entry_for(name), month.entry_for(name));
        }
        assert_eq!(updated.breakdown(), month.breakdown());
    }

    #[test]
    fn test_overtime_update_unknown_id() {
        let month = month_with_sales("100000");
        let missing = Uuid::new_v4();

        match apply_overtime_update(&month, missing, dec("10"), &policy()) {
            Err(EngineError::NotFound { employee_id }) => {
                assert_eq!(employee_id, missing.to_string())
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_overtime_rejected() {
        let month = month_with_sales("100000");
        let tann = month.entry_for("Tann").unwrap().id();

        let result = apply_overtime_update(&month, tann, dec("-1"), &policy());
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }

    fn money() -> impl Strategy<Value = Decimal> {
        (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    proptest! {
        #[test]
        fn prop_repeating_an_update_changes_nothing(sales in money(), overtime in money()) {
            let month = new_monthly_figures(&policy());
            let id = month.entries()[0].id();
            let month = apply_overtime_update(&month, id, overtime, &policy()).unwrap();

            let once =
                apply_field_update(&month, FieldUpdate::TotalSales(sales), &policy()).unwrap();
            let twice =
                apply_field_update(&once, FieldUpdate::TotalSales(sales), &policy()).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_share_depends_on_headcount_not_entries(sales in money(), keep in 0usize..=3) {
            let mut month = new_monthly_figures(&policy());
            let mut seen = 0;
            month.retain_entries(|_| {
                seen += 1;
                seen <= keep
            });

            let trimmed =
                apply_field_update(&month, FieldUpdate::TotalSales(sales), &policy()).unwrap();
            let full = apply_field_update(
                &new_monthly_figures(&policy()),
                FieldUpdate::TotalSales(sales),
                &policy(),
            )
            .unwrap();
            prop_assert_eq!(trimmed.breakdown(), full.breakdown());
        }

        #[test]
        fn prop_final_amount_is_share_plus_net_overtime(sales in money(), overtime in money()) {
            let month = new_monthly_figures(&policy());
            let id = month.entries()[1].id();
            let month =
                apply_field_update(&month, FieldUpdate::TotalSales(sales), &policy()).unwrap();
            let month = apply_overtime_update(&month, id, overtime, &policy()).unwrap();

            let entry = month.entry(id).unwrap();
            prop_assert_eq!(
                entry.final_amount(),
                month.net_shared_commission_per_person() + entry.net_overtime()
            );
        }
    }
}
