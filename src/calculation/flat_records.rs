//! Mapping between a month and the store's flat records.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::CommissionPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CommissionBreakdown, EmployeeEntry, EmployeeFigures, FlatRecord, MonthlyFigures,
};

/// Flattens a month into one record per valid entry.
///
/// An entry is valid when its employee is on the roster and the month label
/// is non-empty. Invalid entries are skipped silently. Records keep the
/// entry order.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::{new_monthly_figures, to_flat_records};
/// use commission_engine::config::CommissionPolicy;
///
/// let policy = CommissionPolicy::default();
/// let unnamed = new_monthly_figures(&policy);
/// assert!(to_flat_records(&unnamed, &policy).is_empty());
/// ```
pub fn to_flat_records(figures: &MonthlyFigures, policy: &CommissionPolicy) -> Vec<FlatRecord> {
    if figures.month().is_empty() {
        return Vec::new();
    }

    let breakdown = figures.breakdown();
    figures
        .entries()
        .iter()
        .filter(|entry| policy.is_on_roster(entry.employee_name()))
        .map(|entry| FlatRecord {
            month: figures.month().to_string(),
            total_sales: figures.total_sales(),
            vat_percent: figures.vat_percent(),
            sales_ex_vat: breakdown.sales_ex_vat,
            total_commission: breakdown.total_commission,
            employee_name: entry.employee_name().to_string(),
            shared_commission: breakdown.shared_commission_per_person,
            net_shared_commission: breakdown.net_shared_commission_per_person,
            overtime: entry.overtime(),
            net_ot: entry.net_overtime(),
            final_amount: entry.final_amount(),
        })
        .collect()
}

/// Rebuilds a month from its stored records.
///
/// Shared figures come from the first record; each record becomes one entry
/// with a fresh id. Stored values are taken as-is, nothing is recomputed.
///
/// Callers are expected to pass records for a single month (see
/// [`records_for_month`]). Mixed months are not rejected: the first record
/// wins and a warning is logged.
///
/// # Errors
///
/// Returns `EmptyRecords` if `records` is empty.
pub fn from_flat_records(records: &[FlatRecord]) -> EngineResult<MonthlyFigures> {
    let first = records.first().ok_or(EngineError::EmptyRecords)?;

    if let Some(other) = records.iter().find(|record| record.month != first.month) {
        warn!(
            expected = %first.month,
            found = %other.month,
            "Records span more than one month; using shared figures from the first record"
        );
    }

    let entries = records
        .iter()
        .map(|record| {
            EmployeeEntry::restore(
                record.employee_name.clone(),
                record.month.clone(),
                record.overtime,
                EmployeeFigures {
                    net_overtime: record.net_ot,
                    final_amount: record.final_amount,
                },
            )
        })
        .collect();

    debug!(month = %first.month, records = records.len(), "Rebuilt month from records");

    Ok(MonthlyFigures::new(
        first.month.clone(),
        first.total_sales,
        first.vat_percent,
        CommissionBreakdown {
            sales_ex_vat: first.sales_ex_vat,
            total_commission: first.total_commission,
            shared_commission_per_person: first.shared_commission,
            net_shared_commission_per_person: first.net_shared_commission,
        },
        entries,
    ))
}

/// Lists the distinct, non-empty month labels in first-seen order.
pub fn distinct_months(records: &[FlatRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|record| record.month.as_str())
        .filter(|month| !month.is_empty())
        .filter(|month| seen.insert(*month))
        .map(str::to_string)
        .collect()
}

/// Selects the records belonging to one month.
pub fn records_for_month(records: &[FlatRecord], month: &str) -> Vec<FlatRecord> {
    records
        .iter()
        .filter(|record| record.month == month)
        .cloned()
        .collect()
}
