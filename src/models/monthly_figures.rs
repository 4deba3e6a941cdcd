//! Monthly sales figures and the commission breakdown derived from them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EmployeeEntry;

/// The four figures derived from a month's sales and VAT.
///
/// # Example
///
/// ```
/// use commission_engine::models::CommissionBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = CommissionBreakdown::zero();
/// assert_eq!(breakdown.total_commission, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionBreakdown {
    /// Sales with VAT removed.
    pub sales_ex_vat: Decimal,
    /// The employee pool: commission rate times employee share of ex-VAT sales.
    pub total_commission: Decimal,
    /// The pool split by the fixed headcount divisor.
    pub shared_commission_per_person: Decimal,
    /// The per-person share after withholding.
    pub net_shared_commission_per_person: Decimal,
}

impl CommissionBreakdown {
    /// A breakdown for a month with no sales.
    pub fn zero() -> Self {
        Self {
            sales_ex_vat: Decimal::ZERO,
            total_commission: Decimal::ZERO,
            shared_commission_per_person: Decimal::ZERO,
            net_shared_commission_per_person: Decimal::ZERO,
        }
    }
}

/// The aggregate sales and commission record for one period.
///
/// A month owns one [`EmployeeEntry`] per roster member. The breakdown is
/// derived from `total_sales` and `vat_percent` and is only ever replaced
/// as a whole by the calculation functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyFigures {
    month: String,
    total_sales: Decimal,
    vat_percent: Decimal,
    #[serde(flatten)]
    breakdown: CommissionBreakdown,
    entries: Vec<EmployeeEntry>,
}

impl MonthlyFigures {
    pub(crate) fn new(
        month: String,
        total_sales: Decimal,
        vat_percent: Decimal,
        breakdown: CommissionBreakdown,
        entries: Vec<EmployeeEntry>,
    ) -> Self {
        Self {
            month,
            total_sales,
            vat_percent,
            breakdown,
            entries,
        }
    }

    /// The period label, conventionally a calendar month name.
    pub fn month(&self) -> &str {
        &self.month
    }

    /// Total sales including VAT.
    pub fn total_sales(&self) -> Decimal {
        self.total_sales
    }

    /// VAT in percentage points.
    pub fn vat_percent(&self) -> Decimal {
        self.vat_percent
    }

    /// All derived commission figures.
    pub fn breakdown(&self) -> CommissionBreakdown {
        self.breakdown
    }

    /// Sales with VAT removed.
    pub fn sales_ex_vat(&self) -> Decimal {
        self.breakdown.sales_ex_vat
    }

    /// The distributed commission pool.
    pub fn total_commission(&self) -> Decimal {
        self.breakdown.total_commission
    }

    /// Gross per-person share.
    pub fn shared_commission_per_person(&self) -> Decimal {
        self.breakdown.shared_commission_per_person
    }

    /// Net per-person share.
    pub fn net_shared_commission_per_person(&self) -> Decimal {
        self.breakdown.net_shared_commission_per_person
    }

    /// Entries in roster order.
    pub fn entries(&self) -> &[EmployeeEntry] {
        &self.entries
    }

    /// Looks up an entry by id.
    pub fn entry(&self, id: Uuid) -> Option<&EmployeeEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Looks up an entry by employee name.
    pub fn entry_for(&self, employee_name: &str) -> Option<&EmployeeEntry> {
        self.entries
            .iter()
            .find(|entry| entry.employee_name() == employee_name)
    }

    pub(crate) fn entry_mut(&mut self, id: Uuid) -> Option<&mut EmployeeEntry> {
        self.entries.iter_mut().find(|entry| entry.id() == id)
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [EmployeeEntry] {
        &mut self.entries
    }

    pub(crate) fn set_month(&mut self, month: String) {
        self.month = month;
    }

    pub(crate) fn set_sales(
        &mut self,
        total_sales: Decimal,
        vat_percent: Decimal,
        breakdown: CommissionBreakdown,
    ) {
        self.total_sales = total_sales;
        self.vat_percent = vat_percent;
        self.breakdown = breakdown;
    }

    #[cfg(test)]
    pub(crate) fn retain_entries<F: FnMut(&EmployeeEntry) -> bool>(&mut self, keep: F) {
        self.entries.retain(keep);
    }
}
