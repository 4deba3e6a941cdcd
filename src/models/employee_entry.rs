//! Employee entry model and per-employee payout figures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The per-employee outputs derived from overtime and the shared commission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFigures {
    /// Overtime after withholding.
    pub net_overtime: Decimal,
    /// Net shared commission plus net overtime.
    pub final_amount: Decimal,
}

impl EmployeeFigures {
    /// Figures for an entry with no overtime and no commission.
    pub fn zero() -> Self {
        Self {
            net_overtime: Decimal::ZERO,
            final_amount: Decimal::ZERO,
        }
    }
}

/// One roster member's overtime and final payout within a month.
///
/// Entries are owned by their [`MonthlyFigures`](super::MonthlyFigures) and
/// have no lifecycle of their own. `net_overtime` and `final_amount` are
/// derived and only change through the calculation functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeEntry {
    id: Uuid,
    employee_name: String,
    month: String,
    overtime: Decimal,
    net_overtime: Decimal,
    final_amount: Decimal,
}

impl EmployeeEntry {
    /// Creates an entry with a fresh id and no overtime.
    pub(crate) fn new(employee_name: impl Into<String>, month: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_name: employee_name.into(),
            month: month.into(),
            overtime: Decimal::ZERO,
            net_overtime: Decimal::ZERO,
            final_amount: Decimal::ZERO,
        }
    }

    /// Rebuilds an entry from stored values without recomputing anything.
    pub(crate) fn restore(
        employee_name: String,
        month: String,
        overtime: Decimal,
        figures: EmployeeFigures,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_name,
            month,
            overtime,
            net_overtime: figures.net_overtime,
            final_amount: figures.final_amount,
        }
    }

    /// Unique id used to address the entry for overtime updates.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The roster identifier of the employee.
    pub fn employee_name(&self) -> &str {
        &self.employee_name
    }

    /// The month label, mirrored from the owning month.
    pub fn month(&self) -> &str {
        &self.month
    }

    /// Gross overtime amount.
    pub fn overtime(&self) -> Decimal {
        self.overtime
    }

    /// Overtime after withholding.
    pub fn net_overtime(&self) -> Decimal {
        self.net_overtime
    }

    /// Final payout.
    pub fn final_amount(&self) -> Decimal {
        self.final_amount
    }

    /// The derived figures as a pair.
    pub fn figures(&self) -> EmployeeFigures {
        EmployeeFigures {
            net_overtime: self.net_overtime,
            final_amount: self.final_amount,
        }
    }

    pub(crate) fn set_month(&mut self, month: &str) {
        self.month = month.to_string();
    }

    pub(crate) fn set_overtime(&mut self, overtime: Decimal, figures: EmployeeFigures) {
        self.overtime = overtime;
        self.set_figures(figures);
    }

    pub(crate) fn set_figures(&mut self, figures: EmployeeFigures) {
        self.net_overtime = figures.net_overtime;
        self.final_amount = figures.final_amount;
    }
}
