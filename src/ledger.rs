//! The working set of months being edited.
//!
//! A [`CommissionLedger`] is the in-memory collection a front end holds:
//! months are added with defaults, edited through the engine, flattened for
//! saving, and replaced wholesale when a month is loaded back.

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::calculation::{checked_money_add, round_money};
use crate::engine::CommissionEngine;
use crate::error::{EngineError, EngineResult};
use crate::models::{FieldUpdate, FlatRecord, LedgerSummary, MonthlyFigures, SaveRequest};

/// An ordered collection of months sharing one engine.
#[derive(Debug, Clone)]
pub struct CommissionLedger {
    engine: CommissionEngine,
    months: Vec<MonthlyFigures>,
}

impl CommissionLedger {
    /// Creates an empty ledger.
    pub fn new(engine: CommissionEngine) -> Self {
        Self {
            engine,
            months: Vec::new(),
        }
    }

    /// The engine used for every edit.
    pub fn engine(&self) -> &CommissionEngine {
        &self.engine
    }

    /// Months in the order they were added.
    pub fn months(&self) -> &[MonthlyFigures] {
        &self.months
    }

    /// Appends a zeroed month and returns its index.
    pub fn add_month(&mut self) -> usize {
        self.months.push(self.engine.new_month());
        self.months.len() - 1
    }

    /// Removes and returns the month at `index`.
    pub fn remove_month(&mut self, index: usize) -> EngineResult<MonthlyFigures> {
        if index >= self.months.len() {
            return Err(EngineError::MonthNotFound { index });
        }
        Ok(self.months.remove(index))
    }

    /// Applies a field edit to the month at `index`.
    pub fn update_field(
        &mut self,
        index: usize,
        update: FieldUpdate,
    ) -> EngineResult<&MonthlyFigures> {
        let current = self.month_at(index)?;
        let updated = self.engine.apply_field_update(current, update)?;
        Ok(self.replace_at(index, updated))
    }

    /// Records overtime for one entry of the month at `index`.
    pub fn update_overtime(
        &mut self,
        index: usize,
        employee_id: Uuid,
        overtime: Decimal,
    ) -> EngineResult<&MonthlyFigures> {
        let current = self.month_at(index)?;
        let updated = self.engine.apply_overtime_update(current, employee_id, overtime)?;
        Ok(self.replace_at(index, updated))
    }

    /// Flattens every month, keeping only valid entries.
    pub fn to_flat_records(&self) -> Vec<FlatRecord> {
        self.months
            .iter()
            .flat_map(|month| self.engine.to_flat_records(month))
            .collect()
    }

    /// The body the persistence client posts to save every month.
    pub fn save_request(&self) -> SaveRequest {
        SaveRequest::new(self.to_flat_records())
    }

    /// Replaces the whole collection with a single loaded month.
    pub fn replace_with(&mut self, figures: MonthlyFigures) {
        debug!(month = %figures.month(), "Replacing ledger with loaded month");
        self.months = vec![figures];
    }

    /// Totals across all months.
    ///
    /// Sales and commission are summed; the net per-person share is
    /// averaged over the number of months. An empty ledger yields zeros.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a total does not fit in a `Decimal`.
    ///
    /// # Example
    ///
    /// ```
    /// use commission_engine::{CommissionEngine, CommissionLedger};
    /// use rust_decimal::Decimal;
    ///
    /// let ledger = CommissionLedger::new(CommissionEngine::default());
    /// let summary = ledger.summary().unwrap();
    /// assert_eq!(summary.total_months, 0);
    /// assert_eq!(summary.average_net_shared_per_person, Decimal::ZERO);
    /// ```
    pub fn summary(&self) -> EngineResult<LedgerSummary> {
        let total_sales = self.sum_of("totalSales", MonthlyFigures::total_sales)?;
        let total_commission = self.sum_of("totalCommission", MonthlyFigures::total_commission)?;
        let net_shared = self.sum_of(
            "netSharedCommission",
            MonthlyFigures::net_shared_commission_per_person,
        )?;

        let average_net_shared_per_person = if self.months.is_empty() {
            round_money(Decimal::ZERO)
        } else {
            round_money(net_shared / Decimal::from(self.months.len()))
        };

        Ok(LedgerSummary {
            total_months: self.months.len(),
            total_sales: round_money(total_sales),
            total_commission: round_money(total_commission),
            average_net_shared_per_person,
        })
    }

    fn sum_of(&self, field: &str, value: fn(&MonthlyFigures) -> Decimal) -> EngineResult<Decimal> {
        self.months.iter().try_fold(Decimal::ZERO, |total, month| {
            checked_money_add(field, total, value(month))
        })
    }

    fn month_at(&self, index: usize) -> EngineResult<&MonthlyFigures> {
        self.months
            .get(index)
            .ok_or(EngineError::MonthNotFound { index })
    }

    fn replace_at(&mut self, index: usize, figures: MonthlyFigures) -> &MonthlyFigures {
        self.months[index] = figures;
        &self.months[index]
    }
}
