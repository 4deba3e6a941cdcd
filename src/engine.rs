//! The commission engine.
//!
//! [`CommissionEngine`] binds the pure calculation functions to one
//! [`CommissionPolicy`], so callers never pass rates around and nothing is
//! read from global state.

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::calculation::{
    apply_field_update, apply_overtime_update, compute_employee_figures,
    compute_monthly_figures, distinct_months, from_flat_records, new_monthly_figures,
    records_for_month, to_flat_records,
};
use crate::config::{CommissionPolicy, ConfigLoader};
use crate::error::EngineResult;
use crate::models::{
    CommissionBreakdown, EmployeeFigures, FieldUpdate, FlatRecord, MonthlyFigures,
};

/// Commission calculation bound to a policy.
///
/// # Example
///
/// ```
/// use commission_engine::CommissionEngine;
/// use commission_engine::config::CommissionPolicy;
/// use commission_engine::models::FieldUpdate;
/// use rust_decimal::Decimal;
///
/// let engine = CommissionEngine::new(CommissionPolicy::default()).unwrap();
/// let month = engine.new_month();
/// let month = engine.apply_field_update(&month, FieldUpdate::Month("May".into())).unwrap();
/// let month = engine
///     .apply_field_update(&month, FieldUpdate::TotalSales(Decimal::from(100000)))
///     .unwrap();
///
/// let records = engine.to_flat_records(&month);
/// assert_eq!(records.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommissionEngine {
    policy: CommissionPolicy,
}

impl CommissionEngine {
    /// Creates an engine for the given policy.
    ///
    /// The policy goes through the same checks as a loaded configuration,
    /// so an out-of-range rate or a zero headcount is rejected here.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the policy cannot be applied.
    pub fn new(policy: CommissionPolicy) -> EngineResult<Self> {
        Ok(Self::from_config(ConfigLoader::from_policy(policy)?))
    }

    /// Creates an engine from a validated configuration.
    pub fn from_config(config: ConfigLoader) -> Self {
        Self {
            policy: config.into_policy(),
        }
    }

    /// The policy this engine applies.
    pub fn policy(&self) -> &CommissionPolicy {
        &self.policy
    }

    /// A zeroed month with one entry per roster member.
    pub fn new_month(&self) -> MonthlyFigures {
        new_monthly_figures(&self.policy)
    }

    /// See [`compute_monthly_figures`].
    pub fn compute_monthly_figures(
        &self,
        total_sales: Decimal,
        vat_percent: Decimal,
    ) -> EngineResult<CommissionBreakdown> {
        compute_monthly_figures(total_sales, vat_percent, &self.policy)
    }

    /// See [`compute_employee_figures`].
    pub fn compute_employee_figures(
        &self,
        net_shared_commission_per_person: Decimal,
        overtime: Decimal,
    ) -> EngineResult<EmployeeFigures> {
        compute_employee_figures(net_shared_commission_per_person, overtime, &self.policy)
    }

    /// See [`apply_field_update`].
    pub fn apply_field_update(
        &self,
        figures: &MonthlyFigures,
        update: FieldUpdate,
    ) -> EngineResult<MonthlyFigures> {
        apply_field_update(figures, update, &self.policy)
    }

    /// See [`apply_overtime_update`].
    pub fn apply_overtime_update(
        &self,
        figures: &MonthlyFigures,
        employee_id: Uuid,
        overtime: Decimal,
    ) -> EngineResult<MonthlyFigures> {
        apply_overtime_update(figures, employee_id, overtime, &self.policy)
    }

    /// See [`to_flat_records`].
    pub fn to_flat_records(&self, figures: &MonthlyFigures) -> Vec<FlatRecord> {
        to_flat_records(figures, &self.policy)
    }

    /// See [`from_flat_records`].
    pub fn from_flat_records(&self, records: &[FlatRecord]) -> EngineResult<MonthlyFigures> {
        from_flat_records(records)
    }

    /// Rebuilds one month out of a store listing that may hold several.
    pub fn load_month(&self, records: &[FlatRecord], month: &str) -> EngineResult<MonthlyFigures> {
        let matching = records_for_month(records, month);
        debug!(
            month,
            matching = matching.len(),
            total = records.len(),
            "Filtered records for month"
        );
        from_flat_records(&matching)
    }

    /// Distinct month labels present in a store listing.
    pub fn available_months(&self, records: &[FlatRecord]) -> Vec<String> {
        distinct_months(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn may_and_june(engine: &CommissionEngine) -> Vec<FlatRecord> {
        let mut records = Vec::new();
        for (label, sales) in [("May", "100000"), ("June", "53500")] {
            let month = engine.new_month();
            let month = engine
                .apply_field_update(&month, FieldUpdate::Month(label.to_string()))
                .unwrap();
            let month = engine
                .apply_field_update(&month, FieldUpdate::TotalSales(dec(sales)))
                .unwrap();
            records.extend(engine.to_flat_records(&month));
        }
        records
    }

    #[test]
    fn test_default_engine_uses_default_policy() {
        let engine = CommissionEngine::default();
        assert_eq!(engine.policy(), &CommissionPolicy::default());
        assert_eq!(engine.new_month().entries().len(), 3);
    }

    #[test]
    fn test_engine_from_config_directory() {
        let loader = ConfigLoader::load("./config/default").unwrap();
        let engine = CommissionEngine::from_config(loader);
        assert_eq!(engine.policy().roster, vec!["Ting", "Bank", "Tann"]);
    }

    #[test]
    fn test_compute_through_engine() {
        let engine = CommissionEngine::default();
        let breakdown = engine.compute_monthly_figures(dec("100000"), dec("7")).unwrap();
        let payout = engine
            .compute_employee_figures(breakdown.net_shared_commission_per_person, dec("2000"))
            .unwrap();
        assert_eq!(payout.final_amount, dec("4055.27"));
    }

    #[test]
    fn test_engine_respects_custom_headcount() {
        let engine = CommissionEngine::new(CommissionPolicy {
            headcount: 4,
            ..CommissionPolicy::default()
        })
        .unwrap();
        let breakdown = engine.compute_monthly_figures(dec("100000"), dec("7")).unwrap();
        // 6542.06 / 4 = 1635.515
        assert_eq!(breakdown.shared_commission_per_person, dec("1635.52"));
    }

    #[test]
    fn test_new_rejects_invalid_policy() {
        let result = CommissionEngine::new(CommissionPolicy {
            withholding_rate: dec("1.5"),
            ..CommissionPolicy::default()
        });
        match result {
            Err(EngineError::ConfigInvalid { field, .. }) => assert_eq!(field, "withholding_rate"),
            other => panic!("Expected ConfigInvalid, got {:?}", other),
        }

        assert!(matches!(
            CommissionEngine::new(CommissionPolicy {
                headcount: 0,
                ..CommissionPolicy::default()
            }),
            Err(EngineError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn test_available_months_and_load_month() {
        let engine = CommissionEngine::default();
        let records = may_and_june(&engine);

        assert_eq!(engine.available_months(&records), vec!["May", "June"]);

        let june = engine.load_month(&records, "June").unwrap();
        assert_eq!(june.month(), "June");
        assert_eq!(june.total_sales(), dec("53500"));
        assert_eq!(june.sales_ex_vat(), dec("50000"));
        assert_eq!(june.entries().len(), 3);
    }

    #[test]
    fn test_load_unknown_month_is_empty_error() {
        let engine = CommissionEngine::default();
        let records = may_and_june(&engine);
        assert!(matches!(
            engine.load_month(&records, "December"),
            Err(EngineError::EmptyRecords)
        ));
    }
}
