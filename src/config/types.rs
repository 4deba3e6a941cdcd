//! Configuration types for commission calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the combined
//! [`CommissionPolicy`] injected into the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rates and divisors from `policy.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Share of ex-VAT sales paid out as commission (0.10 = 10%).
    pub commission_rate: Decimal,
    /// Share of the commission distributed to employees.
    pub employee_share: Decimal,
    /// Flat withholding applied to shared commission and to overtime.
    pub withholding_rate: Decimal,
    /// Fixed divisor used to split the pooled commission.
    pub headcount: u32,
    /// VAT percentage used for newly created months.
    pub default_vat_percent: Decimal,
}

/// Roster file structure from `roster.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Employee identifiers in display order.
    pub employees: Vec<String>,
}

/// The complete commission policy.
///
/// Every business constant lives here so policy changes never require
/// touching the calculation code.
///
/// # Example
///
/// ```
/// use commission_engine::config::CommissionPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = CommissionPolicy::default();
/// assert_eq!(policy.headcount, 3);
/// assert_eq!(policy.default_vat_percent, Decimal::new(7, 0));
/// assert!(policy.is_on_roster("Bank"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionPolicy {
    /// Share of ex-VAT sales paid out as commission.
    pub commission_rate: Decimal,
    /// Share of the commission distributed to employees.
    pub employee_share: Decimal,
    /// Flat withholding rate.
    pub withholding_rate: Decimal,
    /// Fixed headcount divisor.
    pub headcount: u32,
    /// Default VAT percentage for new months.
    pub default_vat_percent: Decimal,
    /// Valid employee identifiers, in creation order.
    pub roster: Vec<String>,
}

impl CommissionPolicy {
    /// Combines the two configuration files into a policy.
    pub fn from_parts(policy: PolicyConfig, roster: RosterConfig) -> Self {
        Self {
            commission_rate: policy.commission_rate,
            employee_share: policy.employee_share,
            withholding_rate: policy.withholding_rate,
            headcount: policy.headcount,
            default_vat_percent: policy.default_vat_percent,
            roster: roster.employees,
        }
    }

    /// Returns true if `name` is one of the roster identifiers.
    pub fn is_on_roster(&self, name: &str) -> bool {
        self.roster.iter().any(|member| member == name)
    }

    /// The multiplier that leaves an amount after withholding (0.97 for 3%).
    pub fn retained_after_withholding(&self) -> Decimal {
        Decimal::ONE - self.withholding_rate
    }
}

impl Default for CommissionPolicy {
    fn default() -> Self {
        Self {
            commission_rate: Decimal::new(10, 2),
            employee_share: Decimal::new(70, 2),
            withholding_rate: Decimal::new(3, 2),
            headcount: 3,
            default_vat_percent: Decimal::new(7, 0),
            roster: vec!["Ting".to_string(), "Bank".to_string(), "Tann".to_string()],
        }
    }
}
