//! Totals across every month held in a ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Overall figures for a set of months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Number of months held.
    pub total_months: usize,
    /// Sum of sales including VAT.
    pub total_sales: Decimal,
    /// Sum of the distributed commission pools.
    pub total_commission: Decimal,
    /// Mean net per-person share per month, rounded to cents.
    pub average_net_shared_per_person: Decimal,
}
