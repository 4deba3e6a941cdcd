//! Request types for the Commission Engine API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{FieldUpdate, FlatRecord, MonthlyFigures};

/// Request body for `POST /monthly-figures`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMonthRequest {
    /// Optional label for the new month.
    #[serde(default)]
    pub month: Option<String>,
}

/// Request body for `POST /monthly-figures/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyFiguresRequest {
    /// Sales including VAT.
    pub total_sales: Decimal,
    /// VAT in percentage points; the policy default when omitted.
    #[serde(default)]
    pub vat_percent: Option<Decimal>,
}

/// Request body for `POST /employee-figures/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeFiguresRequest {
    /// The month's net per-person share.
    pub net_shared_commission_per_person: Decimal,
    /// Gross overtime.
    pub overtime: Decimal,
}

/// Request body for `POST /monthly-figures/update`.
///
/// The field is named on the wire so unknown names can be reported as
/// `INVALID_FIELD` rather than a generic JSON error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldUpdateRequest {
    /// The month being edited.
    pub figures: MonthlyFigures,
    /// Wire name of the field (`month`, `totalSales`, `vatPercent`).
    pub field: String,
    /// New value, as a JSON string or number.
    pub value: Value,
}

impl FieldUpdateRequest {
    /// Parses the named field and value into an update.
    pub fn to_update(&self) -> EngineResult<FieldUpdate> {
        let raw = match &self.value {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        FieldUpdate::parse(&self.field, &raw)
    }
}

/// Request body for `POST /monthly-figures/overtime`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeUpdateRequest {
    /// The month being edited.
    pub figures: MonthlyFigures,
    /// Id of the entry to update.
    pub employee_id: Uuid,
    /// New gross overtime.
    pub overtime: Decimal,
}

/// Request body for `POST /records/rebuild`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebuildRequest {
    /// Records as returned by the store.
    pub records: Vec<FlatRecord>,
    /// When set, only records for this month are used.
    #[serde(default)]
    pub month: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::CommissionEngine;
    use serde_json::json;

    fn field_request(field: &str, value: Value) -> FieldUpdateRequest {
        FieldUpdateRequest {
            figures: CommissionEngine::default().new_month(),
            field: field.to_string(),
            value,
        }
    }

    #[test]
    fn test_deserialize_monthly_request_without_vat() {
        let request: MonthlyFiguresRequest =
            serde_json::from_str(r#"{"total_sales": 100000}"#).unwrap();
        assert_eq!(request.total_sales, Decimal::from(100000));
        assert!(request.vat_percent.is_none());
    }

    #[test]
    fn test_deserialize_employee_request_from_strings() {
        let request: EmployeeFiguresRequest = serde_json::from_str(
            r#"{"net_shared_commission_per_person": "2115.27", "overtime": "2000"}"#,
        )
        .unwrap();
        assert_eq!(request.overtime, Decimal::from(2000));
    }

    #[test]
    fn test_field_value_number_and_string() {
        assert_eq!(
            field_request("totalSales", json!(100000)).to_update().unwrap(),
            FieldUpdate::TotalSales(Decimal::from(100000))
        );
        assert_eq!(
            field_request("vatPercent", json!("7")).to_update().unwrap(),
            FieldUpdate::VatPercent(Decimal::from(7))
        );
        assert_eq!(
            field_request("month", json!("May")).to_update().unwrap(),
            FieldUpdate::Month("May".to_string())
        );
    }

    #[test]
    fn test_field_value_errors() {
        assert!(matches!(
            field_request("finalAmount", json!(1)).to_update(),
            Err(EngineError::InvalidField { .. })
        ));
        assert!(matches!(
            field_request("totalSales", json!(null)).to_update(),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_rebuild_request_month_optional() {
        let request: RebuildRequest = serde_json::from_str(r#"{"records": []}"#).unwrap();
        assert!(request.records.is_empty());
        assert!(request.month.is_none());
    }
}
