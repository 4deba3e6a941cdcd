//! The denormalized record shape exchanged with the external store.
//!
//! One [`FlatRecord`] holds one employee's payout together with a copy of
//! the month's shared figures. Keys are camelCase and amounts are written as
//! JSON numbers. Reading is lenient: a cell that is blank, missing or not a
//! number becomes `0`, and a missing text cell becomes an empty string.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::calculation::parse_money_or_zero;

/// One employee's row in the external store.
///
/// # Example
///
/// ```
/// use commission_engine::models::FlatRecord;
/// use rust_decimal::Decimal;
///
/// let record: FlatRecord = serde_json::from_str(
///     r#"{"month":"May","employeeName":"Ting","overtime":"","finalAmount":4055.27}"#,
/// ).unwrap();
/// assert_eq!(record.overtime, Decimal::ZERO);
/// assert_eq!(record.final_amount, Decimal::new(405527, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRecord {
    /// Period label.
    #[serde(default, deserialize_with = "lenient_text")]
    pub month: String,
    /// Sales including VAT.
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient_money"
    )]
    pub total_sales: Decimal,
    /// VAT in percentage points.
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient_money"
    )]
    pub vat_percent: Decimal,
    /// Sales with VAT removed.
    #[serde(
        rename = "salesExVAT",
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient_money"
    )]
    pub sales_ex_vat: Decimal,
    /// The distributed commission pool.
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient_money"
    )]
    pub total_commission: Decimal,
    /// Roster identifier.
    #[serde(default, deserialize_with = "lenient_text")]
    pub employee_name: String,
    /// Gross per-person share.
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient_money"
    )]
    pub shared_commission: Decimal,
    /// Net per-person share.
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient_money"
    )]
    pub net_shared_commission: Decimal,
    /// Gross overtime.
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient_money"
    )]
    pub overtime: Decimal,
    /// Overtime after withholding.
    #[serde(
        rename = "netOT",
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient_money"
    )]
    pub net_ot: Decimal,
    /// Final payout.
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient_money"
    )]
    pub final_amount: Decimal,
}

/// Body posted to the store when saving records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    /// Always `"save"`.
    pub action: String,
    /// Records to append.
    pub data: Vec<FlatRecord>,
}

impl SaveRequest {
    /// Wraps records in a save request.
    pub fn new(data: Vec<FlatRecord>) -> Self {
        Self {
            action: "save".to_string(),
            data,
        }
    }
}

fn lenient_money<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(parse_money_or_zero(&raw))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_json() -> Value {
        json!({
            "month": "TestMonth",
            "totalSales": 100000,
            "vatPercent": 7,
            "salesExVAT": 93457.94,
            "totalCommission": 6542.06,
            "sharedCommission": 2180.69,
            "netSharedCommission": 2115.27,
            "employeeName": "Ting",
            "overtime": 2000,
            "netOT": 1940,
            "finalAmount": 4055.27
        })
    }

    #[test]
    fn test_deserialize_store_row() {
        let record: FlatRecord = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(record.month, "TestMonth");
        assert_eq!(record.employee_name, "Ting");
        assert_eq!(record.total_sales, dec("100000"));
        assert_eq!(record.sales_ex_vat, dec("93457.94"));
        assert_eq!(record.net_shared_commission, dec("2115.27"));
        assert_eq!(record.net_ot, dec("1940"));
        assert_eq!(record.final_amount, dec("4055.27"));
    }

    #[test]
    fn test_serialize_uses_wire_keys_and_numbers() {
        let record: FlatRecord = serde_json::from_value(sample_json()).unwrap();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["salesExVAT"], json!(93457.94));
        assert_eq!(json["netOT"], json!(1940.0));
        assert_eq!(json["finalAmount"], json!(4055.27));
        assert_eq!(json["employeeName"], json!("Ting"));
        assert!(json.get("sales_ex_vat").is_none());
    }

    #[test]
    fn test_malformed_numeric_cells_become_zero() {
        let record: FlatRecord = serde_json::from_value(json!({
            "month": "May",
            "employeeName": "Bank",
            "totalSales": "not a number",
            "vatPercent": "",
            "overtime": null,
            "netOT": "12,5",
            "finalAmount": "300.10"
        }))
        .unwrap();

        assert_eq!(record.total_sales, Decimal::ZERO);
        assert_eq!(record.vat_percent, Decimal::ZERO);
        assert_eq!(record.overtime, Decimal::ZERO);
        assert_eq!(record.net_ot, Decimal::ZERO);
        assert_eq!(record.final_amount, dec("300.10"));
        assert_eq!(record.sales_ex_vat, Decimal::ZERO);
    }

    #[test]
    fn test_missing_and_odd_text_cells() {
        let record: FlatRecord = serde_json::from_value(json!({
            "month": 5,
            "employeeName": null
        }))
        .unwrap();
        assert_eq!(record.month, "5");
        assert_eq!(record.employee_name, "");
    }

    #[test]
    fn test_save_request_shape() {
        let record: FlatRecord = serde_json::from_value(sample_json()).unwrap();
        let json = serde_json::to_value(SaveRequest::new(vec![record])).unwrap();
        assert_eq!(json["action"], "save");
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }
}
