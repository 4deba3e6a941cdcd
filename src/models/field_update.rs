//! Field-level updates to a month.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::parse_money;
use crate::error::{EngineError, EngineResult};

/// A single edit to the user-editable fields of a month.
///
/// Only the inputs can be edited. The derived breakdown is recomputed by
/// [`apply_field_update`](crate::calculation::apply_field_update) and can
/// never be set directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    /// Rename the period; mirrored onto every entry.
    Month(String),
    /// New sales total including VAT.
    TotalSales(Decimal),
    /// New VAT percentage.
    VatPercent(Decimal),
}

impl FieldUpdate {
    /// Builds an update from a wire field name and its raw value.
    ///
    /// # Example
    ///
    /// ```
    /// use commission_engine::models::FieldUpdate;
    /// use rust_decimal::Decimal;
    ///
    /// let update = FieldUpdate::parse("vatPercent", "7").unwrap();
    /// assert_eq!(update, FieldUpdate::VatPercent(Decimal::new(7, 0)));
    ///
    /// assert!(FieldUpdate::parse("salesExVAT", "1").is_err());
    /// ```
    pub fn parse(field: &str, raw: &str) -> EngineResult<Self> {
        match field {
            "month" => Ok(Self::Month(raw.to_string())),
            "totalSales" | "totalSalesInclVat" => {
                Ok(Self::TotalSales(parse_money(field, raw)?))
            }
            "vatPercent" => Ok(Self::VatPercent(parse_money(field, raw)?)),
            _ => Err(EngineError::InvalidField {
                field: field.to_string(),
            }),
        }
    }

    /// The wire name of the field this update targets.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Month(_) => "month",
            Self::TotalSales(_) => "totalSales",
            Self::VatPercent(_) => "vatPercent",
        }
    }

    /// True when applying this update changes the commission breakdown.
    pub fn triggers_recalculation(&self) -> bool {
        !matches!(self, Self::Month(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recognized_fields() {
        assert_eq!(
            FieldUpdate::parse("month", "March").unwrap(),
            FieldUpdate::Month("March".to_string())
        );
        assert_eq!(
            FieldUpdate::parse("totalSales", "100000").unwrap(),
            FieldUpdate::TotalSales(Decimal::new(100000, 0))
        );
        assert_eq!(
            FieldUpdate::parse("totalSalesInclVat", "5.5").unwrap(),
            FieldUpdate::TotalSales(Decimal::new(55, 1))
        );
    }

    #[test]
    fn test_parse_derived_field_is_invalid() {
        for field in [
            "salesExVAT",
            "totalCommission",
            "sharedCommission",
            "netSharedCommission",
            "entries",
            "",
        ] {
            match FieldUpdate::parse(field, "1") {
                Err(EngineError::InvalidField { field: f }) => assert_eq!(f, field),
                other => panic!("Expected InvalidField for {:?}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_parse_non_numeric_value_is_invalid_input() {
        match FieldUpdate::parse("totalSales", "lots") {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "totalSales"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_recalculation_flag() {
        assert!(!FieldUpdate::Month("May".to_string()).triggers_recalculation());
        assert!(FieldUpdate::TotalSales(Decimal::ONE).triggers_recalculation());
        assert!(FieldUpdate::VatPercent(Decimal::ONE).triggers_recalculation());
    }

    #[test]
    fn test_serde_shape() {
        let update: FieldUpdate =
            serde_json::from_str(r#"{"field":"totalSales","value":"2500.50"}"#).unwrap();
        assert_eq!(update, FieldUpdate::TotalSales(Decimal::new(250050, 2)));
        assert_eq!(update.field_name(), "totalSales");

        let json = serde_json::to_string(&FieldUpdate::Month("July".to_string())).unwrap();
        assert_eq!(json, r#"{"field":"month","value":"July"}"#);
    }
}
