//! Asset input validators and the closed single-column update surface.
//!
//! The narrow "update one column" path accepts only an explicit allow-list
//! of columns, each mapped to a fixed statement by the repository layer;
//! a caller-supplied column name never reaches a query string.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::CoreError;

/// Message carried by the fail-closed column validation error.
pub const INVALID_COLUMN_NAME: &str = "invalid column name";

/// Columns an asset may have changed through the single-column update path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatableColumn {
    Price,
    Quantity,
}

impl UpdatableColumn {
    /// Database column name for this variant.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Quantity => "quantity",
        }
    }
}

impl FromStr for UpdatableColumn {
    type Err = CoreError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "price" => Ok(Self::Price),
            "quantity" => Ok(Self::Quantity),
            _ => Err(CoreError::Validation(INVALID_COLUMN_NAME.to_string())),
        }
    }
}

/// A typed, validated single-column change.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetColumnChange {
    Price(Decimal),
    Quantity(i32),
}

impl AssetColumnChange {
    /// Parse an untyped `(column_name, value)` pair into a typed change.
    ///
    /// Unknown columns, ill-typed values, and negative values all fail
    /// closed before any statement executes.
    pub fn parse(column_name: &str, value: &serde_json::Value) -> Result<Self, CoreError> {
        match column_name.parse::<UpdatableColumn>()? {
            UpdatableColumn::Price => {
                let price = decimal_value(value).ok_or_else(|| {
                    CoreError::Validation("price value must be numeric".to_string())
                })?;
                if price < Decimal::ZERO {
                    return Err(CoreError::Validation(
                        "price must be non-negative".to_string(),
                    ));
                }
                Ok(Self::Price(price))
            }
            UpdatableColumn::Quantity => {
                let quantity = value
                    .as_i64()
                    .and_then(|q| i32::try_from(q).ok())
                    .ok_or_else(|| {
                        CoreError::Validation("quantity value must be an integer".to_string())
                    })?;
                if quantity < 0 {
                    return Err(CoreError::Validation(
                        "quantity must be non-negative".to_string(),
                    ));
                }
                Ok(Self::Quantity(quantity))
            }
        }
    }

    /// The column this change targets.
    pub const fn column(&self) -> UpdatableColumn {
        match self {
            Self::Price(_) => UpdatableColumn::Price,
            Self::Quantity(_) => UpdatableColumn::Quantity,
        }
    }
}

fn decimal_value(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().and_then(Decimal::from_f64),
        serde_json::Value::String(s) => Decimal::from_str(s).ok(),
        _ => None,
    }
}

/// Validate optional min/max bound pairs (weight and height).
///
/// Applied on create and update alike; a half-present pair is fine, an
/// inverted pair is rejected before any statement executes.
pub fn validate_bounds(
    min_weight: Option<i32>,
    max_weight: Option<i32>,
    min_height: Option<i32>,
    max_height: Option<i32>,
) -> Result<(), CoreError> {
    check_bound_pair("weight", min_weight, max_weight)?;
    check_bound_pair("height", min_height, max_height)?;
    Ok(())
}

fn check_bound_pair(label: &str, min: Option<i32>, max: Option<i32>) -> Result<(), CoreError> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(CoreError::Validation(format!(
                "minimum {label} {min} exceeds maximum {label} {max}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn known_columns_parse() {
        assert_eq!(
            "price".parse::<UpdatableColumn>().unwrap(),
            UpdatableColumn::Price
        );
        assert_eq!(
            "quantity".parse::<UpdatableColumn>().unwrap(),
            UpdatableColumn::Quantity
        );
    }

    #[test]
    fn unknown_column_fails_closed() {
        let err = "description".parse::<UpdatableColumn>().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == INVALID_COLUMN_NAME);

        // Near-misses are not forgiven either.
        assert!("Price".parse::<UpdatableColumn>().is_err());
        assert!("price; DROP TABLE inventory".parse::<UpdatableColumn>().is_err());
    }

    #[test]
    fn price_change_accepts_number_and_string() {
        let from_number = AssetColumnChange::parse("price", &serde_json::json!(49.99)).unwrap();
        assert_matches!(from_number, AssetColumnChange::Price(p) if p == Decimal::new(4999, 2));

        let from_string = AssetColumnChange::parse("price", &serde_json::json!("10.00")).unwrap();
        assert_matches!(from_string, AssetColumnChange::Price(p) if p == Decimal::new(1000, 2));
    }

    #[test]
    fn negative_values_are_rejected() {
        assert_matches!(
            AssetColumnChange::parse("price", &serde_json::json!(-1)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            AssetColumnChange::parse("quantity", &serde_json::json!(-3)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn quantity_requires_an_integer() {
        assert_matches!(
            AssetColumnChange::parse("quantity", &serde_json::json!(2.5)),
            Err(CoreError::Validation(_))
        );
        let change = AssetColumnChange::parse("quantity", &serde_json::json!(7)).unwrap();
        assert_eq!(change, AssetColumnChange::Quantity(7));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        assert_matches!(
            validate_bounds(Some(10), Some(5), None, None),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_bounds(None, None, Some(3), Some(1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn partial_and_ordered_bounds_pass() {
        assert!(validate_bounds(Some(1), Some(1), None, None).is_ok());
        assert!(validate_bounds(Some(1), None, None, Some(9)).is_ok());
        assert!(validate_bounds(None, None, None, None).is_ok());
    }
}
