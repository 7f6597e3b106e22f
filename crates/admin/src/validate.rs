//! Request body validation against the core field-constraint tables.
//!
//! The first violated constraint rejects the request with
//! `400 {label} is required`, before any persistence call runs.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use shopkeeper_core::{FieldKind, FieldSpec};

use crate::error::ApiError;

/// Validate `body` against a per-entity constraint table.
///
/// # Errors
///
/// Returns `ApiError::MissingField` naming the first absent, empty, or
/// invalid required field, or `ApiError::BadRequest` for a present but
/// malformed optional flag.
pub fn validate_body(body: &Value, table: &[FieldSpec]) -> Result<(), ApiError> {
    for spec in table {
        let value = body.get(spec.name);

        let satisfied = match spec.kind {
            FieldKind::Text | FieldKind::Ref => value
                .and_then(Value::as_str)
                .is_some_and(|s| !s.trim().is_empty()),
            FieldKind::Decimal => value.is_some_and(|v| {
                parse_decimal(v).is_some_and(|d| d > Decimal::ZERO)
            }),
            FieldKind::ImageList => value.and_then(Value::as_array).is_some_and(|images| {
                !images.is_empty()
                    && images.iter().all(|image| {
                        image
                            .get("url")
                            .and_then(Value::as_str)
                            .is_some_and(|url| !url.trim().is_empty())
                    })
            }),
            FieldKind::Flag => {
                if let Some(v) = value
                    && !v.is_boolean()
                {
                    return Err(ApiError::BadRequest(format!(
                        "{} must be a boolean",
                        spec.name
                    )));
                }
                true
            }
        };

        if spec.required && !satisfied {
            return Err(ApiError::MissingField(spec.label));
        }
    }

    Ok(())
}

/// Accept a decimal as a JSON number or a numeric string.
pub(crate) fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(_) => Decimal::from_str(&value.to_string()).ok(),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use shopkeeper_core::fields;

    #[test]
    fn test_accepts_valid_size_body() {
        let body = json!({"name": "Small", "value": "S"});
        assert!(validate_body(&body, fields::SIZE_FIELDS).is_ok());
    }

    #[test]
    fn test_rejects_empty_name_with_label() {
        let body = json!({"name": "", "value": "S"});
        let err = validate_body(&body, fields::SIZE_FIELDS).unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_rejects_absent_value() {
        let body = json!({"name": "Small"});
        let err = validate_body(&body, fields::SIZE_FIELDS).unwrap_err();
        assert_eq!(err.to_string(), "Value is required");
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let base = json!({
            "name": "Chair",
            "categoryId": "c1",
            "sizeId": "s1",
            "colorId": "k1",
            "images": [{"url": "https://img.example/a.png"}],
        });

        for bad_price in [json!(0), json!(-3), json!("0.00"), json!("nonsense")] {
            let mut body = base.clone();
            body.as_object_mut()
                .unwrap()
                .insert("price".to_string(), bad_price);
            let err = validate_body(&body, fields::PRODUCT_FIELDS).unwrap_err();
            assert_eq!(err.to_string(), "Price is required");
        }
    }

    #[test]
    fn test_accepts_price_as_number_or_string() {
        let mut body = json!({
            "name": "Chair",
            "price": "19.99",
            "categoryId": "c1",
            "sizeId": "s1",
            "colorId": "k1",
            "images": [{"url": "https://img.example/a.png"}],
        });
        assert!(validate_body(&body, fields::PRODUCT_FIELDS).is_ok());

        body.as_object_mut()
            .unwrap()
            .insert("price".to_string(), json!(19.99));
        assert!(validate_body(&body, fields::PRODUCT_FIELDS).is_ok());
    }

    #[test]
    fn test_rejects_empty_image_list() {
        let body = json!({
            "name": "Chair",
            "price": "19.99",
            "categoryId": "c1",
            "sizeId": "s1",
            "colorId": "k1",
            "images": [],
        });
        let err = validate_body(&body, fields::PRODUCT_FIELDS).unwrap_err();
        assert_eq!(err.to_string(), "Images is required");
    }

    #[test]
    fn test_rejects_non_boolean_flag() {
        let body = json!({
            "name": "Chair",
            "price": "19.99",
            "categoryId": "c1",
            "sizeId": "s1",
            "colorId": "k1",
            "images": [{"url": "https://img.example/a.png"}],
            "isFeatured": "yes",
        });
        let err = validate_body(&body, fields::PRODUCT_FIELDS).unwrap_err();
        assert!(err.to_string().contains("isFeatured"));
    }
}
