//! Purchase submission parsing and validation.
//!
//! The recorder is invoked from more than one context: browser clients
//! POST the payload directly, while dispatch layers hand over an envelope
//! whose `body` member carries the payload as a nested JSON string. One
//! normalization step detects the shape and unwraps it, so validation and
//! everything downstream see a single canonical [`PurchaseSubmission`].
//!
//! Validation runs to completion before any store call, so a rejected
//! submission never leaves a partial record behind.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use carbon_tracker_core::{DEFAULT_DELIVERY_MODE, UserId};

use crate::error::AppError;

/// Exact message required for a missing user id, on either endpoint.
pub const USER_ID_MISSING: &str = "UserId query parameter missing";

/// A validated purchase submission, ready for record creation.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseSubmission {
    pub user_id: UserId,
    pub product_name: String,
    pub weight: Decimal,
    pub shipping_distance: Decimal,
    pub delivery_mode: String,
}

/// Parse and validate a raw request body into a submission.
///
/// # Errors
///
/// Returns `AppError::Validation` when the body or envelope is not valid
/// JSON, or when a required field is missing, empty, or not a
/// non-negative number.
pub fn parse_submission(raw: &str) -> Result<PurchaseSubmission, AppError> {
    let outer: Value = serde_json::from_str(raw)
        .map_err(|_| AppError::Validation("request body is not valid JSON".to_string()))?;
    let payload = unwrap_envelope(outer)?;

    let Some(fields) = payload.as_object() else {
        return Err(AppError::Validation(
            "request body must be a JSON object".to_string(),
        ));
    };

    let user_id = fields
        .get("UserId")
        .and_then(Value::as_str)
        .and_then(|s| UserId::parse(s).ok())
        .ok_or_else(|| AppError::Validation(USER_ID_MISSING.to_string()))?;

    let product_name = fields
        .get("ProductName")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("ProductName field missing or empty".to_string()))?
        .to_owned();

    let weight = decimal_field(fields.get("Weight"), "Weight")?;
    let shipping_distance = decimal_field(fields.get("ShippingDistance"), "ShippingDistance")?;

    let delivery_mode = fields
        .get("DeliveryMode")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_DELIVERY_MODE)
        .to_owned();

    Ok(PurchaseSubmission {
        user_id,
        product_name,
        weight,
        shipping_distance,
        delivery_mode,
    })
}

/// Detect and unwrap a request envelope.
///
/// An object whose `body` member is a string is a wrapped request; the
/// string is deserialized into the inner payload. Anything else is
/// already the payload.
fn unwrap_envelope(value: Value) -> Result<Value, AppError> {
    match value.get("body").and_then(Value::as_str) {
        Some(inner) => serde_json::from_str(inner)
            .map_err(|_| AppError::Validation("request body is not valid JSON".to_string())),
        None => Ok(value),
    }
}

/// Coerce a field to a non-negative decimal.
///
/// JSON numbers go through their textual form, so `2`, `2.5`, and `"2.5"`
/// all coerce to the same exact decimal value.
fn decimal_field(value: Option<&Value>, name: &str) -> Result<Decimal, AppError> {
    let invalid = || AppError::Validation(format!("{name} must be a non-negative number"));

    let parsed = match value {
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string()).map_err(|_| invalid())?,
        Some(Value::String(s)) => Decimal::from_str(s.trim()).map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    if parsed.is_sign_negative() {
        return Err(invalid());
    }
    Ok(parsed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(message) => message,
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_direct_payload() {
        let submission = parse_submission(
            r#"{"UserId":"u1","ProductName":"Widget","Weight":2,"ShippingDistance":100}"#,
        )
        .unwrap();

        assert_eq!(submission.user_id.as_str(), "u1");
        assert_eq!(submission.product_name, "Widget");
        assert_eq!(submission.weight, Decimal::from(2));
        assert_eq!(submission.shipping_distance, Decimal::from(100));
        assert_eq!(submission.delivery_mode, "Standard");
    }

    #[test]
    fn test_enveloped_payload() {
        let submission = parse_submission(
            r#"{"body":"{\"UserId\":\"u1\",\"ProductName\":\"Widget\",\"Weight\":2,\"ShippingDistance\":100}"}"#,
        )
        .unwrap();
        assert_eq!(submission.product_name, "Widget");
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let submission = parse_submission(
            r#"{"UserId":"u1","ProductName":"Widget","Weight":"2.5","ShippingDistance":" 10 "}"#,
        )
        .unwrap();
        assert_eq!(submission.weight, Decimal::from_str("2.5").unwrap());
        assert_eq!(submission.shipping_distance, Decimal::from(10));
    }

    #[test]
    fn test_fractional_number_coerces_exactly() {
        // 0.3 as a JSON number must arrive as the decimal 0.3, not the
        // nearest binary float expansion
        let submission = parse_submission(
            r#"{"UserId":"u1","ProductName":"Widget","Weight":0.3,"ShippingDistance":1}"#,
        )
        .unwrap();
        assert_eq!(submission.weight, Decimal::from_str("0.3").unwrap());
    }

    #[test]
    fn test_delivery_mode_passed_through() {
        let submission = parse_submission(
            r#"{"UserId":"u1","ProductName":"Widget","Weight":1,"ShippingDistance":1,"DeliveryMode":"Ground"}"#,
        )
        .unwrap();
        assert_eq!(submission.delivery_mode, "Ground");
    }

    #[test]
    fn test_missing_user_id_has_exact_message() {
        let err =
            parse_submission(r#"{"ProductName":"Widget","Weight":1,"ShippingDistance":1}"#)
                .unwrap_err();
        assert_eq!(message(err), USER_ID_MISSING);
    }

    #[test]
    fn test_empty_user_id_has_exact_message() {
        let err = parse_submission(
            r#"{"UserId":"","ProductName":"Widget","Weight":1,"ShippingDistance":1}"#,
        )
        .unwrap_err();
        assert_eq!(message(err), USER_ID_MISSING);
    }

    #[test]
    fn test_missing_product_name() {
        let err = parse_submission(r#"{"UserId":"u1","Weight":1,"ShippingDistance":1}"#)
            .unwrap_err();
        assert_eq!(message(err), "ProductName field missing or empty");
    }

    #[test]
    fn test_non_numeric_weight() {
        let err = parse_submission(
            r#"{"UserId":"u1","ProductName":"Widget","Weight":"heavy","ShippingDistance":1}"#,
        )
        .unwrap_err();
        assert_eq!(message(err), "Weight must be a non-negative number");
    }

    #[test]
    fn test_negative_distance() {
        let err = parse_submission(
            r#"{"UserId":"u1","ProductName":"Widget","Weight":1,"ShippingDistance":-7}"#,
        )
        .unwrap_err();
        assert_eq!(message(err), "ShippingDistance must be a non-negative number");
    }

    #[test]
    fn test_invalid_outer_json() {
        let err = parse_submission("not json").unwrap_err();
        assert_eq!(message(err), "request body is not valid JSON");
    }

    #[test]
    fn test_invalid_inner_json() {
        let err = parse_submission(r#"{"body":"not json"}"#).unwrap_err();
        assert_eq!(message(err), "request body is not valid JSON");
    }
}
