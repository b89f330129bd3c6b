//! Carbon emission arithmetic.
//!
//! All physical quantities stay in [`Decimal`] from intake to storage so
//! repeated reads never accumulate floating-point drift. Conversion to an
//! approximate `f64` happens only at the serialization boundary (the
//! recorder's confirmation response and the notification payload).

use rust_decimal::Decimal;

/// Emission factor applied per kilogram-kilometer: `0.1`.
pub const EMISSION_FACTOR: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Compute the carbon emission estimate for a purchase.
///
/// `weight × shipping_distance × 0.1`, in exact decimal arithmetic.
#[must_use]
pub fn carbon_emission(weight: Decimal, shipping_distance: Decimal) -> Decimal {
    weight * shipping_distance * EMISSION_FACTOR
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::prelude::ToPrimitive;

    use super::*;

    #[test]
    fn test_emission_factor_is_one_tenth() {
        assert_eq!(EMISSION_FACTOR, Decimal::from_str("0.1").unwrap());
    }

    #[test]
    fn test_emission_for_reference_purchase() {
        // 2 kg shipped 100 km -> 20.0
        let emission = carbon_emission(Decimal::from(2), Decimal::from(100));
        assert_eq!(emission, Decimal::from_str("20.0").unwrap());
        assert!((emission.to_f64().unwrap() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_emission_is_exact_for_fractional_inputs() {
        // 1.5 * 7 * 0.1 == 1.05 exactly, which binary floats cannot represent
        let emission = carbon_emission(
            Decimal::from_str("1.5").unwrap(),
            Decimal::from_str("7").unwrap(),
        );
        assert_eq!(emission, Decimal::from_str("1.05").unwrap());
    }

    #[test]
    fn test_emission_zero_weight() {
        let emission = carbon_emission(Decimal::ZERO, Decimal::from(500));
        assert_eq!(emission, Decimal::ZERO);
    }
}
