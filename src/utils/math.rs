//! Mathematical utility functions

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use crate::errors::{EngineError, EngineResult};

/// Decimal places kept when simulated f64 values are reported as money.
pub const REPORT_DECIMALS: u32 = 6;

pub fn bps_to_fraction(bps: u32) -> Decimal {
    Decimal::from(bps) / dec!(10_000)
}

pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Converts a simulated value back to a reportable decimal, refusing NaN and
/// infinities instead of propagating them.
pub fn to_decimal(value: f64, context: &'static str) -> EngineResult<Decimal> {
    if !value.is_finite() {
        return Err(EngineError::numeric(context, format!("non-finite value {value}")));
    }
    Decimal::from_f64(value)
        .map(|d| d.round_dp(REPORT_DECIMALS))
        .ok_or_else(|| EngineError::numeric(context, format!("{value} is out of decimal range")))
}

/// Variance of a cost whose one-sigma spread is `uncertainty` times its
/// total. Squared in f64 so large but valid costs cannot overflow.
pub fn relative_variance(total: Decimal, uncertainty: Decimal) -> f64 {
    let std_dev = to_f64(total).max(0.0) * to_f64(uncertainty).max(0.0);
    std_dev * std_dev
}

pub fn checked_mul(a: Decimal, b: Decimal, context: &'static str) -> EngineResult<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| EngineError::numeric(context, format!("{a} * {b} overflows")))
}

pub fn checked_add(a: Decimal, b: Decimal, context: &'static str) -> EngineResult<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| EngineError::numeric(context, format!("{a} + {b} overflows")))
}

pub fn checked_div(a: Decimal, b: Decimal, context: &'static str) -> EngineResult<Decimal> {
    if b.is_zero() {
        return Err(EngineError::numeric(context, format!("division of {a} by zero")));
    }
    a.checked_div(b)
        .ok_or_else(|| EngineError::numeric(context, format!("{a} / {b} overflows")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bps_conversion() {
        assert_eq!(bps_to_fraction(30), dec!(0.003));
        assert_eq!(bps_to_fraction(10_000), dec!(1));
    }

    #[test]
    fn to_decimal_rejects_non_finite() {
        assert!(to_decimal(f64::NAN, "test").is_err());
        assert!(to_decimal(f64::INFINITY, "test").is_err());
        assert_eq!(to_decimal(1.5, "test").unwrap(), dec!(1.5));
        assert_eq!(to_decimal(0.1234567891, "test").unwrap(), dec!(0.123457));
    }

    #[test]
    fn checked_division_guards_zero() {
        assert!(matches!(
            checked_div(dec!(1), dec!(0), "test"),
            Err(EngineError::NumericDegeneracy { .. })
        ));
        assert_eq!(checked_div(dec!(10), dec!(4), "test").unwrap(), dec!(2.5));
        assert!(checked_mul(Decimal::MAX, dec!(2), "test").is_err());
    }

    #[test]
    fn relative_variance_survives_large_costs() {
        assert_eq!(relative_variance(dec!(4), dec!(0.5)), 4.0);
        let variance = relative_variance(dec!(1000001000000000), dec!(1));
        assert!(variance.is_finite() && variance > 1e29);
        assert_eq!(relative_variance(Decimal::ZERO, dec!(0.5)), 0.0);
    }
}
