//! Money calculation utilities using rust_decimal for precision
//!
//! 工资和财务金额以 `f64` 存储。所有算术统一转入 [`Decimal`]
//! 完成，落库/序列化前四舍五入到两位小数，避免浮点累积误差。

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round an f64 amount to 2 decimal places via Decimal
#[inline]
pub fn round2(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_midpoint_away_from_zero() {
        assert_eq!(round2(10.005), 10.01);
        assert_eq!(round2(-10.005), -10.01);
        assert_eq!(round2(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_salary_sum_through_decimal() {
        let gross = to_f64(to_decimal(50000.0) + to_decimal(3000.0) + to_decimal(2000.0));
        assert_eq!(gross, 55000.0);
        let net = to_f64(to_decimal(gross) - to_decimal(2000.0));
        assert_eq!(net, 53000.0);
    }

    #[test]
    fn test_negative_amount_preserved() {
        // deductions larger than gross must round through unchanged in sign
        let net = to_f64(to_decimal(1000.0) - to_decimal(2500.5));
        assert_eq!(net, -1500.5);
    }
}
