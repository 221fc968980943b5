//! Ratio arithmetic shared by the report layer.

/// Divide `numerator` by `denominator`, returning `0.0` instead of failing.
///
/// A missing numerator counts as zero. A missing, zero or non-finite
/// denominator yields `0.0`, so a campaign without a monetary goal reports
/// a completion ratio of zero rather than an error or infinity.
pub fn safe_divide(numerator: Option<f64>, denominator: Option<f64>) -> f64 {
    let numerator = numerator.unwrap_or(0.0);
    match denominator {
        Some(d) if d != 0.0 && d.is_finite() => {
            let ratio = numerator / d;
            if ratio.is_finite() {
                ratio
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divides_when_denominator_is_nonzero() {
        assert_eq!(safe_divide(Some(250.0), Some(1000.0)), 0.25);
        assert_eq!(safe_divide(Some(-50.0), Some(200.0)), -0.25);
    }

    #[test]
    fn zero_denominator_yields_zero() {
        for x in [0.0, 1.0, -3.5, 1e12] {
            assert_eq!(safe_divide(Some(x), Some(0.0)), 0.0);
        }
        assert_eq!(safe_divide(Some(10.0), Some(-0.0)), 0.0);
    }

    #[test]
    fn zero_numerator_yields_zero() {
        for y in [1.0, -2.0, 0.001, 1e9] {
            assert_eq!(safe_divide(Some(0.0), Some(y)), 0.0);
        }
    }

    #[test]
    fn missing_values() {
        assert_eq!(safe_divide(None, Some(100.0)), 0.0);
        assert_eq!(safe_divide(Some(100.0), None), 0.0);
        assert_eq!(safe_divide(None, None), 0.0);
    }

    #[test]
    fn non_finite_denominator_yields_zero() {
        assert_eq!(safe_divide(Some(1.0), Some(f64::NAN)), 0.0);
        assert_eq!(safe_divide(Some(1.0), Some(f64::INFINITY)), 0.0);
    }

    #[test]
    fn overflowing_ratio_yields_zero() {
        assert_eq!(safe_divide(Some(f64::MAX), Some(1e-300)), 0.0);
    }
}
