//! The fixed affine transform `y = -5 * x + 1`.

/// Slope of the transform.
pub const SLOPE: f64 = -5.0;

/// Intercept of the transform.
pub const INTERCEPT: f64 = 1.0;

/// Apply `y = -5 * x + 1`.
///
/// Plain multiply then add (no fused multiply-add), so results match
/// IEEE double arithmetic step by step.
pub fn apply_function(x: f64) -> f64 {
    SLOPE * x + INTERCEPT
}

/// Apply [`apply_function`] to every value, keeping order.
pub fn apply_to_values(values: &[f64]) -> Vec<f64> {
    values.iter().copied().map(apply_function).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_points() {
        assert_eq!(apply_function(0.0), 1.0);
        assert_eq!(apply_function(1.0), -4.0);
        assert_eq!(apply_function(-1.0), 6.0);
        assert_eq!(apply_function(0.5), -1.5);
    }

    #[test]
    fn test_reference_values() {
        let out = apply_to_values(&[1.0, 3.0, 5.0, 23.0, 664.0]);
        assert_eq!(out, vec![-4.0, -14.0, -24.0, -114.0, -3319.0]);
    }

    #[test]
    fn test_matches_formula() {
        for x in [0.1, -2.75, 1e10, -3.3e-5, 123456.789] {
            assert_eq!(apply_function(x), -5.0 * x + 1.0);
        }
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(apply_function(f64::INFINITY), f64::NEG_INFINITY);
        assert!(apply_function(f64::NAN).is_nan());
    }

    #[test]
    fn test_empty() {
        assert!(apply_to_values(&[]).is_empty());
    }
}
