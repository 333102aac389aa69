//! Standard normal quantile function

// Acklam's rational approximation, relative error below 1.15e-9.
const A: [f64; 6] = [
    -3.969683028665376e1,
    2.209460984245205e2,
    -2.759285104469687e2,
    1.383577518672690e2,
    -3.066479806614716e1,
    2.506628277459239,
];
const B: [f64; 5] = [
    -5.447609879822406e1,
    1.615858368580409e2,
    -1.556989798598866e2,
    6.680131188771972e1,
    -1.328068155288572e1,
];
const C: [f64; 6] = [
    -7.784894002430293e-3,
    -3.223964580411365e-1,
    -2.400758277161838,
    -2.549732539343734,
    4.374664141464968,
    2.938163982698783,
];
const D: [f64; 4] = [
    7.784695709041462e-3,
    3.224671290700398e-1,
    2.445134137142996,
    3.754408661907416,
];

const P_LOW: f64 = 0.02425;
const P_HIGH: f64 = 1.0 - P_LOW;

/// Inverse CDF of the standard normal distribution. Returns `None` outside (0, 1).
pub fn normal_quantile(p: f64) -> Option<f64> {
    if !(p > 0.0 && p < 1.0) {
        return None;
    }

    let z = if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    Some(z)
}

/// Two-sided critical value for a confidence level in (0, 1).
pub fn z_score(confidence_level: f64) -> Option<f64> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return None;
    }
    // lower tail keeps resolution for levels next to 1
    normal_quantile((1.0 - confidence_level) / 2.0).map(|z| -z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_critical_values() {
        assert!((z_score(0.95).unwrap() - 1.959964).abs() < 1e-5);
        assert!((z_score(0.99).unwrap() - 2.575829).abs() < 1e-5);
        assert!((z_score(0.90).unwrap() - 1.644854).abs() < 1e-5);
        assert!(normal_quantile(0.5).unwrap().abs() < 1e-12);
    }

    #[test]
    fn tails_are_symmetric() {
        let lo = normal_quantile(0.001).unwrap();
        let hi = normal_quantile(0.999).unwrap();
        assert!((lo + hi).abs() < 1e-8);
        assert!(lo < -3.0);
    }

    #[test]
    fn rejects_out_of_range_probabilities() {
        assert!(normal_quantile(0.0).is_none());
        assert!(normal_quantile(1.0).is_none());
        assert!(normal_quantile(f64::NAN).is_none());
        assert!(z_score(1.0).is_none());
        assert!(z_score(0.0).is_none());
        assert!(z_score(-0.5).is_none());
    }

    #[test]
    fn levels_next_to_one_keep_a_finite_critical_value() {
        let z = z_score(0.9999999999999999).unwrap();
        assert!(z.is_finite() && z > 8.0);
        assert!(z > z_score(0.999999).unwrap());
    }
}
