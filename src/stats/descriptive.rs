//! Descriptive statistics over f64 samples

/// Arithmetic mean, clamped into the sample range so accumulated rounding
/// never pushes it past the extremes. Empty input yields 0.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let (min, max) = min_max(samples);
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    mean.clamp(min, max)
}

/// Sample standard deviation (n - 1 denominator). Fewer than two samples yield 0.
pub fn std_dev(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let mean = mean(samples);
    let variance = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (samples.len() - 1) as f64;
    variance.sqrt()
}

pub fn min_max(samples: &[f64]) -> (f64, f64) {
    samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        })
}

/// Percentile of an ascending slice with linear interpolation between
/// closest ranks. `p` is clamped to [0, 100]; empty input yields 0.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            if lo == hi {
                return sorted[lo];
            }
            let weight = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * weight
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std_dev() {
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&samples) - 5.0).abs() < 1e-12);
        // sample (n - 1) standard deviation
        assert!((std_dev(&samples) - 2.138089935299395).abs() < 1e-12);
    }

    #[test]
    fn mean_of_identical_values_is_exact() {
        let samples = vec![0.1; 7];
        assert_eq!(mean(&samples), 0.1);
        assert_eq!(std_dev(&samples), 0.0);
    }

    #[test]
    fn percentile_interpolates() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile_sorted(&sorted, 0.0), 10.0);
        assert_eq!(percentile_sorted(&sorted, 100.0), 40.0);
        assert!((percentile_sorted(&sorted, 50.0) - 25.0).abs() < 1e-12);
        assert_eq!(percentile_sorted(&sorted, 150.0), 40.0);
        assert_eq!(percentile_sorted(&[], 50.0), 0.0);
    }
}
