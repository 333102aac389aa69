//! Random draws used by the simulator

use rand::Rng;
use std::f64::consts::TAU;

/// Standard normal draw (Box-Muller). Always consumes exactly two uniforms
/// so runs sharing a seed stay aligned sample for sample.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - [0, 1) keeps the log argument in (0, 1]
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Normal draw truncated at zero, for quantities that cannot go negative.
pub fn non_negative_normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    (mean + std_dev * standard_normal(rng)).max(0.0)
}
