//! Monte Carlo simulation of the net-profit distribution

pub mod sampling;
pub mod monte_carlo;

pub use sampling::*;
pub use monte_carlo::*;
