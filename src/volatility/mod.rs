//! Price volatility calculation and history sources

pub mod calculator;
pub mod history;

pub use calculator::*;
pub use history::*;
