//! Validation of opportunities and calculation options

pub mod opportunity;
pub mod options;

pub use opportunity::*;
pub use options::*;
