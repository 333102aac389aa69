//! Statistics: descriptive measures, normal quantiles and confidence intervals

pub mod descriptive;
pub mod normal;
pub mod confidence;

pub use descriptive::*;
pub use normal::*;
pub use confidence::*;
