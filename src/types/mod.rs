//! Core data types and structures

pub mod opportunity;
pub mod options;
pub mod costs;
pub mod risk;
pub mod simulation;
pub mod interval;
pub mod report;

pub use opportunity::*;
pub use options::*;
pub use costs::*;
pub use risk::*;
pub use simulation::*;
pub use interval::*;
pub use report::*;
