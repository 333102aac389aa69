pub mod batch;
pub mod calculator;

pub use batch::*;
pub use calculator::*;
