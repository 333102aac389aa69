//! Error types shared by every engine stage

pub mod engine_error;

pub use engine_error::*;
