//! Configuration management for the profit engine

pub mod settings;

pub use settings::*;
