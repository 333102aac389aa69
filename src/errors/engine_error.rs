//! Error taxonomy for the profit calculation engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Missing required field(s): {}", .fields.join(", "))]
    MissingField {
        fields: Vec<&'static str>,
    },

    #[error("Economic invariant violated: {reason}")]
    EconomicInvariant {
        reason: String,
    },

    #[error("Numeric degeneracy in {context}: {details}")]
    NumericDegeneracy {
        context: &'static str,
        details: String,
    },

    #[error("Invalid calculation options: {reason}")]
    InvalidOptions {
        reason: String,
    },

    #[error("Invalid engine configuration: {reason}")]
    InvalidConfig {
        reason: String,
    },

    #[error("Batch item {index} did not finish before the deadline")]
    DeadlineExceeded {
        index: usize,
    },

    #[error("Calculation worker failed: {message}")]
    Worker {
        message: String,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub fn numeric(context: &'static str, details: impl Into<String>) -> Self {
        EngineError::NumericDegeneracy {
            context,
            details: details.into(),
        }
    }

    /// Short stable label used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::MissingField { .. } => "missing_field",
            EngineError::EconomicInvariant { .. } => "economic_invariant",
            EngineError::NumericDegeneracy { .. } => "numeric_degeneracy",
            EngineError::InvalidOptions { .. } => "invalid_options",
            EngineError::InvalidConfig { .. } => "invalid_config",
            EngineError::DeadlineExceeded { .. } => "deadline_exceeded",
            EngineError::Worker { .. } => "worker",
        }
    }

    /// Malformed input never becomes valid by re-running it. Deadline and
    /// worker failures belong to the batch wrapper and may succeed on a rerun.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EngineError::DeadlineExceeded { .. } | EngineError::Worker { .. }
        )
    }
}
