//! Calculation option validation

use crate::{
    config::MAX_SAMPLE_COUNT,
    errors::{EngineError, EngineResult},
    types::CalculationOptions,
};

pub fn validate_options(options: &CalculationOptions) -> EngineResult<()> {
    if options.sample_count == 0 {
        return Err(invalid("sample count must be at least 1".to_string()));
    }
    if options.sample_count > MAX_SAMPLE_COUNT {
        return Err(invalid(format!(
            "sample count {} exceeds the maximum of {}",
            options.sample_count, MAX_SAMPLE_COUNT
        )));
    }
    if !(options.confidence_level > 0.0 && options.confidence_level < 1.0) {
        return Err(invalid(format!(
            "confidence level {} must lie in (0, 1)",
            options.confidence_level
        )));
    }
    if options.bootstrap_resamples == 0 {
        return Err(invalid("bootstrap needs at least one resample".to_string()));
    }
    Ok(())
}

fn invalid(reason: String) -> EngineError {
    EngineError::InvalidOptions { reason }
}
