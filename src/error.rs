//! Error types for simulation, summary and comparison

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GrowthError>;

/// Errors raised by the core growth operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrowthError {
    /// Malformed scenario input (non-positive frequency or horizon, negative principal, ...)
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// A series with no points was handed to an operation that needs at least one
    #[error("growth series is empty")]
    EmptySeries,

    /// Two series do not share the same time grid
    #[error("incompatible series: {reason}")]
    IncompatibleSeries { reason: String },
}

impl GrowthError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        GrowthError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn incompatible(reason: impl Into<String>) -> Self {
        GrowthError::IncompatibleSeries {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GrowthError::invalid("horizon_years", "must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "invalid parameter `horizon_years`: must be positive, got 0"
        );
        assert_eq!(GrowthError::EmptySeries.to_string(), "growth series is empty");
        assert_eq!(
            GrowthError::incompatible("point count 121 vs 61").to_string(),
            "incompatible series: point count 121 vs 61"
        );
    }
}
