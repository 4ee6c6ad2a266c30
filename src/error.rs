//! Error types for analyzer construction and analysis.

use crate::models::IndicatorKey;
use serde::Serialize;
use thiserror::Error;

/// Raised while building an analyzer or loading indicator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Analyzers are scoped to a symbol and refuse an empty one.
    #[error("symbol cannot be empty")]
    EmptySymbol,

    /// A period or threshold that cannot produce a meaningful reading.
    #[error("invalid {indicator} parameter: {reason}")]
    InvalidParameter {
        indicator: IndicatorKey,
        reason: String,
    },

    /// Layered configuration failed to load or deserialize.
    #[error("failed to load indicator configuration: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn invalid(indicator: IndicatorKey, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            indicator,
            reason: reason.into(),
        }
    }
}

/// Raised by [`crate::analyzers::Analyzer::analyze`].
///
/// Never fatal to a report: the registry turns it into a degraded slot and
/// keeps it alongside so callers can see why.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisError {
    /// The series is shorter than the indicator's window.
    #[error("not enough data to calculate {indicator}: need {required} bars, got {actual}")]
    InsufficientData {
        indicator: IndicatorKey,
        required: usize,
        actual: usize,
    },

    /// Arithmetic with no defined outcome, e.g. a zero average volume.
    #[error("degenerate input for {indicator}: {reason}")]
    Degenerate {
        indicator: IndicatorKey,
        reason: String,
    },
}

impl AnalysisError {
    pub fn insufficient(indicator: IndicatorKey, required: usize, actual: usize) -> Self {
        AnalysisError::InsufficientData {
            indicator,
            required,
            actual,
        }
    }

    pub fn degenerate(indicator: IndicatorKey, reason: impl Into<String>) -> Self {
        AnalysisError::Degenerate {
            indicator,
            reason: reason.into(),
        }
    }

    pub fn indicator(&self) -> IndicatorKey {
        match self {
            AnalysisError::InsufficientData { indicator, .. }
            | AnalysisError::Degenerate { indicator, .. } => *indicator,
        }
    }
}

/// Reject NaN/infinite readings before they reach a classification.
pub(crate) fn ensure_finite(
    indicator: IndicatorKey,
    name: &str,
    value: f64,
) -> Result<f64, AnalysisError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::degenerate(
            indicator,
            format!("{name} is not a finite number ({value})"),
        ))
    }
}
