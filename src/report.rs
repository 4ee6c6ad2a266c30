//! Aggregate output of one dispatch run.

use crate::error::AnalysisError;
use crate::models::{AnalysisResult, IndicatorKey, TrendClassification};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a report slot holds a degraded result.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum SlotError {
    /// The analyzer could not be built (empty symbol, bad parameters).
    #[error("{message}")]
    Config { message: String },

    /// The analyzer ran and rejected the series.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// The analysis task died before producing a result.
    #[error("analysis task failed: {message}")]
    Task { message: String },
}

/// Every indicator reading for one symbol.
///
/// `results` holds a slot for each dispatched analyzer whether or not it
/// succeeded; `errors` explains the slots that were degraded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexReport {
    pub symbol: String,
    pub results: BTreeMap<IndicatorKey, AnalysisResult>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<IndicatorKey, SlotError>,
}

impl IndexReport {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            results: BTreeMap::new(),
            errors: BTreeMap::new(),
        }
    }

    /// Store a slot; a later record for the same key replaces the earlier one.
    pub fn record(&mut self, key: IndicatorKey, result: AnalysisResult, error: Option<SlotError>) {
        self.results.insert(key, result);
        match error {
            Some(error) => {
                self.errors.insert(key, error);
            }
            None => {
                self.errors.remove(&key);
            }
        }
    }

    pub fn get(&self, key: IndicatorKey) -> Option<&AnalysisResult> {
        self.results.get(&key)
    }

    pub fn classification(&self, key: IndicatorKey) -> Option<TrendClassification> {
        self.get(key).map(|result| result.classification)
    }

    pub fn error(&self, key: IndicatorKey) -> Option<&SlotError> {
        self.errors.get(&key)
    }

    /// All twelve indicator keys are present
    pub fn is_complete(&self) -> bool {
        IndicatorKey::ALL.iter().all(|key| self.results.contains_key(key))
    }

    pub fn degraded_count(&self) -> usize {
        self.errors.len()
    }
}
