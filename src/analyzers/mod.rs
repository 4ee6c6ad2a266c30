// Indicator analyzers module
// Each analyzer turns one indicator's numbers into a classification and a narrative

pub mod adx;
pub mod atr;
pub mod cci;
pub mod ema;
pub mod macd;
pub mod momentum;
pub mod obv;
pub mod rsi;
pub mod rvol;
pub mod sma;
pub mod stochastic;
pub mod volume_trend;

pub use adx::AdxAnalyzer;
pub use atr::AtrAnalyzer;
pub use cci::CciAnalyzer;
pub use ema::EmaAnalyzer;
pub use macd::MacdAnalyzer;
pub use momentum::MomentumAnalyzer;
pub use obv::ObvAnalyzer;
pub use rsi::RsiAnalyzer;
pub use rvol::RvolAnalyzer;
pub use sma::SmaAnalyzer;
pub use stochastic::StochasticAnalyzer;
pub use volume_trend::VolumeTrendAnalyzer;

use crate::error::{AnalysisError, ConfigError};
use crate::models::{AnalysisResult, IndicatorKey, MarketSeries, TrendClassification};

/// Base trait for all indicator analyzers
pub trait Analyzer: Send + Sync {
    /// Report slot this analyzer fills
    fn key(&self) -> IndicatorKey;

    /// Symbol the analyzer was built for
    fn symbol(&self) -> &str;

    /// Minimum bars required for a reading
    fn min_bars(&self) -> usize;

    /// Classify the series. Never panics; numeric edge cases come back as errors.
    fn analyze(&self, series: &MarketSeries) -> Result<AnalysisResult, AnalysisError>;

    /// Classification reported when `analyze` fails
    fn degraded_classification(&self) -> TrendClassification {
        TrendClassification::Neutral
    }

    /// Result that stands in for a failed analysis
    fn degraded(&self, error: &AnalysisError) -> AnalysisResult {
        AnalysisResult::new(
            self.degraded_classification(),
            unavailable_narrative(self.key(), error),
        )
    }

    /// Run `analyze`, always yielding a result; the error is handed back alongside
    fn evaluate(&self, series: &MarketSeries) -> (AnalysisResult, Option<AnalysisError>) {
        match self.analyze(series) {
            Ok(result) => (result, None),
            Err(error) => (self.degraded(&error), Some(error)),
        }
    }
}

/// "It is not possible to calculate RSI because: ..." sentence
pub fn unavailable_narrative(key: IndicatorKey, cause: impl std::fmt::Display) -> String {
    format!(
        "It is not possible to calculate {} because: {}.",
        key.label(),
        cause
    )
}

/// Analyzers refuse to be built for an empty symbol
pub(crate) fn checked_symbol(symbol: &str) -> Result<String, ConfigError> {
    if symbol.is_empty() {
        return Err(ConfigError::EmptySymbol);
    }
    Ok(symbol.to_string())
}

pub(crate) fn ensure_bars(
    key: IndicatorKey,
    required: usize,
    series: &MarketSeries,
) -> Result<(), AnalysisError> {
    if series.len() < required {
        return Err(AnalysisError::insufficient(key, required, series.len()));
    }
    Ok(())
}

/// Relationship between a fast line and a slow line over the last two samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    /// Fast crossed above slow on the latest sample
    Bullish,
    /// Fast crossed below slow on the latest sample
    Bearish,
    Above,
    Below,
    Flat,
}

impl Crossover {
    pub fn detect(prev_fast: f64, prev_slow: f64, latest_fast: f64, latest_slow: f64) -> Self {
        if latest_fast > latest_slow && prev_fast <= prev_slow {
            Crossover::Bullish
        } else if latest_fast < latest_slow && prev_fast >= prev_slow {
            Crossover::Bearish
        } else if latest_fast > latest_slow {
            Crossover::Above
        } else if latest_fast < latest_slow {
            Crossover::Below
        } else {
            Crossover::Flat
        }
    }

    /// Last two points of two right-aligned lines
    pub fn from_lines(fast: &[f64], slow: &[f64]) -> Option<Self> {
        if fast.len() < 2 || slow.len() < 2 {
            return None;
        }
        let (f, s) = (fast.len(), slow.len());
        Some(Self::detect(fast[f - 2], slow[s - 2], fast[f - 1], slow[s - 1]))
    }

    pub fn classification(&self) -> TrendClassification {
        match self {
            Crossover::Bullish | Crossover::Above => TrendClassification::PotentialUptrend,
            Crossover::Bearish | Crossover::Below => TrendClassification::PotentialDowntrend,
            Crossover::Flat => TrendClassification::Neutral,
        }
    }

    /// Narrative naming both lines, e.g. "EMA12" and "EMA26"
    pub fn narrative(&self, fast_name: &str, slow_name: &str) -> String {
        match self {
            Crossover::Bullish => format!(
                "Bullish crossover detected. {fast_name} has crossed above {slow_name}, indicating a potential uptrend."
            ),
            Crossover::Bearish => format!(
                "Bearish crossover detected. {fast_name} has crossed below {slow_name}, indicating a potential downtrend."
            ),
            Crossover::Above => {
                format!("{fast_name} is above {slow_name}, indicating a potential uptrend.")
            }
            Crossover::Below => {
                format!("{fast_name} is below {slow_name}, indicating a potential downtrend.")
            }
            Crossover::Flat => "No significant crossover detected.".to_string(),
        }
    }

    pub fn into_result(self, fast_name: &str, slow_name: &str) -> AnalysisResult {
        AnalysisResult::new(self.classification(), self.narrative(fast_name, slow_name))
    }
}

#[cfg(test)]
pub(crate) fn create_test_bars(closes: &[f64]) -> MarketSeries {
    create_test_bars_with_volume(closes, &vec![1000; closes.len()])
}

#[cfg(test)]
pub(crate) fn create_test_bars_with_volume(closes: &[f64], volumes: &[i64]) -> MarketSeries {
    use crate::models::MarketBar;

    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| MarketBar {
            open: close,
            high: close * 1.01,
            low: close * 0.99,
            close,
            volume,
            timestamp: 1_700_000_000 + i as i64 * 86_400,
        })
        .collect::<Vec<_>>()
        .into()
}
