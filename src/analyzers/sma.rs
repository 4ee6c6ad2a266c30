use super::{checked_symbol, ensure_bars, Analyzer};
use crate::config::SmaParams;
use crate::error::{ensure_finite, AnalysisError, ConfigError};
use crate::indicators::calculate_sma;
use crate::models::{AnalysisResult, IndicatorKey, MarketSeries, TrendClassification};

/// Trend from the ordering of three simple moving averages of the close
///
/// A single window that cannot be filled invalidates the whole comparison.
#[derive(Debug, Clone)]
pub struct SmaAnalyzer {
    symbol: String,
    params: SmaParams,
}

/// The three averages at the latest bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmaTriple {
    pub short: f64,
    pub medium: f64,
    pub long: f64,
}

impl SmaTriple {
    pub fn classify(&self) -> AnalysisResult {
        let (short, medium, long) = (self.short, self.medium, self.long);

        if short > medium && medium > long {
            AnalysisResult::new(
                TrendClassification::Uptrend,
                "SMA 40 > SMA 80 > SMA 200: This ratio suggests that the stock price is in an uptrend. The shorter SMAs (40 days) are above the longer SMAs (80 and 200 days), indicating that recent prices are higher than past prices.",
            )
        } else if short < medium && medium < long {
            AnalysisResult::new(
                TrendClassification::Downtrend,
                "SMA 40 < SMA 80 < SMA 200: This ratio suggests that the stock price is in a downtrend. The shorter SMAs (40 days) are below the longer SMAs (80 and 200 days), indicating that recent prices are lower than past prices.",
            )
        } else if short > medium && medium < long {
            AnalysisResult::new(
                TrendClassification::ShortTermUpLongTermDown,
                "SMA 40 > SMA 80 < SMA 200: This relationship suggests that the stock price may be in a short-term recovery, but is still in a long-term downtrend.",
            )
        } else if short < medium && medium > long {
            AnalysisResult::new(
                TrendClassification::ShortTermDownLongTermUp,
                "SMA 40 < SMA 80 > SMA 200: This relationship suggests that the stock price may be in a short-term correction, but is still in a long-term uptrend.",
            )
        } else {
            AnalysisResult::neutral("The SMAs are not in a clear order to confirm a specific trend.")
        }
    }
}

impl SmaAnalyzer {
    pub fn new(symbol: &str) -> Result<Self, ConfigError> {
        Self::with_params(symbol, SmaParams::default())
    }

    pub fn with_params(symbol: &str, params: SmaParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            symbol: checked_symbol(symbol)?,
            params,
        })
    }

    /// Compute the three averages; fails on the first window that cannot be filled
    pub fn calculate(&self, series: &MarketSeries) -> Result<SmaTriple, AnalysisError> {
        let closes = series.closes();
        let window = |period: usize| -> Result<f64, AnalysisError> {
            let value = calculate_sma(&closes, period)
                .ok_or_else(|| AnalysisError::insufficient(IndicatorKey::Sma, period, closes.len()))?;
            ensure_finite(IndicatorKey::Sma, "SMA", value)
        };

        Ok(SmaTriple {
            short: window(self.params.short_period)?,
            medium: window(self.params.medium_period)?,
            long: window(self.params.long_period)?,
        })
    }
}

impl Analyzer for SmaAnalyzer {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::Sma
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn min_bars(&self) -> usize {
        self.params
            .short_period
            .max(self.params.medium_period)
            .max(self.params.long_period)
    }

    fn analyze(&self, series: &MarketSeries) -> Result<AnalysisResult, AnalysisError> {
        ensure_bars(self.key(), self.min_bars(), series)?;
        let triple = self.calculate(series)?;

        tracing::debug!(
            symbol = %self.symbol,
            sma_short = triple.short,
            sma_medium = triple.medium,
            sma_long = triple.long,
            "SMA averages"
        );

        Ok(triple.classify())
    }

    fn degraded_classification(&self) -> TrendClassification {
        TrendClassification::Unavailable
    }
}
