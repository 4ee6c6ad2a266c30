use super::{checked_symbol, ensure_bars, Analyzer, Crossover};
use crate::config::EmaParams;
use crate::error::{ensure_finite, AnalysisError, ConfigError};
use crate::indicators::calculate_ema_series;
use crate::models::{AnalysisResult, IndicatorKey, MarketSeries};

/// Fast/slow EMA crossover on the close
#[derive(Debug, Clone)]
pub struct EmaAnalyzer {
    symbol: String,
    params: EmaParams,
}

impl EmaAnalyzer {
    pub fn new(symbol: &str) -> Result<Self, ConfigError> {
        Self::with_params(symbol, EmaParams::default())
    }

    pub fn with_params(symbol: &str, params: EmaParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            symbol: checked_symbol(symbol)?,
            params,
        })
    }
}

impl Analyzer for EmaAnalyzer {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::Ema
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Two points of the slow EMA
    fn min_bars(&self) -> usize {
        self.params.slow_period + 1
    }

    fn analyze(&self, series: &MarketSeries) -> Result<AnalysisResult, AnalysisError> {
        ensure_bars(self.key(), self.min_bars(), series)?;

        let closes = series.closes();
        let insufficient = || AnalysisError::insufficient(self.key(), self.min_bars(), closes.len());
        let fast = calculate_ema_series(&closes, self.params.fast_period).ok_or_else(insufficient)?;
        let slow = calculate_ema_series(&closes, self.params.slow_period).ok_or_else(insufficient)?;

        let crossover = Crossover::from_lines(&fast, &slow).ok_or_else(insufficient)?;
        if let (Some(f), Some(s)) = (fast.last(), slow.last()) {
            ensure_finite(self.key(), "fast EMA", *f)?;
            ensure_finite(self.key(), "slow EMA", *s)?;
        }

        Ok(crossover.into_result(
            &format!("EMA{}", self.params.fast_period),
            &format!("EMA{}", self.params.slow_period),
        ))
    }
}
