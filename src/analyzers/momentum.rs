use super::{checked_symbol, ensure_bars, Analyzer};
use crate::config::MomentumParams;
use crate::error::{ensure_finite, AnalysisError, ConfigError};
use crate::indicators::calculate_momentum;
use crate::models::{AnalysisResult, IndicatorKey, MarketSeries, TrendClassification};

/// Direction of the latest close-to-close momentum
#[derive(Debug, Clone)]
pub struct MomentumAnalyzer {
    symbol: String,
    params: MomentumParams,
}

impl MomentumAnalyzer {
    pub fn new(symbol: &str) -> Result<Self, ConfigError> {
        Self::with_params(symbol, MomentumParams::default())
    }

    pub fn with_params(symbol: &str, params: MomentumParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            symbol: checked_symbol(symbol)?,
            params,
        })
    }
}

impl Analyzer for MomentumAnalyzer {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::Momentum
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn min_bars(&self) -> usize {
        self.params.period + 1
    }

    fn analyze(&self, series: &MarketSeries) -> Result<AnalysisResult, AnalysisError> {
        ensure_bars(self.key(), self.min_bars(), series)?;

        let insufficient = || AnalysisError::insufficient(self.key(), self.min_bars(), series.len());
        let momentum = calculate_momentum(&series.closes(), self.params.period).ok_or_else(insufficient)?;
        let latest = momentum.last().copied().ok_or_else(insufficient)?;
        let latest = ensure_finite(self.key(), "momentum", latest)?;

        let result = if latest > 0.0 {
            AnalysisResult::new(
                TrendClassification::PotentialUptrend,
                "The momentum is positive, indicating a potential uptrend.",
            )
        } else if latest < 0.0 {
            AnalysisResult::new(
                TrendClassification::PotentialDowntrend,
                "The momentum is negative, indicating a potential downtrend.",
            )
        } else {
            AnalysisResult::neutral("The momentum is neutral.")
        };

        Ok(result)
    }
}
