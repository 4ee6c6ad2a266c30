use super::{checked_symbol, ensure_bars, Analyzer};
use crate::config::AdxParams;
use crate::error::{ensure_finite, AnalysisError, ConfigError};
use crate::indicators::calculate_adx;
use crate::models::{AnalysisResult, IndicatorKey, MarketSeries, TrendClassification};

/// Trend strength from the latest ADX
#[derive(Debug, Clone)]
pub struct AdxAnalyzer {
    symbol: String,
    params: AdxParams,
}

impl AdxAnalyzer {
    pub fn new(symbol: &str) -> Result<Self, ConfigError> {
        Self::with_params(symbol, AdxParams::default())
    }

    pub fn with_params(symbol: &str, params: AdxParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            symbol: checked_symbol(symbol)?,
            params,
        })
    }

    pub fn classify(&self, adx: f64) -> AnalysisResult {
        if adx > self.params.strong_trend {
            AnalysisResult::new(
                TrendClassification::StrongTrend,
                format!("Strong trend with an ADX of {adx:.2}."),
            )
        } else if adx > self.params.moderate_trend {
            AnalysisResult::new(
                TrendClassification::ModerateTrend,
                format!("Moderate trend with an ADX of {adx:.2}."),
            )
        } else {
            AnalysisResult::new(
                TrendClassification::WeakTrend,
                format!("Weak or no trend with an ADX of {adx:.2}."),
            )
        }
    }
}

impl Analyzer for AdxAnalyzer {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::Adx
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Smoothing seed plus a full period of DX values
    fn min_bars(&self) -> usize {
        2 * self.params.period + 1
    }

    fn analyze(&self, series: &MarketSeries) -> Result<AnalysisResult, AnalysisError> {
        ensure_bars(self.key(), self.min_bars(), series)?;

        let insufficient = || AnalysisError::insufficient(self.key(), self.min_bars(), series.len());
        let adx = calculate_adx(
            &series.highs(),
            &series.lows(),
            &series.closes(),
            self.params.period,
        )
        .ok_or_else(insufficient)?;

        let latest = adx.adx.last().copied().ok_or_else(insufficient)?;
        let latest = ensure_finite(self.key(), "ADX", latest)?;

        tracing::debug!(
            symbol = %self.symbol,
            adx = latest,
            plus_di = adx.plus_di,
            minus_di = adx.minus_di,
            "ADX reading"
        );

        Ok(self.classify(latest))
    }

    fn degraded_classification(&self) -> TrendClassification {
        TrendClassification::Unavailable
    }
}
