use super::{checked_symbol, ensure_bars, Analyzer};
use crate::config::CciParams;
use crate::error::{ensure_finite, AnalysisError, ConfigError};
use crate::indicators::calculate_cci;
use crate::models::{AnalysisResult, IndicatorKey, MarketSeries, TrendClassification};

/// Overbought/oversold from the latest CCI
#[derive(Debug, Clone)]
pub struct CciAnalyzer {
    symbol: String,
    params: CciParams,
}

impl CciAnalyzer {
    pub fn new(symbol: &str) -> Result<Self, ConfigError> {
        Self::with_params(symbol, CciParams::default())
    }

    pub fn with_params(symbol: &str, params: CciParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            symbol: checked_symbol(symbol)?,
            params,
        })
    }

    pub fn classify(&self, cci: f64) -> AnalysisResult {
        if cci > self.params.overbought {
            AnalysisResult::new(
                TrendClassification::Overbought,
                format!("Overbought condition with a CCI of {cci:.2}."),
            )
        } else if cci < self.params.oversold {
            AnalysisResult::new(
                TrendClassification::Oversold,
                format!("Oversold condition with a CCI of {cci:.2}."),
            )
        } else {
            AnalysisResult::neutral(format!("Neutral condition with a CCI of {cci:.2}."))
        }
    }
}

impl Analyzer for CciAnalyzer {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::Cci
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn min_bars(&self) -> usize {
        self.params.period
    }

    fn analyze(&self, series: &MarketSeries) -> Result<AnalysisResult, AnalysisError> {
        ensure_bars(self.key(), self.min_bars(), series)?;

        let insufficient = || AnalysisError::insufficient(self.key(), self.min_bars(), series.len());
        let cci = calculate_cci(
            &series.highs(),
            &series.lows(),
            &series.closes(),
            self.params.period,
            self.params.constant,
        )
        .ok_or_else(insufficient)?;

        let latest = cci.last().copied().ok_or_else(insufficient)?;
        let latest = ensure_finite(self.key(), "CCI", latest)?;

        tracing::debug!(symbol = %self.symbol, cci = latest, "CCI reading");
        Ok(self.classify(latest))
    }

    fn degraded_classification(&self) -> TrendClassification {
        TrendClassification::Unavailable
    }
}
