use super::{checked_symbol, ensure_bars, Analyzer};
use crate::config::StochasticParams;
use crate::error::{ensure_finite, AnalysisError, ConfigError};
use crate::indicators::calculate_stochastic;
use crate::models::{AnalysisResult, IndicatorKey, MarketSeries, TrendClassification};

/// Overbought/oversold when both %K and %D agree
#[derive(Debug, Clone)]
pub struct StochasticAnalyzer {
    symbol: String,
    params: StochasticParams,
}

impl StochasticAnalyzer {
    pub fn new(symbol: &str) -> Result<Self, ConfigError> {
        Self::with_params(symbol, StochasticParams::default())
    }

    pub fn with_params(symbol: &str, params: StochasticParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            symbol: checked_symbol(symbol)?,
            params,
        })
    }

    pub fn classify(&self, k: f64, d: f64) -> AnalysisResult {
        let (overbought, oversold) = (self.params.overbought, self.params.oversold);

        if k > overbought && d > overbought {
            AnalysisResult::new(
                TrendClassification::Overbought,
                format!("Stochastic Oscillator is {k:.2}/{d:.2}, indicating the asset is overbought."),
            )
        } else if k < oversold && d < oversold {
            AnalysisResult::new(
                TrendClassification::Oversold,
                format!("Stochastic Oscillator is {k:.2}/{d:.2}, indicating the asset is oversold."),
            )
        } else {
            AnalysisResult::neutral(format!(
                "Stochastic Oscillator is {k:.2}/{d:.2}, indicating normal market conditions."
            ))
        }
    }
}

impl Analyzer for StochasticAnalyzer {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::Stochastic
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
        let stochastic = calculate_stochastic(
            &series.highs(),
            &series.lows(),
            &series.closes(),
            self.params.period,
            self.params.d_period,
        )
        .ok_or_else(insufficient)?;

        let k = stochastic.k.last().copied().ok_or_else(insufficient)?;
        let d = stochastic.d.last().copied().ok_or_else(insufficient)?;
        let k = ensure_finite(self.key(), "%K", k)?;
        let d = ensure_finite(self.key(), "%D", d)?;

        let mut result = self.classify(k, d);

        // Latest %D averages fewer than d_period %K values
        if stochastic.k.len() <= stochastic.warmup {
            tracing::debug!(
                symbol = %self.symbol,
                k_values = stochastic.k.len(),
                "Latest %D is a warm-up reading over fewer than {} %K values",
                self.params.d_period
            );
            result.narrative.push_str(&format!(
                " %D is warming up over {} of {} %K values.",
                stochastic.k.len(),
                self.params.d_period
            ));
        }

        Ok(result)
    }
}
