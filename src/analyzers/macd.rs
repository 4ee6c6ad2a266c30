use super::{checked_symbol, ensure_bars, Analyzer, Crossover};
use crate::config::MacdParams;
use crate::error::{ensure_finite, AnalysisError, ConfigError};
use crate::indicators::calculate_macd;
use crate::models::{AnalysisResult, IndicatorKey, MarketSeries};

/// MACD line against its signal line
#[derive(Debug, Clone)]
pub struct MacdAnalyzer {
    symbol: String,
    params: MacdParams,
}

impl MacdAnalyzer {
    pub fn new(symbol: &str) -> Result<Self, ConfigError> {
        Self::with_params(symbol, MacdParams::default())
    }

    pub fn with_params(symbol: &str, params: MacdParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            symbol: checked_symbol(symbol)?,
            params,
        })
    }
}

impl Analyzer for MacdAnalyzer {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::Macd
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Two points of the signal line
    fn min_bars(&self) -> usize {
        self.params.slow_period + self.params.signal_period
    }

    fn analyze(&self, series: &MarketSeries) -> Result<AnalysisResult, AnalysisError> {
        ensure_bars(self.key(), self.min_bars(), series)?;

        let insufficient = || AnalysisError::insufficient(self.key(), self.min_bars(), series.len());
        let macd = calculate_macd(
            &series.closes(),
            self.params.fast_period,
            self.params.slow_period,
            self.params.signal_period,
        )
        .ok_or_else(insufficient)?;

        let crossover = Crossover::from_lines(&macd.macd, &macd.signal).ok_or_else(insufficient)?;
        if let (Some(m), Some(s)) = (macd.macd.last(), macd.signal.last()) {
            ensure_finite(self.key(), "MACD", *m)?;
            ensure_finite(self.key(), "signal", *s)?;

            tracing::debug!(symbol = %self.symbol, macd = m, signal = s, "MACD lines");
        }

        Ok(crossover.into_result("MACD", "the Signal line"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::create_test_bars;
    use crate::models::TrendClassification;

    #[test]
    fn test_accelerating_uptrend_is_above_signal() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64).powi(2) * 0.05).collect();
        let analyzer = MacdAnalyzer::new("TEST").unwrap();

        let result = analyzer.analyze(&create_test_bars(&closes)).unwrap();
        assert_eq!(result.classification, TrendClassification::PotentialUptrend);
        assert!(result.narrative.contains("MACD"));
        assert!(result.narrative.contains("the Signal line"));
    }

    #[test]
    fn test_min_bars() {
        let analyzer = MacdAnalyzer::new("TEST").unwrap();
        assert_eq!(analyzer.min_bars(), 35);

        let closes = vec![100.0; 34];
        let err = analyzer.analyze(&create_test_bars(&closes)).unwrap_err();
        assert_eq!(err, AnalysisError::insufficient(IndicatorKey::Macd, 35, 34));
    }

    #[test]
    fn test_flat_series_is_neutral() {
        let closes = vec![64.0; 35];
        let analyzer = MacdAnalyzer::new("TEST").unwrap();

        let result = analyzer.analyze(&create_test_bars(&closes)).unwrap();
        assert_eq!(result.classification, TrendClassification::Neutral);
    }
}
