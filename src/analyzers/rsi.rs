use super::{checked_symbol, ensure_bars, Analyzer};
use crate::config::RsiParams;
use crate::error::{ensure_finite, AnalysisError, ConfigError};
use crate::indicators::calculate_rsi;
use crate::models::{AnalysisResult, IndicatorKey, MarketSeries, TrendClassification};

/// Overbought/oversold from the latest Wilder RSI
#[derive(Debug, Clone)]
pub struct RsiAnalyzer {
    symbol: String,
    params: RsiParams,
}

impl RsiAnalyzer {
    pub fn new(symbol: &str) -> Result<Self, ConfigError> {
        Self::with_params(symbol, RsiParams::default())
    }

    pub fn with_params(symbol: &str, params: RsiParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            symbol: checked_symbol(symbol)?,
            params,
        })
    }

    pub fn classify(&self, rsi: f64) -> AnalysisResult {
        if rsi > self.params.overbought {
            AnalysisResult::new(
                TrendClassification::Overbought,
                format!("RSI is {rsi:.2}, indicating the asset is overbought."),
            )
        } else if rsi < self.params.oversold {
            AnalysisResult::new(
                TrendClassification::Oversold,
                format!("RSI is {rsi:.2}, indicating the asset is oversold."),
            )
        } else {
            AnalysisResult::neutral(format!(
                "RSI is {rsi:.2}, indicating normal market conditions."
            ))
        }
    }
}

impl Analyzer for RsiAnalyzer {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::Rsi
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn min_bars(&self) -> usize {
        self.params.period + 1
    }

    fn analyze(&self, series: &MarketSeries) -> Result<AnalysisResult, AnalysisError> {
        ensure_bars(self.key(), self.min_bars(), series)?;

        let rsi = calculate_rsi(&series.closes(), self.params.period)
            .ok_or_else(|| AnalysisError::insufficient(self.key(), self.min_bars(), series.len()))?;
        let rsi = ensure_finite(self.key(), "RSI", rsi)?;

        tracing::debug!(symbol = %self.symbol, rsi, "RSI reading");
        Ok(self.classify(rsi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::create_test_bars;

    #[test]
    fn test_monotonic_rise_is_overbought() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let analyzer = RsiAnalyzer::new("TEST").unwrap();

        let result = analyzer.analyze(&create_test_bars(&closes)).unwrap();
        assert_eq!(result.classification, TrendClassification::Overbought);
        assert_eq!(
            result.narrative,
            "RSI is 100.00, indicating the asset is overbought."
        );
    }

    #[test]
    fn test_monotonic_fall_is_oversold() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        let analyzer = RsiAnalyzer::new("TEST").unwrap();

        let result = analyzer.analyze(&create_test_bars(&closes)).unwrap();
        assert_eq!(result.classification, TrendClassification::Oversold);
    }

    #[test]
    fn test_flat_prices_are_neutral() {
        let closes = vec![100.0; 20];
        let analyzer = RsiAnalyzer::new("TEST").unwrap();

        let result = analyzer.analyze(&create_test_bars(&closes)).unwrap();
        assert_eq!(result.classification, TrendClassification::Neutral);
        assert_eq!(
            result.narrative,
            "RSI is 50.00, indicating normal market conditions."
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        let analyzer = RsiAnalyzer::new("TEST").unwrap();
        assert_eq!(analyzer.classify(70.0).classification, TrendClassification::Neutral);
        assert_eq!(analyzer.classify(30.0).classification, TrendClassification::Neutral);
        assert_eq!(analyzer.classify(70.01).classification, TrendClassification::Overbought);
    }

    #[test]
    fn test_needs_period_plus_one_bars() {
        let analyzer = RsiAnalyzer::new("TEST").unwrap();
        let closes = vec![100.0; 14];

        let (result, error) = analyzer.evaluate(&create_test_bars(&closes));
        assert_eq!(result.classification, TrendClassification::Neutral);
        assert_eq!(error, Some(AnalysisError::insufficient(IndicatorKey::Rsi, 15, 14)));
    }
}
