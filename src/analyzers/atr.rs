use super::{checked_symbol, ensure_bars, Analyzer};
use crate::config::AtrParams;
use crate::error::{ensure_finite, AnalysisError, ConfigError};
use crate::indicators::calculate_atr_series;
use crate::models::{AnalysisResult, IndicatorKey, MarketSeries, TrendClassification};

/// Trading risk from the mean of the whole ATR series, not just its latest value
#[derive(Debug, Clone)]
pub struct AtrAnalyzer {
    symbol: String,
    params: AtrParams,
}

impl AtrAnalyzer {
    pub fn new(symbol: &str) -> Result<Self, ConfigError> {
        Self::with_params(symbol, AtrParams::default())
    }

    pub fn with_params(symbol: &str, params: AtrParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            symbol: checked_symbol(symbol)?,
            params,
        })
    }

    pub fn classify(&self, average_atr: f64) -> AnalysisResult {
        if average_atr > self.params.increased_risk {
            AnalysisResult::new(
                TrendClassification::IncreasedRisk,
                format!(
                    "High volatility with an average ATR of {average_atr:.2}. Increased trading risk."
                ),
            )
        } else if average_atr > self.params.moderate_risk {
            AnalysisResult::new(
                TrendClassification::ModerateRisk,
                format!(
                    "Moderate volatility with an average ATR of {average_atr:.2}. Moderate trading risk."
                ),
            )
        } else {
            AnalysisResult::new(
                TrendClassification::LowerRisk,
                format!("Low volatility with an average ATR of {average_atr:.2}. Lower trading risk."),
            )
        }
    }
}

impl Analyzer for AtrAnalyzer {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::Atr
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn min_bars(&self) -> usize {
        self.params.period + 1
    }

    fn analyze(&self, series: &MarketSeries) -> Result<AnalysisResult, AnalysisError> {
        ensure_bars(self.key(), self.min_bars(), series)?;

        let atr = calculate_atr_series(
            &series.highs(),
            &series.lows(),
            &series.closes(),
            self.params.period,
        )
        .filter(|atr| !atr.is_empty())
        .ok_or_else(|| AnalysisError::insufficient(self.key(), self.min_bars(), series.len()))?;

        let average_atr = atr.iter().sum::<f64>() / atr.len() as f64;
        let average_atr = ensure_finite(self.key(), "average ATR", average_atr)?;

        tracing::debug!(symbol = %self.symbol, average_atr, samples = atr.len(), "ATR average");
        Ok(self.classify(average_atr))
    }

    fn degraded_classification(&self) -> TrendClassification {
        TrendClassification::Unavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::create_test_bars;

    #[test]
    fn test_risk_levels() {
        let analyzer = AtrAnalyzer::new("TEST").unwrap();

        // high/low are +/-1% of the close
        let cheap = create_test_bars(&vec![10.0; 40]);
        let result = analyzer.analyze(&cheap).unwrap();
        assert_eq!(result.classification, TrendClassification::LowerRisk);
        assert!(result.narrative.starts_with("Low volatility with an average ATR of 0.20"));

        let mid = create_test_bars(&vec![75.0; 40]);
        let result = analyzer.analyze(&mid).unwrap();
        assert_eq!(result.classification, TrendClassification::ModerateRisk);

        let expensive = create_test_bars(&vec![1000.0; 40]);
        let result = analyzer.analyze(&expensive).unwrap();
        assert_eq!(result.classification, TrendClassification::IncreasedRisk);
        assert_eq!(
            result.narrative,
            "High volatility with an average ATR of 20.00. Increased trading risk."
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        let analyzer = AtrAnalyzer::new("TEST").unwrap();
        assert_eq!(analyzer.classify(2.0).classification, TrendClassification::ModerateRisk);
        assert_eq!(analyzer.classify(1.0).classification, TrendClassification::LowerRisk);
    }

    #[test]
    fn test_short_series_is_unavailable() {
        let analyzer = AtrAnalyzer::new("TEST").unwrap();
        let (result, error) = analyzer.evaluate(&create_test_bars(&vec![100.0; 30]));

        assert_eq!(result.classification, TrendClassification::Unavailable);
        assert_eq!(error, Some(AnalysisError::insufficient(IndicatorKey::Atr, 31, 30)));
    }
}
