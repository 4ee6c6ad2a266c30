use super::{checked_symbol, ensure_bars, Analyzer};
use crate::error::{ensure_finite, AnalysisError, ConfigError};
use crate::indicators::calculate_volume_trend;
use crate::models::{AnalysisResult, IndicatorKey, MarketSeries};

/// Average volume and share of rising-volume bars; always Neutral
#[derive(Debug, Clone)]
pub struct VolumeTrendAnalyzer {
    symbol: String,
}

impl VolumeTrendAnalyzer {
    pub fn new(symbol: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            symbol: checked_symbol(symbol)?,
        })
    }
}

impl Analyzer for VolumeTrendAnalyzer {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::Volume
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn min_bars(&self) -> usize {
        2
    }

    fn analyze(&self, series: &MarketSeries) -> Result<AnalysisResult, AnalysisError> {
        ensure_bars(self.key(), self.min_bars(), series)?;

        let trend = calculate_volume_trend(&series.volumes())
            .ok_or_else(|| AnalysisError::insufficient(self.key(), self.min_bars(), series.len()))?;
        let average = ensure_finite(self.key(), "average volume", trend.average_volume)?;

        Ok(AnalysisResult::neutral(format!(
            "Average Volume: {:.2}. Percentage of Increasing Volume Days: {:.2}%.",
            average, trend.increasing_pct
        )))
    }
}
