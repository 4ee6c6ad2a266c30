use super::{checked_symbol, ensure_bars, Analyzer};
use crate::config::RvolParams;
use crate::error::{ensure_finite, AnalysisError, ConfigError};
use crate::indicators::calculate_rvol;
use crate::models::{AnalysisResult, IndicatorKey, MarketSeries};

/// Relative volume of the second-to-last bar against the trailing average.
/// Always classifies Neutral.
#[derive(Debug, Clone)]
pub struct RvolAnalyzer {
    symbol: String,
    params: RvolParams,
}

impl RvolAnalyzer {
    pub fn new(symbol: &str) -> Result<Self, ConfigError> {
        Self::with_params(symbol, RvolParams::default())
    }

    pub fn with_params(symbol: &str, params: RvolParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            symbol: checked_symbol(symbol)?,
            params,
        })
    }
}

impl Analyzer for RvolAnalyzer {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::Rvol
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn min_bars(&self) -> usize {
        self.params.period.max(2)
    }

    fn analyze(&self, series: &MarketSeries) -> Result<AnalysisResult, AnalysisError> {
        ensure_bars(self.key(), self.min_bars(), series)?;

        let rvol = calculate_rvol(&series.volumes(), self.params.period)
            .ok_or_else(|| AnalysisError::insufficient(self.key(), self.min_bars(), series.len()))?;
        let ratio = rvol.ratio().ok_or_else(|| {
            AnalysisError::degenerate(
                self.key(),
                format!("average volume over {} bars is zero", self.params.period),
            )
        })?;
        let ratio = ensure_finite(self.key(), "RVOL", ratio)?;

        tracing::debug!(
            symbol = %self.symbol,
            current = rvol.current,
            average = rvol.average,
            ratio,
            "Relative volume"
        );

        let comparison = if ratio > 1.0 {
            "a higher than average volume"
        } else if ratio < 1.0 {
            "a lower than average volume"
        } else {
            "an average volume"
        };

        Ok(AnalysisResult::neutral(format!(
            "RVOL is {ratio:.2}, indicating {comparison}."
        )))
    }
}
