use super::{checked_symbol, ensure_bars, Analyzer};
use crate::error::{ensure_finite, AnalysisError, ConfigError};
use crate::indicators::calculate_obv;
use crate::models::{AnalysisResult, IndicatorKey, MarketSeries};

/// Accumulation or distribution from the first and last OBV values.
/// Always classifies Neutral; only the narrative changes.
///
/// "Rising" reports whether OBV increased on any bar, independent of where
/// it finished.
#[derive(Debug, Clone)]
pub struct ObvAnalyzer {
    symbol: String,
}

impl ObvAnalyzer {
    pub fn new(symbol: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            symbol: checked_symbol(symbol)?,
        })
    }
}

impl Analyzer for ObvAnalyzer {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::Obv
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn min_bars(&self) -> usize {
        2
    }

    fn analyze(&self, series: &MarketSeries) -> Result<AnalysisResult, AnalysisError> {
        ensure_bars(self.key(), self.min_bars(), series)?;

        let insufficient = || AnalysisError::insufficient(self.key(), self.min_bars(), series.len());
        let obv = calculate_obv(&series.closes(), &series.volumes()).ok_or_else(insufficient)?;
        let (first, last) = match (obv.first(), obv.last()) {
            (Some(first), Some(last)) => (*first, ensure_finite(self.key(), "OBV", *last)?),
            _ => return Err(insufficient()),
        };

        let rising = obv.windows(2).any(|pair| pair[1] > pair[0]);
        let trend = if last > first {
            "accumulation"
        } else if last < first {
            "distribution"
        } else {
            "no significant change"
        };

        Ok(AnalysisResult::neutral(format!(
            "OBV indicates {trend} with a final value of {last:.2}. OBV is rising: {rising}."
        )))
    }
}
