use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;

mod classification;

pub use classification::{AnalysisResult, TrendClassification};

/// One OHLCV sample for a fixed time bucket.
///
/// `timestamp` is Unix seconds. Open is carried for completeness; no
/// indicator in this crate reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketBar {
    #[serde(default)]
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    pub timestamp: i64,
}

/// Ordered bars for one symbol, read-only once built.
///
/// Bars are kept exactly as given: the caller guarantees ascending
/// timestamps and nothing here re-sorts, deduplicates or fills gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketSeries {
    bars: Vec<MarketBar>,
}

impl MarketSeries {
    pub fn new(bars: Vec<MarketBar>) -> Self {
        Self { bars }
    }

    /// Parse a JSON array of bars.
    pub fn from_json_reader<R: Read>(reader: R) -> serde_json::Result<Self> {
        let bars: Vec<MarketBar> = serde_json::from_reader(reader)?;
        Ok(Self::new(bars))
    }

    pub fn bars(&self) -> &[MarketBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume as f64).collect()
    }

    /// Collapse intraday bars to one bar per UTC calendar day, keeping the
    /// last bar seen for each day.
    ///
    /// Bars whose timestamp cannot be represented as a date are dropped.
    pub fn daily(&self) -> Self {
        let mut daily: Vec<MarketBar> = Vec::new();
        let mut current_day: Option<NaiveDate> = None;

        for bar in &self.bars {
            let Some(day) = DateTime::from_timestamp(bar.timestamp, 0).map(|dt| dt.date_naive())
            else {
                continue;
            };

            if current_day == Some(day) {
                if let Some(last) = daily.last_mut() {
                    *last = *bar;
                }
            } else {
                daily.push(*bar);
            }
            current_day = Some(day);
        }

        Self::new(daily)
    }
}

impl From<Vec<MarketBar>> for MarketSeries {
    fn from(bars: Vec<MarketBar>) -> Self {
        Self::new(bars)
    }
}

/// Stable identifier of each indicator slot in an [`crate::IndexReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKey {
    Sma,
    Ema,
    Macd,
    Rsi,
    Stochastic,
    Volume,
    Obv,
    Rvol,
    Atr,
    Adx,
    Momentum,
    Cci,
}

impl IndicatorKey {
    pub const ALL: [IndicatorKey; 12] = [
        IndicatorKey::Sma,
        IndicatorKey::Ema,
        IndicatorKey::Macd,
        IndicatorKey::Rsi,
        IndicatorKey::Stochastic,
        IndicatorKey::Volume,
        IndicatorKey::Obv,
        IndicatorKey::Rvol,
        IndicatorKey::Atr,
        IndicatorKey::Adx,
        IndicatorKey::Momentum,
        IndicatorKey::Cci,
    ];

    /// Report key, e.g. `"stochastic"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKey::Sma => "sma",
            IndicatorKey::Ema => "ema",
            IndicatorKey::Macd => "macd",
            IndicatorKey::Rsi => "rsi",
            IndicatorKey::Stochastic => "stochastic",
            IndicatorKey::Volume => "volume",
            IndicatorKey::Obv => "obv",
            IndicatorKey::Rvol => "rvol",
            IndicatorKey::Atr => "atr",
            IndicatorKey::Adx => "adx",
            IndicatorKey::Momentum => "momentum",
            IndicatorKey::Cci => "cci",
        }
    }

    /// Display name used in narratives.
    pub fn label(&self) -> &'static str {
        match self {
            IndicatorKey::Sma => "SMA",
            IndicatorKey::Ema => "EMA",
            IndicatorKey::Macd => "MACD",
            IndicatorKey::Rsi => "RSI",
            IndicatorKey::Stochastic => "Stochastic Oscillator",
            IndicatorKey::Volume => "Volume Trend",
            IndicatorKey::Obv => "OBV",
            IndicatorKey::Rvol => "RVOL",
            IndicatorKey::Atr => "ATR",
            IndicatorKey::Adx => "ADX",
            IndicatorKey::Momentum => "Momentum",
            IndicatorKey::Cci => "CCI",
        }
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
