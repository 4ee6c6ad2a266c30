use serde::{Deserialize, Serialize};
use std::fmt;

/// Shared vocabulary for every indicator reading.
///
/// Each analyzer maps onto a subset of these; `Unavailable` marks a slot
/// whose indicator could not be computed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendClassification {
    Uptrend,
    Downtrend,
    PotentialUptrend,
    PotentialDowntrend,
    ShortTermUpLongTermDown,
    ShortTermDownLongTermUp,
    Overbought,
    Oversold,
    Neutral,
    IncreasedRisk,
    ModerateRisk,
    LowerRisk,
    StrongTrend,
    ModerateTrend,
    WeakTrend,
    Unavailable,
}

impl fmt::Display for TrendClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendClassification::Uptrend => "Uptrend",
            TrendClassification::Downtrend => "Downtrend",
            TrendClassification::PotentialUptrend => "Potential uptrend",
            TrendClassification::PotentialDowntrend => "Potential downtrend",
            TrendClassification::ShortTermUpLongTermDown => "Short-term uptrend, long-term downtrend",
            TrendClassification::ShortTermDownLongTermUp => "Short-term downtrend, long-term uptrend",
            TrendClassification::Overbought => "Overbought",
            TrendClassification::Oversold => "Oversold",
            TrendClassification::Neutral => "Neutral",
            TrendClassification::IncreasedRisk => "Increased trading risk",
            TrendClassification::ModerateRisk => "Moderate trading risk",
            TrendClassification::LowerRisk => "Lower trading risk",
            TrendClassification::StrongTrend => "Strong trend",
            TrendClassification::ModerateTrend => "Moderate trend",
            TrendClassification::WeakTrend => "Weak trend",
            TrendClassification::Unavailable => "Unavailable",
        };
        f.write_str(label)
    }
}

/// Classification plus a display-ready sentence embedding the key reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub classification: TrendClassification,
    pub narrative: String,
}

impl AnalysisResult {
    pub fn new(classification: TrendClassification, narrative: impl Into<String>) -> Self {
        Self {
            classification,
            narrative: narrative.into(),
        }
    }

    pub fn neutral(narrative: impl Into<String>) -> Self {
        Self::new(TrendClassification::Neutral, narrative)
    }

    pub fn unavailable(narrative: impl Into<String>) -> Self {
        Self::new(TrendClassification::Unavailable, narrative)
    }
}
