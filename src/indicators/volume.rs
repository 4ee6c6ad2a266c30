//! Volume statistics: trailing average, relative volume and volume trend.

/// Calculate average volume over the trailing `period` bars
pub fn calculate_average_volume(volumes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || volumes.len() < period {
        return None;
    }

    let total_volume: f64 = volumes.iter().rev().take(period).sum();
    Some(total_volume / period as f64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeVolume {
    pub current: f64,
    pub average: f64,
}

impl RelativeVolume {
    /// Current over average; None when the average is zero
    pub fn ratio(&self) -> Option<f64> {
        if self.average == 0.0 {
            return None;
        }
        Some(self.current / self.average)
    }
}

/// Calculate Relative Volume (RVOL)
///
/// The numerator is the second-to-last bar's volume, not the last bar's,
/// measured against the trailing `period` average.
pub fn calculate_rvol(volumes: &[f64], period: usize) -> Option<RelativeVolume> {
    if volumes.len() < 2 {
        return None;
    }
    let average = calculate_average_volume(volumes, period)?;
    let current = volumes[volumes.len() - 2];

    Some(RelativeVolume { current, average })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeTrend {
    pub average_volume: f64,
    /// Share of bars whose volume beat the previous bar's, in percent
    pub increasing_pct: f64,
}

/// Calculate average volume over every bar and how often volume increased
pub fn calculate_volume_trend(volumes: &[f64]) -> Option<VolumeTrend> {
    if volumes.len() < 2 {
        return None;
    }

    let average_volume = volumes.iter().sum::<f64>() / volumes.len() as f64;
    let increasing = volumes.windows(2).filter(|w| w[1] > w[0]).count();
    let increasing_pct = increasing as f64 / (volumes.len() - 1) as f64 * 100.0;

    Some(VolumeTrend {
        average_volume,
        increasing_pct,
    })
}
