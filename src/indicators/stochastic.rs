/// Stochastic Oscillator
///
/// %K locates the close inside the high/low range of the trailing window:
/// `%K = 100 * (close - lowest_low) / (highest_high - lowest_low)`.
/// %D is a short simple average of %K.

#[derive(Debug, Clone, PartialEq)]
pub struct StochasticSeries {
    /// One value per complete window; `k[0]` ends at bar `period - 1`
    pub k: Vec<f64>,
    /// Aligned with `k`
    pub d: Vec<f64>,
    /// Leading `d` entries averaged over fewer than `d_period` %K values.
    /// They are warm-up readings, not full %D values.
    pub warmup: usize,
}

/// Calculate %K and %D
///
/// A window whose high equals its low has no range to locate the close in;
/// its %K is pinned to the midpoint, 50.
pub fn calculate_stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
    d_period: usize,
) -> Option<StochasticSeries> {
    let len = closes.len();
    if period == 0 || d_period == 0 || len < period || highs.len() != len || lows.len() != len {
        return None;
    }

    let mut k = Vec::with_capacity(len - period + 1);
    for end in period - 1..len {
        let start = end + 1 - period;
        let lowest = lows[start..=end].iter().copied().fold(f64::INFINITY, f64::min);
        let highest = highs[start..=end]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        let range = highest - lowest;
        let value = if range == 0.0 {
            50.0
        } else {
            100.0 * (closes[end] - lowest) / range
        };
        k.push(value);
    }

    let d = k
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let start = (i + 1).saturating_sub(d_period);
            let window = &k[start..=i];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect();

    Some(StochasticSeries {
        k,
        d,
        warmup: d_period - 1,
    })
}
