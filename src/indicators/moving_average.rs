/// Calculate Simple Moving Average (SMA) of the trailing `period` values
pub fn calculate_sma(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period {
        return None;
    }

    let sum: f64 = prices.iter().rev().take(period).sum();
    Some(sum / period as f64)
}

/// Calculate the Exponential Moving Average (EMA) series
///
/// Seeded with the simple average of the first `period` prices, then
/// `ema[i] = price[i] * alpha + ema[i-1] * (1 - alpha)` with
/// `alpha = 2 / (period + 1)`.
///
/// Returns only the valid values: `prices.len() - period + 1` entries, the
/// first one aligned with `prices[period - 1]`.
pub fn calculate_ema_series(prices: &[f64], period: usize) -> Option<Vec<f64>> {
    if period == 0 || prices.len() < period {
        return None;
    }

    let alpha = 2.0 / (period as f64 + 1.0);

    let seed = prices[..period].iter().sum::<f64>() / period as f64;
    let mut series = Vec::with_capacity(prices.len() - period + 1);
    series.push(seed);

    let mut ema = seed;
    for price in &prices[period..] {
        ema = price * alpha + ema * (1.0 - alpha);
        series.push(ema);
    }

    Some(series)
}

/// Calculate the latest EMA value
pub fn calculate_ema(prices: &[f64], period: usize) -> Option<f64> {
    calculate_ema_series(prices, period)?.last().copied()
}
