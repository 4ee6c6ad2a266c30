/// Relative Strength Index (RSI)
///
/// RSI measures the magnitude of recent price changes to evaluate
/// overbought or oversold conditions.
///
/// Values:
/// - RSI > 70: Overbought
/// - RSI < 30: Oversold
///
/// Uses Wilder's smoothing after a simple-average seed.

/// Calculate the RSI series
///
/// The first value covers the first `period` price changes; each later
/// value folds in one more change with
/// `avg = (avg * (period - 1) + change) / period`.
///
/// Degenerate averages resolve to defined readings instead of NaN:
/// - average loss of zero with gains: RSI 100
/// - no gains and no losses (flat prices): RSI 50
pub fn calculate_rsi_series(prices: &[f64], period: usize) -> Option<Vec<f64>> {
    if period == 0 || prices.len() < period + 1 {
        return None;
    }

    let mut gains = Vec::with_capacity(prices.len() - 1);
    let mut losses = Vec::with_capacity(prices.len() - 1);

    // Calculate price changes
    for i in 1..prices.len() {
        let change = prices[i] - prices[i - 1];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(-change);
        }
    }

    let period_f = period as f64;
    let mut avg_gain: f64 = gains[..period].iter().sum::<f64>() / period_f;
    let mut avg_loss: f64 = losses[..period].iter().sum::<f64>() / period_f;

    let mut series = Vec::with_capacity(gains.len() - period + 1);
    series.push(rsi_from_averages(avg_gain, avg_loss));

    for i in period..gains.len() {
        avg_gain = (avg_gain * (period_f - 1.0) + gains[i]) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + losses[i]) / period_f;
        series.push(rsi_from_averages(avg_gain, avg_loss));
    }

    Some(series)
}

/// Calculate the latest RSI value
pub fn calculate_rsi(prices: &[f64], period: usize) -> Option<f64> {
    calculate_rsi_series(prices, period)?.last().copied()
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        // RS = +inf
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
