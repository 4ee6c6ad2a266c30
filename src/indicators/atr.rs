/// Average True Range (ATR) indicator
///
/// Measures market volatility by calculating the average of true ranges over a period.
/// True Range is the greatest of:
/// - Current High - Current Low
/// - Abs(Current High - Previous Close)
/// - Abs(Current Low - Previous Close)
///
/// Uses Wilder's smoothing (same as RSI and ADX) for the moving average.

/// True range of a bar given the previous bar's close
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// True ranges for bars 1..n (bar 0 has no previous close)
pub fn true_ranges(highs: &[f64], lows: &[f64], closes: &[f64]) -> Vec<f64> {
    (1..closes.len())
        .map(|i| true_range(highs[i], lows[i], closes[i - 1]))
        .collect()
}

/// Calculate ATR and return every smoothed value
///
/// The first value is the simple mean of the true ranges of bars
/// 1..=period; each later bar applies
/// `atr = (atr * (period - 1) + tr) / period`.
/// Returns `len - period` values, or None with fewer than `period + 1` bars.
pub fn calculate_atr_series(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
) -> Option<Vec<f64>> {
    let len = closes.len();
    if period == 0 || len < period + 1 || highs.len() != len || lows.len() != len {
        return None;
    }

    let trs = true_ranges(highs, lows, closes);
    let period_f = period as f64;

    // First ATR is simple average of first 'period' true ranges
    let first_atr: f64 = trs.iter().take(period).sum::<f64>() / period_f;

    let mut atr_series = Vec::with_capacity(trs.len() - period + 1);
    atr_series.push(first_atr);

    // Apply Wilder's smoothing for subsequent values
    let mut atr = first_atr;
    for tr in &trs[period..] {
        atr = (atr * (period_f - 1.0) + tr) / period_f;
        atr_series.push(atr);
    }

    Some(atr_series)
}

/// Calculate the current ATR value
pub fn calculate_atr(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Option<f64> {
    calculate_atr_series(highs, lows, closes, period)?.last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(prices: &[(f64, f64, f64)]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let highs = prices.iter().map(|p| p.0).collect();
        let lows = prices.iter().map(|p| p.1).collect();
        let closes = prices.iter().map(|p| p.2).collect();
        (highs, lows, closes)
    }

    #[test]
    fn test_true_range_uses_gap() {
        assert_eq!(true_range(101.0, 99.0, 100.0), 2.0);
        // Gap up: distance from previous close dominates
        assert_eq!(true_range(110.0, 108.0, 100.0), 10.0);
        // Gap down
        assert_eq!(true_range(92.0, 90.0, 100.0), 10.0);
    }

    #[test]
    fn test_calculate_atr() {
        // Low volatility market
        let low_vol_prices = vec![(101.0, 99.0, 100.0); 15];

        let (highs, lows, closes) = split(&low_vol_prices);
        let atr = calculate_atr(&highs, &lows, &closes, 14);

        assert!(atr.is_some());
        // ATR should be around 2.0 (high-low range)
        assert!((atr.unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_calculate_atr_high_volatility() {
        // High volatility market with gaps
        let high_vol_prices = vec![
            (105.0, 95.0, 102.0),
            (110.0, 98.0, 105.0),
            (108.0, 92.0, 95.0),
            (103.0, 88.0, 100.0),
            (115.0, 97.0, 110.0),
            (112.0, 95.0, 98.0),
            (108.0, 90.0, 105.0),
            (120.0, 100.0, 115.0),
            (118.0, 105.0, 110.0),
            (125.0, 108.0, 120.0),
            (130.0, 115.0, 125.0),
            (128.0, 110.0, 115.0),
            (122.0, 105.0, 118.0),
            (130.0, 115.0, 125.0),
            (135.0, 120.0, 130.0),
        ];

        let (highs, lows, closes) = split(&high_vol_prices);
        let atr = calculate_atr(&highs, &lows, &closes, 14);

        assert!(atr.is_some());
        // ATR should be higher for volatile market
        assert!(atr.unwrap() > 10.0);
    }

    #[test]
    fn test_wilder_recurrence() {
        // TRs: 2, 2, 8
        let prices = vec![
            (101.0, 99.0, 100.0),
            (101.0, 99.0, 100.0),
            (101.0, 99.0, 100.0),
            (104.0, 96.0, 100.0),
        ];
        let (highs, lows, closes) = split(&prices);

        let series = calculate_atr_series(&highs, &lows, &closes, 2).unwrap();
        assert_eq!(series, vec![2.0, (2.0 * 1.0 + 8.0) / 2.0]);
    }

    #[test]
    fn test_insufficient_data() {
        let prices = vec![(101.0, 99.0, 100.0); 14];

        let (highs, lows, closes) = split(&prices);
        let atr = calculate_atr(&highs, &lows, &closes, 14);

        assert!(atr.is_none());
    }

    #[test]
    fn test_atr_series() {
        let prices = vec![(105.0, 95.0, 100.0); 15];

        let (highs, lows, closes) = split(&prices);
        let atr_series = calculate_atr_series(&highs, &lows, &closes, 14).unwrap();

        // Should have 1 ATR value (15 candles - 14 period = 1)
        assert_eq!(atr_series.len(), 1);
    }
}
