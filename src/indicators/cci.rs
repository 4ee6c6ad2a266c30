/// Commodity Channel Index (CCI)
///
/// CCI = (TP - SMA(TP)) / (constant * MeanDeviation(TP))
/// where TP = (high + low + close) / 3.
///
/// Returns one value per complete window; a window with zero mean
/// deviation reads 0.
pub fn calculate_cci(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
    constant: f64,
) -> Option<Vec<f64>> {
    let len = closes.len();
    if period == 0 || len < period || highs.len() != len || lows.len() != len {
        return None;
    }

    let typical: Vec<f64> = (0..len)
        .map(|i| (highs[i] + lows[i] + closes[i]) / 3.0)
        .collect();

    let period_f = period as f64;
    let cci = typical
        .windows(period)
        .map(|window| {
            let sma = window.iter().sum::<f64>() / period_f;
            let mean_deviation = window.iter().map(|tp| (tp - sma).abs()).sum::<f64>() / period_f;

            if mean_deviation == 0.0 {
                return 0.0;
            }

            let latest = window[period - 1];
            (latest - sma) / (constant * mean_deviation)
        })
        .collect();

    Some(cci)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cci_known_window() {
        // TP = close when high == low == close
        let prices = vec![1.0, 2.0, 3.0];

        let cci = calculate_cci(&prices, &prices, &prices, 3, 0.015).unwrap();
        // SMA 2, mean deviation 2/3
        let expected = (3.0 - 2.0) / (0.015 * (2.0 / 3.0));
        assert_eq!(cci.len(), 1);
        assert!((cci[0] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_cci_breaks_out_over_longer_window() {
        // A 3-bar window caps |CCI| at 100; a longer one can exceed it
        let mut prices = vec![100.0; 19];
        prices.push(200.0);

        let cci = calculate_cci(&prices, &prices, &prices, 20, 0.015).unwrap();
        // SMA 105, mean deviation 9.5
        let expected = 95.0 / (0.015 * 9.5);
        assert!((cci[0] - expected).abs() < 1e-9);
        assert!(cci[0] > 100.0);
    }

    #[test]
    fn test_cci_falling_is_negative() {
        let prices = vec![10.0, 8.0, 5.0, 1.0];

        let cci = calculate_cci(&prices, &prices, &prices, 3, 0.015).unwrap();
        assert_eq!(cci.len(), 2);
        assert!(cci.iter().all(|v| *v < 0.0));
    }

    #[test]
    fn test_cci_flat_window_is_zero() {
        let highs = vec![11.0; 5];
        let lows = vec![9.0; 5];
        let closes = vec![10.0; 5];

        let cci = calculate_cci(&highs, &lows, &closes, 3, 0.015).unwrap();
        assert!(cci.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_cci_insufficient_data() {
        let prices = vec![1.0, 2.0];
        assert!(calculate_cci(&prices, &prices, &prices, 3, 0.015).is_none());
    }
}
