/// Moving Average Convergence Divergence (MACD)
///
/// MACD line = EMA(fast) - EMA(slow), right-aligned: the longer fast EMA
/// is trimmed from the front to the slow EMA's length, never re-seeded.
/// Signal line = EMA(signal) of the MACD line.
use super::moving_average::calculate_ema_series;

#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    /// Right-aligned with `macd`; `signal.len() = macd.len() - signal_period + 1`
    pub signal: Vec<f64>,
}

impl MacdSeries {
    /// MACD minus signal for each bar where both exist
    pub fn histogram(&self) -> Vec<f64> {
        let offset = self.macd.len() - self.signal.len();
        self.macd[offset..]
            .iter()
            .zip(&self.signal)
            .map(|(m, s)| m - s)
            .collect()
    }
}

/// Calculate the MACD and signal lines
///
/// Returns None if either EMA cannot be seeded or the MACD line is shorter
/// than `signal_period`.
pub fn calculate_macd(
    prices: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Option<MacdSeries> {
    let fast = calculate_ema_series(prices, fast_period)?;
    let slow = calculate_ema_series(prices, slow_period)?;

    let len = fast.len().min(slow.len());
    let fast = &fast[fast.len() - len..];
    let slow = &slow[slow.len() - len..];

    let macd: Vec<f64> = fast.iter().zip(slow).map(|(f, s)| f - s).collect();
    let signal = calculate_ema_series(&macd, signal_period)?;

    Some(MacdSeries { macd, signal })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macd_lengths() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let series = calculate_macd(&prices, 12, 26, 9).unwrap();

        // slow EMA has 40 - 26 + 1 = 15 values
        assert_eq!(series.macd.len(), 15);
        assert_eq!(series.signal.len(), 7);
        assert_eq!(series.histogram().len(), 7);
    }

    #[test]
    fn test_macd_worked_values() {
        // EMA2 = [1.5, 19/6, 115/18, 691/54, 4147/162]
        // EMA3 = [7/3, 31/6, 127/12, 511/24]
        // MACD = EMA2[1..] - EMA3 = [5/6, 11/9, 239/108, 2791/648]
        // Signal = EMA2(MACD) = [37/36, 589/324, 845/243]
        let prices = vec![1.0, 2.0, 4.0, 8.0, 16.0, 32.0];
        let series = calculate_macd(&prices, 2, 3, 2).unwrap();

        let expected_macd = [5.0 / 6.0, 11.0 / 9.0, 239.0 / 108.0, 2791.0 / 648.0];
        let expected_signal = [37.0 / 36.0, 589.0 / 324.0, 845.0 / 243.0];

        assert_eq!(series.macd.len(), expected_macd.len());
        for (value, expected) in series.macd.iter().zip(expected_macd) {
            assert!((value - expected).abs() < 1e-9, "MACD {value} != {expected}");
        }
        assert_eq!(series.signal.len(), expected_signal.len());
        for (value, expected) in series.signal.iter().zip(expected_signal) {
            assert!((value - expected).abs() < 1e-9, "signal {value} != {expected}");
        }

        let histogram = series.histogram();
        assert!((histogram[2] - (2791.0 / 648.0 - 845.0 / 243.0)).abs() < 1e-9);
    }

    #[test]
    fn test_macd_positive_in_uptrend() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 2.0).collect();
        let series = calculate_macd(&prices, 12, 26, 9).unwrap();

        assert!(series.macd.iter().all(|m| *m > 0.0));
    }

    #[test]
    fn test_macd_flat_prices() {
        let prices = vec![50.0; 40];
        let series = calculate_macd(&prices, 12, 26, 9).unwrap();

        assert!(series.macd.iter().all(|m| m.abs() < 1e-12));
        assert!(series.signal.iter().all(|s| s.abs() < 1e-12));
    }

    #[test]
    fn test_macd_insufficient_data() {
        let prices: Vec<f64> = (0..20).map(|i| i as f64).collect();
        assert!(calculate_macd(&prices, 12, 26, 9).is_none());

        // Enough for the slow EMA but not for the signal line
        let prices: Vec<f64> = (0..30).map(|i| i as f64).collect();
        assert!(calculate_macd(&prices, 12, 26, 9).is_none());
    }
}
