use crate::models::{MarketBar, MarketSeries};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 2023-11-14T22:13:20Z, so generated series are reproducible end to end
pub const DEFAULT_START_TIMESTAMP: i64 = 1_700_000_000;

/// Market scenario types for synthetic series generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MarketScenario {
    /// Steady uptrend with noise (+2% daily average)
    Uptrend,
    /// Steady downtrend with noise (-2% daily average)
    Downtrend,
    /// Sideways/choppy market (±1% around mean)
    Sideways,
    /// High volatility (±5% large swings)
    Volatile,
    /// Contains time gaps (missing bars)
    WithGaps,
}

/// Generates seeded synthetic OHLCV series
pub struct SyntheticSeriesGenerator {
    rng: StdRng,
    base_price: f64,
    base_volume: f64,
    start_timestamp: i64,
}

impl SyntheticSeriesGenerator {
    /// Create a new generator with a seed for reproducibility
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            base_price: 150.0,
            base_volume: 1_000_000.0,
            start_timestamp: DEFAULT_START_TIMESTAMP,
        }
    }

    pub fn with_start_timestamp(mut self, start_timestamp: i64) -> Self {
        self.start_timestamp = start_timestamp;
        self
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    /// Generate a series for a specific market scenario
    ///
    /// # Arguments
    /// * `scenario` - The market scenario to simulate
    /// * `num_bars` - Number of bar slots; `WithGaps` leaves some of them empty
    /// * `interval_minutes` - Minutes between bars (1440 for daily bars)
    pub fn generate(
        &mut self,
        scenario: MarketScenario,
        num_bars: usize,
        interval_minutes: i64,
    ) -> MarketSeries {
        let bars = match scenario {
            MarketScenario::Uptrend => self.generate_trend(0.02, num_bars, interval_minutes),
            MarketScenario::Downtrend => self.generate_trend(-0.02, num_bars, interval_minutes),
            MarketScenario::Sideways => self.generate_sideways(num_bars, interval_minutes),
            MarketScenario::Volatile => self.generate_volatile(num_bars, interval_minutes),
            MarketScenario::WithGaps => self.generate_with_gaps(num_bars, interval_minutes),
        };

        tracing::debug!(?scenario, bars = bars.len(), "Generated synthetic series");
        MarketSeries::new(bars)
    }

    fn timestamp_at(&self, slot: usize, interval_minutes: i64) -> i64 {
        self.start_timestamp + slot as i64 * interval_minutes * 60
    }

    /// Generate a trend with `daily_drift` (e.g. 0.02 = +2% per day) plus noise
    fn generate_trend(
        &mut self,
        daily_drift: f64,
        num_bars: usize,
        interval_minutes: i64,
    ) -> Vec<MarketBar> {
        let mut bars = Vec::with_capacity(num_bars);
        let mut current_price = self.base_price;

        let drift_per_interval = daily_drift / (24.0 * 60.0 / interval_minutes as f64);

        for i in 0..num_bars {
            // Apply drift + reduced noise so trend is dominant
            let drift = current_price * drift_per_interval;
            let noise = current_price * self.rng.gen_range(-0.001..0.001); // ±0.1% noise
            current_price += drift + noise;

            let timestamp = self.timestamp_at(i, interval_minutes);
            bars.push(self.create_bar(current_price, timestamp));
        }

        bars
    }

    /// Generate sideways market: mean-reverting random walk
    fn generate_sideways(&mut self, num_bars: usize, interval_minutes: i64) -> Vec<MarketBar> {
        let mut bars = Vec::with_capacity(num_bars);
        let mut current_price = self.base_price;
        let mean_price = self.base_price;

        for i in 0..num_bars {
            // Mean reversion force + noise
            let reversion = (mean_price - current_price) * 0.1; // 10% pull to mean
            let noise = current_price * self.rng.gen_range(-0.01..0.01); // ±1% noise
            current_price += reversion + noise;

            let timestamp = self.timestamp_at(i, interval_minutes);
            bars.push(self.create_bar(current_price, timestamp));
        }

        bars
    }

    /// Generate volatile market: large swings
    fn generate_volatile(&mut self, num_bars: usize, interval_minutes: i64) -> Vec<MarketBar> {
        let mut bars = Vec::with_capacity(num_bars);
        let mut current_price = self.base_price;

        for i in 0..num_bars {
            // Large random moves
            let change = current_price * self.rng.gen_range(-0.05..0.05); // ±5% per bar
            current_price += change;

            // Prevent price from going too low
            if current_price < self.base_price * 0.5 {
                current_price = self.base_price * 0.5;
            }

            let timestamp = self.timestamp_at(i, interval_minutes);
            bars.push(self.create_bar(current_price, timestamp));
        }

        bars
    }

    /// Generate data with time gaps
    fn generate_with_gaps(&mut self, num_bars: usize, interval_minutes: i64) -> Vec<MarketBar> {
        let mut bars = Vec::with_capacity(num_bars);
        let mut current_price = self.base_price;
        let mut slot = 0;

        for i in 0..num_bars {
            // Skip every 50th bar to create gaps
            if i % 50 == 49 {
                slot += 2; // Create a gap
                continue;
            }

            let change = current_price * self.rng.gen_range(-0.01..0.01);
            current_price += change;

            let timestamp = self.timestamp_at(slot, interval_minutes);
            bars.push(self.create_bar(current_price, timestamp));

            slot += 1;
        }

        bars
    }

    /// Helper to create a bar from close price and timestamp
    fn create_bar(&mut self, price: f64, timestamp: i64) -> MarketBar {
        // Create realistic OHLC from close price
        let noise_pct = 0.002; // ±0.2% intrabar movement

        // Generate high and low around the close price
        let high = price * (1.0 + self.rng.gen_range(0.0..noise_pct));
        let low = price * (1.0 - self.rng.gen_range(0.0..noise_pct));

        // Generate open and clamp it between low and high
        let open_raw = price * (1.0 + self.rng.gen_range(-noise_pct..noise_pct));
        let open = open_raw.clamp(low, high);

        // Vary volume ±30%
        let volume = (self.base_volume * self.rng.gen_range(0.7..1.3)).round() as i64;

        MarketBar {
            open,
            high,
            low,
            close: price,
            volume,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAILY: i64 = 24 * 60;

    #[test]
    fn test_generate_uptrend() {
        let mut gen = SyntheticSeriesGenerator::new(42);
        let series = gen.generate(MarketScenario::Uptrend, 300, DAILY);

        assert_eq!(series.len(), 300);

        // First and last price - should be higher at end
        let first_price = series.bars().first().unwrap().close;
        let last_price = series.bars().last().unwrap().close;

        assert!(
            last_price > first_price,
            "Uptrend should end higher: {} -> {}",
            first_price,
            last_price
        );
    }

    #[test]
    fn test_generate_downtrend() {
        let mut gen = SyntheticSeriesGenerator::new(42);
        let series = gen.generate(MarketScenario::Downtrend, 300, DAILY);

        let first_price = series.bars().first().unwrap().close;
        let last_price = series.bars().last().unwrap().close;

        assert!(
            last_price < first_price,
            "Downtrend should end lower: {} -> {}",
            first_price,
            last_price
        );
        assert!(last_price > 0.0);
    }

    #[test]
    fn test_generate_sideways() {
        let mut gen = SyntheticSeriesGenerator::new(42);
        let series = gen.generate(MarketScenario::Sideways, 500, DAILY);

        // Should stay roughly around base price (±10%)
        let base = gen.base_price();
        for bar in series.bars() {
            assert!(
                bar.close > base * 0.9 && bar.close < base * 1.1,
                "Sideways should stay near base: {} vs {}",
                bar.close,
                base
            );
        }
    }

    #[test]
    fn test_generate_with_gaps() {
        let mut gen = SyntheticSeriesGenerator::new(42);
        let series = gen.generate(MarketScenario::WithGaps, 100, 5);

        // Should have fewer bars due to gaps
        assert!(series.len() < 100);

        let has_gap = series
            .bars()
            .windows(2)
            .any(|pair| pair[1].timestamp - pair[0].timestamp > 5 * 60);
        assert!(has_gap, "Should contain time gaps");
    }

    #[test]
    fn test_same_seed_same_series() {
        let a = SyntheticSeriesGenerator::new(7).generate(MarketScenario::Volatile, 200, DAILY);
        let b = SyntheticSeriesGenerator::new(7).generate(MarketScenario::Volatile, 200, DAILY);
        let c = SyntheticSeriesGenerator::new(8).generate(MarketScenario::Volatile, 200, DAILY);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_timestamps_are_sequential() {
        let mut gen = SyntheticSeriesGenerator::new(42).with_start_timestamp(0);
        let series = gen.generate(MarketScenario::Uptrend, 100, DAILY);

        assert_eq!(series.bars()[0].timestamp, 0);
        assert_eq!(series.bars()[1].timestamp, 86_400);
        for pair in series.bars().windows(2) {
            assert!(pair[1].timestamp > pair[0].timestamp, "Timestamps should be sequential");
        }
    }

    #[test]
    fn test_ohlc_consistency() {
        let mut gen = SyntheticSeriesGenerator::new(42);
        let series = gen.generate(MarketScenario::Volatile, 100, DAILY);

        for bar in series.bars() {
            assert!(bar.high >= bar.close, "High should be >= close");
            assert!(bar.high >= bar.open, "High should be >= open");
            assert!(bar.low <= bar.close, "Low should be <= close");
            assert!(bar.low <= bar.open, "Low should be <= open");
            assert!(bar.volume > 0);
        }
    }
}
