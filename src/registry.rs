//! Analyzer registry for uniform dispatch
//!
//! Each entry pairs an [`IndicatorKey`] with a factory that builds the
//! analyzer for a symbol. The registry runs every entry against one series
//! and merges the outcomes into an [`IndexReport`], continuing past any
//! entry that fails to build, rejects the series or panics.

use crate::analyzers::{
    unavailable_narrative, AdxAnalyzer, Analyzer, AtrAnalyzer, CciAnalyzer, EmaAnalyzer,
    MacdAnalyzer, MomentumAnalyzer, ObvAnalyzer, RsiAnalyzer, RvolAnalyzer, SmaAnalyzer,
    StochasticAnalyzer, VolumeTrendAnalyzer,
};
use crate::config::IndicatorConfig;
use crate::error::ConfigError;
use crate::models::{AnalysisResult, IndicatorKey, MarketSeries};
use crate::report::{IndexReport, SlotError};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

/// Factory function type for building an analyzer for a symbol.
pub type AnalyzerFactory = Box<
    dyn Fn(&str, &IndicatorConfig) -> Result<Box<dyn Analyzer>, ConfigError> + Send + Sync,
>;

/// One dispatch slot: the report key and how to build its analyzer.
#[derive(Clone)]
pub struct AnalyzerEntry {
    key: IndicatorKey,
    factory: Arc<AnalyzerFactory>,
}

impl AnalyzerEntry {
    pub fn key(&self) -> IndicatorKey {
        self.key
    }

    /// Build the analyzer and run it, always producing a slot result.
    fn evaluate(
        &self,
        symbol: &str,
        config: &IndicatorConfig,
        series: &MarketSeries,
    ) -> (AnalysisResult, Option<SlotError>) {
        let analyzer = match (self.factory)(symbol, config) {
            Ok(analyzer) => analyzer,
            Err(err) => {
                warn!(symbol, indicator = %self.key, error = %err, "Analyzer could not be built");
                let result = AnalysisResult::unavailable(unavailable_narrative(self.key, &err));
                return (
                    result,
                    Some(SlotError::Config {
                        message: err.to_string(),
                    }),
                );
            }
        };

        let (result, error) = analyzer.evaluate(series);
        match &error {
            Some(err) => {
                warn!(symbol, indicator = %self.key, error = %err, "Analyzer degraded")
            }
            None => debug!(
                symbol,
                indicator = %self.key,
                classification = %result.classification,
                "Analyzer finished"
            ),
        }

        (result, error.map(SlotError::from))
    }
}

impl std::fmt::Debug for AnalyzerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerEntry")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Ordered list of analyzer factories sharing one [`IndicatorConfig`].
///
/// # Example
/// ```ignore
/// let registry = AnalyzerRegistry::with_defaults(IndicatorConfig::default());
/// let report = registry.run("AAPL", &series);
/// assert!(report.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzerRegistry {
    config: Arc<IndicatorConfig>,
    entries: Vec<AnalyzerEntry>,
}

impl AnalyzerRegistry {
    /// Creates an empty registry.
    pub fn new(config: IndicatorConfig) -> Self {
        Self {
            config: Arc::new(config),
            entries: Vec::new(),
        }
    }

    /// Creates a registry with all twelve indicators, in report key order.
    pub fn with_defaults(config: IndicatorConfig) -> Self {
        let mut registry = Self::new(config);
        registry.register_defaults();
        registry
    }

    /// Registers a factory, replacing any existing entry for the same key.
    pub fn register<F>(&mut self, key: IndicatorKey, factory: F)
    where
        F: Fn(&str, &IndicatorConfig) -> Result<Box<dyn Analyzer>, ConfigError>
            + Send
            + Sync
            + 'static,
    {
        let entry = AnalyzerEntry {
            key,
            factory: Arc::new(Box::new(factory)),
        };

        match self.entries.iter_mut().find(|existing| existing.key == key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn keys(&self) -> impl Iterator<Item = IndicatorKey> + '_ {
        self.entries.iter().map(AnalyzerEntry::key)
    }

    pub fn contains(&self, key: IndicatorKey) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds one analyzer without running it.
    pub fn build(&self, key: IndicatorKey, symbol: &str) -> Option<Result<Box<dyn Analyzer>, ConfigError>> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| (entry.factory)(symbol, &self.config))
    }

    /// Runs every entry in order on the calling thread.
    ///
    /// An analyzer that panics degrades its slot to `Unavailable`, as in
    /// [`Self::run_concurrent`].
    pub fn run(&self, symbol: &str, series: &MarketSeries) -> IndexReport {
        let mut report = IndexReport::new(symbol);

        for entry in &self.entries {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                entry.evaluate(symbol, &self.config, series)
            }));
            let (result, error) = match outcome {
                Ok(outcome) => outcome,
                Err(payload) => task_failed(symbol, entry.key, panic_message(payload.as_ref())),
            };
            report.record(entry.key, result, error);
        }

        report
    }

    /// Runs every entry on the blocking pool and merges results in entry order.
    ///
    /// Tasks only read the shared series; this function is the single writer
    /// of the report. A task that panics degrades its slot to `Unavailable`.
    pub async fn run_concurrent(&self, symbol: &str, series: Arc<MarketSeries>) -> IndexReport {
        let handles: Vec<_> = self
            .entries
            .iter()
            .map(|entry| {
                let key = entry.key;
                let entry = entry.clone();
                let config = Arc::clone(&self.config);
                let series = Arc::clone(&series);
                let symbol = symbol.to_string();

                let handle = tokio::task::spawn_blocking(move || {
                    entry.evaluate(&symbol, &config, &series)
                });
                (key, handle)
            })
            .collect();

        let mut report = IndexReport::new(symbol);
        for (key, handle) in handles {
            let (result, error) = match handle.await {
                Ok(outcome) => outcome,
                Err(join_err) => task_failed(symbol, key, join_err.to_string()),
            };
            report.record(key, result, error);
        }

        report
    }

    fn register_defaults(&mut self) {
        self.register(IndicatorKey::Sma, |symbol, config| {
            Ok(Box::new(SmaAnalyzer::with_params(symbol, config.sma.clone())?))
        });
        self.register(IndicatorKey::Ema, |symbol, config| {
            Ok(Box::new(EmaAnalyzer::with_params(symbol, config.ema.clone())?))
        });
        self.register(IndicatorKey::Macd, |symbol, config| {
            Ok(Box::new(MacdAnalyzer::with_params(symbol, config.macd.clone())?))
        });
        self.register(IndicatorKey::Rsi, |symbol, config| {
            Ok(Box::new(RsiAnalyzer::with_params(symbol, config.rsi.clone())?))
        });
        self.register(IndicatorKey::Stochastic, |symbol, config| {
            Ok(Box::new(StochasticAnalyzer::with_params(
                symbol,
                config.stochastic.clone(),
            )?))
        });
        self.register(IndicatorKey::Volume, |symbol, _| {
            Ok(Box::new(VolumeTrendAnalyzer::new(symbol)?))
        });
        self.register(IndicatorKey::Obv, |symbol, _| {
            Ok(Box::new(ObvAnalyzer::new(symbol)?))
        });
        self.register(IndicatorKey::Rvol, |symbol, config| {
            Ok(Box::new(RvolAnalyzer::with_params(symbol, config.rvol.clone())?))
        });
        self.register(IndicatorKey::Atr, |symbol, config| {
            Ok(Box::new(AtrAnalyzer::with_params(symbol, config.atr.clone())?))
        });
        self.register(IndicatorKey::Adx, |symbol, config| {
            Ok(Box::new(AdxAnalyzer::with_params(symbol, config.adx.clone())?))
        });
        self.register(IndicatorKey::Momentum, |symbol, config| {
            Ok(Box::new(MomentumAnalyzer::with_params(
                symbol,
                config.momentum.clone(),
            )?))
        });
        self.register(IndicatorKey::Cci, |symbol, config| {
            Ok(Box::new(CciAnalyzer::with_params(symbol, config.cci.clone())?))
        });
    }
}

/// Slot for an analyzer that panicked or whose task was lost
fn task_failed(
    symbol: &str,
    key: IndicatorKey,
    message: String,
) -> (AnalysisResult, Option<SlotError>) {
    warn!(symbol, indicator = %key, error = %message, "Analysis task failed");
    let error = SlotError::Task { message };
    let result = AnalysisResult::unavailable(unavailable_narrative(key, &error));
    (result, Some(error))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("analyzer panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("analyzer panicked: {message}")
    } else {
        "analyzer panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::create_test_bars;
    use crate::error::AnalysisError;
    use crate::models::TrendClassification;

    /// Analyzer that panics while analyzing
    struct PanickingAnalyzer;

    impl Analyzer for PanickingAnalyzer {
        fn key(&self) -> IndicatorKey {
            IndicatorKey::Rsi
        }

        fn symbol(&self) -> &str {
            "TEST"
        }

        fn min_bars(&self) -> usize {
            1
        }

        fn analyze(&self, _series: &MarketSeries) -> Result<AnalysisResult, AnalysisError> {
            panic!("boom")
        }
    }

    #[test]
    fn test_defaults_cover_every_key_in_order() {
        let registry = AnalyzerRegistry::with_defaults(IndicatorConfig::default());

        assert_eq!(registry.len(), 12);
        assert_eq!(registry.keys().collect::<Vec<_>>(), IndicatorKey::ALL.to_vec());
    }

    #[test]
    fn test_register_replaces_existing_key() {
        let mut registry = AnalyzerRegistry::with_defaults(IndicatorConfig::default());
        registry.register(IndicatorKey::Momentum, |symbol, _| {
            Ok(Box::new(MomentumAnalyzer::new(symbol)?))
        });

        assert_eq!(registry.len(), 12);
        assert!(registry.contains(IndicatorKey::Momentum));
    }

    #[test]
    fn test_one_bar_series_still_fills_every_slot() {
        let registry = AnalyzerRegistry::with_defaults(IndicatorConfig::default());
        let report = registry.run("TEST", &create_test_bars(&[100.0]));

        assert!(report.is_complete());
        assert_eq!(report.degraded_count(), 12);
        assert_eq!(
            report.classification(IndicatorKey::Sma),
            Some(TrendClassification::Unavailable)
        );
        assert_eq!(
            report.classification(IndicatorKey::Rsi),
            Some(TrendClassification::Neutral)
        );
    }

    #[test]
    fn test_empty_symbol_degrades_each_slot() {
        let registry = AnalyzerRegistry::with_defaults(IndicatorConfig::default());
        let report = registry.run("", &create_test_bars(&vec![100.0; 50]));

        assert!(report.is_complete());
        for key in IndicatorKey::ALL {
            assert_eq!(report.classification(key), Some(TrendClassification::Unavailable));
            assert!(matches!(report.error(key), Some(SlotError::Config { .. })));
        }
        assert_eq!(
            report.get(IndicatorKey::Cci).unwrap().narrative,
            "It is not possible to calculate CCI because: symbol cannot be empty."
        );
    }

    #[test]
    fn test_invalid_params_only_affect_their_slot() {
        let mut config = IndicatorConfig::default();
        config.rsi.period = 0;
        let registry = AnalyzerRegistry::with_defaults(config);

        let report = registry.run("TEST", &create_test_bars(&vec![100.0; 50]));
        assert!(matches!(
            report.error(IndicatorKey::Rsi),
            Some(SlotError::Config { .. })
        ));
        assert!(report.error(IndicatorKey::Momentum).is_none());
    }

    #[test]
    fn test_build_single_analyzer() {
        let registry = AnalyzerRegistry::with_defaults(IndicatorConfig::default());

        let analyzer = registry.build(IndicatorKey::Atr, "TEST").unwrap().unwrap();
        assert_eq!(analyzer.key(), IndicatorKey::Atr);
        assert_eq!(analyzer.min_bars(), 31);
        assert!(AnalyzerRegistry::new(IndicatorConfig::default())
            .build(IndicatorKey::Atr, "TEST")
            .is_none());
    }

    #[tokio::test]
    async fn test_concurrent_matches_sequential() {
        let registry = AnalyzerRegistry::with_defaults(IndicatorConfig::default());
        let closes: Vec<f64> = (0..250).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1).collect();
        let series = Arc::new(create_test_bars(&closes));

        let sequential = registry.run("TEST", &series);
        let concurrent = registry.run_concurrent("TEST", Arc::clone(&series)).await;

        assert_eq!(sequential, concurrent);
    }

    #[tokio::test]
    async fn test_panicking_task_degrades_its_slot() {
        let mut registry = AnalyzerRegistry::with_defaults(IndicatorConfig::default());
        registry.register(IndicatorKey::Rsi, |_, _| Ok(Box::new(PanickingAnalyzer)));

        let series = Arc::new(create_test_bars(&vec![100.0; 50]));
        let report = registry.run_concurrent("TEST", series).await;

        assert!(report.is_complete());
        assert_eq!(
            report.classification(IndicatorKey::Rsi),
            Some(TrendClassification::Unavailable)
        );
        assert!(matches!(report.error(IndicatorKey::Rsi), Some(SlotError::Task { .. })));
        assert!(report.error(IndicatorKey::Momentum).is_none());
    }

    #[test]
    fn test_panicking_analyzer_degrades_its_slot_sequentially() {
        let mut registry = AnalyzerRegistry::with_defaults(IndicatorConfig::default());
        registry.register(IndicatorKey::Rsi, |_, _| Ok(Box::new(PanickingAnalyzer)));

        let report = registry.run("TEST", &create_test_bars(&vec![100.0; 50]));

        assert!(report.is_complete());
        assert_eq!(
            report.classification(IndicatorKey::Rsi),
            Some(TrendClassification::Unavailable)
        );
        match report.error(IndicatorKey::Rsi) {
            Some(SlotError::Task { message }) => assert_eq!(message, "analyzer panicked: boom"),
            other => panic!("unexpected slot error: {other:?}"),
        }
        assert!(report
            .get(IndicatorKey::Rsi)
            .unwrap()
            .narrative
            .starts_with("It is not possible to calculate RSI because:"));
        assert!(report.error(IndicatorKey::Momentum).is_none());
    }
}
