use crate::config::IndicatorConfig;
use crate::error::ConfigError;
use crate::models::MarketSeries;
use crate::registry::AnalyzerRegistry;
use crate::report::IndexReport;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Entry point for building index reports.
///
/// Takes a symbol and an already materialized series; fetching bars is the
/// caller's concern.
#[derive(Debug, Clone)]
pub struct IndexService {
    registry: AnalyzerRegistry,
}

impl IndexService {
    pub fn new(config: IndicatorConfig) -> Self {
        Self::with_registry(AnalyzerRegistry::with_defaults(config))
    }

    pub fn with_registry(registry: AnalyzerRegistry) -> Self {
        Self { registry }
    }

    /// Load layered configuration (optional file, then `MARKET_INDEX_*` env) and build the service
    pub fn from_config_file(path: Option<&Path>) -> Result<Self, ConfigError> {
        Ok(Self::new(IndicatorConfig::load(path)?))
    }

    pub fn registry(&self) -> &AnalyzerRegistry {
        &self.registry
    }

    pub fn build_report(&self, symbol: &str, series: &MarketSeries) -> IndexReport {
        let started = Instant::now();
        tracing::info!(symbol, bars = series.len(), "Building index report");

        let report = self.registry.run(symbol, series);
        log_finished(&report, started);
        report
    }

    /// Same report as [`Self::build_report`], with analyzers fanned out on the blocking pool
    pub async fn build_report_concurrent(
        &self,
        symbol: &str,
        series: Arc<MarketSeries>,
    ) -> IndexReport {
        let started = Instant::now();
        tracing::info!(symbol, bars = series.len(), "Building index report concurrently");

        let report = self.registry.run_concurrent(symbol, series).await;
        log_finished(&report, started);
        report
    }
}

impl Default for IndexService {
    fn default() -> Self {
        Self::new(IndicatorConfig::default())
    }
}

fn log_finished(report: &IndexReport, started: Instant) {
    tracing::info!(
        symbol = %report.symbol,
        indicators = report.results.len(),
        degraded = report.degraded_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Index report ready"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IndicatorKey, TrendClassification};
    use crate::synthetic::{MarketScenario, SyntheticSeriesGenerator};

    #[test]
    fn test_uptrend_report() {
        let service = IndexService::default();
        let series = SyntheticSeriesGenerator::new(42).generate(MarketScenario::Uptrend, 300, 24 * 60);

        let report = service.build_report("SYNTH", &series);
        assert_eq!(report.symbol, "SYNTH");
        assert!(report.is_complete());
        assert_eq!(report.degraded_count(), 0);
        assert_eq!(
            report.classification(IndicatorKey::Sma),
            Some(TrendClassification::Uptrend)
        );
        assert_eq!(
            report.classification(IndicatorKey::Momentum),
            Some(TrendClassification::PotentialUptrend)
        );
    }

    #[test]
    fn test_report_is_idempotent() {
        let service = IndexService::default();
        let series = SyntheticSeriesGenerator::new(3).generate(MarketScenario::Volatile, 250, 24 * 60);

        assert_eq!(
            service.build_report("SYNTH", &series),
            service.build_report("SYNTH", &series)
        );
    }

    #[tokio::test]
    async fn test_concurrent_report_matches() {
        let service = IndexService::default();
        let series = Arc::new(
            SyntheticSeriesGenerator::new(9).generate(MarketScenario::Sideways, 250, 24 * 60),
        );

        let sequential = service.build_report("SYNTH", &series);
        let concurrent = service.build_report_concurrent("SYNTH", series).await;
        assert_eq!(sequential, concurrent);
    }
}
