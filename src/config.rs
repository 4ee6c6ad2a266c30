//! Indicator periods and classification thresholds.
//!
//! The constants are the observable defaults of every report. The
//! parameter structs let a deployment override them through a config file
//! or `MARKET_INDEX_*` environment variables.

use crate::error::ConfigError;
use crate::models::IndicatorKey;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SMA_SHORT_PERIOD: usize = 40;
pub const SMA_MEDIUM_PERIOD: usize = 80;
pub const SMA_LONG_PERIOD: usize = 200;

pub const EMA_FAST_PERIOD: usize = 12;
pub const EMA_SLOW_PERIOD: usize = 26;
pub const MACD_SIGNAL_PERIOD: usize = 9;

pub const RSI_PERIOD: usize = 14;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

pub const STOCHASTIC_PERIOD: usize = 14;
pub const STOCHASTIC_D_PERIOD: usize = 3;
pub const STOCHASTIC_OVERBOUGHT: f64 = 80.0;
pub const STOCHASTIC_OVERSOLD: f64 = 20.0;

pub const RVOL_PERIOD: usize = 20;

pub const ATR_PERIOD: usize = 30;
pub const ATR_INCREASED_RISK: f64 = 2.0;
pub const ATR_MODERATE_RISK: f64 = 1.0;

// Far shorter than the textbook 14; kept for output parity.
pub const ADX_PERIOD: usize = 3;
pub const ADX_STRONG_TREND: f64 = 25.0;
pub const ADX_MODERATE_TREND: f64 = 20.0;

// Far shorter than the textbook 20; kept for output parity.
pub const CCI_PERIOD: usize = 3;
pub const CCI_CONSTANT: f64 = 0.015;
pub const CCI_OVERBOUGHT: f64 = 100.0;
pub const CCI_OVERSOLD: f64 = -100.0;

pub const MOMENTUM_PERIOD: usize = 10;

/// Prefix for environment overrides, e.g. `MARKET_INDEX_RSI__PERIOD=21`.
pub const ENV_PREFIX: &str = "MARKET_INDEX";

fn require_period(indicator: IndicatorKey, name: &str, period: usize) -> Result<(), ConfigError> {
    if period == 0 {
        return Err(ConfigError::invalid(
            indicator,
            format!("{name} must be greater than zero"),
        ));
    }
    Ok(())
}

fn require_order(
    indicator: IndicatorKey,
    lower_name: &str,
    lower: f64,
    upper_name: &str,
    upper: f64,
) -> Result<(), ConfigError> {
    if !(lower < upper) {
        return Err(ConfigError::invalid(
            indicator,
            format!("{lower_name} ({lower}) must be below {upper_name} ({upper})"),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmaParams {
    pub short_period: usize,
    pub medium_period: usize,
    pub long_period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self {
            short_period: SMA_SHORT_PERIOD,
            medium_period: SMA_MEDIUM_PERIOD,
            long_period: SMA_LONG_PERIOD,
        }
    }
}

impl SmaParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = IndicatorKey::Sma;
        require_period(key, "short_period", self.short_period)?;
        require_period(key, "medium_period", self.medium_period)?;
        require_period(key, "long_period", self.long_period)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmaParams {
    pub fast_period: usize,
    pub slow_period: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self {
            fast_period: EMA_FAST_PERIOD,
            slow_period: EMA_SLOW_PERIOD,
        }
    }
}

impl EmaParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_fast_slow(IndicatorKey::Ema, self.fast_period, self.slow_period)
    }
}

fn validate_fast_slow(key: IndicatorKey, fast: usize, slow: usize) -> Result<(), ConfigError> {
    require_period(key, "fast_period", fast)?;
    require_period(key, "slow_period", slow)?;
    if fast >= slow {
        return Err(ConfigError::invalid(
            key,
            format!("fast_period ({fast}) must be shorter than slow_period ({slow})"),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: EMA_FAST_PERIOD,
            slow_period: EMA_SLOW_PERIOD,
            signal_period: MACD_SIGNAL_PERIOD,
        }
    }
}

impl MacdParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_fast_slow(IndicatorKey::Macd, self.fast_period, self.slow_period)?;
        require_period(IndicatorKey::Macd, "signal_period", self.signal_period)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiParams {
    pub period: usize,
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self {
            period: RSI_PERIOD,
            overbought: RSI_OVERBOUGHT,
            oversold: RSI_OVERSOLD,
        }
    }
}

impl RsiParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = IndicatorKey::Rsi;
        require_period(key, "period", self.period)?;
        require_order(key, "oversold", self.oversold, "overbought", self.overbought)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StochasticParams {
    pub period: usize,
    pub d_period: usize,
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for StochasticParams {
    fn default() -> Self {
        Self {
            period: STOCHASTIC_PERIOD,
            d_period: STOCHASTIC_D_PERIOD,
            overbought: STOCHASTIC_OVERBOUGHT,
            oversold: STOCHASTIC_OVERSOLD,
        }
    }
}

impl StochasticParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = IndicatorKey::Stochastic;
        require_period(key, "period", self.period)?;
        require_period(key, "d_period", self.d_period)?;
        require_order(key, "oversold", self.oversold, "overbought", self.overbought)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RvolParams {
    pub period: usize,
}

impl Default for RvolParams {
    fn default() -> Self {
        Self {
            period: RVOL_PERIOD,
        }
    }
}

impl RvolParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_period(IndicatorKey::Rvol, "period", self.period)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtrParams {
    pub period: usize,
    pub increased_risk: f64,
    pub moderate_risk: f64,
}

impl Default for AtrParams {
    fn default() -> Self {
        Self {
            period: ATR_PERIOD,
            increased_risk: ATR_INCREASED_RISK,
            moderate_risk: ATR_MODERATE_RISK,
        }
    }
}

impl AtrParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = IndicatorKey::Atr;
        require_period(key, "period", self.period)?;
        require_order(
            key,
            "moderate_risk",
            self.moderate_risk,
            "increased_risk",
            self.increased_risk,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdxParams {
    pub period: usize,
    pub strong_trend: f64,
    pub moderate_trend: f64,
}

impl Default for AdxParams {
    fn default() -> Self {
        Self {
            period: ADX_PERIOD,
            strong_trend: ADX_STRONG_TREND,
            moderate_trend: ADX_MODERATE_TREND,
        }
    }
}

impl AdxParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = IndicatorKey::Adx;
        require_period(key, "period", self.period)?;
        require_order(
            key,
            "moderate_trend",
            self.moderate_trend,
            "strong_trend",
            self.strong_trend,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CciParams {
    pub period: usize,
    pub constant: f64,
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for CciParams {
    fn default() -> Self {
        Self {
            period: CCI_PERIOD,
            constant: CCI_CONSTANT,
            overbought: CCI_OVERBOUGHT,
            oversold: CCI_OVERSOLD,
        }
    }
}

impl CciParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = IndicatorKey::Cci;
        require_period(key, "period", self.period)?;
        if !(self.constant > 0.0) {
            return Err(ConfigError::invalid(key, "constant must be positive"));
        }
        require_order(key, "oversold", self.oversold, "overbought", self.overbought)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumParams {
    pub period: usize,
}

impl Default for MomentumParams {
    fn default() -> Self {
        Self {
            period: MOMENTUM_PERIOD,
        }
    }
}

impl MomentumParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_period(IndicatorKey::Momentum, "period", self.period)
    }
}

/// Parameters for every analyzer in the default registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub sma: SmaParams,
    pub ema: EmaParams,
    pub macd: MacdParams,
    pub rsi: RsiParams,
    pub stochastic: StochasticParams,
    pub rvol: RvolParams,
    pub atr: AtrParams,
    pub adx: AdxParams,
    pub cci: CciParams,
    pub momentum: MomentumParams,
}

impl IndicatorConfig {
    /// Defaults, then an optional file, then `MARKET_INDEX_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: IndicatorConfig = settings.try_deserialize()?;
        config.validate()?;

        tracing::debug!(?config, "Loaded indicator configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sma.validate()?;
        self.ema.validate()?;
        self.macd.validate()?;
        self.rsi.validate()?;
        self.stochastic.validate()?;
        self.rvol.validate()?;
        self.atr.validate()?;
        self.adx.validate()?;
        self.cci.validate()?;
        self.momentum.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_published_constants() {
        let config = IndicatorConfig::default();

        assert_eq!(config.sma.short_period, 40);
        assert_eq!(config.sma.medium_period, 80);
        assert_eq!(config.sma.long_period, 200);
        assert_eq!(config.ema.fast_period, 12);
        assert_eq!(config.ema.slow_period, 26);
        assert_eq!(config.macd.signal_period, 9);
        assert_eq!(config.rsi.period, 14);
        assert_eq!(config.rsi.overbought, 70.0);
        assert_eq!(config.rsi.oversold, 30.0);
        assert_eq!(config.stochastic.period, 14);
        assert_eq!(config.stochastic.overbought, 80.0);
        assert_eq!(config.stochastic.oversold, 20.0);
        assert_eq!(config.rvol.period, 20);
        assert_eq!(config.atr.period, 30);
        assert_eq!(config.atr.increased_risk, 2.0);
        assert_eq!(config.atr.moderate_risk, 1.0);
        assert_eq!(config.adx.period, 3);
        assert_eq!(config.adx.strong_trend, 25.0);
        assert_eq!(config.adx.moderate_trend, 20.0);
        assert_eq!(config.cci.period, 3);
        assert_eq!(config.cci.overbought, 100.0);
        assert_eq!(config.cci.oversold, -100.0);
        assert_eq!(config.momentum.period, 10);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_period_rejected() {
        let mut config = IndicatorConfig::default();
        config.momentum.period = 0;

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter {
                indicator: IndicatorKey::Momentum,
                ..
            }
        ));
    }

    #[test]
    fn test_fast_must_be_shorter_than_slow() {
        let params = EmaParams {
            fast_period: 26,
            slow_period: 12,
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let params = RsiParams {
            period: 14,
            overbought: 30.0,
            oversold: 70.0,
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("oversold"));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{ "rsi": { "period": 21 }, "adx": { "period": 14 } }"#;
        let config: IndicatorConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.rsi.period, 21);
        assert_eq!(config.rsi.overbought, RSI_OVERBOUGHT);
        assert_eq!(config.adx.period, 14);
        assert_eq!(config.cci, CciParams::default());
    }
}
