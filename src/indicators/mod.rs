// Technical indicators module
// Pure numeric functions over price/volume slices; None means not enough data

pub mod adx;
pub mod atr;
pub mod cci;
pub mod macd;
pub mod momentum;
pub mod moving_average;
pub mod obv;
pub mod rsi;
pub mod stochastic;
pub mod volume;

pub use adx::{calculate_adx, AdxSeries};
pub use atr::{calculate_atr, calculate_atr_series, true_range};
pub use cci::calculate_cci;
pub use macd::{calculate_macd, MacdSeries};
pub use momentum::calculate_momentum;
pub use moving_average::{calculate_ema, calculate_ema_series, calculate_sma};
pub use obv::calculate_obv;
pub use rsi::{calculate_rsi, calculate_rsi_series};
pub use stochastic::{calculate_stochastic, StochasticSeries};
pub use volume::{
    calculate_average_volume, calculate_rvol, calculate_volume_trend, RelativeVolume, VolumeTrend,
};
