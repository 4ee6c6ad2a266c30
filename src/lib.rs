// Core modules
pub mod analyzers;
pub mod config;
pub mod error;
pub mod indicators;
pub mod models;
pub mod registry;
pub mod report;
pub mod service;
pub mod synthetic;

// Re-export commonly used types
pub use analyzers::Analyzer;
pub use config::IndicatorConfig;
pub use error::{AnalysisError, ConfigError};
pub use models::*;
pub use registry::{AnalyzerEntry, AnalyzerRegistry};
pub use report::{IndexReport, SlotError};
pub use service::IndexService;
pub use synthetic::{MarketScenario, SyntheticSeriesGenerator};
