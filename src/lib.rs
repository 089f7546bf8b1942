pub mod analyzer;
pub mod candle_store;
pub mod data_loader;
pub mod error;
pub mod market;
pub mod model;
pub mod strategy;

/// 설정 로더
pub mod config_loader;

pub use config_loader::{ConfigError, ConfigFormat, ConfigLoader, ConfigResult, ConfigValidation};
pub use error::{AnalysisError, DataError};
