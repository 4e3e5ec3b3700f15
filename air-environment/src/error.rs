//! Erros da camada de aquisição

use thiserror::Error;

use air_core::traits::SensorError;

pub type EnvironmentResult<T> = Result<T, EnvironmentError>;

/// Erros do módulo de aquisição
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EnvironmentError {
    #[error("Sensor read failed: {0}")]
    SensorReadFailed(String),

    #[error("Sensor not initialized")]
    NotInitialized,

    #[error("Calibration failed: {0}")]
    CalibrationFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid sensor data: {0}")]
    InvalidData(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Replay parse error at line {line}: {message}")]
    Replay { line: usize, message: String },

    #[error("Source exhausted")]
    Exhausted,
}

// Conversão para SensorError do core
impl From<EnvironmentError> for SensorError {
    fn from(err: EnvironmentError) -> Self {
        match err {
            EnvironmentError::NotInitialized => SensorError::NotInitialized,
            EnvironmentError::InvalidConfig(msg) => SensorError::InvalidConfig(msg),
            EnvironmentError::CalibrationFailed(msg) => SensorError::CalibrationFailed(msg),
            EnvironmentError::Exhausted => SensorError::Exhausted,
            other => SensorError::ReadFailed(other.to_string()),
        }
    }
}
