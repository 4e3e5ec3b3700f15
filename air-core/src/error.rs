//! Erros do modelo de dados

use thiserror::Error;

use crate::parameter::ParameterId;

pub type CoreResult<T> = Result<T, CoreError>;

/// Erros de construção e parsing dos tipos do core
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Unknown severity band: {0}")]
    UnknownBand(String),

    #[error("Unknown actuator: {0}")]
    UnknownActuator(String),

    /// Valor NaN/infinito: sentinela de falha que deveria ter sido substituído
    #[error("Non-finite reading for {parameter}: {value}")]
    NonFiniteReading { parameter: ParameterId, value: f32 },
}
