//! Erros do motor de classificação e decisão

use thiserror::Error;

use air_core::prelude::*;

pub type EngineResult<T> = Result<T, EngineError>;

/// Erros do motor.
///
/// Todos, exceto [`EngineError::MissingReading`], são erros de configuração
/// detectados na partida; depois de construído, o motor não falha por ciclo
/// com leituras completas.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid threshold for {parameter}: {reason}")]
    InvalidThreshold { parameter: ParameterId, reason: String },

    #[error("Threshold table is empty")]
    EmptyTable,

    #[error("Rule {actuator} references unconfigured parameter {parameter}")]
    UnknownParameter {
        actuator: ActuatorKind,
        parameter: ParameterId,
    },

    /// Violação de pré-condição: a fonte não entregou um parâmetro configurado
    #[error("Missing reading for configured parameter {0}")]
    MissingReading(ParameterId),

    #[error("Source does not provide configured parameter {0}")]
    SourceMismatch(ParameterId),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl EngineError {
    /// Erro de configuração (fatal na partida)?
    pub fn is_config_error(&self) -> bool {
        !matches!(self, EngineError::MissingReading(_))
    }
}
