//! Erros da camada de atuação

use thiserror::Error;

use air_core::{ActuatorKind, ActuatorState};
use air_core::traits::ActuatorError as CoreActuatorError;

pub type ActuatorResult<T> = Result<T, ActuatorError>;

/// Erros de atuador
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActuatorError {
    /// Comando falhou
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// Atuador ocupado
    #[error("Actuator busy")]
    Busy,

    /// Falha no atuador
    #[error("Actuator fault: {0}")]
    Fault(String),

    /// Estado inválido (ex.: após parada de emergência)
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuração inválida
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Uma saída do banco recusou o estado; nada foi aplicado
    #[error("{kind} output rejected state: {reason}")]
    Rejected { kind: ActuatorKind, reason: String },

    /// Escrita falhou no meio da aplicação e as saídas anteriores foram restauradas
    #[error("{kind} write failed, {restored} output(s) rolled back: {reason}")]
    RolledBack {
        kind: ActuatorKind,
        restored: usize,
        reason: String,
    },

    /// A restauração também falhou; `driven` é o que ficou nas saídas
    #[error("{kind} write failed and rollback failed for {stuck:?}; outputs now {driven}: {reason}")]
    RollbackFailed {
        kind: ActuatorKind,
        stuck: Vec<ActuatorKind>,
        driven: ActuatorState,
        reason: String,
    },
}

impl From<ActuatorError> for CoreActuatorError {
    fn from(err: ActuatorError) -> Self {
        match err {
            ActuatorError::CommandFailed(msg) => CoreActuatorError::CommandFailed(msg),
            ActuatorError::Busy => CoreActuatorError::Busy,
            ActuatorError::Fault(msg) => CoreActuatorError::Fault(msg),
            ActuatorError::InvalidState(msg) => {
                CoreActuatorError::CommandFailed(format!("Invalid state: {}", msg))
            }
            ActuatorError::InvalidConfig(msg) => {
                CoreActuatorError::CommandFailed(format!("Invalid config: {}", msg))
            }
            other @ (ActuatorError::Rejected { .. }
            | ActuatorError::RolledBack { .. }
            | ActuatorError::RollbackFailed { .. }) => {
                CoreActuatorError::CommandFailed(other.to_string())
            }
        }
    }
}

impl From<CoreActuatorError> for ActuatorError {
    fn from(err: CoreActuatorError) -> Self {
        match err {
            CoreActuatorError::CommandFailed(msg) => ActuatorError::CommandFailed(msg),
            CoreActuatorError::Busy => ActuatorError::Busy,
            CoreActuatorError::Fault(msg) => ActuatorError::Fault(msg),
            CoreActuatorError::OutOfRange(msg) => ActuatorError::CommandFailed(msg),
        }
    }
}
