//! Erros de orquestração

use thiserror::Error;

use air_actuator::ActuatorError;
use air_core::traits::ComponentError;
use air_engine::EngineError;
use air_environment::EnvironmentError;

pub type OrchestrationResult<T> = Result<T, OrchestrationError>;

/// Erros de orquestração
///
/// Todos são erros de partida: uma vez montado, o ciclo não falha, só pula.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrchestrationError {
    /// Configuração do motor inválida
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Fonte de aquisição inválida
    #[error("Environment error: {0}")]
    Environment(#[from] EnvironmentError),

    /// Banco de atuadores inválido
    #[error("Actuator error: {0}")]
    Actuator(#[from] ActuatorError),

    /// Erro de componente
    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    /// Configuração inválida
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
