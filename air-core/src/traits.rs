//! # Traits: contratos dos colaboradores externos
//!
//! O motor de classificação e decisão é puro; tudo que toca hardware fica
//! atrás dos traits abaixo:
//!
//! | Colaborador | Trait | Entrada | Saída |
//! |:------------|:------|:--------|:------|
//! | Aquisição | [`Sensor`] | hardware/simulação | [`Reading`] |
//! | Atuação | [`Actuator`] | comando | sinal físico |
//! | Apresentação | [`Presenter`] | [`Reading`] + [`Evaluation`] | display/log |
//!
//! Os handles de hardware pertencem a quem implementa estes traits e são
//! passados ao ciclo; o core não guarda estado de hardware.

use std::fmt::Debug;

use crate::evaluation::Evaluation;
use crate::parameter::ParameterId;
use crate::reading::Reading;

// ═══════════════════════════════════════════════════════════════════════════════
// TRAIT BASE
// ═══════════════════════════════════════════════════════════════════════════════

/// Trait base de qualquer colaborador (sensor, atuador, display).
pub trait AirComponent: Send + Debug {
    /// Nome único do componente (para logs e debug)
    fn name(&self) -> &str;

    /// Versão do componente
    fn version(&self) -> &str {
        "2026.1.16"
    }

    /// Componente está pronto para uso?
    fn is_ready(&self) -> bool {
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// AQUISIÇÃO
// ═══════════════════════════════════════════════════════════════════════════════

/// Erro de sensor
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SensorError {
    #[error("Sensor not initialized")]
    NotInitialized,
    #[error("Sensor read failed: {0}")]
    ReadFailed(String),
    #[error("Calibration failed: {0}")]
    CalibrationFailed(String),
    #[error("Configuration invalid: {0}")]
    InvalidConfig(String),
    #[error("Hardware error: {0}")]
    Hardware(String),
    #[error("Source exhausted")]
    Exhausted,
}

/// Fonte de leituras (sensores físicos, potenciômetros simulados, replay).
///
/// Contrato: [`Sensor::sample`] devolve uma leitura completa, com um valor
/// finito para cada parâmetro em [`Sensor::parameters`]. Valores inválidos
/// do hardware são substituídos por fallback documentado antes de construir
/// a [`Reading`], nunca repassados.
///
/// # Exemplo
///
/// ```
/// use air_core::prelude::*;
///
/// #[derive(Debug)]
/// struct FixedCo(f32);
///
/// impl AirComponent for FixedCo {
///     fn name(&self) -> &str { "fixed-co" }
/// }
///
/// impl Sensor for FixedCo {
///     type RawData = f32;
///
///     fn read(&mut self) -> Result<f32, SensorError> {
///         Ok(self.0)
///     }
///
///     fn to_reading(&self, raw: &f32) -> Result<Reading, SensorError> {
///         Reading::new([(ParameterId::Co, *raw)])
///             .map_err(|e| SensorError::ReadFailed(e.to_string()))
///     }
///
///     fn parameters(&self) -> Vec<ParameterId> {
///         vec![ParameterId::Co]
///     }
/// }
///
/// let mut sensor = FixedCo(12.0);
/// let reading = sensor.sample().unwrap();
/// assert_eq!(reading.get(ParameterId::Co), Some(12.0));
/// ```
pub trait Sensor: AirComponent {
    /// Tipo dos dados brutos lidos do hardware
    type RawData;

    /// Lê dados brutos
    fn read(&mut self) -> Result<Self::RawData, SensorError>;

    /// Converte dados brutos em leitura validada (aplica fallbacks)
    fn to_reading(&self, raw: &Self::RawData) -> Result<Reading, SensorError>;

    /// Parâmetros que esta fonte fornece
    fn parameters(&self) -> Vec<ParameterId>;

    /// Taxa de amostragem em Hz (0 = sob demanda)
    fn sample_rate(&self) -> f32 {
        0.0
    }

    /// Calibra a fonte
    fn calibrate(&mut self) -> Result<(), SensorError> {
        Ok(())
    }

    /// Lê e converte em uma operação
    fn sample(&mut self) -> Result<Reading, SensorError> {
        let raw = self.read()?;
        self.to_reading(&raw)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ATUAÇÃO
// ═══════════════════════════════════════════════════════════════════════════════

/// Erro de atuador
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActuatorError {
    #[error("Command failed: {0}")]
    CommandFailed(String),
    #[error("Actuator busy")]
    Busy,
    #[error("Actuator fault: {0}")]
    Fault(String),
    #[error("Out of range: {0}")]
    OutOfRange(String),
}

/// Status de atuador
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ActuatorStatus {
    /// Pronto para receber comandos
    Ready,
    /// Executando comando
    Busy,
    /// Em erro (precisa reset)
    Fault,
    /// Desligado por parada de emergência
    Off,
}

/// Saída física (LED, relé, ventoinha).
pub trait Actuator: AirComponent {
    /// Tipo de comando aceito
    type Command;

    /// Envia comando para o atuador
    fn send(&mut self, cmd: Self::Command) -> Result<(), ActuatorError>;

    /// Status atual do atuador
    fn status(&self) -> ActuatorStatus;

    /// Desliga imediatamente
    fn emergency_stop(&mut self) -> Result<(), ActuatorError> {
        Ok(())
    }

    /// Reseta atuador após falha
    fn reset(&mut self) -> Result<(), ActuatorError> {
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// APRESENTAÇÃO
// ═══════════════════════════════════════════════════════════════════════════════

/// Erro de apresentação
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PresenterError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Output unavailable: {0}")]
    Unavailable(String),
}

/// Consumidor de leitura + avaliação (display, log serial, JSON).
///
/// Só lê; não há requisito de formato.
pub trait Presenter: Send {
    fn present(
        &mut self,
        cycle: u64,
        reading: &Reading,
        evaluation: &Evaluation,
    ) -> Result<(), PresenterError>;
}

/// Erro genérico de componente
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComponentError {
    #[error("Sensor error: {0}")]
    Sensor(#[from] SensorError),
    #[error("Actuator error: {0}")]
    Actuator(#[from] ActuatorError),
    #[error("Presenter error: {0}")]
    Presenter(#[from] PresenterError),
    #[error("Other error: {0}")]
    Other(String),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuation::ActuatorState;
    use crate::classification::Classification;

    #[derive(Debug)]
    struct Counter {
        next: f32,
    }

    impl AirComponent for Counter {
        fn name(&self) -> &str {
            "counter"
        }
    }

    impl Sensor for Counter {
        type RawData = f32;

        fn read(&mut self) -> Result<f32, SensorError> {
            let value = self.next;
            self.next += 1.0;
            Ok(value)
        }

        fn to_reading(&self, raw: &f32) -> Result<Reading, SensorError> {
            Reading::new([(ParameterId::Pm25, *raw)])
                .map_err(|e| SensorError::ReadFailed(e.to_string()))
        }

        fn parameters(&self) -> Vec<ParameterId> {
            vec![ParameterId::Pm25]
        }
    }

    #[derive(Default)]
    struct Recorder {
        cycles: Vec<u64>,
    }

    impl Presenter for Recorder {
        fn present(
            &mut self,
            cycle: u64,
            _reading: &Reading,
            _evaluation: &Evaluation,
        ) -> Result<(), PresenterError> {
            self.cycles.push(cycle);
            Ok(())
        }
    }

    #[test]
    fn test_sensor_sample_default() {
        let mut sensor = Counter { next: 10.0 };
        assert_eq!(sensor.sample().unwrap().get(ParameterId::Pm25), Some(10.0));
        assert_eq!(sensor.sample().unwrap().get(ParameterId::Pm25), Some(11.0));
        assert_eq!(sensor.sample_rate(), 0.0);
        assert!(sensor.is_ready());
        assert_eq!(sensor.version(), "2026.1.16");
    }

    #[test]
    fn test_non_finite_raw_is_rejected() {
        let mut sensor = Counter { next: f32::NAN };
        assert!(matches!(sensor.sample(), Err(SensorError::ReadFailed(_))));
    }

    #[test]
    fn test_presenter() {
        let mut recorder = Recorder::default();
        let reading = Reading::builder().build().unwrap();
        let evaluation = Evaluation::new(Classification::default(), ActuatorState::off());
        recorder.present(3, &reading, &evaluation).unwrap();
        assert_eq!(recorder.cycles, vec![3]);
    }

    #[test]
    fn test_component_error_from() {
        let err: ComponentError = SensorError::NotInitialized.into();
        assert!(err.to_string().contains("Sensor not initialized"));
        let err: ComponentError = ActuatorError::Busy.into();
        assert!(matches!(err, ComponentError::Actuator(ActuatorError::Busy)));
    }
}
