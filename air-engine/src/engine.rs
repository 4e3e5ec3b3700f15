//! Motor: configuração validada + classificação + decisão

use air_core::prelude::*;

use crate::classifier::classify;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::presets::Preset;
use crate::rules::RuleSet;
use crate::threshold::ThresholdTable;

/// Motor de classificação e decisão.
///
/// A configuração é validada uma única vez em [`Engine::new`]; depois disso
/// `classify`, `decide` e `evaluate` são funções puras, sem estado entre
/// chamadas.
///
/// ```
/// use air_core::prelude::*;
/// use air_engine::{Engine, Preset};
///
/// let engine = Engine::from_preset(Preset::Basic);
/// let reading = Reading::builder()
///     .value(ParameterId::Pm25, 200.0)
///     .value(ParameterId::Co, 10.0)
///     .build()
///     .unwrap();
///
/// let evaluation = engine.evaluate(&reading).unwrap();
/// assert_eq!(evaluation.classification.band(ParameterId::Pm25), Some(SeverityBand::Hazard));
/// assert!(evaluation.actuators.alarm);
/// assert!(evaluation.actuators.fan);
/// assert!(!evaluation.actuators.vent);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Valida e constrói; erros aqui são fatais na partida
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Motor de um preset (sempre válido)
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            config: preset.config(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.config.thresholds
    }

    pub fn rules(&self) -> &RuleSet {
        &self.config.rules
    }

    /// Parâmetros monitorados, em ordem canônica
    pub fn parameters(&self) -> Vec<ParameterId> {
        self.config.thresholds.parameters().collect()
    }

    /// Verifica na partida se a fonte fornece todos os parâmetros configurados
    pub fn check_source(&self, provided: &[ParameterId]) -> EngineResult<()> {
        match self
            .config
            .thresholds
            .parameters()
            .find(|id| !provided.contains(id))
        {
            Some(missing) => Err(EngineError::SourceMismatch(missing)),
            None => Ok(()),
        }
    }

    pub fn classify(&self, reading: &Reading) -> EngineResult<Classification> {
        classify(reading, &self.config.thresholds)
    }

    pub fn decide(&self, classification: &Classification) -> ActuatorState {
        self.config.rules.decide(classification)
    }

    /// Classifica e decide; o par só é devolvido completo
    pub fn evaluate(&self, reading: &Reading) -> EngineResult<Evaluation> {
        let classification = self.classify(reading)?;
        let actuators = self.decide(&classification);
        Ok(Evaluation::new(classification, actuators))
    }
}

impl TryFrom<EngineConfig> for Engine {
    type Error = EngineError;

    fn try_from(config: EngineConfig) -> Result<Self, Self::Error> {
        Engine::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleCondition, Trigger};
    use crate::threshold::Threshold;

    #[test]
    fn test_new_rejects_invalid_threshold() {
        let table = ThresholdTable::new().with(ParameterId::Co, Threshold::ceiling(200.0, 50.0));
        let result = Engine::new(EngineConfig::with_standard_rules(table));
        assert!(matches!(result, Err(EngineError::InvalidThreshold { .. })));
    }

    #[test]
    fn test_new_rejects_dangling_rule() {
        let table = ThresholdTable::new().with(ParameterId::Co, Threshold::ceiling(50.0, 200.0));
        let rules = RuleSet {
            alarm: RuleCondition::AnyParameter(SeverityBand::Hazard),
            fan: RuleCondition::never(),
            vent: RuleCondition::AnyOf(vec![Trigger::hazard(ParameterId::Humidity)]),
        };
        let err = Engine::new(EngineConfig::new(table, rules)).unwrap_err();
        assert_eq!(
            err,
            EngineError::UnknownParameter {
                actuator: ActuatorKind::Vent,
                parameter: ParameterId::Humidity,
            }
        );
        assert!(err.is_config_error());
    }

    #[test]
    fn test_check_source() {
        let engine = Engine::from_preset(Preset::Basic);
        assert!(engine.check_source(&[ParameterId::Pm25, ParameterId::Co]).is_ok());
        assert!(engine
            .check_source(&[ParameterId::Pm25, ParameterId::Co, ParameterId::O3])
            .is_ok());
        assert_eq!(
            engine.check_source(&[ParameterId::Pm25]),
            Err(EngineError::SourceMismatch(ParameterId::Co))
        );
    }

    #[test]
    fn test_evaluate_missing_reading() {
        let engine = Engine::from_preset(Preset::Basic);
        let reading = Reading::new([(ParameterId::Pm25, 1.0)]).unwrap();
        assert_eq!(
            engine.evaluate(&reading),
            Err(EngineError::MissingReading(ParameterId::Co))
        );
    }

    #[test]
    fn test_try_from() {
        let engine = Engine::try_from(Preset::Indoor.config()).unwrap();
        assert_eq!(engine.parameters().len(), 6);
    }
}
