//! Configuração do motor (tabela de limites + regras)
//!
//! Carregada uma vez na partida; não há recarga durante a execução.
//!
//! ```toml
//! [thresholds.pm25]
//! kind = "ceiling"
//! safe_limit = 75
//! hazard_limit = 150
//!
//! [thresholds.temperature]
//! kind = "comfort"
//! low_limit = 20
//! high_limit = 30
//!
//! [rules.alarm]
//! any_parameter = "HAZARD"
//!
//! [rules.fan]
//! any_of = [{ parameter = "pm25", min_band = "MODERATE" }]
//!
//! [rules.vent]
//! any_of = [{ parameter = "temperature", min_band = "HAZARD" }]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::rules::RuleSet;
use crate::threshold::ThresholdTable;

/// Tabela de limites e regras de decisão
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub thresholds: ThresholdTable,
    pub rules: RuleSet,
}

impl EngineConfig {
    pub fn new(thresholds: ThresholdTable, rules: RuleSet) -> Self {
        Self { thresholds, rules }
    }

    /// Tabela com as regras padrão restritas aos parâmetros configurados
    pub fn with_standard_rules(thresholds: ThresholdTable) -> Self {
        let rules = RuleSet::standard_for(&thresholds);
        Self { thresholds, rules }
    }

    /// Parse de TOML
    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        toml::from_str(content)
            .map_err(|e| EngineError::InvalidConfig(format!("Failed to parse engine config: {}", e)))
    }

    /// Carrega de arquivo
    pub fn from_file(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serializa para TOML
    pub fn to_toml_string(&self) -> EngineResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| EngineError::InvalidConfig(format!("Failed to serialize engine config: {}", e)))
    }

    /// Limites válidos e regras consistentes com a tabela
    pub fn validate(&self) -> EngineResult<()> {
        self.thresholds.validate()?;
        self.rules.validate(&self.thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleCondition, Trigger};
    use crate::threshold::Threshold;
    use air_core::prelude::*;

    const SAMPLE: &str = r#"
[thresholds.pm25]
kind = "ceiling"
safe_limit = 75
hazard_limit = 150

[thresholds.temperature]
kind = "comfort"
low_limit = 20.0
high_limit = 30.0

[rules.alarm]
any_parameter = "HAZARD"

[rules.fan]
any_of = [{ parameter = "pm25", min_band = "MODERATE" }]

[rules.vent]
any_of = [{ parameter = "temperature", min_band = "HAZARD" }]
"#;

    #[test]
    fn test_parse_sample() {
        let config = EngineConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(
            config.thresholds.get(ParameterId::Pm25),
            Some(&Threshold::ceiling(75.0, 150.0))
        );
        assert_eq!(
            config.thresholds.get(ParameterId::Temperature),
            Some(&Threshold::comfort(20.0, 30.0))
        );
        assert_eq!(config.rules.alarm, RuleCondition::AnyParameter(SeverityBand::Hazard));
        assert_eq!(
            config.rules.vent,
            RuleCondition::AnyOf(vec![Trigger::hazard(ParameterId::Temperature)])
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = EngineConfig::from_toml_str("[thresholds.pm25]\nkind = \"bogus\"").unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_parameter_key_rejected() {
        let content = SAMPLE.replace("[thresholds.pm25]", "[thresholds.radon]");
        assert!(EngineConfig::from_toml_str(&content).is_err());
    }

    #[test]
    fn test_validate_rule_references() {
        let content = SAMPLE.replace(
            "any_of = [{ parameter = \"pm25\", min_band = \"MODERATE\" }]",
            "any_of = [{ parameter = \"co\", min_band = \"MODERATE\" }]",
        );
        let config = EngineConfig::from_toml_str(&content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(EngineError::UnknownParameter { parameter: ParameterId::Co, .. })
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::from_toml_str(SAMPLE).unwrap();
        let text = config.to_toml_string().unwrap();
        let back = EngineConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.thresholds.len(), 2);

        let missing = EngineConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(missing.to_string().contains("Failed to read"));
    }
}
