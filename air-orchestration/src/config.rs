//! Configuração do monitor (`airguard.toml`)
//!
//! ```toml
//! [monitor]
//! name = "lab"
//! preset = "indoor"
//! period_ms = 1000
//! mode = "fixed_delay"
//!
//! [fallbacks]
//! temperature = 25.0
//! humidity = 50.0
//!
//! [thresholds.co2]
//! kind = "ceiling"
//! safe_limit = 800
//! hazard_limit = 1500
//!
//! [rules.vent]
//! any_of = [{ parameter = "co2", min_band = "MODERATE" }]
//! ```
//!
//! Sem `[thresholds]` vale a tabela do preset. Regras omitidas usam a regra
//! padrão restrita aos parâmetros configurados.

use std::path::Path;

use serde::{Deserialize, Serialize};

use air_core::prelude::*;
use air_engine::{Engine, EngineConfig, Preset, RuleCondition, RuleSet, ThresholdTable};
use air_environment::FallbackTable;

use crate::error::{OrchestrationError, OrchestrationResult};
use crate::scheduler::{DEFAULT_PERIOD_MS, SchedulerConfig, SchedulerMode};

/// Seção `[monitor]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSection {
    #[serde(default = "default_name")]
    pub name: String,
    /// Preset base quando `[thresholds]` está ausente
    #[serde(default)]
    pub preset: Preset,
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,
    #[serde(default)]
    pub mode: SchedulerMode,
}

fn default_name() -> String {
    "airguard".to_string()
}

fn default_period_ms() -> u64 {
    DEFAULT_PERIOD_MS
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            preset: Preset::default(),
            period_ms: DEFAULT_PERIOD_MS,
            mode: SchedulerMode::default(),
        }
    }
}

/// Regras por saída; as ausentes caem na regra padrão
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm: Option<RuleCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fan: Option<RuleCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vent: Option<RuleCondition>,
}

impl RuleOverrides {
    fn resolve(&self, table: &ThresholdTable) -> RuleSet {
        let standard = RuleSet::standard_for(table);
        RuleSet {
            alarm: self.alarm.clone().unwrap_or(standard.alarm),
            fan: self.fan.clone().unwrap_or(standard.fan),
            vent: self.vent.clone().unwrap_or(standard.vent),
        }
    }
}

impl From<&RuleSet> for RuleOverrides {
    fn from(rules: &RuleSet) -> Self {
        Self {
            alarm: Some(rules.alarm.clone()),
            fan: Some(rules.fan.clone()),
            vent: Some(rules.vent.clone()),
        }
    }
}

/// Configuração completa do monitor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub monitor: MonitorSection,
    #[serde(default)]
    pub fallbacks: FallbackTable,
    #[serde(default, skip_serializing_if = "ThresholdTable::is_empty")]
    pub thresholds: ThresholdTable,
    #[serde(default)]
    pub rules: RuleOverrides,
}

impl MonitorConfig {
    /// Configuração explícita de um preset
    pub fn from_preset(preset: Preset) -> Self {
        let engine = preset.config();
        Self {
            monitor: MonitorSection {
                preset,
                ..MonitorSection::default()
            },
            fallbacks: FallbackTable::default(),
            rules: RuleOverrides::from(&engine.rules),
            thresholds: engine.thresholds,
        }
    }

    /// Parse de TOML
    pub fn from_str(content: &str) -> OrchestrationResult<Self> {
        toml::from_str(content).map_err(|e| {
            OrchestrationError::InvalidConfiguration(format!("Failed to parse config: {}", e))
        })
    }

    /// Carrega de arquivo
    pub fn from_file(path: &Path) -> OrchestrationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            OrchestrationError::InvalidConfiguration(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_str(&content)
    }

    /// Serializa para TOML
    pub fn to_toml_string(&self) -> OrchestrationResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            OrchestrationError::InvalidConfiguration(format!("Failed to serialize config: {}", e))
        })
    }

    /// Tabela efetiva: a configurada ou a do preset
    pub fn thresholds(&self) -> ThresholdTable {
        if self.thresholds.is_empty() {
            self.monitor.preset.thresholds()
        } else {
            self.thresholds.clone()
        }
    }

    /// Parâmetros monitorados
    pub fn parameters(&self) -> Vec<ParameterId> {
        self.thresholds().parameters().collect()
    }

    pub fn engine_config(&self) -> EngineConfig {
        let thresholds = self.thresholds();
        let rules = self.rules.resolve(&thresholds);
        EngineConfig::new(thresholds, rules)
    }

    /// Motor validado; erros aqui impedem a partida
    pub fn engine(&self) -> OrchestrationResult<Engine> {
        Ok(Engine::new(self.engine_config())?)
    }

    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig {
            period_ms: self.monitor.period_ms,
            mode: self.monitor.mode,
        }
    }

    /// Valida tudo que é verificável antes de montar o monitor
    pub fn validate(&self) -> OrchestrationResult<()> {
        if self.monitor.name.trim().is_empty() {
            return Err(OrchestrationError::InvalidConfiguration(
                "monitor.name must not be empty".into(),
            ));
        }
        self.scheduler().validate()?;
        self.fallbacks.validate().map_err(|parameter| {
            OrchestrationError::InvalidConfiguration(format!(
                "fallbacks.{} must be finite",
                parameter.key()
            ))
        })?;
        self.engine()?;
        Ok(())
    }
}
