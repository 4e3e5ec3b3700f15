//! Regras de decisão: classificação → estado dos atuadores
//!
//! Cada atuador tem uma condição independente. As condições são dados
//! (quais parâmetros alimentam qual regra, e a partir de qual faixa), de modo
//! que variantes com 2, 6 ou 8 parâmetros são apenas configurações
//! diferentes do mesmo motor.

use serde::{Deserialize, Serialize};

use air_core::prelude::*;

use crate::error::{EngineError, EngineResult};
use crate::threshold::ThresholdTable;

/// Dispara quando a faixa do parâmetro é `>= min_band`.
///
/// `!= SAFE` é `min_band = MODERATE`; `== HAZARD` é `min_band = HAZARD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub parameter: ParameterId,
    pub min_band: SeverityBand,
}

impl Trigger {
    pub fn new(parameter: ParameterId, min_band: SeverityBand) -> Self {
        Self {
            parameter,
            min_band,
        }
    }

    /// Dispara em `MODERATE` ou `HAZARD`
    pub fn not_safe(parameter: ParameterId) -> Self {
        Self::new(parameter, SeverityBand::Moderate)
    }

    /// Dispara só em `HAZARD`
    pub fn hazard(parameter: ParameterId) -> Self {
        Self::new(parameter, SeverityBand::Hazard)
    }

    /// Parâmetro ausente da classificação não dispara
    pub fn fires(&self, classification: &Classification) -> bool {
        classification
            .band(self.parameter)
            .is_some_and(|band| band.at_least(self.min_band))
    }
}

/// Condição de uma regra
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCondition {
    /// Qualquer parâmetro configurado com faixa `>= band`
    AnyParameter(SeverityBand),
    /// Disjunção sobre gatilhos explícitos; lista vazia nunca dispara
    AnyOf(Vec<Trigger>),
}

impl RuleCondition {
    /// Condição que nunca dispara
    pub fn never() -> Self {
        RuleCondition::AnyOf(Vec::new())
    }

    pub fn holds(&self, classification: &Classification) -> bool {
        match self {
            RuleCondition::AnyParameter(min) => classification.any_at_least(*min),
            RuleCondition::AnyOf(triggers) => triggers.iter().any(|t| t.fires(classification)),
        }
    }

    /// Parâmetros referenciados explicitamente
    pub fn parameters(&self) -> Vec<ParameterId> {
        match self {
            RuleCondition::AnyParameter(_) => Vec::new(),
            RuleCondition::AnyOf(triggers) => triggers.iter().map(|t| t.parameter).collect(),
        }
    }
}

/// Regras dos três atuadores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub alarm: RuleCondition,
    pub fan: RuleCondition,
    pub vent: RuleCondition,
}

impl RuleSet {
    /// Regras padrão, restritas aos parâmetros presentes na tabela:
    ///
    /// - alarm: qualquer parâmetro em `HAZARD`
    /// - fan: PM2.5/PM10 `!= SAFE`
    /// - vent: CO/CO2 `!= SAFE`, ou temperatura/umidade em `HAZARD`
    pub fn standard_for(table: &ThresholdTable) -> Self {
        let fan = table
            .parameters()
            .filter(ParameterId::is_particulate)
            .map(Trigger::not_safe)
            .collect();

        let vent = table
            .parameters()
            .filter_map(|id| {
                if id.is_combustion_gas() {
                    Some(Trigger::not_safe(id))
                } else if id.threshold_kind() == ThresholdKind::Comfort {
                    Some(Trigger::hazard(id))
                } else {
                    None
                }
            })
            .collect();

        Self {
            alarm: RuleCondition::AnyParameter(SeverityBand::Hazard),
            fan: RuleCondition::AnyOf(fan),
            vent: RuleCondition::AnyOf(vent),
        }
    }

    pub fn get(&self, kind: ActuatorKind) -> &RuleCondition {
        match kind {
            ActuatorKind::Alarm => &self.alarm,
            ActuatorKind::Fan => &self.fan,
            ActuatorKind::Vent => &self.vent,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActuatorKind, &RuleCondition)> + '_ {
        ActuatorKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Avalia as três regras; total e sem estado
    pub fn decide(&self, classification: &Classification) -> ActuatorState {
        ActuatorState {
            alarm: self.alarm.holds(classification),
            fan: self.fan.holds(classification),
            vent: self.vent.holds(classification),
        }
    }

    /// Toda regra deve referenciar apenas parâmetros da tabela
    pub fn validate(&self, table: &ThresholdTable) -> EngineResult<()> {
        for (actuator, condition) in self.iter() {
            if let Some(parameter) = condition
                .parameters()
                .into_iter()
                .find(|p| !table.contains(*p))
            {
                return Err(EngineError::UnknownParameter {
                    actuator,
                    parameter,
                });
            }
        }
        Ok(())
    }
}

/// Forma livre de [`RuleSet::decide`]
pub fn decide(classification: &Classification, rules: &RuleSet) -> ActuatorState {
    rules.decide(classification)
}
