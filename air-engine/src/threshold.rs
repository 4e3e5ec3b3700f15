//! Limites por parâmetro e a tabela de limites

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use air_core::prelude::*;

use crate::error::{EngineError, EngineResult};

/// Par de limites de um parâmetro.
///
/// As comparações são inclusivas no limite: um valor exatamente igual a um
/// limite cai na faixa mais severa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Threshold {
    /// Poluentes: `HAZARD` se `v >= hazard_limit`, `MODERATE` se `v >= safe_limit`
    Ceiling { safe_limit: f32, hazard_limit: f32 },
    /// Conforto: `HAZARD` se `v >= high_limit`, `MODERATE` se `v < low_limit`.
    ///
    /// Abaixo da faixa nunca é `HAZARD`, só `MODERATE`.
    Comfort { low_limit: f32, high_limit: f32 },
}

impl Threshold {
    pub fn ceiling(safe_limit: f32, hazard_limit: f32) -> Self {
        Threshold::Ceiling {
            safe_limit,
            hazard_limit,
        }
    }

    pub fn comfort(low_limit: f32, high_limit: f32) -> Self {
        Threshold::Comfort {
            low_limit,
            high_limit,
        }
    }

    pub fn kind(&self) -> ThresholdKind {
        match self {
            Threshold::Ceiling { .. } => ThresholdKind::Ceiling,
            Threshold::Comfort { .. } => ThresholdKind::Comfort,
        }
    }

    /// Classifica um valor
    pub fn classify(&self, value: f32) -> SeverityBand {
        match *self {
            Threshold::Ceiling {
                safe_limit,
                hazard_limit,
            } => {
                if value >= hazard_limit {
                    SeverityBand::Hazard
                } else if value >= safe_limit {
                    SeverityBand::Moderate
                } else {
                    SeverityBand::Safe
                }
            }
            Threshold::Comfort {
                low_limit,
                high_limit,
            } => {
                if value >= high_limit {
                    SeverityBand::Hazard
                } else if value < low_limit {
                    SeverityBand::Moderate
                } else {
                    SeverityBand::Safe
                }
            }
        }
    }

    /// Limites finitos e ordenados
    pub fn validate(&self, parameter: ParameterId) -> EngineResult<()> {
        let (lower, upper, names) = match *self {
            Threshold::Ceiling {
                safe_limit,
                hazard_limit,
            } => (safe_limit, hazard_limit, ("safe_limit", "hazard_limit")),
            Threshold::Comfort {
                low_limit,
                high_limit,
            } => (low_limit, high_limit, ("low_limit", "high_limit")),
        };

        if !lower.is_finite() || !upper.is_finite() {
            return Err(EngineError::InvalidThreshold {
                parameter,
                reason: "limits must be finite".into(),
            });
        }

        if lower > upper {
            return Err(EngineError::InvalidThreshold {
                parameter,
                reason: format!("{} ({}) > {} ({})", names.0, lower, names.1, upper),
            });
        }

        Ok(())
    }
}

/// Tabela parâmetro → limites, em ordem canônica.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdTable {
    entries: BTreeMap<ParameterId, Threshold>,
}

impl ThresholdTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adiciona (ou substitui) um limite, estilo builder
    pub fn with(mut self, parameter: ParameterId, threshold: Threshold) -> Self {
        self.entries.insert(parameter, threshold);
        self
    }

    pub fn insert(&mut self, parameter: ParameterId, threshold: Threshold) -> Option<Threshold> {
        self.entries.insert(parameter, threshold)
    }

    pub fn remove(&mut self, parameter: ParameterId) -> Option<Threshold> {
        self.entries.remove(&parameter)
    }

    pub fn get(&self, parameter: ParameterId) -> Option<&Threshold> {
        self.entries.get(&parameter)
    }

    pub fn contains(&self, parameter: ParameterId) -> bool {
        self.entries.contains_key(&parameter)
    }

    pub fn parameters(&self) -> impl Iterator<Item = ParameterId> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterId, &Threshold)> + '_ {
        self.entries.iter().map(|(id, threshold)| (*id, threshold))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Valida todos os limites; tabela vazia é erro
    pub fn validate(&self) -> EngineResult<()> {
        if self.entries.is_empty() {
            return Err(EngineError::EmptyTable);
        }
        for (parameter, threshold) in &self.entries {
            threshold.validate(*parameter)?;
        }
        Ok(())
    }
}

impl FromIterator<(ParameterId, Threshold)> for ThresholdTable {
    fn from_iter<T: IntoIterator<Item = (ParameterId, Threshold)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
