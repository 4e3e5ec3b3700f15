//! Valores de substituição para leituras inválidas

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use air_core::prelude::*;

/// Temperatura usada quando o DHT22 devolve NaN (°C)
pub const DEFAULT_TEMPERATURE: f32 = 25.0;

/// Umidade usada quando o DHT22 devolve NaN (%)
pub const DEFAULT_HUMIDITY: f32 = 50.0;

/// Tabela parâmetro → valor de fallback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FallbackTable {
    values: BTreeMap<ParameterId, f32>,
}

impl FallbackTable {
    /// Tabela vazia (nenhuma substituição)
    pub fn empty() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, parameter: ParameterId, value: f32) -> Self {
        self.values.insert(parameter, value);
        self
    }

    pub fn insert(&mut self, parameter: ParameterId, value: f32) -> Option<f32> {
        self.values.insert(parameter, value)
    }

    pub fn get(&self, parameter: ParameterId) -> Option<f32> {
        self.values.get(&parameter).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterId, f32)> + '_ {
        self.values.iter().map(|(p, v)| (*p, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Todos os valores precisam ser finitos
    pub fn validate(&self) -> Result<(), ParameterId> {
        match self.values.iter().find(|(_, v)| !v.is_finite()) {
            Some((parameter, _)) => Err(*parameter),
            None => Ok(()),
        }
    }
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::empty()
            .with(ParameterId::Temperature, DEFAULT_TEMPERATURE)
            .with(ParameterId::Humidity, DEFAULT_HUMIDITY)
    }
}
