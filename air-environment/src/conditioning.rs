//! Condicionamento: amostra bruta → leitura validada
//!
//! Contagens analógicas passam pelo [`AnalogChannel`] do parâmetro; valores
//! diretos inválidos (NaN, ausentes) são trocados pelo fallback da
//! [`FallbackTable`] com um aviso no log. O resultado é sempre uma
//! [`Reading`] completa e finita, ou um erro.

use std::collections::BTreeMap;

use tracing::warn;

use air_core::prelude::*;

use crate::analog::AnalogChannel;
use crate::error::{EnvironmentError, EnvironmentResult};
use crate::fallback::FallbackTable;
use crate::raw::{RawSample, RawValue};

/// Leitura condicionada e os parâmetros que precisaram de fallback
#[derive(Debug, Clone, PartialEq)]
pub struct Conditioned {
    pub reading: Reading,
    pub substituted: Vec<ParameterId>,
}

/// Conversor de amostras brutas
#[derive(Debug, Clone, PartialEq)]
pub struct SignalConditioner {
    channels: BTreeMap<ParameterId, AnalogChannel>,
    fallbacks: FallbackTable,
}

impl SignalConditioner {
    pub fn new(channels: impl IntoIterator<Item = AnalogChannel>, fallbacks: FallbackTable) -> Self {
        Self {
            channels: channels.into_iter().map(|c| (c.parameter, c)).collect(),
            fallbacks,
        }
    }

    /// Canais de fábrica para os parâmetros dados + fallbacks padrão
    pub fn factory(parameters: &[ParameterId]) -> Self {
        Self::new(
            parameters.iter().filter_map(|p| AnalogChannel::factory(*p)),
            FallbackTable::default(),
        )
    }

    pub fn with_fallbacks(mut self, fallbacks: FallbackTable) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    pub fn channel(&self, parameter: ParameterId) -> Option<&AnalogChannel> {
        self.channels.get(&parameter)
    }

    pub fn fallbacks(&self) -> &FallbackTable {
        &self.fallbacks
    }

    pub fn validate(&self) -> EnvironmentResult<()> {
        for channel in self.channels.values() {
            channel.validate()?;
        }
        self.fallbacks.validate().map_err(|parameter| {
            EnvironmentError::InvalidConfig(format!("fallback for {} must be finite", parameter))
        })
    }

    /// Converte a amostra, exigindo um valor para cada parâmetro pedido
    pub fn condition(
        &self,
        raw: &RawSample,
        parameters: &[ParameterId],
    ) -> EnvironmentResult<Conditioned> {
        let mut values = Vec::with_capacity(parameters.len());
        let mut substituted = Vec::new();

        for &parameter in parameters {
            let value = match raw.get(parameter) {
                Some(RawValue::Analog(count)) => {
                    let channel = self.channels.get(&parameter).ok_or_else(|| {
                        EnvironmentError::InvalidData(format!(
                            "analog count for {} but no channel configured",
                            parameter
                        ))
                    })?;
                    channel.to_value(count)
                }
                Some(RawValue::Direct(v)) if v.is_finite() => v,
                other => {
                    let fallback = self.fallbacks.get(parameter).ok_or_else(|| {
                        EnvironmentError::SensorReadFailed(format!(
                            "{} unavailable and no fallback configured",
                            parameter
                        ))
                    })?;
                    warn!(
                        parameter = parameter.key(),
                        raw = ?other,
                        fallback,
                        "invalid sensor value, using fallback"
                    );
                    substituted.push(parameter);
                    fallback
                }
            };
            values.push((parameter, value));
        }

        let reading = Reading::new(values)
            .map_err(|e| EnvironmentError::InvalidData(e.to_string()))?
            .with_sequence(raw.sequence);

        Ok(Conditioned {
            reading,
            substituted,
        })
    }
}
