//! Leitura: snapshot imutável dos valores de um ciclo

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::parameter::ParameterId;

/// Snapshot imutável dos valores de todos os parâmetros em um ciclo.
///
/// Só contém valores finitos: NaN e infinitos são rejeitados na construção,
/// de modo que um sentinela de falha de sensor nunca chega ao classificador.
/// A substituição por valores de fallback é responsabilidade da fonte de
/// aquisição, antes de construir a leitura.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReadingData")]
pub struct Reading {
    sequence: u64,
    values: BTreeMap<ParameterId, f32>,
}

#[derive(Deserialize)]
struct ReadingData {
    #[serde(default)]
    sequence: u64,
    values: BTreeMap<ParameterId, f32>,
}

impl TryFrom<ReadingData> for Reading {
    type Error = CoreError;

    fn try_from(data: ReadingData) -> Result<Self, Self::Error> {
        Ok(Reading::new(data.values)?.with_sequence(data.sequence))
    }
}

impl Reading {
    /// Cria leitura validando que todos os valores são finitos
    pub fn new<I>(values: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (ParameterId, f32)>,
    {
        let mut map = BTreeMap::new();
        for (parameter, value) in values {
            if !value.is_finite() {
                return Err(CoreError::NonFiniteReading { parameter, value });
            }
            map.insert(parameter, value);
        }
        Ok(Self {
            sequence: 0,
            values: map,
        })
    }

    /// Builder incremental
    pub fn builder() -> ReadingBuilder {
        ReadingBuilder::default()
    }

    /// Atribui o número de sequência da fonte
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Número de sequência atribuído pela fonte (0 se construída à mão)
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Valor de um parâmetro
    pub fn get(&self, parameter: ParameterId) -> Option<f32> {
        self.values.get(&parameter).copied()
    }

    pub fn contains(&self, parameter: ParameterId) -> bool {
        self.values.contains_key(&parameter)
    }

    /// Itera em ordem canônica de parâmetro
    pub fn iter(&self) -> impl Iterator<Item = (ParameterId, f32)> + '_ {
        self.values.iter().map(|(id, value)| (*id, *value))
    }

    pub fn parameters(&self) -> impl Iterator<Item = ParameterId> + '_ {
        self.values.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Builder de [`Reading`]
#[derive(Debug, Clone, Default)]
pub struct ReadingBuilder {
    sequence: u64,
    values: Vec<(ParameterId, f32)>,
}

impl ReadingBuilder {
    pub fn value(mut self, parameter: ParameterId, value: f32) -> Self {
        self.values.push((parameter, value));
        self
    }

    pub fn sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn build(self) -> CoreResult<Reading> {
        Ok(Reading::new(self.values)?.with_sequence(self.sequence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reading() {
        let reading = Reading::new([(ParameterId::Pm25, 12.0), (ParameterId::Co, 5.0)]).unwrap();
        assert_eq!(reading.len(), 2);
        assert_eq!(reading.get(ParameterId::Pm25), Some(12.0));
        assert_eq!(reading.get(ParameterId::O3), None);
        assert_eq!(reading.sequence(), 0);
    }

    #[test]
    fn test_rejects_nan() {
        let result = Reading::new([(ParameterId::Temperature, f32::NAN)]);
        assert!(matches!(
            result,
            Err(CoreError::NonFiniteReading { parameter: ParameterId::Temperature, .. })
        ));
    }

    #[test]
    fn test_rejects_infinity() {
        let result = Reading::builder()
            .value(ParameterId::Humidity, f32::INFINITY)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_iteration_is_canonical_order() {
        let reading = Reading::builder()
            .value(ParameterId::Humidity, 40.0)
            .value(ParameterId::Pm25, 10.0)
            .value(ParameterId::Co, 3.0)
            .build()
            .unwrap();
        let order: Vec<_> = reading.parameters().collect();
        assert_eq!(order, vec![ParameterId::Pm25, ParameterId::Co, ParameterId::Humidity]);
    }

    #[test]
    fn test_later_value_wins() {
        let reading = Reading::builder()
            .value(ParameterId::Co, 3.0)
            .value(ParameterId::Co, 7.0)
            .build()
            .unwrap();
        assert_eq!(reading.get(ParameterId::Co), Some(7.0));
    }

    #[test]
    fn test_serde_validates() {
        let reading: Reading =
            serde_json::from_str(r#"{"sequence": 4, "values": {"pm25": 80.0, "co": 10.0}}"#).unwrap();
        assert_eq!(reading.sequence(), 4);
        assert_eq!(reading.get(ParameterId::Pm25), Some(80.0));

        let json = serde_json::to_string(&reading).unwrap();
        let back: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }
}
