//! Amostra bruta: o que sai do hardware antes do condicionamento

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use air_core::prelude::*;

/// Valor bruto de um parâmetro
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawValue {
    /// Contagem do ADC (potenciômetro)
    Analog(u16),
    /// Valor já em unidade de engenharia (DHT22); pode ser NaN
    Direct(f32),
    /// Sensor não respondeu
    Missing,
}

impl RawValue {
    /// Contagem ou valor direto são utilizáveis sem fallback?
    pub fn is_valid(&self) -> bool {
        match self {
            RawValue::Analog(_) => true,
            RawValue::Direct(v) => v.is_finite(),
            RawValue::Missing => false,
        }
    }
}

/// Amostra bruta de um ciclo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    #[serde(default)]
    pub sequence: u64,
    pub values: BTreeMap<ParameterId, RawValue>,
}

impl RawSample {
    pub fn new(sequence: u64) -> Self {
        Self {
            sequence,
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, parameter: ParameterId, value: RawValue) -> Self {
        self.values.insert(parameter, value);
        self
    }

    pub fn analog(self, parameter: ParameterId, count: u16) -> Self {
        self.with(parameter, RawValue::Analog(count))
    }

    pub fn direct(self, parameter: ParameterId, value: f32) -> Self {
        self.with(parameter, RawValue::Direct(value))
    }

    pub fn get(&self, parameter: ParameterId) -> Option<RawValue> {
        self.values.get(&parameter).copied()
    }

    pub fn parameters(&self) -> impl Iterator<Item = ParameterId> + '_ {
        self.values.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_value_validity() {
        assert!(RawValue::Analog(0).is_valid());
        assert!(RawValue::Direct(21.0).is_valid());
        assert!(!RawValue::Direct(f32::NAN).is_valid());
        assert!(!RawValue::Missing.is_valid());
    }

    #[test]
    fn test_builder() {
        let sample = RawSample::new(7)
            .analog(ParameterId::Pm25, 2048)
            .direct(ParameterId::Temperature, 24.5);
        assert_eq!(sample.sequence, 7);
        assert_eq!(sample.get(ParameterId::Pm25), Some(RawValue::Analog(2048)));
        assert_eq!(sample.get(ParameterId::Co), None);
        assert_eq!(sample.parameters().count(), 2);
    }

    #[test]
    fn test_json_shape() {
        let sample: RawSample = serde_json::from_str(
            r#"{"values": {"pm25": {"analog": 4095}, "humidity": {"direct": 40.0}, "co": "missing"}}"#,
        )
        .unwrap();
        assert_eq!(sample.sequence, 0);
        assert_eq!(sample.get(ParameterId::Pm25), Some(RawValue::Analog(4095)));
        assert_eq!(sample.get(ParameterId::Humidity), Some(RawValue::Direct(40.0)));
        assert_eq!(sample.get(ParameterId::Co), Some(RawValue::Missing));
    }
}
