//! Canais analógicos: contagem do ADC → unidade de engenharia

use serde::{Deserialize, Serialize};

use air_core::prelude::*;

use crate::error::{EnvironmentError, EnvironmentResult};

/// Fundo de escala do ADC de 12 bits
pub const ADC_MAX: u16 = 4095;

/// Pino do DHT22 (temperatura + umidade)
pub const DHT_PIN: u8 = 15;

/// Interpolação linear inteira, mesma aritmética do `map()` do firmware.
///
/// Trunca em direção a zero; `in_min == in_max` devolve `out_min`.
pub fn map_range(x: i64, in_min: i64, in_max: i64, out_min: i64, out_max: i64) -> i64 {
    if in_max == in_min {
        return out_min;
    }
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Potenciômetro/sensor analógico ligado a um pino do ADC
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogChannel {
    pub parameter: ParameterId,
    pub pin: u8,
    #[serde(default = "default_adc_max")]
    pub adc_max: u16,
    pub range_min: i32,
    pub range_max: i32,
}

fn default_adc_max() -> u16 {
    ADC_MAX
}

impl AnalogChannel {
    pub fn new(parameter: ParameterId, pin: u8, range_min: i32, range_max: i32) -> Self {
        Self {
            parameter,
            pin,
            adc_max: ADC_MAX,
            range_min,
            range_max,
        }
    }

    /// Canal de fábrica de um poluente; `None` para grandezas do DHT22
    pub fn factory(parameter: ParameterId) -> Option<Self> {
        match parameter {
            ParameterId::Pm25 => Some(Self::new(parameter, 34, 0, 300)),
            ParameterId::Co => Some(Self::new(parameter, 35, 0, 300)),
            ParameterId::Pm10 => Some(Self::new(parameter, 32, 0, 200)),
            ParameterId::No2 => Some(Self::new(parameter, 33, 0, 300)),
            ParameterId::O3 => Some(Self::new(parameter, 25, 0, 300)),
            ParameterId::So2 => Some(Self::new(parameter, 26, 0, 200)),
            ParameterId::Co2 => Some(Self::new(parameter, 27, 400, 5000)),
            ParameterId::Temperature | ParameterId::Humidity => None,
        }
    }

    /// Converte uma contagem; valores acima do fundo de escala saturam
    pub fn to_value(&self, count: u16) -> f32 {
        let count = count.min(self.adc_max);
        map_range(
            i64::from(count),
            0,
            i64::from(self.adc_max),
            i64::from(self.range_min),
            i64::from(self.range_max),
        ) as f32
    }

    /// Menor contagem cujo valor convertido é `>= value` (saturada no fundo de escala)
    pub fn count_for(&self, value: f32) -> u16 {
        (0..=self.adc_max)
            .find(|count| self.to_value(*count) >= value)
            .unwrap_or(self.adc_max)
    }

    pub fn validate(&self) -> EnvironmentResult<()> {
        if self.adc_max == 0 {
            return Err(EnvironmentError::InvalidConfig(format!(
                "{}: adc_max must be > 0",
                self.parameter
            )));
        }
        if self.range_min >= self.range_max {
            return Err(EnvironmentError::InvalidConfig(format!(
                "{}: range_min ({}) must be less than range_max ({})",
                self.parameter, self.range_min, self.range_max
            )));
        }
        Ok(())
    }
}
