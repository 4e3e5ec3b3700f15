//! Presets das três variantes de implantação
//!
//! | Preset | Parâmetros |
//! |:-------|:-----------|
//! | `full` | PM2.5, PM10, CO, NO2, O3, SO2, temperatura, umidade |
//! | `indoor` | PM2.5, PM10, CO, NO2, temperatura, umidade |
//! | `basic` | PM2.5, CO |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use air_core::prelude::*;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::threshold::{Threshold, ThresholdTable};

/// Limites de fábrica (µg/m³ para particulados e gases, ppm para CO)
pub mod limits {
    pub const PM25_SAFE: f32 = 75.0;
    pub const PM25_HAZARD: f32 = 150.0;
    pub const PM10_SAFE: f32 = 50.0;
    pub const PM10_HAZARD: f32 = 100.0;
    pub const CO_SAFE: f32 = 50.0;
    pub const CO_HAZARD: f32 = 200.0;
    pub const CO2_SAFE: f32 = 1000.0;
    pub const CO2_HAZARD: f32 = 2000.0;
    pub const NO2_SAFE: f32 = 100.0;
    pub const NO2_HAZARD: f32 = 200.0;
    pub const O3_SAFE: f32 = 100.0;
    pub const O3_HAZARD: f32 = 200.0;
    pub const SO2_SAFE: f32 = 50.0;
    pub const SO2_HAZARD: f32 = 150.0;
    pub const TEMP_LOW: f32 = 20.0;
    pub const TEMP_HIGH: f32 = 30.0;
    pub const HUMIDITY_LOW: f32 = 30.0;
    pub const HUMIDITY_HIGH: f32 = 70.0;
}

/// Limite de fábrica de cada parâmetro
pub fn factory_threshold(parameter: ParameterId) -> Threshold {
    use self::limits::*;

    match parameter {
        ParameterId::Pm25 => Threshold::ceiling(PM25_SAFE, PM25_HAZARD),
        ParameterId::Pm10 => Threshold::ceiling(PM10_SAFE, PM10_HAZARD),
        ParameterId::Co => Threshold::ceiling(CO_SAFE, CO_HAZARD),
        ParameterId::Co2 => Threshold::ceiling(CO2_SAFE, CO2_HAZARD),
        ParameterId::No2 => Threshold::ceiling(NO2_SAFE, NO2_HAZARD),
        ParameterId::O3 => Threshold::ceiling(O3_SAFE, O3_HAZARD),
        ParameterId::So2 => Threshold::ceiling(SO2_SAFE, SO2_HAZARD),
        ParameterId::Temperature => Threshold::comfort(TEMP_LOW, TEMP_HIGH),
        ParameterId::Humidity => Threshold::comfort(HUMIDITY_LOW, HUMIDITY_HIGH),
    }
}

/// Variante de implantação
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// 8 parâmetros: seis potenciômetros + DHT22
    #[default]
    Full,
    /// 6 parâmetros: sem O3/SO2
    Indoor,
    /// 2 parâmetros: PM2.5 e CO
    Basic,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Full, Preset::Indoor, Preset::Basic];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Full => "full",
            Preset::Indoor => "indoor",
            Preset::Basic => "basic",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Preset::Full => "8 parameters: PM2.5, PM10, CO, NO2, O3, SO2, temperature, humidity",
            Preset::Indoor => "6 parameters: PM2.5, PM10, CO, NO2, temperature, humidity",
            Preset::Basic => "2 parameters: PM2.5, CO",
        }
    }

    /// Parâmetros monitorados, em ordem canônica
    pub fn parameters(&self) -> &'static [ParameterId] {
        use ParameterId::*;

        match self {
            Preset::Full => &[Pm25, Pm10, Co, No2, O3, So2, Temperature, Humidity],
            Preset::Indoor => &[Pm25, Pm10, Co, No2, Temperature, Humidity],
            Preset::Basic => &[Pm25, Co],
        }
    }

    pub fn thresholds(&self) -> ThresholdTable {
        self.parameters()
            .iter()
            .map(|id| (*id, factory_threshold(*id)))
            .collect()
    }

    /// Configuração completa com as regras padrão
    pub fn config(&self) -> EngineConfig {
        EngineConfig::with_standard_rules(self.thresholds())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "8" => Ok(Preset::Full),
            "indoor" | "6" => Ok(Preset::Indoor),
            "basic" | "2" => Ok(Preset::Basic),
            _ => Err(EngineError::UnknownPreset(s.to_string())),
        }
    }
}
