//! Parâmetros ambientais monitorados

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identificador de um parâmetro ambiental.
///
/// A ordem de declaração define a ordem total usada em tabelas e relatórios:
/// particulados, gases e por fim as grandezas de conforto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterId {
    /// Material particulado fino (µg/m³)
    Pm25,
    /// Material particulado grosso (µg/m³)
    Pm10,
    /// Monóxido de carbono (ppm)
    Co,
    /// Dióxido de carbono (ppm)
    Co2,
    /// Dióxido de nitrogênio (µg/m³)
    No2,
    /// Ozônio (µg/m³)
    O3,
    /// Dióxido de enxofre (µg/m³)
    So2,
    /// Temperatura (°C)
    Temperature,
    /// Umidade relativa (%)
    Humidity,
}

/// Forma de comparação usada para classificar um parâmetro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKind {
    /// Quanto maior, pior (poluentes): limites `safe` e `hazard`
    Ceiling,
    /// Faixa de conforto (temperatura, umidade): limites `low` e `high`
    Comfort,
}

impl ParameterId {
    /// Todos os parâmetros conhecidos, na ordem canônica
    pub const ALL: [ParameterId; 9] = [
        ParameterId::Pm25,
        ParameterId::Pm10,
        ParameterId::Co,
        ParameterId::Co2,
        ParameterId::No2,
        ParameterId::O3,
        ParameterId::So2,
        ParameterId::Temperature,
        ParameterId::Humidity,
    ];

    /// Rótulo curto para display e log
    pub fn label(&self) -> &'static str {
        match self {
            ParameterId::Pm25 => "PM2.5",
            ParameterId::Pm10 => "PM10",
            ParameterId::Co => "CO",
            ParameterId::Co2 => "CO2",
            ParameterId::No2 => "NO2",
            ParameterId::O3 => "O3",
            ParameterId::So2 => "SO2",
            ParameterId::Temperature => "Temp",
            ParameterId::Humidity => "Humidity",
        }
    }

    /// Chave usada em arquivos de configuração
    pub fn key(&self) -> &'static str {
        match self {
            ParameterId::Pm25 => "pm25",
            ParameterId::Pm10 => "pm10",
            ParameterId::Co => "co",
            ParameterId::Co2 => "co2",
            ParameterId::No2 => "no2",
            ParameterId::O3 => "o3",
            ParameterId::So2 => "so2",
            ParameterId::Temperature => "temperature",
            ParameterId::Humidity => "humidity",
        }
    }

    /// Unidade de medida
    pub fn unit(&self) -> &'static str {
        match self {
            ParameterId::Pm25 | ParameterId::Pm10 => "µg/m³",
            ParameterId::No2 | ParameterId::O3 | ParameterId::So2 => "µg/m³",
            ParameterId::Co | ParameterId::Co2 => "ppm",
            ParameterId::Temperature => "°C",
            ParameterId::Humidity => "%",
        }
    }

    /// Regra de classificação natural do parâmetro
    pub fn threshold_kind(&self) -> ThresholdKind {
        match self {
            ParameterId::Temperature | ParameterId::Humidity => ThresholdKind::Comfort,
            _ => ThresholdKind::Ceiling,
        }
    }

    /// Material particulado?
    pub fn is_particulate(&self) -> bool {
        matches!(self, ParameterId::Pm25 | ParameterId::Pm10)
    }

    /// Gás de combustão (CO/CO2)?
    pub fn is_combustion_gas(&self) -> bool {
        matches!(self, ParameterId::Co | ParameterId::Co2)
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ParameterId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '.' | '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "pm25" => Ok(ParameterId::Pm25),
            "pm10" => Ok(ParameterId::Pm10),
            "co" => Ok(ParameterId::Co),
            "co2" => Ok(ParameterId::Co2),
            "no2" => Ok(ParameterId::No2),
            "o3" => Ok(ParameterId::O3),
            "so2" => Ok(ParameterId::So2),
            "temp" | "temperature" => Ok(ParameterId::Temperature),
            "hum" | "humidity" | "rh" => Ok(ParameterId::Humidity),
            _ => Err(CoreError::UnknownParameter(s.to_string())),
        }
    }
}
