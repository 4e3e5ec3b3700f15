//! # 🌍 air-environment: Aquisição de Leituras
//!
//! Fontes que implementam o trait [`Sensor`](air_core::traits::Sensor) e
//! entregam uma [`Reading`](air_core::Reading) completa por ciclo.
//!
//! ## Pipeline de aquisição
//!
//! ```text
//! hardware ──► RawSample ──► SignalConditioner ──► Reading
//!              (contagens,     (AnalogChannel +
//!               NaN do DHT)     FallbackTable)
//! ```
//!
//! Contagens do ADC de 12 bits viram unidades de engenharia pela mesma
//! interpolação inteira do firmware. Temperatura e umidade inválidas são
//! trocadas por 25.0 °C / 50.0 % com um `warn!` no log; o classificador
//! nunca vê NaN.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use air_core::prelude::*;
//! use air_environment::{PanelConfig, SimulatedPanel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut panel = SimulatedPanel::with_config(PanelConfig::default())?;
//! panel.calibrate()?;
//! panel.set_knob(ParameterId::Pm25, 4095)?;
//!
//! let reading = panel.sample()?;
//! assert_eq!(reading.get(ParameterId::Pm25), Some(300.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Módulos
//!
//! - [`analog`] - Canais do ADC e mapeamento linear
//! - [`fallback`] - Valores de substituição
//! - [`raw`] - Amostras brutas
//! - [`conditioning`] - Amostra bruta → leitura
//! - [`panel`] - Bancada simulada (modo Sensor)
//! - [`replay`] - Reprodução de JSON lines
//! - [`error`] - Tratamento de erros

pub mod analog;
pub mod conditioning;
pub mod error;
pub mod fallback;
pub mod panel;
pub mod raw;
pub mod replay;

pub use analog::{ADC_MAX, AnalogChannel, DHT_PIN, map_range};
pub use conditioning::{Conditioned, SignalConditioner};
pub use error::{EnvironmentError, EnvironmentResult};
pub use fallback::{DEFAULT_HUMIDITY, DEFAULT_TEMPERATURE, FallbackTable};
pub use panel::{FIRMWARE_PARAMETERS, PanelConfig, SimulatedPanel};
pub use raw::{RawSample, RawValue};
pub use replay::ScriptedSource;

#[cfg(test)]
mod tests;
