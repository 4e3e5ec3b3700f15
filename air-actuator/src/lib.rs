//! # 🚨 air-actuator: Saídas do Monitor
//!
//! Implementa o trait `Actuator` do core para as três saídas do monitor e
//! agrupa-as num banco que aplica um `ActuatorState` de forma atômica.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │               ActuatorBank                │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐   │
//! │  │  ALARM   │ │   FAN    │ │   VENT   │   │
//! │  │ GPIO 4   │ │ GPIO 5   │ │ GPIO 2   │   │
//! │  └──────────┘ └──────────┘ └──────────┘   │
//! │      apply(ActuatorState): tudo ou nada   │
//! └───────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use air_actuator::ActuatorBank;
//! use air_core::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut bank = ActuatorBank::leds();
//! let changed = bank.apply(&ActuatorState::new(true, true, false))?;
//!
//! assert_eq!(changed, vec![ActuatorKind::Alarm, ActuatorKind::Fan]);
//! assert_eq!(bank.snapshot().to_string(), "ALARM:ON FAN:ON VENT:OFF");
//! # Ok(())
//! # }
//! ```
//!
//! ## Módulos
//!
//! - [`led`] - Saída digital (LED)
//! - [`bank`] - Banco atômico de três saídas
//! - [`error`] - Tratamento de erros

pub mod bank;
pub mod error;
pub mod led;

pub use bank::ActuatorBank;
pub use error::{ActuatorError, ActuatorResult};
pub use led::{LedActuator, LedConfig, LedState, pins};

#[cfg(test)]
mod tests;
