//! Saída digital (LED) implementando `Actuator<Command = bool>`

use serde::{Deserialize, Serialize};

use air_core::prelude::*;
use air_core::traits::ActuatorError as CoreActuatorError;

use crate::error::{ActuatorError, ActuatorResult};

/// Pinos GPIO do firmware
pub mod pins {
    pub const ALARM: u8 = 4;
    pub const FAN: u8 = 5;
    pub const VENT: u8 = 2;
}

/// Configuração do LED
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedConfig {
    /// Nome da saída
    pub name: String,
    /// Pino GPIO
    pub pin: u8,
    /// Nível lógico invertido (LED ligado com o pino em LOW)
    pub active_low: bool,
}

impl LedConfig {
    /// Configuração de fábrica de uma saída
    pub fn factory(kind: ActuatorKind) -> Self {
        let pin = match kind {
            ActuatorKind::Alarm => pins::ALARM,
            ActuatorKind::Fan => pins::FAN,
            ActuatorKind::Vent => pins::VENT,
        };
        Self {
            name: kind.label().to_ascii_lowercase(),
            pin,
            active_low: false,
        }
    }
}

/// Estado interno do LED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedState {
    pub on: bool,
    pub status: ActuatorStatus,
    /// Mudanças de nível desde o último reset
    pub toggles: u64,
}

impl LedState {
    fn new() -> Self {
        Self {
            on: false,
            status: ActuatorStatus::Ready,
            toggles: 0,
        }
    }
}

/// LED ligado a um pino GPIO
#[derive(Debug, Clone)]
pub struct LedActuator {
    config: LedConfig,
    state: LedState,
}

impl LedActuator {
    /// Saída de fábrica (alarm 4, fan 5, vent 2)
    pub fn new(kind: ActuatorKind) -> Self {
        Self {
            config: LedConfig::factory(kind),
            state: LedState::new(),
        }
    }

    /// Cria com configuração específica
    pub fn with_config(config: LedConfig) -> ActuatorResult<Self> {
        if config.name.trim().is_empty() {
            return Err(ActuatorError::InvalidConfig("LED name must not be empty".into()));
        }
        Ok(Self {
            config,
            state: LedState::new(),
        })
    }

    pub fn config(&self) -> &LedConfig {
        &self.config
    }

    pub fn state(&self) -> LedState {
        self.state
    }

    pub fn pin(&self) -> u8 {
        self.config.pin
    }

    pub fn is_on(&self) -> bool {
        self.state.on
    }

    /// Nível elétrico do pino (HIGH = true)
    pub fn level(&self) -> bool {
        self.state.on != self.config.active_low
    }

    pub fn toggles(&self) -> u64 {
        self.state.toggles
    }

    /// Liga ou desliga a saída
    pub fn set(&mut self, on: bool) -> ActuatorResult<()> {
        match self.state.status {
            ActuatorStatus::Fault => {
                return Err(ActuatorError::Fault(format!(
                    "{} (pin {}) in fault state",
                    self.config.name, self.config.pin
                )));
            }
            ActuatorStatus::Busy => return Err(ActuatorError::Busy),
            ActuatorStatus::Off => {
                return Err(ActuatorError::InvalidState(format!(
                    "{} is emergency stopped; reset first",
                    self.config.name
                )));
            }
            ActuatorStatus::Ready => {}
        }

        if self.state.on != on {
            self.state.on = on;
            self.state.toggles += 1;
        }
        Ok(())
    }

    /// Marca a saída como defeituosa (driver queimado, curto no pino)
    pub fn inject_fault(&mut self) {
        self.state.status = ActuatorStatus::Fault;
    }
}

impl Actuator for LedActuator {
    type Command = bool;

    fn send(&mut self, cmd: Self::Command) -> Result<(), CoreActuatorError> {
        self.set(cmd).map_err(|e| e.into())
    }

    fn status(&self) -> ActuatorStatus {
        self.state.status
    }

    fn emergency_stop(&mut self) -> Result<(), CoreActuatorError> {
        if self.state.on {
            self.state.on = false;
            self.state.toggles += 1;
        }
        self.state.status = ActuatorStatus::Off;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), CoreActuatorError> {
        self.state = LedState::new();
        Ok(())
    }
}

impl AirComponent for LedActuator {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn is_ready(&self) -> bool {
        self.state.status == ActuatorStatus::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_pins() {
        assert_eq!(LedActuator::new(ActuatorKind::Alarm).pin(), 4);
        assert_eq!(LedActuator::new(ActuatorKind::Fan).pin(), 5);
        assert_eq!(LedActuator::new(ActuatorKind::Vent).pin(), 2);
        assert_eq!(LedActuator::new(ActuatorKind::Vent).name(), "vent");
    }

    #[test]
    fn test_set_counts_toggles() {
        let mut led = LedActuator::new(ActuatorKind::Fan);
        led.set(true).unwrap();
        led.set(true).unwrap();
        led.set(false).unwrap();
        assert!(!led.is_on());
        assert_eq!(led.toggles(), 2);
    }

    #[test]
    fn test_active_low_level() {
        let mut config = LedConfig::factory(ActuatorKind::Alarm);
        config.active_low = true;
        let mut led = LedActuator::with_config(config).unwrap();

        assert!(led.level());
        led.set(true).unwrap();
        assert!(!led.level());
    }

    #[test]
    fn test_fault_rejects_commands() {
        let mut led = LedActuator::new(ActuatorKind::Alarm);
        led.inject_fault();
        assert!(!led.is_ready());
        assert!(matches!(led.set(true), Err(ActuatorError::Fault(_))));
        assert!(matches!(led.send(true), Err(CoreActuatorError::Fault(_))));
    }

    #[test]
    fn test_emergency_stop_and_reset() {
        let mut led = LedActuator::new(ActuatorKind::Vent);
        led.send(true).unwrap();

        led.emergency_stop().unwrap();
        assert!(!led.is_on());
        assert_eq!(led.status(), ActuatorStatus::Off);
        assert!(matches!(led.set(true), Err(ActuatorError::InvalidState(_))));

        led.reset().unwrap();
        assert_eq!(led.status(), ActuatorStatus::Ready);
        assert_eq!(led.toggles(), 0);
        assert!(led.send(true).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut config = LedConfig::factory(ActuatorKind::Fan);
        config.name = " ".into();
        assert!(LedActuator::with_config(config).is_err());
    }
}
