//! Estado dos atuadores derivado de uma classificação

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Saída física comandada pelo motor de decisão
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActuatorKind {
    /// LED vermelho de alarme
    Alarm,
    /// LED verde do ventilador/purificador
    Fan,
    /// LED azul de ventilação
    Vent,
}

impl ActuatorKind {
    pub const ALL: [ActuatorKind; 3] = [ActuatorKind::Alarm, ActuatorKind::Fan, ActuatorKind::Vent];

    pub fn label(&self) -> &'static str {
        match self {
            ActuatorKind::Alarm => "ALARM",
            ActuatorKind::Fan => "FAN",
            ActuatorKind::Vent => "VENT",
        }
    }
}

impl fmt::Display for ActuatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActuatorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alarm" => Ok(ActuatorKind::Alarm),
            "fan" => Ok(ActuatorKind::Fan),
            "vent" | "ventilation" => Ok(ActuatorKind::Vent),
            _ => Err(CoreError::UnknownActuator(s.to_string())),
        }
    }
}

/// Três saídas booleanas independentes, recalculadas a cada ciclo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActuatorState {
    pub alarm: bool,
    pub fan: bool,
    pub vent: bool,
}

impl ActuatorState {
    pub fn new(alarm: bool, fan: bool, vent: bool) -> Self {
        Self { alarm, fan, vent }
    }

    /// Todas as saídas desligadas
    pub fn off() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ActuatorKind) -> bool {
        match kind {
            ActuatorKind::Alarm => self.alarm,
            ActuatorKind::Fan => self.fan,
            ActuatorKind::Vent => self.vent,
        }
    }

    /// Cópia com uma saída alterada
    pub fn with(mut self, kind: ActuatorKind, on: bool) -> Self {
        match kind {
            ActuatorKind::Alarm => self.alarm = on,
            ActuatorKind::Fan => self.fan = on,
            ActuatorKind::Vent => self.vent = on,
        }
        self
    }

    /// Saídas energizadas
    pub fn active(&self) -> Vec<ActuatorKind> {
        ActuatorKind::ALL.into_iter().filter(|kind| self.get(*kind)).collect()
    }

    pub fn is_idle(&self) -> bool {
        !(self.alarm || self.fan || self.vent)
    }

    /// Saídas que mudam entre `self` e `next`
    pub fn changes(&self, next: &ActuatorState) -> Vec<ActuatorKind> {
        ActuatorKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind) != next.get(*kind))
            .collect()
    }
}

impl fmt::Display for ActuatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_off = |on: bool| if on { "ON" } else { "OFF" };
        write!(
            f,
            "ALARM:{} FAN:{} VENT:{}",
            on_off(self.alarm),
            on_off(self.fan),
            on_off(self.vent)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_off() {
        let state = ActuatorState::default();
        assert!(state.is_idle());
        assert_eq!(state, ActuatorState::off());
        assert!(state.active().is_empty());
    }

    #[test]
    fn test_get_and_with() {
        let state = ActuatorState::off().with(ActuatorKind::Vent, true);
        assert!(state.get(ActuatorKind::Vent));
        assert!(!state.get(ActuatorKind::Alarm));
        assert_eq!(state.active(), vec![ActuatorKind::Vent]);
    }

    #[test]
    fn test_changes() {
        let before = ActuatorState::new(true, false, false);
        let after = ActuatorState::new(false, false, true);
        assert_eq!(before.changes(&after), vec![ActuatorKind::Alarm, ActuatorKind::Vent]);
        assert!(after.changes(&after).is_empty());
    }

    #[test]
    fn test_display() {
        let state = ActuatorState::new(true, false, true);
        assert_eq!(state.to_string(), "ALARM:ON FAN:OFF VENT:ON");
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("Fan".parse::<ActuatorKind>().unwrap(), ActuatorKind::Fan);
        assert_eq!("ventilation".parse::<ActuatorKind>().unwrap(), ActuatorKind::Vent);
        assert!("buzzer".parse::<ActuatorKind>().is_err());
    }
}
